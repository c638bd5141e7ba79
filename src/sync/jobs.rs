use std::path::PathBuf;

use crate::config::Config;
use crate::paths::Paths;

use super::plan::SyncMode;

/// Represents a single mirror synchronization job.
///
/// Each job corresponds to one entry in `config.toml` and contains all the
/// information needed to probe the local path and clone or update the
/// repository there.
#[derive(Debug, Clone)]
pub struct SyncJob {
    pub display: String,
    pub url: String,
    pub dest: PathBuf,
    pub mode: SyncMode,
}

/// Resolve the directory mirrors are placed under.
///
/// The `root` key in the configuration wins; otherwise the default
/// `mirrors` directory under the gitmir home is used.
pub fn mirror_root(cfg: &Config, p: &Paths) -> PathBuf {
    cfg.root.clone().unwrap_or_else(|| p.mirrors.clone())
}

/// Build synchronization jobs from the parsed configuration.
///
/// This function converts `Config.mirrors` into a list of [`SyncJob`]s in
/// configuration order. Entries with an empty `source` produce no job; their
/// display names are returned separately so the caller can report them as
/// skipped.
///
/// # Arguments
/// - `cfg`: The loaded configuration (`config.toml`).
/// - `p`: Paths struct naming the well-known directories.
///
/// # Returns
/// A tuple of:
/// - `Vec<SyncJob>`: List of jobs to execute during sync.
/// - `Vec<String>`: Display names of entries skipped for lack of a source.
pub fn build_jobs(cfg: &Config, p: &Paths) -> (Vec<SyncJob>, Vec<String>) {
    let root = mirror_root(cfg, p);
    let mut jobs: Vec<SyncJob> = Vec::new();
    let mut skipped: Vec<String> = Vec::new();

    for m in &cfg.mirrors {
        let mode = match m.mode.as_deref() {
            Some("worktree") => SyncMode::WorkTree,
            _ => SyncMode::Mirror,
        };

        let display = m
            .name
            .clone()
            .or_else(|| m.path.as_ref().map(|p| p.display().to_string()))
            .unwrap_or_else(|| m.source.clone());

        if m.source.trim().is_empty() {
            skipped.push(if display.is_empty() {
                "(no source)".to_string()
            } else {
                display
            });
            continue;
        }

        let dest = match &m.path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => root.join(p),
            None => root.join(default_dir_name(&m.source, mode)),
        };

        jobs.push(SyncJob {
            display,
            url: m.source.clone(),
            dest,
            mode,
        });
    }

    (jobs, skipped)
}

/// Directory name derived from a source location when the entry gives no
/// `path`.
///
/// `https://host/owner/repo.git` becomes `repo.git` for mirrors (bare clones
/// keep the conventional suffix) and `repo` for work trees.
fn default_dir_name(source: &str, mode: SyncMode) -> String {
    let base = source
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(source);
    let stem = base.strip_suffix(".git").unwrap_or(base);
    match mode {
        SyncMode::Mirror => format!("{}.git", stem),
        SyncMode::WorkTree => stem.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mirror;
    use std::path::Path;

    fn paths_for(base: &Path) -> Paths {
        Paths {
            mirrors: base.join("mirrors"),
            config: base.join("config.toml"),
        }
    }

    fn entry(source: &str) -> Mirror {
        Mirror {
            source: source.to_string(),
            path: None,
            mode: None,
            name: None,
        }
    }

    #[test]
    fn derives_dir_name_from_source() {
        assert_eq!(
            default_dir_name("https://example.test/owner/repo.git", SyncMode::Mirror),
            "repo.git"
        );
        assert_eq!(
            default_dir_name("https://example.test/owner/repo", SyncMode::Mirror),
            "repo.git"
        );
        assert_eq!(
            default_dir_name("git@example.test:owner/repo.git", SyncMode::WorkTree),
            "repo"
        );
        assert_eq!(
            default_dir_name("https://example.test/owner/repo/", SyncMode::WorkTree),
            "repo"
        );
    }

    #[test]
    fn resolves_relative_and_absolute_paths() {
        let p = paths_for(Path::new("/home/u/.config/gitmir"));
        let cfg = Config {
            root: None,
            mirrors: vec![
                Mirror {
                    path: Some(PathBuf::from("sub/a.git")),
                    ..entry("https://example.test/a.git")
                },
                Mirror {
                    path: Some(PathBuf::from("/srv/git/b.git")),
                    ..entry("https://example.test/b.git")
                },
            ],
        };

        let (jobs, skipped) = build_jobs(&cfg, &p);
        assert!(skipped.is_empty());
        assert_eq!(
            jobs[0].dest,
            Path::new("/home/u/.config/gitmir/mirrors/sub/a.git")
        );
        assert_eq!(jobs[1].dest, Path::new("/srv/git/b.git"));
    }

    #[test]
    fn root_overrides_the_default_base() {
        let p = paths_for(Path::new("/home/u/.config/gitmir"));
        let cfg = Config {
            root: Some(PathBuf::from("/srv/git")),
            mirrors: vec![entry("https://example.test/owner/repo.git")],
        };

        let (jobs, _) = build_jobs(&cfg, &p);
        assert_eq!(jobs[0].dest, Path::new("/srv/git/repo.git"));
        assert_eq!(jobs[0].mode, SyncMode::Mirror);
    }

    #[test]
    fn blank_sources_are_skipped_not_dropped() {
        let p = paths_for(Path::new("/tmp/gitmir"));
        let cfg = Config {
            root: None,
            mirrors: vec![
                entry(""),
                Mirror {
                    name: Some("named".to_string()),
                    ..entry("  ")
                },
                entry("https://example.test/ok.git"),
            ],
        };

        let (jobs, skipped) = build_jobs(&cfg, &p);
        assert_eq!(jobs.len(), 1);
        assert_eq!(skipped, vec!["(no source)".to_string(), "named".to_string()]);
    }

    #[test]
    fn worktree_mode_is_recognized() {
        let p = paths_for(Path::new("/tmp/gitmir"));
        let cfg = Config {
            root: None,
            mirrors: vec![Mirror {
                mode: Some("worktree".to_string()),
                ..entry("https://example.test/owner/repo.git")
            }],
        };

        let (jobs, _) = build_jobs(&cfg, &p);
        assert_eq!(jobs[0].mode, SyncMode::WorkTree);
        assert_eq!(jobs[0].dest, Path::new("/tmp/gitmir/mirrors/repo"));
    }
}
