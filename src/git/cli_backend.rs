use anyhow::{Context, Result, anyhow};
use log::debug;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Captured result of one git invocation.
struct GitOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

/// Run `git` with the given arguments, scoped to `dir` when provided.
///
/// A non-zero exit status is reported through [`GitOutput`], never as an
/// `Err`; how to interpret a failed command is the caller's decision.
/// `Err` means the process could not be spawned at all (git missing from
/// PATH, or the working directory is not enterable).
fn run_git(dir: Option<&Path>, args: &[&str]) -> Result<GitOutput> {
    let mut cmd = Command::new("git");
    if let Some(d) = dir {
        cmd.current_dir(d);
    }
    cmd.args(args);

    debug!("running git {}", args.join(" "));

    let out = cmd
        .output()
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;
    Ok(GitOutput {
        success: out.status.success(),
        stdout: String::from_utf8_lossy(&out.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
    })
}

/// Classification of a local mirror path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoState {
    /// The path does not exist as a directory.
    Absent,
    /// git confirms a bare repository (a healthy mirror).
    BareMirror,
    /// git confirms a checkout with a working tree.
    WorkTree,
    /// The path exists but git rejects it; carries the raw diagnostic.
    Unusable(String),
}

/// Probe a local path without mutating anything.
///
/// Only an affirmative answer from git promotes a path to [`RepoState::BareMirror`]
/// or [`RepoState::WorkTree`]; any failure of the introspection commands
/// degrades to [`RepoState::Unusable`], so a half-written or foreign
/// directory is surfaced instead of blindly updated.
pub fn probe_state(path: &Path) -> RepoState {
    if !path.exists() {
        return RepoState::Absent;
    }
    if !path.is_dir() {
        return RepoState::Unusable("not a directory".to_string());
    }

    match run_git(Some(path), &["rev-parse", "--is-bare-repository"]) {
        Ok(out) if out.success && out.stdout == "true" => return RepoState::BareMirror,
        Ok(out) if out.success => {}
        Ok(out) => return RepoState::Unusable(out.stderr),
        Err(e) => return RepoState::Unusable(e.to_string()),
    }

    match run_git(Some(path), &["rev-parse", "--is-inside-work-tree"]) {
        Ok(out) if out.success && out.stdout == "true" => RepoState::WorkTree,
        Ok(out) if out.success => RepoState::Unusable("neither bare nor a work tree".to_string()),
        Ok(out) => RepoState::Unusable(out.stderr),
        Err(e) => RepoState::Unusable(e.to_string()),
    }
}

/// Create a bare, full-ref mirror clone of `url` at `dest`.
///
/// # Errors
/// Returns an error if the clone fails; the message carries git's stderr.
pub fn clone_mirror(url: &str, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let dest_arg = dest.to_string_lossy();
    let out = run_git(None, &["clone", "--mirror", url, &dest_arg])?;
    if !out.success {
        return Err(anyhow!("git clone --mirror {}: {}", url, out.stderr));
    }
    Ok(())
}

/// Fetch all remote refs into an existing mirror, removing local refs for
/// branches deleted upstream.
///
/// # Errors
/// Returns an error if the update fails; the message carries git's stderr.
pub fn update_mirror(dest: &Path) -> Result<()> {
    let out = run_git(Some(dest), &["remote", "update", "--prune"])?;
    if !out.success {
        return Err(anyhow!("git remote update: {}", out.stderr));
    }
    Ok(())
}

/// Create an ordinary clone of `url` with a checked-out working copy.
///
/// # Errors
/// Returns an error if the clone fails; the message carries git's stderr.
pub fn clone_worktree(url: &str, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let dest_arg = dest.to_string_lossy();
    let out = run_git(None, &["clone", url, &dest_arg])?;
    if !out.success {
        return Err(anyhow!("git clone {}: {}", url, out.stderr));
    }
    Ok(())
}

/// Pull the upstream branch into an existing work-tree clone.
///
/// # Errors
/// Returns an error if the pull fails; the message carries git's stderr.
pub fn pull_worktree(dest: &Path) -> Result<()> {
    let out = run_git(Some(dest), &["pull"])?;
    if !out.success {
        return Err(anyhow!("git pull: {}", out.stderr));
    }
    Ok(())
}

/// Author date of the most recent ref in the repository, in ISO-8601 form.
///
/// Returns `Ok(None)` for a repository that has no refs yet.
pub fn latest_ref_date(dest: &Path) -> Result<Option<String>> {
    let out = run_git(
        Some(dest),
        &[
            "for-each-ref",
            "--sort=-authordate",
            "--count=1",
            "--format=%(authordate:iso8601)",
        ],
    )?;
    if !out.success {
        return Err(anyhow!("git for-each-ref: {}", out.stderr));
    }
    if out.stdout.is_empty() {
        return Ok(None);
    }
    Ok(Some(out.stdout))
}
