use anyhow::Result;

use crate::config::load_config;
use crate::paths::paths;
use crate::sync::{SyncMode, build_jobs};

/// CLI command: print a human-readable list of mirror targets.
///
/// Each target is displayed with:
/// - name (or source, for identification)
/// - source location
/// - sync mode (`mirror` or `worktree`)
/// - resolved local path
///
/// Example output:
/// ```text
/// - deploy (https://git.example.org/infra/deploy.git) [mirror] /srv/git/deploy.git
/// - zsh-autosuggestions (https://github.com/zsh-users/zsh-autosuggestions.git) [worktree] /srv/git/zsh-autosuggestions
/// ```
///
/// # Errors
/// - Returns an error if `config.toml` cannot be loaded or parsed.
pub fn cmd_list() -> Result<()> {
    let p = paths()?;
    let cfg = load_config()?;
    let (jobs, skipped) = build_jobs(&cfg, &p);

    for j in &jobs {
        let mode = match j.mode {
            SyncMode::Mirror => "mirror",
            SyncMode::WorkTree => "worktree",
        };
        println!("- {} ({}) [{}] {}", j.display, j.url, mode, j.dest.display());
    }
    for name in &skipped {
        println!("- {} (no source) [skipped]", name);
    }
    Ok(())
}
