mod jobs;
mod plan;
mod progress;
mod stamp;

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::fs;
use std::time::Duration;

use crate::config::load_config;
use crate::git;
use crate::paths::paths;

use jobs::mirror_root;
use plan::{Action, select};
use progress::{err_style, ok_style, spinner_style};

pub(crate) use jobs::{SyncJob, build_jobs};
pub(crate) use plan::SyncMode;

/// What happened to one target during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Cloned,
    Updated,
    Skipped,
    Failed,
}

impl SyncAction {
    fn verb(self) -> &'static str {
        match self {
            SyncAction::Cloned => "cloned",
            SyncAction::Updated => "updated",
            SyncAction::Skipped => "skipped",
            SyncAction::Failed => "failed",
        }
    }
}

/// Per-target result of one pass. Consumed by the summary and the logs
/// only; never persisted.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub display: String,
    pub action: SyncAction,
    pub error: Option<String>,
}

/// Synchronize the mirrors defined in `config.toml`.
///
/// High-level flow:
/// 1. Ensure the directory layout under the gitmir home (the parent of
///    `config.toml`, then the resolved mirror root). A failure here is
///    fatal; no partial batch is attempted.
/// 2. Load configuration and build the job list (see [`jobs::build_jobs`]).
/// 3. Probe, decide, and execute each job **in parallel** with progress
///    spinners. A failing target is shown on its own line and logged as a
///    warning; the rest of the batch carries on.
/// 4. After a successful mirror clone/update, record the last-activity
///    stamp. A stamp failure downgrades to a warning and never reverts the
///    sync.
/// 5. Print a one-line summary of the pass.
///
/// Re-running the command is the retry mechanism; a run repairs whatever a
/// previous interrupted run left behind.
pub fn cmd_sync() -> Result<()> {
    let p = paths()?;
    if let Some(parent) = p.config.parent() {
        fs::create_dir_all(parent)?;
    }

    let cfg = load_config()?;
    if cfg.mirrors.is_empty() {
        eprintln!("no mirrors in {}", p.config.display());
        return Ok(());
    }

    let root = mirror_root(&cfg, &p);
    fs::create_dir_all(&root)
        .with_context(|| format!("failed to create mirror root {}", root.display()))?;

    let (jobs, skipped) = build_jobs(&cfg, &p);
    for name in &skipped {
        info!("{}: skipped, no source configured", name);
    }

    let mut outcomes = run_jobs(&jobs)?;
    outcomes.extend(skipped.into_iter().map(|display| SyncOutcome {
        display,
        action: SyncAction::Skipped,
        error: None,
    }));

    print_summary(&outcomes);
    Ok(())
}

/// Run all jobs in parallel, one spinner per target.
///
/// The worker pool is bounded so a large target set does not open one
/// network connection per mirror all at once. Results come back in job
/// order.
fn run_jobs(jobs: &[SyncJob]) -> Result<Vec<SyncOutcome>> {
    let mp = MultiProgress::new();
    let run_style = spinner_style();
    let done_style = ok_style();
    let fail_style = err_style();

    let mut bars: Vec<ProgressBar> = Vec::with_capacity(jobs.len());
    for j in jobs {
        let pb = mp.add(ProgressBar::new_spinner());
        pb.set_style(run_style.clone());
        pb.set_message(format!("syncing {}", j.display));
        pb.enable_steady_tick(Duration::from_millis(80));
        bars.push(pb);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get().clamp(1, 8))
        .build()
        .context("failed to build sync worker pool")?;

    let outcomes = pool.install(|| {
        jobs.par_iter()
            .enumerate()
            .map(|(idx, job)| {
                let pb = &bars[idx];
                let outcome = sync_target(job);
                match &outcome.error {
                    None => {
                        pb.set_style(done_style.clone());
                        pb.finish_with_message(format!(
                            "{} {}",
                            outcome.action.verb(),
                            job.display
                        ));
                    }
                    Some(e) => {
                        pb.set_style(fail_style.clone());
                        pb.finish_with_message(format!("syncing {} (error: {})", job.display, e));
                    }
                }
                outcome
            })
            .collect()
    });

    Ok(outcomes)
}

/// Probe, decide, and execute one target, then record its activity stamp.
///
/// Every failure is captured in the returned outcome; nothing escapes this
/// function to abort sibling targets. The local path is re-probed from
/// scratch on every pass, so state left behind by an earlier run is picked
/// up here and nowhere else.
fn sync_target(job: &SyncJob) -> SyncOutcome {
    let state = git::probe_state(&job.dest);
    debug!("{}: probed {:?}", job.display, state);

    let (action, res) = match select(state, job.mode) {
        Action::CloneMirror => (SyncAction::Cloned, git::clone_mirror(&job.url, &job.dest)),
        Action::CloneWorkTree => (SyncAction::Cloned, git::clone_worktree(&job.url, &job.dest)),
        Action::UpdateMirror => (SyncAction::Updated, git::update_mirror(&job.dest)),
        Action::PullWorkTree => (SyncAction::Updated, git::pull_worktree(&job.dest)),
        Action::Reject(reason) => {
            warn!(
                "{} ({} -> {}): unusable path: {}",
                job.display,
                job.url,
                job.dest.display(),
                reason
            );
            return SyncOutcome {
                display: job.display.clone(),
                action: SyncAction::Failed,
                error: Some(reason),
            };
        }
    };

    match res {
        Ok(()) => {
            info!(
                "{}: {} {} -> {}",
                job.display,
                action.verb(),
                job.url,
                job.dest.display()
            );
            if job.mode == SyncMode::Mirror {
                match stamp::record_last_modified(&job.dest) {
                    Ok(Some(date)) => debug!("{}: last-modified {}", job.display, date),
                    Ok(None) => debug!("{}: no refs yet, stamp not written", job.display),
                    Err(e) => warn!("{}: could not record last-modified: {:#}", job.display, e),
                }
            }
            SyncOutcome {
                display: job.display.clone(),
                action,
                error: None,
            }
        }
        Err(e) => {
            warn!(
                "{} ({} -> {}): {:#}",
                job.display,
                job.url,
                job.dest.display(),
                e
            );
            SyncOutcome {
                display: job.display.clone(),
                action: SyncAction::Failed,
                error: Some(format!("{:#}", e)),
            }
        }
    }
}

/// One-line pass summary for the operator.
fn print_summary(outcomes: &[SyncOutcome]) {
    let count = |a: SyncAction| outcomes.iter().filter(|o| o.action == a).count();
    let cloned = count(SyncAction::Cloned);
    let updated = count(SyncAction::Updated);
    let skipped = count(SyncAction::Skipped);
    let failed = count(SyncAction::Failed);

    let mut line = format!(
        "{} cloned, {} updated",
        cloned.to_string().green(),
        updated.to_string().green()
    );
    if skipped > 0 {
        line.push_str(&format!(", {} skipped", skipped.to_string().yellow()));
    }
    if failed > 0 {
        line.push_str(&format!(", {} failed", failed.to_string().red()));
    }
    println!("{}", line);
}
