use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::git::latest_ref_date;

/// Relative location of the last-activity stamp inside a mirror.
///
/// The path and its plain-text ISO-8601 content are a compatibility
/// contract with repository web front-ends and must stay exactly as they
/// are.
const STAMP_FILE: &str = "info/web/last-modified";

/// Record the author date of the most recent ref under `repo`.
///
/// The date is written to `info/web/last-modified`, creating the containing
/// directory if absent. Returns the written timestamp, or `None` when the
/// repository has no refs to report yet (nothing is written in that case).
///
/// # Errors
/// Returns an error if the ref query fails or the stamp cannot be written.
pub fn record_last_modified(repo: &Path) -> Result<Option<String>> {
    let Some(date) = latest_ref_date(repo)? else {
        return Ok(None);
    };

    let stamp = repo.join(STAMP_FILE);
    if let Some(dir) = stamp.parent() {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    fs::write(&stamp, format!("{}\n", date))
        .with_context(|| format!("failed to write {}", stamp.display()))?;
    Ok(Some(date))
}
