//! Git integration layer.
//!
//! This module wraps the actual backend implementation (`cli_backend`),
//! which shells out to the `git` binary, and re-exports only the stable
//! operations the sync engine needs.
//!
//! The idea is to hide the invocation mechanism so that an in-process
//! backend could be swapped in later without affecting the rest of the
//! codebase.

mod cli_backend;

pub use cli_backend::{
    RepoState, clone_mirror, clone_worktree, latest_ref_date, probe_state, pull_worktree,
    update_mirror,
};
