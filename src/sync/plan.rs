use crate::git::RepoState;

/// Per-target synchronization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Bare, full-ref mirror for hosting/browsing.
    Mirror,
    /// Ordinary clone with a checked-out working copy.
    WorkTree,
}

/// Concrete operation chosen for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CloneMirror,
    UpdateMirror,
    CloneWorkTree,
    PullWorkTree,
    /// The path cannot be synced; carries the probe diagnostic.
    Reject(String),
}

/// Pick the action for a probed state.
///
/// An unusable path is never coerced into a usable one (nothing occupying
/// the path is ever deleted); the conflict is surfaced and the operator
/// decides.
pub fn select(state: RepoState, mode: SyncMode) -> Action {
    match (state, mode) {
        (RepoState::Absent, SyncMode::Mirror) => Action::CloneMirror,
        (RepoState::Absent, SyncMode::WorkTree) => Action::CloneWorkTree,
        (RepoState::BareMirror, _) => Action::UpdateMirror,
        (RepoState::WorkTree, _) => Action::PullWorkTree,
        (RepoState::Unusable(reason), _) => Action::Reject(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_clones_according_to_mode() {
        assert_eq!(
            select(RepoState::Absent, SyncMode::Mirror),
            Action::CloneMirror
        );
        assert_eq!(
            select(RepoState::Absent, SyncMode::WorkTree),
            Action::CloneWorkTree
        );
    }

    #[test]
    fn existing_repos_update_in_place() {
        assert_eq!(
            select(RepoState::BareMirror, SyncMode::Mirror),
            Action::UpdateMirror
        );
        assert_eq!(
            select(RepoState::BareMirror, SyncMode::WorkTree),
            Action::UpdateMirror
        );
        assert_eq!(
            select(RepoState::WorkTree, SyncMode::Mirror),
            Action::PullWorkTree
        );
        assert_eq!(
            select(RepoState::WorkTree, SyncMode::WorkTree),
            Action::PullWorkTree
        );
    }

    #[test]
    fn unusable_is_rejected_with_its_diagnostic() {
        let got = select(
            RepoState::Unusable("not a directory".to_string()),
            SyncMode::Mirror,
        );
        assert_eq!(got, Action::Reject("not a directory".to_string()));
    }
}
