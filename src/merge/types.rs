//! Merge selection state.

use crate::economy::types::MinerId;
use crate::error::MergeError;

/// Interactive selection on the grid. Session-only, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected {
        id: MinerId,
        /// Miners that would accept a merge with `id`.
        targets: Vec<MinerId>,
    },
}

impl Selection {
    pub fn selected_id(&self) -> Option<MinerId> {
        match self {
            Selection::Idle => None,
            Selection::Selected { id, .. } => Some(*id),
        }
    }

    pub fn targets(&self) -> &[MinerId] {
        match self {
            Selection::Idle => &[],
            Selection::Selected { targets, .. } => targets,
        }
    }
}

/// What a click on a miner did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First click: miner selected, eligible targets computed.
    Selected { id: MinerId, targets: Vec<MinerId> },
    /// Same miner clicked twice.
    Deselected,
    /// Second click merged both miners into `id`.
    Merged { id: MinerId },
    /// Second click did not merge; selection is cleared anyway.
    MergeRejected(MergeError),
    /// Click on an id that no longer exists while nothing was selected.
    Ignored,
}
