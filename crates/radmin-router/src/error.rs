//! Router errors.

use crate::history::BlockerId;

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RouterError {
	/// A routing hook ran outside any mounted router.
	#[error("no router found in context; mount the tree inside a router or a router wrapper")]
	OutsideRouter,
	/// `proceed`/`reset` was called for a blocker with nothing pending.
	#[error("blocker {0} has no pending navigation")]
	NoPendingNavigation(BlockerId),
}
