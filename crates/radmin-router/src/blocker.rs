//! Navigation guards.

use crate::basename::{Basename, use_basename};
use crate::engine::use_router;
use crate::history::{BlockAttempt, BlockerId, History, NavigationAction};
use crate::location::RouterLocation;
use radmin_view::{ByAddress, Cleanup, Scope};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The history action of a blocked transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
	Pop,
	Push,
	Replace,
}

impl From<NavigationAction> for HistoryAction {
	fn from(action: NavigationAction) -> Self {
		match action {
			NavigationAction::Push => Self::Push,
			NavigationAction::Replace => Self::Replace,
			NavigationAction::Back | NavigationAction::Forward | NavigationAction::Go => Self::Pop,
		}
	}
}

/// What a blocker predicate gets to look at.
#[derive(Debug, Clone)]
pub struct BlockerContext {
	pub current_location: RouterLocation,
	pub next_location: RouterLocation,
	pub history_action: HistoryAction,
}

/// Either a fixed answer or a predicate over the attempted transition.
#[derive(Clone)]
pub enum ShouldBlock {
	Always(bool),
	When(Rc<dyn Fn(&BlockerContext) -> bool>),
}

impl ShouldBlock {
	pub fn when(predicate: impl Fn(&BlockerContext) -> bool + 'static) -> Self {
		Self::When(Rc::new(predicate))
	}

	fn evaluate(&self, context: &BlockerContext) -> bool {
		match self {
			Self::Always(block) => *block,
			Self::When(predicate) => predicate(context),
		}
	}
}

impl From<bool> for ShouldBlock {
	fn from(block: bool) -> Self {
		Self::Always(block)
	}
}

impl fmt::Debug for ShouldBlock {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Always(block) => f.debug_tuple("Always").field(block).finish(),
			Self::When(_) => f.write_str("When(..)"),
		}
	}
}

/// A callback of a blocked blocker.
#[derive(Clone)]
pub struct BlockerAction(Rc<dyn Fn()>);

impl BlockerAction {
	pub fn call(&self) {
		(self.0)()
	}
}

impl fmt::Debug for BlockerAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("BlockerAction")
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockerState {
	Unblocked,
	Blocked,
}

/// State of a navigation guard. `proceed` and `reset` only exist while a
/// transition is held.
#[derive(Debug, Clone)]
pub enum RouterBlocker {
	Unblocked,
	Blocked {
		proceed: BlockerAction,
		reset: BlockerAction,
		location: RouterLocation,
	},
}

impl RouterBlocker {
	pub fn state(&self) -> BlockerState {
		match self {
			Self::Unblocked => BlockerState::Unblocked,
			Self::Blocked { .. } => BlockerState::Blocked,
		}
	}

	/// Commits the held transition. No-op when unblocked.
	pub fn proceed(&self) {
		if let Self::Blocked { proceed, .. } = self {
			proceed.call();
		}
	}

	/// Drops the held transition. No-op when unblocked.
	pub fn reset(&self) {
		if let Self::Blocked { reset, .. } = self {
			reset.call();
		}
	}

	pub fn location(&self) -> Option<&RouterLocation> {
		match self {
			Self::Unblocked => None,
			Self::Blocked { location, .. } => Some(location),
		}
	}
}

fn relative(basename: &Basename, mut location: RouterLocation) -> RouterLocation {
	if let Some(pathname) = basename.strip(&location.pathname) {
		location.pathname = pathname;
	}
	location
}

/// Registers a navigation guard for the lifetime of the calling component.
///
/// The history keeps the predicate it was registered with, so the guard
/// reads `should_block` through a cell refreshed on every render.
pub fn use_blocker(scope: &Scope, should_block: impl Into<ShouldBlock>) -> RouterBlocker {
	let latest = scope.use_ref(|| ShouldBlock::Always(false));
	*latest.borrow_mut() = should_block.into();
	let registered: Rc<RefCell<Option<BlockerId>>> = scope.use_ref(|| None);

	let router = use_router(scope);
	let basename = use_basename(scope);
	let history = router.as_ref().map(|router| Rc::clone(router.history()));

	scope.use_effect((history.clone().map(ByAddress), basename.clone()), {
		let latest = Rc::clone(&latest);
		let registered = Rc::clone(&registered);
		let history = history.clone();
		let basename = basename.clone();
		move || {
			let history = history?;
			let id = history.block(move |attempt: &BlockAttempt| {
				let context = BlockerContext {
					current_location: relative(&basename, attempt.current.clone()),
					next_location: relative(&basename, attempt.next.clone()),
					history_action: attempt.action.into(),
				};
				latest.borrow().evaluate(&context)
			});
			*registered.borrow_mut() = Some(id);
			Some(Box::new(move || {
				history.unblock(id);
				registered.borrow_mut().take();
			}) as Cleanup)
		}
	});

	let (Some(history), Some(id)) = (history, *registered.borrow()) else {
		return RouterBlocker::Unblocked;
	};
	match history.pending_for(id) {
		Some(next) => RouterBlocker::Blocked {
			proceed: action(&history, id, History::proceed),
			reset: action(&history, id, History::reset),
			location: relative(&basename, next),
		},
		None => RouterBlocker::Unblocked,
	}
}

fn action(
	history: &Rc<History>,
	id: BlockerId,
	apply: fn(&History, BlockerId) -> Result<(), crate::error::RouterError>,
) -> BlockerAction {
	let history = Rc::clone(history);
	BlockerAction(Rc::new(move || {
		if let Err(err) = apply(&history, id) {
			tracing::warn!(error = %err, "blocker callback ignored");
		}
	}))
}
