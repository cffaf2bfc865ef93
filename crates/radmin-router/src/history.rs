//! Session history with navigation blocking.
//!
//! A [`History`] is the host engine's source of truth for the current
//! location. Blockers registered with [`History::block`] are consulted before
//! every transition; a blocked transition is parked until the blocker that
//! stopped it calls [`History::proceed`] or [`History::reset`].

use crate::error::RouterError;
use crate::location::{RouterLocation, split_href};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// How the location is reflected in an href.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
	/// In-memory only; hrefs are plain paths.
	Memory,
	/// The path lives in the URL fragment; hrefs are `#/path`.
	Hash,
}

/// What kind of transition is being attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
	Push,
	Replace,
	Back,
	Forward,
	Go,
}

/// Identifies a registered blocker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockerId(u64);

impl fmt::Display for BlockerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Passed to blocker predicates.
#[derive(Debug, Clone)]
pub struct BlockAttempt {
	pub current: RouterLocation,
	pub next: RouterLocation,
	pub action: NavigationAction,
}

type BlockerFn = Rc<dyn Fn(&BlockAttempt) -> bool>;
type ListenerFn = Rc<dyn Fn()>;

enum Transition {
	Push(RouterLocation),
	Replace(RouterLocation),
	Go(usize),
}

struct PendingTransition {
	blocker: BlockerId,
	next: RouterLocation,
	transition: Transition,
}

/// Session history.
pub struct History {
	kind: HistoryKind,
	entries: RefCell<Vec<RouterLocation>>,
	index: Cell<usize>,
	next_id: Cell<u64>,
	blockers: RefCell<Vec<(BlockerId, BlockerFn)>>,
	pending: RefCell<Option<PendingTransition>>,
	listeners: RefCell<Vec<(ListenerId, ListenerFn)>>,
}

impl History {
	fn with_kind(kind: HistoryKind, initial: &str) -> Rc<Self> {
		let history = Self {
			kind,
			entries: RefCell::new(Vec::new()),
			index: Cell::new(0),
			next_id: Cell::new(0),
			blockers: RefCell::default(),
			pending: RefCell::default(),
			listeners: RefCell::default(),
		};
		let first = history.entry(initial, Value::Null);
		history.entries.borrow_mut().push(first);
		Rc::new(history)
	}

	/// In-memory history starting at `/`.
	pub fn memory() -> Rc<Self> {
		Self::with_kind(HistoryKind::Memory, "/")
	}

	/// In-memory history starting at `initial`.
	pub fn memory_at(initial: &str) -> Rc<Self> {
		Self::with_kind(HistoryKind::Memory, initial)
	}

	/// Hash history starting at `/`.
	pub fn hash() -> Rc<Self> {
		Self::with_kind(HistoryKind::Hash, "/")
	}

	/// Hash history starting at `initial`.
	pub fn hash_at(initial: &str) -> Rc<Self> {
		Self::with_kind(HistoryKind::Hash, initial)
	}

	pub fn kind(&self) -> HistoryKind {
		self.kind
	}

	/// The current entry.
	pub fn location(&self) -> RouterLocation {
		self.entries.borrow()[self.index.get()].clone()
	}

	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}

	pub fn index(&self) -> usize {
		self.index.get()
	}

	/// The href a link to `url` should carry.
	pub fn create_href(&self, url: &str) -> String {
		match self.kind {
			HistoryKind::Memory => url.to_owned(),
			HistoryKind::Hash => format!("#{url}"),
		}
	}

	pub fn push(&self, url: &str, state: Value) {
		let next = self.entry(url, state);
		self.attempt(NavigationAction::Push, next.clone(), Transition::Push(next));
	}

	pub fn replace(&self, url: &str, state: Value) {
		let next = self.entry(url, state);
		self.attempt(NavigationAction::Replace, next.clone(), Transition::Replace(next));
	}

	/// Moves `delta` entries, clamped to the ends of the stack.
	pub fn go(&self, delta: isize) {
		self.go_with(delta, NavigationAction::Go);
	}

	pub fn back(&self) {
		self.go_with(-1, NavigationAction::Back);
	}

	pub fn forward(&self) {
		self.go_with(1, NavigationAction::Forward);
	}

	fn go_with(&self, delta: isize, action: NavigationAction) {
		let last = self.len().saturating_sub(1);
		let target = self.index.get().saturating_add_signed(delta).min(last);
		if target == self.index.get() {
			return;
		}
		let next = self.entries.borrow()[target].clone();
		self.attempt(action, next, Transition::Go(target));
	}

	/// Registers a predicate consulted before every transition.
	pub fn block(&self, should_block: impl Fn(&BlockAttempt) -> bool + 'static) -> BlockerId {
		let id = BlockerId(self.next_id());
		self.blockers.borrow_mut().push((id, Rc::new(should_block)));
		id
	}

	/// Removes a blocker, dropping any transition it parked.
	pub fn unblock(&self, id: BlockerId) {
		self.blockers.borrow_mut().retain(|(blocker, _)| *blocker != id);
		let dropped = {
			let mut pending = self.pending.borrow_mut();
			let parked_here = pending.as_ref().is_some_and(|parked| parked.blocker == id);
			parked_here && pending.take().is_some()
		};
		if dropped {
			self.notify();
		}
	}

	/// The destination parked by blocker `id`, if any.
	pub fn pending_for(&self, id: BlockerId) -> Option<RouterLocation> {
		self.pending
			.borrow()
			.as_ref()
			.filter(|parked| parked.blocker == id)
			.map(|parked| parked.next.clone())
	}

	/// Commits the transition parked by blocker `id`.
	pub fn proceed(&self, id: BlockerId) -> Result<(), RouterError> {
		let parked = self.take_pending(id)?;
		tracing::debug!(blocker = %id, to = %parked.next.pathname, "blocked navigation proceeds");
		self.apply(parked.transition);
		Ok(())
	}

	/// Cancels the transition parked by blocker `id`.
	pub fn reset(&self, id: BlockerId) -> Result<(), RouterError> {
		let parked = self.take_pending(id)?;
		tracing::debug!(blocker = %id, to = %parked.next.pathname, "blocked navigation reset");
		self.notify();
		Ok(())
	}

	/// Calls `listener` after every change of location or pending state.
	pub fn listen(&self, listener: impl Fn() + 'static) -> ListenerId {
		let id = ListenerId(self.next_id());
		self.listeners.borrow_mut().push((id, Rc::new(listener)));
		id
	}

	pub fn unlisten(&self, id: ListenerId) {
		self.listeners.borrow_mut().retain(|(listener, _)| *listener != id);
	}

	fn take_pending(&self, id: BlockerId) -> Result<PendingTransition, RouterError> {
		let mut pending = self.pending.borrow_mut();
		if pending.as_ref().is_some_and(|parked| parked.blocker == id) {
			pending.take().ok_or(RouterError::NoPendingNavigation(id))
		} else {
			Err(RouterError::NoPendingNavigation(id))
		}
	}

	fn attempt(&self, action: NavigationAction, next: RouterLocation, transition: Transition) {
		let attempt = BlockAttempt {
			current: self.location(),
			next,
			action,
		};
		let blockers: Vec<(BlockerId, BlockerFn)> = self.blockers.borrow().iter().cloned().collect();
		for (id, should_block) in blockers {
			if should_block(&attempt) {
				tracing::debug!(blocker = %id, to = %attempt.next.pathname, ?action, "navigation blocked");
				*self.pending.borrow_mut() = Some(PendingTransition {
					blocker: id,
					next: attempt.next,
					transition,
				});
				self.notify();
				return;
			}
		}
		self.apply(transition);
	}

	fn apply(&self, transition: Transition) {
		match transition {
			Transition::Push(location) => {
				let mut entries = self.entries.borrow_mut();
				let index = self.index.get();
				entries.truncate(index + 1);
				entries.push(location);
				self.index.set(index + 1);
			}
			Transition::Replace(location) => {
				self.entries.borrow_mut()[self.index.get()] = location;
			}
			Transition::Go(target) => self.index.set(target),
		}
		let location = self.location();
		tracing::debug!(pathname = %location.pathname, search = %location.search, "location changed");
		self.notify();
	}

	fn notify(&self) {
		let listeners: Vec<ListenerFn> = self
			.listeners
			.borrow()
			.iter()
			.map(|(_, listener)| Rc::clone(listener))
			.collect();
		for listener in listeners {
			listener();
		}
	}

	fn next_id(&self) -> u64 {
		let id = self.next_id.get();
		self.next_id.set(id + 1);
		id
	}

	fn entry(&self, url: &str, state: Value) -> RouterLocation {
		let (pathname, search, hash) = split_href(url);
		RouterLocation {
			pathname,
			search,
			hash,
			state,
			key: format!("k{}", self.next_id()),
		}
	}
}

impl fmt::Debug for History {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("History")
			.field("kind", &self.kind)
			.field("entries", &self.entries.borrow())
			.field("index", &self.index.get())
			.field("blockers", &self.blockers.borrow().len())
			.field("pending", &self.pending.borrow().is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_push_replace_go() {
		// Arrange
		let history = History::memory();

		// Act
		history.push("/posts?page=2", json!({"from": "list"}));
		history.push("/posts/1", Value::Null);
		history.replace("/posts/2#top", Value::Null);
		history.go(-1);

		// Assert
		let location = history.location();
		assert_eq!(location.pathname, "/posts");
		assert_eq!(location.search, "?page=2");
		assert_eq!(location.state, json!({"from": "list"}));
		history.forward();
		assert_eq!(history.location().href(), "/posts/2#top");
		assert_eq!(history.len(), 3);
	}

	#[rstest]
	fn test_go_clamps_to_stack() {
		let history = History::memory();
		history.push("/a", Value::Null);
		history.go(-10);
		assert_eq!(history.location().pathname, "/");
		history.go(10);
		assert_eq!(history.location().pathname, "/a");
	}

	#[rstest]
	fn test_push_truncates_forward_entries() {
		let history = History::memory();
		history.push("/a", Value::Null);
		history.push("/b", Value::Null);
		history.back();
		history.push("/c", Value::Null);
		assert_eq!(history.len(), 3);
		history.forward();
		assert_eq!(history.location().pathname, "/c");
	}

	#[rstest]
	fn test_keys_are_unique() {
		let history = History::memory();
		let first = history.location().key;
		history.push("/a", Value::Null);
		assert_ne!(history.location().key, first);
	}

	#[rstest]
	fn test_hash_history_href() {
		assert_eq!(History::hash().create_href("/posts"), "#/posts");
		assert_eq!(History::memory().create_href("/posts"), "/posts");
	}

	#[rstest]
	fn test_blocked_transition_proceeds() {
		// Arrange
		let history = History::memory();
		let blocker = history.block(|attempt| attempt.next.pathname == "/leave");

		// Act
		history.push("/leave", Value::Null);

		// Assert
		assert_eq!(history.location().pathname, "/");
		assert_eq!(history.pending_for(blocker).map(|l| l.pathname), Some("/leave".into()));
		history.proceed(blocker).unwrap();
		assert_eq!(history.location().pathname, "/leave");
		assert!(history.pending_for(blocker).is_none());
	}

	#[rstest]
	fn test_blocked_transition_resets() {
		let history = History::memory();
		let blocker = history.block(|_| true);

		history.push("/leave", Value::Null);
		history.reset(blocker).unwrap();

		assert_eq!(history.location().pathname, "/");
		assert_eq!(history.reset(blocker), Err(RouterError::NoPendingNavigation(blocker)));
	}

	#[rstest]
	fn test_blocker_sees_back_action() {
		let history = History::memory();
		history.push("/a", Value::Null);
		let seen = Rc::new(RefCell::new(None));
		let blocker = {
			let seen = Rc::clone(&seen);
			history.block(move |attempt| {
				*seen.borrow_mut() = Some(attempt.action);
				false
			})
		};

		history.back();

		assert_eq!(*seen.borrow(), Some(NavigationAction::Back));
		assert!(history.pending_for(blocker).is_none());
		assert_eq!(history.location().pathname, "/");
	}

	#[rstest]
	fn test_unblock_drops_pending() {
		let history = History::memory();
		let blocker = history.block(|_| true);
		history.push("/a", Value::Null);

		history.unblock(blocker);
		history.push("/b", Value::Null);

		assert!(history.pending_for(blocker).is_none());
		assert_eq!(history.location().pathname, "/b");
	}

	#[rstest]
	fn test_listeners_fire_on_change() {
		let history = History::memory();
		let calls = Rc::new(Cell::new(0));
		let id = {
			let calls = Rc::clone(&calls);
			history.listen(move || calls.set(calls.get() + 1))
		};

		history.push("/a", Value::Null);
		history.unlisten(id);
		history.push("/b", Value::Null);

		assert_eq!(calls.get(), 1);
	}
}
