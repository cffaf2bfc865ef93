//! Render passes, hook storage and the task pool.

use crate::clock::{Clock, SystemClock};
use crate::node::{ElementKind, Node};
use crate::scope::{ContextFrame, Contexts, Scope};
use crate::state::Invalidator;
use crate::view::{ElementView, View};
use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

/// Effect cleanup.
pub type Cleanup = Box<dyn FnOnce()>;

/// Upper bound of passes per [`Root::render`] call.
pub const MAX_PASSES: usize = 32;

#[derive(Default)]
pub(crate) struct EffectSlot {
	pub(crate) deps: Option<Box<dyn Any>>,
	pub(crate) cleanup: Option<Cleanup>,
}

struct PendingEffect {
	slot: Rc<RefCell<EffectSlot>>,
	run: Box<dyn FnOnce() -> Option<Cleanup>>,
}

/// Hook storage of one mounted component.
#[derive(Default)]
pub(crate) struct Instance {
	hooks: RefCell<Vec<Rc<dyn Any>>>,
	effects: RefCell<Vec<Rc<RefCell<EffectSlot>>>>,
}

impl Instance {
	pub(crate) fn hook<T: Any>(&self, slot: usize, init: impl FnOnce() -> Rc<T>) -> Rc<T> {
		if let Some(existing) = self.hooks.borrow().get(slot) {
			match Rc::clone(existing).downcast::<T>() {
				Ok(value) => return value,
				Err(_) => tracing::warn!(slot, "hook type changed between renders, resetting"),
			}
		}

		let value = init();
		let erased: Rc<dyn Any> = value.clone();
		let mut hooks = self.hooks.borrow_mut();
		if slot < hooks.len() {
			hooks[slot] = erased;
		} else {
			hooks.push(erased);
		}
		value
	}

	pub(crate) fn track_effect(&self, slot: Rc<RefCell<EffectSlot>>) {
		self.effects.borrow_mut().push(slot);
	}

	fn unmount(&self) {
		let effects: Vec<_> = self.effects.borrow_mut().drain(..).collect();
		for slot in effects {
			let cleanup = slot.borrow_mut().cleanup.take();
			if let Some(cleanup) = cleanup {
				cleanup();
			}
		}
	}
}

/// Handle for spawning tasks from effects and callbacks.
#[derive(Clone)]
pub struct Spawner(LocalSpawner);

impl Spawner {
	pub fn spawn(&self, task: impl Future<Output = ()> + 'static) {
		if let Err(err) = self.0.spawn_local(task) {
			tracing::error!(error = %err, "failed to spawn task");
		}
	}
}

impl std::fmt::Debug for Spawner {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("Spawner")
	}
}

/// Shared state behind a [`Root`].
pub(crate) struct Runtime {
	instances: RefCell<HashMap<String, Rc<Instance>>>,
	visited: RefCell<HashSet<String>>,
	pending_effects: RefCell<Vec<PendingEffect>>,
	invalidator: Invalidator,
	pool: RefCell<LocalPool>,
	spawner: LocalSpawner,
	clock: Rc<dyn Clock>,
	deadline: Cell<Option<Duration>>,
}

impl Runtime {
	fn new(clock: Rc<dyn Clock>) -> Self {
		let pool = LocalPool::new();
		let spawner = pool.spawner();
		Self {
			instances: RefCell::default(),
			visited: RefCell::default(),
			pending_effects: RefCell::default(),
			invalidator: Invalidator::default(),
			pool: RefCell::new(pool),
			spawner,
			clock,
			deadline: Cell::new(None),
		}
	}

	pub(crate) fn invalidator(&self) -> Invalidator {
		self.invalidator.clone()
	}

	pub(crate) fn clock(&self) -> Rc<dyn Clock> {
		Rc::clone(&self.clock)
	}

	pub(crate) fn request_deadline(&self, at: Duration) {
		let next = match self.deadline.get() {
			Some(current) if current <= at => current,
			_ => at,
		};
		self.deadline.set(Some(next));
	}

	pub(crate) fn queue_effect(&self, slot: Rc<RefCell<EffectSlot>>, run: Box<dyn FnOnce() -> Option<Cleanup>>) {
		self.pending_effects.borrow_mut().push(PendingEffect { slot, run });
	}

	pub(crate) fn spawner(&self) -> Spawner {
		Spawner(self.spawner.clone())
	}

	fn run_tasks(&self) {
		self.pool.borrow_mut().run_until_stalled();
	}

	fn instance(&self, path: &str) -> Rc<Instance> {
		if !self.visited.borrow_mut().insert(path.to_owned()) {
			tracing::warn!(path, "component rendered twice in one pass; duplicate keys?");
		}
		Rc::clone(self.instances.borrow_mut().entry(path.to_owned()).or_default())
	}

	fn pass(self: &Rc<Self>, root: &Node) -> View {
		self.visited.borrow_mut().clear();
		self.deadline.set(None);
		let view = self.render_node(root, &None, &child_path("", 0, root));
		self.sweep(false);
		view
	}

	/// Unmounts every instance not visited by the last pass, or all of them.
	fn sweep(&self, all: bool) {
		let stale: Vec<Rc<Instance>> = {
			let visited = self.visited.borrow();
			let mut instances = self.instances.borrow_mut();
			let keys: Vec<String> = instances
				.keys()
				.filter(|key| all || !visited.contains(*key))
				.cloned()
				.collect();
			keys.iter().filter_map(|key| instances.remove(key)).collect()
		};
		for instance in stale {
			instance.unmount();
		}
	}

	fn flush_effects(&self) -> usize {
		let pending: Vec<PendingEffect> = self.pending_effects.borrow_mut().drain(..).collect();
		let count = pending.len();
		for PendingEffect { slot, run } in pending {
			let previous = slot.borrow_mut().cleanup.take();
			if let Some(cleanup) = previous {
				cleanup();
			}
			let cleanup = run();
			slot.borrow_mut().cleanup = cleanup;
		}
		count
	}

	fn render_node(self: &Rc<Self>, node: &Node, contexts: &Contexts, path: &str) -> View {
		match node {
			Node::Empty => View::Empty,
			Node::Text(text) => View::Text(text.clone()),
			Node::Fragment(children) => View::Fragment(self.render_children(children, contexts, path)),
			Node::Provider(provider) => {
				let frame = Some(Rc::new(ContextFrame {
					type_id: provider.type_id,
					value: Rc::clone(&provider.value),
					parent: contexts.clone(),
				}));
				let segment = provider.key.as_deref().unwrap_or("p");
				let child_path = child_path(&format!("{path}/{segment}"), 0, &provider.child);
				self.render_node(&provider.child, &frame, &child_path)
			}
			Node::Element(el) => match el.kind() {
				ElementKind::Tag(tag) => {
					let mut view = ElementView::new(tag.clone());
					for (name, value) in &el.props().attrs {
						view = view.attr(name.clone(), value.clone());
					}
					for child in self.render_children(&el.props().children, contexts, path) {
						view = view.child(child);
					}
					View::Element(view)
				}
				ElementKind::Component { render, .. } => {
					let scope = Scope::new(Rc::clone(self), self.instance(path), contexts.clone());
					let output = render(&scope, el.props());
					self.render_node(&output, contexts, &child_path(path, 0, &output))
				}
			},
		}
	}

	fn render_children(self: &Rc<Self>, children: &[Node], contexts: &Contexts, path: &str) -> Vec<View> {
		children
			.iter()
			.enumerate()
			.map(|(index, child)| self.render_node(child, contexts, &child_path(path, index, child)))
			.collect()
	}
}

/// Identity of a child: keyed elements by key, others by position, both
/// qualified by the element name so a type change remounts.
fn child_path(parent: &str, index: usize, node: &Node) -> String {
	match node {
		Node::Element(el) => match el.key() {
			Some(key) => format!("{parent}/{key}:{}", el.name()),
			None => format!("{parent}/{index}:{}", el.name()),
		},
		_ => format!("{parent}/{index}"),
	}
}

/// A mounted component tree.
///
/// # Example
///
/// ```
/// use radmin_view::{Node, Props, Root};
///
/// let root = Root::new(Node::component("Hello", Props::new(), |scope, _| {
/// 	let count = scope.use_state(|| 0);
/// 	scope.use_effect((), {
/// 		let count = count.clone();
/// 		move || {
/// 			count.set(1);
/// 			None
/// 		}
/// 	});
/// 	Node::text(format!("count={}", count.get()))
/// }));
///
/// assert_eq!(root.render_to_string(), "count=1");
/// ```
pub struct Root {
	runtime: Rc<Runtime>,
	node: Node,
}

impl Root {
	pub fn new(node: impl Into<Node>) -> Self {
		Self::with_clock(node, Rc::new(SystemClock::new()))
	}

	pub fn with_clock(node: impl Into<Node>, clock: Rc<dyn Clock>) -> Self {
		Self {
			runtime: Rc::new(Runtime::new(clock)),
			node: node.into(),
		}
	}

	/// Renders until the tree settles: no pending tasks that can make
	/// progress, no effects left to run and no state written since the last
	/// pass.
	pub fn render(&self) -> View {
		let mut view = View::Empty;
		for pass in 0..MAX_PASSES {
			self.runtime.run_tasks();
			self.runtime.invalidator.clear();
			view = self.runtime.pass(&self.node);
			let effects = self.runtime.flush_effects();
			self.runtime.run_tasks();
			if effects == 0 && !self.runtime.invalidator.is_dirty() {
				tracing::trace!(passes = pass + 1, "render settled");
				return view;
			}
		}
		tracing::warn!(max = MAX_PASSES, "render did not settle; state keeps changing");
		view
	}

	pub fn render_to_string(&self) -> String {
		self.render().render_to_string()
	}

	/// Earliest clock reading at which a timed hook wants another render.
	pub fn next_deadline(&self) -> Option<Duration> {
		self.runtime.deadline.get()
	}

	/// Unmounts every component, running all effect cleanups.
	pub fn unmount(&self) {
		self.runtime.sweep(true);
	}
}

impl Drop for Root {
	fn drop(&mut self) {
		self.unmount();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::clock::ManualClock;
	use crate::node::{Element, Props, provide};
	use rstest::rstest;
	use std::cell::Cell;

	#[derive(Clone)]
	struct Theme(&'static str);

	fn themed() -> Node {
		Node::component("Themed", Props::new(), |scope, _| {
			let theme = scope.context::<Theme>().map(|t| t.0).unwrap_or("none");
			Node::text(theme)
		})
	}

	#[rstest]
	fn test_nearest_provider_wins() {
		// Arrange
		let tree = provide(
			Theme("outer"),
			Node::fragment([themed(), provide(Theme("inner"), themed())]),
		);

		// Act
		let html = Root::new(tree).render_to_string();

		// Assert
		assert_eq!(html, "outerinner");
	}

	#[rstest]
	fn test_missing_context() {
		assert_eq!(Root::new(themed()).render_to_string(), "none");
	}

	#[rstest]
	fn test_state_survives_passes() {
		// Arrange
		let renders = Rc::new(Cell::new(0));
		let counter = {
			let renders = Rc::clone(&renders);
			Node::component("Counter", Props::new(), move |scope, _| {
				renders.set(renders.get() + 1);
				let value = scope.use_state(|| 0);
				if value.get() < 3 {
					value.set(value.get() + 1);
				}
				Node::text(value.get().to_string())
			})
		};
		let root = Root::new(Element::tag("p").child(counter));

		// Act
		let html = root.render_to_string();

		// Assert
		assert_eq!(html, "<p>3</p>");
		assert_eq!(renders.get(), 4);
	}

	#[rstest]
	fn test_effect_runs_on_dependency_change_and_cleans_up() {
		// Arrange
		let log = Rc::new(RefCell::new(Vec::new()));
		let dep = Rc::new(Cell::new(1));
		let node = {
			let log = Rc::clone(&log);
			let dep = Rc::clone(&dep);
			Node::component("Effectful", Props::new(), move |scope, _| {
				let current = dep.get();
				let log = Rc::clone(&log);
				scope.use_effect(current, move || {
					log.borrow_mut().push(format!("run {current}"));
					Some(Box::new(move || log.borrow_mut().push(format!("clean {current}"))) as Cleanup)
				});
				Node::Empty
			})
		};
		let root = Root::new(node);

		// Act
		root.render();
		root.render();
		dep.set(2);
		root.render();
		root.unmount();

		// Assert
		assert_eq!(*log.borrow(), vec!["run 1", "clean 1", "run 2", "clean 2"]);
	}

	#[rstest]
	fn test_unvisited_components_unmount() {
		// Arrange
		let show = Rc::new(Cell::new(true));
		let cleaned = Rc::new(Cell::new(false));
		let child = {
			let cleaned = Rc::clone(&cleaned);
			Node::component("Child", Props::new(), move |scope, _| {
				let cleaned = Rc::clone(&cleaned);
				scope.use_effect((), move || Some(Box::new(move || cleaned.set(true)) as Cleanup));
				Node::text("child")
			})
		};
		let parent = {
			let show = Rc::clone(&show);
			Node::component("Parent", Props::new(), move |_, _| {
				if show.get() { child.clone() } else { Node::Empty }
			})
		};
		let root = Root::new(parent);

		// Act
		assert_eq!(root.render_to_string(), "child");
		show.set(false);
		let html = root.render_to_string();

		// Assert
		assert_eq!(html, "");
		assert!(cleaned.get());
	}

	#[rstest]
	fn test_spawned_task_updates_state() {
		// Arrange
		let (sender, receiver) = futures::channel::oneshot::channel::<&'static str>();
		let receiver = Rc::new(RefCell::new(Some(receiver)));
		let node = Node::component("Async", Props::new(), move |scope, _| {
			let value = scope.use_state(|| "pending");
			let spawner = scope.spawner();
			let receiver = receiver.borrow_mut().take();
			let target = value.clone();
			scope.use_effect((), move || {
				if let Some(receiver) = receiver {
					spawner.spawn(async move {
						if let Ok(resolved) = receiver.await {
							target.set(resolved);
						}
					});
				}
				None
			});
			Node::text(value.get())
		});
		let root = Root::new(node);

		// Act
		let before = root.render_to_string();
		sender.send("done").unwrap();
		let after = root.render_to_string();

		// Assert
		assert_eq!(before, "pending");
		assert_eq!(after, "done");
	}

	#[rstest]
	fn test_timeout_elapses_with_clock() {
		// Arrange
		let clock = Rc::new(ManualClock::new());
		let node = Node::component("Delayed", Props::new(), |scope, _| {
			if scope.use_timeout(Duration::from_secs(1)) {
				Node::text("late")
			} else {
				Node::text("early")
			}
		});
		let root = Root::with_clock(node, clock.clone());

		// Act & Assert
		assert_eq!(root.render_to_string(), "early");
		assert_eq!(root.next_deadline(), Some(Duration::from_secs(1)));
		clock.advance(Duration::from_millis(999));
		assert_eq!(root.render_to_string(), "early");
		clock.advance(Duration::from_millis(1));
		assert_eq!(root.render_to_string(), "late");
		assert_eq!(root.next_deadline(), None);
	}

	#[rstest]
	fn test_keyed_sibling_keeps_state_when_reordered() {
		// Arrange
		let reversed = Rc::new(Cell::new(false));
		let item = |key: &'static str, position: usize| {
			Element::component("Item", Props::new(), move |scope, _| {
				let first_position = scope.use_ref(|| position);
				Node::text(format!("{key}{}", first_position.borrow()))
			})
			.with_key(key)
		};
		let list = {
			let reversed = Rc::clone(&reversed);
			Node::component("List", Props::new(), move |_, _| {
				if reversed.get() {
					Node::fragment([item("b", 0).into(), item("a", 1).into()])
				} else {
					Node::fragment([item("a", 0).into(), item("b", 1).into()])
				}
			})
		};
		let root = Root::new(list);

		// Act
		assert_eq!(root.render_to_string(), "a0b1");
		reversed.set(true);

		// Assert
		assert_eq!(root.render_to_string(), "b1a0");
	}
}
