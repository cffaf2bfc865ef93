//! Per-component render scope: contexts and hooks.

use crate::runtime::{Cleanup, EffectSlot, Instance, Runtime, Spawner};
use crate::state::{Invalidator, State};
use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

/// One link of the persistent context chain.
pub(crate) struct ContextFrame {
	pub(crate) type_id: TypeId,
	pub(crate) value: Rc<dyn Any>,
	pub(crate) parent: Option<Rc<ContextFrame>>,
}

pub(crate) type Contexts = Option<Rc<ContextFrame>>;

/// Handed to every component render function.
///
/// Hooks are identified by call order, so a component must call the same
/// hooks in the same order on every render.
pub struct Scope {
	runtime: Rc<Runtime>,
	instance: Rc<Instance>,
	contexts: Contexts,
	cursor: Cell<usize>,
}

impl Scope {
	pub(crate) fn new(runtime: Rc<Runtime>, instance: Rc<Instance>, contexts: Contexts) -> Self {
		Self {
			runtime,
			instance,
			contexts,
			cursor: Cell::new(0),
		}
	}

	/// Returns the nearest provided value of type `T`.
	pub fn context<T: Clone + 'static>(&self) -> Option<T> {
		let mut frame = self.contexts.as_ref();
		while let Some(current) = frame {
			if current.type_id == TypeId::of::<T>() {
				return current.value.downcast_ref::<T>().cloned();
			}
			frame = current.parent.as_ref();
		}
		None
	}

	fn next_slot(&self) -> usize {
		let slot = self.cursor.get();
		self.cursor.set(slot + 1);
		slot
	}

	/// A mutable cell that survives re-renders. Writing to it does not
	/// schedule a render.
	pub fn use_ref<T: 'static>(&self, init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
		let slot = self.next_slot();
		self.instance.hook(slot, || Rc::new(RefCell::new(init())))
	}

	/// A state cell whose writes schedule a render pass.
	pub fn use_state<T: 'static>(&self, init: impl FnOnce() -> T) -> State<T> {
		let cell = self.use_ref(init);
		State::new(cell, self.runtime.invalidator())
	}

	/// Runs `effect` after the pass whenever `deps` differs from the previous
	/// render. The returned cleanup runs before the next effect and on unmount.
	pub fn use_effect<D, F>(&self, deps: D, effect: F)
	where
		D: PartialEq + 'static,
		F: FnOnce() -> Option<Cleanup> + 'static,
	{
		let slot = self.next_slot();
		let effect_slot = self.instance.hook(slot, || {
			let effect_slot = Rc::new(RefCell::new(EffectSlot::default()));
			self.instance.track_effect(Rc::clone(&effect_slot));
			effect_slot
		});

		let changed = effect_slot
			.borrow()
			.deps
			.as_ref()
			.and_then(|previous| previous.downcast_ref::<D>())
			.is_none_or(|previous| previous != &deps);
		if changed {
			effect_slot.borrow_mut().deps = Some(Box::new(deps));
			self.runtime.queue_effect(effect_slot, Box::new(effect));
		}
	}

	/// `true` once `delay` has elapsed since this hook first ran.
	pub fn use_timeout(&self, delay: Duration) -> bool {
		let clock = self.runtime.clock();
		let started = *self.use_ref(|| clock.now()).borrow();
		let deadline = started + delay;
		let elapsed = clock.now() >= deadline;
		if !elapsed {
			self.runtime.request_deadline(deadline);
		}
		elapsed
	}

	/// Spawns a task on the runtime's single-threaded pool.
	pub fn spawn_local(&self, task: impl Future<Output = ()> + 'static) {
		self.runtime.spawner().spawn(task);
	}

	/// A spawn handle that can be moved into effects.
	pub fn spawner(&self) -> Spawner {
		self.runtime.spawner()
	}

	/// A handle that schedules another pass when invoked.
	pub fn invalidator(&self) -> Invalidator {
		self.runtime.invalidator()
	}
}
