//! Component state cells.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Requests another render pass.
#[derive(Clone, Default)]
pub struct Invalidator(Rc<Cell<bool>>);

impl Invalidator {
	pub fn invalidate(&self) {
		self.0.set(true);
	}

	pub(crate) fn is_dirty(&self) -> bool {
		self.0.get()
	}

	pub(crate) fn clear(&self) {
		self.0.set(false);
	}
}

impl fmt::Debug for Invalidator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Invalidator").field(&self.0.get()).finish()
	}
}

/// A state cell returned by [`Scope::use_state`](crate::Scope::use_state).
///
/// Writes schedule a new render pass. Handles may be moved into effects and
/// tasks; they stay valid after the owning component unmounts, in which case
/// writes are simply never observed.
pub struct State<T> {
	cell: Rc<RefCell<T>>,
	invalidator: Invalidator,
}

impl<T> Clone for State<T> {
	fn clone(&self) -> Self {
		Self {
			cell: Rc::clone(&self.cell),
			invalidator: self.invalidator.clone(),
		}
	}
}

impl<T> State<T> {
	pub(crate) fn new(cell: Rc<RefCell<T>>, invalidator: Invalidator) -> Self {
		Self { cell, invalidator }
	}

	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.cell.borrow().clone()
	}

	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.cell.borrow())
	}

	pub fn set(&self, value: T) {
		*self.cell.borrow_mut() = value;
		self.invalidator.invalidate();
	}

	pub fn update(&self, f: impl FnOnce(&mut T)) {
		f(&mut self.cell.borrow_mut());
		self.invalidator.invalidate();
	}

	/// Writes only when the value differs, so equal writes cost no pass.
	pub fn set_if_changed(&self, value: T)
	where
		T: PartialEq,
	{
		if *self.cell.borrow() != value {
			self.set(value);
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("State").field(&self.cell.borrow()).finish()
	}
}

/// Compares an `Rc` by address, for use as an effect dependency.
pub struct ByAddress<T: ?Sized>(pub Rc<T>);

impl<T: ?Sized> PartialEq for ByAddress<T> {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl<T: ?Sized> Clone for ByAddress<T> {
	fn clone(&self) -> Self {
		Self(Rc::clone(&self.0))
	}
}

impl<T: ?Sized> fmt::Debug for ByAddress<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ByAddress({:p})", Rc::as_ptr(&self.0))
	}
}
