//! Time source for timed hooks.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time source, measured from an arbitrary origin.
pub trait Clock {
	fn now(&self) -> Duration;
}

/// Wall clock, measured from its construction.
#[derive(Debug)]
pub struct SystemClock {
	origin: Instant,
}

impl SystemClock {
	pub fn new() -> Self {
		Self {
			origin: Instant::now(),
		}
	}
}

impl Default for SystemClock {
	fn default() -> Self {
		Self::new()
	}
}

impl Clock for SystemClock {
	fn now(&self) -> Duration {
		self.origin.elapsed()
	}
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
	now: Cell<Duration>,
}

impl ManualClock {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn advance(&self, by: Duration) {
		self.now.set(self.now.get() + by);
	}
}

impl Clock for ManualClock {
	fn now(&self) -> Duration {
		self.now.get()
	}
}
