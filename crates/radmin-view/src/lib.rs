//! # radmin-view
//!
//! The minimal component runtime the router and admin layers render through.
//!
//! A tree of [`Node`]s is mounted into a [`Root`]. Every call to
//! [`Root::render`] runs render passes until the tree settles and returns the
//! resulting [`View`]. Components receive a [`Scope`] giving them:
//!
//! - scoped contexts ([`provide`] / [`Scope::context`]), resolved top-down so a
//!   descendant always sees the values its ancestors established in the same
//!   pass,
//! - hooks keyed by call order ([`Scope::use_ref`], [`Scope::use_state`],
//!   [`Scope::use_effect`], [`Scope::use_timeout`]),
//! - a single-threaded task pool for asynchronous work ([`Scope::spawn_local`]).
//!
//! Everything is `!Send`: the model is one cooperative UI thread.

mod clock;
mod node;
mod runtime;
mod scope;
mod state;
mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use node::{Element, ElementKind, Node, Props, Provider, RenderFn, provide, provide_keyed};
pub use runtime::{Cleanup, MAX_PASSES, Root, Spawner};
pub use scope::Scope;
pub use state::{ByAddress, Invalidator, State};
pub use view::{ElementView, View};
