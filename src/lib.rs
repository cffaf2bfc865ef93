//! # radmin
//!
//! A router-agnostic admin framework.
//!
//! radmin renders an admin (resources, custom routes, a dashboard) through a
//! pluggable router abstraction, so the same admin runs on its own hash
//! router or inside a host application's router.
//!
//! ## Crates
//!
//! - [`view`]: the component runtime everything renders through
//! - [`router`]: path matching, history, the host engine and the
//!   `Routes`/`Route`/`Outlet` reconciler behind a `RouterProvider`
//! - [`admin`]: resources, children configuration and the `Admin` builder
//!
//! ## Feature Flags
//!
//! - `router` - the router abstraction
//! - `admin` (default) - the admin layer, implies `router`
//!
//! ## Example
//!
//! ```
//! use radmin::router::{EngineRouter, History, route, router_root, routes};
//! use radmin::view::Root;
//! use std::rc::Rc;
//!
//! let history = History::memory_at("/comments");
//! let tree = routes([
//! 	route("/posts/*", "posts").into(),
//! 	route("/comments/*", "comments").into(),
//! ]);
//! let root = Root::new(router_root(Rc::new(EngineRouter::new(history, tree))));
//!
//! assert_eq!(root.render_to_string(), "comments");
//! ```

pub mod view;

#[cfg(feature = "router")]
pub mod router;

#[cfg(feature = "admin")]
pub mod admin;
