//! # radmin-router
//!
//! The router abstraction of radmin.
//!
//! ## Architecture
//!
//! - [`match_path`]: segment-based, linear-time path matching
//! - [`History`]: session history (memory or hash) with navigation blocking
//! - [`EngineRouter`]: a configuration-first host router over a history
//! - adapter hooks ([`use_location`], [`use_navigate`], [`use_params`],
//!   [`use_match`], [`use_blocker`]) exposing the host in router-agnostic
//!   shapes, basename applied at the boundary
//! - [`routes`] / [`route`] / [`outlet`]: declarative routes matched at render
//!   time, nested through immutable [`RoutingFrame`] contexts
//! - [`router_wrapper`]: reuses a mounted host router or creates one
//! - [`RouterProvider`]: the whole surface behind one object-safe trait
//!
//! ## Example
//!
//! ```
//! use radmin_router::{EngineRouter, History, route, router_root, routes};
//! use radmin_view::Root;
//! use std::rc::Rc;
//!
//! let history = History::memory_at("/posts/42");
//! let tree = routes([
//! 	route("/posts/:id", "a post").into(),
//! 	route("*", "not found").into(),
//! ]);
//! let root = Root::new(router_root(Rc::new(EngineRouter::new(history, tree))));
//!
//! assert_eq!(root.render_to_string(), "a post");
//! ```

mod basename;
mod blocker;
mod components;
mod engine;
mod error;
mod history;
mod hooks;
mod location;
mod matcher;
mod provider;
mod routes;
mod wrapper;

pub use basename::{Basename, basename_provider, use_basename};
pub use blocker::{
	BlockerAction, BlockerContext, BlockerState, HistoryAction, RouterBlocker, ShouldBlock, use_blocker,
};
pub use components::{link, link_href, navigate};
pub use engine::{EngineNavigate, EngineRouter, NativeMatch, NativeRoute, native_outlet, router_root, use_router};
pub use error::RouterError;
pub use history::{BlockAttempt, BlockerId, History, HistoryKind, ListenerId, NavigationAction};
pub use hooks::{NavigateFn, NavigateOptions, use_can_block, use_in_router_context, use_location, use_match, use_navigate, use_params};
pub use location::{
	PartialLocation, RouterLocation, To, URI_COMPONENT, append_search_and_hash, decode_uri_component,
	encode_uri_component, split_href,
};
pub use matcher::{Params, RouteMatch, RoutePattern, SPLAT, match_path};
pub use provider::{EngineRouterProvider, RouterProvider, router_provider_context, use_router_provider};
pub use routes::{
	FoundRoute, RouteConfig, RoutingFrame, extract_routes, find_match, index_route, outlet, route, routes, routes_at,
	use_routing_frame,
};
pub use wrapper::router_wrapper;
