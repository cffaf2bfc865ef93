//! The route tree of an admin: gating on children resolution and auth, the
//! layout, one mount per resource, the home page and the catch-all.

use crate::auth::{CanAccessParams, logout_on_mount, use_auth_provider, use_logout_if_access_denied, with_permissions};
use crate::children::{AdminChildren, AdminRouterStatus, ResourceElement};
use crate::configurator::use_configure_admin_router_from_children;
use crate::context::has_dashboard_provider;
use crate::defaults::{LayoutFn, loading_gate};
use crate::error::AdminError;
use crate::paths::{PathKind, create_path};
use radmin_router::{NavigateOptions, RouteConfig, RouterProvider, To, use_basename, use_router_provider};
use radmin_view::{Cleanup, Node, Props, Scope};
use serde_json::{Value, json};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Everything `CoreAdminRoutes` renders from.
#[derive(Clone)]
pub struct AdminRoutesProps {
	pub children: Rc<AdminChildren>,
	pub dashboard: Option<Node>,
	pub layout: LayoutFn,
	pub loading: Node,
	pub catch_all: Node,
	/// Rendered while the admin has nothing to route.
	pub ready: Option<Node>,
	pub require_auth: bool,
	pub loading_delay: Duration,
}

impl fmt::Debug for AdminRoutesProps {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AdminRoutesProps")
			.field("children", &self.children)
			.field("has_dashboard", &self.dashboard.is_some())
			.field("require_auth", &self.require_auth)
			.field("loading_delay", &self.loading_delay)
			.finish_non_exhaustive()
	}
}

pub fn core_admin_routes(props: AdminRoutesProps) -> Node {
	Node::component("CoreAdminRoutes", Props::new().with_data(props), render_core_admin_routes)
}

fn render_core_admin_routes(scope: &Scope, props: &Props) -> Node {
	let Some(props) = props.data::<AdminRoutesProps>() else {
		return Node::Empty;
	};
	let router = use_router_provider(scope);
	let basename = use_basename(scope);
	let configured = use_configure_admin_router_from_children(scope, &props.children, props.dashboard.is_some());
	let gate = use_require_auth(scope, props.require_auth);
	let first = use_first_resource_with_list_access(scope, &configured.resources);

	if configured.status == AdminRouterStatus::Empty {
		return match &props.ready {
			Some(ready) => ready.clone(),
			None => {
				tracing::error!(error = %AdminError::EmptyAdmin, "nothing to render");
				Node::Empty
			}
		};
	}

	let mut top: Vec<Node> = configured.custom_routes_without_layout.clone();

	if configured.status == AdminRouterStatus::Loading || gate.checking {
		top.push(route(&*router, "*", loading_gate(props.loading_delay, props.loading.clone())));
		return router.routes(top);
	}
	if gate.only_anonymous_routes {
		top.push(route(&*router, "*", logout_on_mount()));
		return router.routes(top);
	}

	let home = match (&props.dashboard, &first.resource) {
		(Some(dashboard), _) => with_permissions(json!({ "route": "dashboard" }), dashboard.clone()),
		(None, Some(name)) => router.navigate(
			To::from(create_path(basename.as_str(), name, PathKind::List, None)),
			NavigateOptions::default(),
		),
		(None, None) if first.is_pending => props.loading.clone(),
		(None, None) => Node::Empty,
	};

	let mut inner: Vec<Node> = configured.custom_routes_with_layout.clone();
	inner.extend(
		configured
			.resources
			.iter()
			.map(|resource| route(&*router, &format!("{}/*", resource.props.name), resource.node.clone())),
	);
	inner.push(route(&*router, "/", home));
	inner.push(route(&*router, "*", props.catch_all.clone()));

	let layout = (props.layout)(router.routes(inner));
	top.push(route(&*router, "/*", has_dashboard_provider(props.dashboard.is_some(), layout)));
	router.routes(top)
}

fn route(router: &dyn RouterProvider, path: &str, element: Node) -> Node {
	router.route(RouteConfig::new(path, element))
}

/// State of the `require_auth` check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthGate {
	/// `check_auth` has not answered yet.
	pub checking: bool,
	/// Only no-layout routes may render.
	pub only_anonymous_routes: bool,
}

/// Runs `check_auth` once when `require_auth` is set. A failure restricts the
/// admin to its no-layout routes without logging out here.
pub fn use_require_auth(scope: &Scope, require_auth: bool) -> AuthGate {
	let auth = use_auth_provider(scope);
	let gate = scope.use_state(|| AuthGate {
		checking: require_auth,
		only_anonymous_routes: require_auth,
	});
	let spawner = scope.spawner();
	scope.use_effect(require_auth, {
		let gate = gate.clone();
		move || {
			if !require_auth {
				gate.set_if_changed(AuthGate {
					checking: false,
					only_anonymous_routes: false,
				});
				return None;
			}
			spawner.spawn(async move {
				let result = match auth {
					Some(auth) => auth.check_auth(Value::Null).await,
					None => Ok(()),
				};
				if let Err(err) = &result {
					tracing::debug!(error = %err, "check_auth failed; only anonymous routes are reachable");
				}
				gate.set(AuthGate {
					checking: false,
					only_anonymous_routes: result.is_err(),
				});
			});
			None
		}
	});
	gate.get()
}

/// The resource the home page redirects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstResource {
	pub is_pending: bool,
	pub resource: Option<String>,
}

/// Finds the first resource with a list view the user may access.
///
/// Without `can_access` on the auth provider this is the first resource that
/// has a list. Otherwise resources are probed in order; an access error logs
/// the user out and the probe moves on.
pub fn use_first_resource_with_list_access(scope: &Scope, resources: &[ResourceElement]) -> FirstResource {
	let auth = use_auth_provider(scope).filter(|auth| auth.has_can_access());
	let guard = use_logout_if_access_denied(scope);
	let candidates: Vec<String> = resources
		.iter()
		.filter(|resource| resource.props.list.is_some())
		.map(|resource| resource.props.name.clone())
		.collect();
	let probing = auth.is_some();
	let state = scope.use_state(|| FirstResource {
		is_pending: probing,
		resource: if probing { None } else { candidates.first().cloned() },
	});
	let spawner = scope.spawner();
	scope.use_effect((candidates.clone(), probing), {
		let state = state.clone();
		move || {
			let Some(auth) = auth else {
				state.set_if_changed(FirstResource {
					is_pending: false,
					resource: candidates.into_iter().next(),
				});
				return None;
			};
			let cancelled = Rc::new(Cell::new(false));
			let task_cancelled = Rc::clone(&cancelled);
			spawner.spawn(async move {
				let mut found = None;
				for name in candidates {
					match auth.can_access(CanAccessParams::new("list", &name)).await {
						Ok(true) => {
							found = Some(name);
							break;
						}
						Ok(false) => {}
						Err(err) => {
							guard.deny(&err);
						}
					}
					if task_cancelled.get() {
						return;
					}
				}
				if !task_cancelled.get() {
					state.set_if_changed(FirstResource {
						is_pending: false,
						resource: found,
					});
				}
			});
			let cleanup: Cleanup = Box::new(move || cancelled.set(true));
			Some(cleanup)
		}
	});
	state.get()
}
