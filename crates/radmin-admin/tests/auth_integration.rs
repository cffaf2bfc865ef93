//! Integration tests for auth-dependent admin behavior
//!
//! 1. Function children resolved from permissions, synchronously or later
//! 2. Loading page grace delay
//! 3. Results of superseded function children are dropped
//! 4. `require_auth` gating and logout
//! 5. First accessible resource with `can_access`

mod common;

use common::{MemoryData, ScriptedAuth, mount, mount_with_clock, record_list};
use futures::channel::oneshot;
use radmin_admin::{
	Admin, AdminChildren, AdminContext, AdminRoutesProps, AdminSettings, AuthError, ResolvedChildren, Resource,
	admin_context_provider, core_admin_routes, default_catch_all, default_layout, default_loading, default_ready,
};
use radmin_router::{EngineRouterProvider, router_provider_context};
use radmin_view::{ManualClock, Node, Props};
use rstest::rstest;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn posts_admin() -> Admin {
	Admin::new()
		.data_provider(MemoryData::new().with("posts", vec![json!({"title": "Hello"})]))
		.login_page("login form")
}

#[rstest]
fn test_function_child_sees_permissions() {
	// Arrange
	let auth = ScriptedAuth::new(true).permissions(json!({"role": "admin"}));
	let admin = posts_admin()
		.auth_provider(auth)
		.child(Resource::new("posts").list(record_list("posts")))
		.function(|permissions| {
			let mut children: Vec<Node> = Vec::new();
			if permissions["role"] == "admin" {
				children.push(Resource::new("users").list("user list").into());
			}
			Ok(ResolvedChildren::Now(children))
		})
		.build()
		.unwrap();
	let (_, root) = mount(admin, "/users");

	// Act
	let html = root.render_to_string();

	// Assert
	assert!(html.contains("<main>user list</main>"), "{html}");
}

#[rstest]
fn test_later_children_show_loading_then_ready() {
	// Arrange
	let clock = Rc::new(ManualClock::new());
	let (tx, rx) = oneshot::channel::<()>();
	let rx = RefCell::new(Some(rx));
	let admin = posts_admin()
		.function(move |_| {
			let rx = rx.borrow_mut().take();
			Ok(ResolvedChildren::later(async move {
				if let Some(rx) = rx {
					rx.await.map_err(|_| AuthError::provider("sender dropped"))?;
				}
				let posts: Node = Resource::new("posts").list(record_list("posts")).into();
				Ok::<Vec<Node>, AuthError>(vec![posts])
			}))
		})
		.build()
		.unwrap();
	let (_, root) = mount_with_clock(admin, "/posts", Rc::clone(&clock));

	// Act
	let during_grace = root.render_to_string();
	clock.advance(Duration::from_secs(1));
	let after_grace = root.render_to_string();
	tx.send(()).unwrap();
	let resolved = root.render_to_string();

	// Assert
	assert_eq!(during_grace, "");
	assert_eq!(after_grace, r#"<div class="radmin-loading">Loading</div>"#);
	assert!(resolved.contains("<li>Hello</li>"), "{resolved}");
}

#[rstest]
fn test_failing_function_child_logs_out() {
	// Arrange
	let auth = ScriptedAuth::new(true);
	let log = Rc::clone(&auth.log);
	let admin = posts_admin()
		.auth_provider(auth)
		.function(|_| Err(AuthError::AccessDenied))
		.build()
		.unwrap();
	let (history, root) = mount(admin, "/posts");

	// Act
	let html = root.render_to_string();

	// Assert
	assert_eq!(log.logouts.get(), 1);
	assert_eq!(history.location().pathname, "/login");
	assert_eq!(html, "login form");
}

#[rstest]
fn test_failed_permission_fetch_logs_out() {
	// Arrange
	let auth = ScriptedAuth::new(true).failing_permissions(AuthError::Unauthenticated);
	let log = Rc::clone(&auth.log);
	let admin = posts_admin()
		.auth_provider(auth)
		.function(|_| {
			let posts: Node = Resource::new("posts").list(record_list("posts")).into();
			Ok(ResolvedChildren::Now(vec![posts]))
		})
		.build()
		.unwrap();
	let (history, root) = mount(admin, "/posts");

	// Act
	let html = root.render_to_string();

	// Assert
	assert_eq!(log.logouts.get(), 1);
	assert_eq!(history.location().pathname, "/login");
	assert_eq!(html, "login form");
}

/// Renders `core_admin_routes` from whatever children `current` holds at
/// render time.
fn swappable_routes(context: AdminContext, current: Rc<RefCell<Rc<AdminChildren>>>) -> Node {
	let routes = Node::component("SwappableRoutes", Props::new(), move |_, _| {
		core_admin_routes(AdminRoutesProps {
			children: Rc::clone(&current.borrow()),
			dashboard: None,
			layout: default_layout(),
			loading: default_loading(),
			catch_all: default_catch_all(),
			ready: Some(default_ready()),
			require_auth: false,
			loading_delay: Duration::ZERO,
		})
	});
	router_provider_context(Rc::new(EngineRouterProvider), admin_context_provider(context, routes))
}

#[rstest]
#[case::resolved(false)]
#[case::failed(true)]
fn test_children_resolved_for_replaced_children_are_dropped(#[case] fails: bool) {
	// Arrange
	let auth = ScriptedAuth::new(true);
	let log = Rc::clone(&auth.log);
	let context = AdminContext::new(
		Rc::new(MemoryData::new().with("posts", vec![json!({"title": "Hello"})])),
		AdminSettings::default(),
	)
	.with_auth(Rc::new(auth));
	let registry = Rc::clone(&context.registry);
	let (tx, rx) = oneshot::channel::<()>();
	let rx = RefCell::new(Some(rx));
	let pending = AdminChildren::new().function(move |_| {
		let rx = rx.borrow_mut().take();
		Ok(ResolvedChildren::later(async move {
			if let Some(rx) = rx {
				let _ = rx.await;
			}
			if fails {
				return Err(AuthError::AccessDenied);
			}
			let posts: Node = Resource::new("posts").list(record_list("posts")).into();
			Ok::<Vec<Node>, AuthError>(vec![posts])
		}))
	});
	let current = Rc::new(RefCell::new(Rc::new(pending)));
	let (history, root) = mount(swappable_routes(context, Rc::clone(&current)), "/posts");
	let while_pending = root.render_to_string();

	// Act
	*current.borrow_mut() = Rc::new(AdminChildren::new().child(Resource::new("comments").list("comment list")));
	let after_swap = root.render_to_string();
	tx.send(()).unwrap();
	let after_resolve = root.render_to_string();

	// Assert
	assert_eq!(while_pending, r#"<div class="radmin-loading">Loading</div>"#);
	assert!(after_swap.contains(r#"<main><div class="radmin-not-found">Not found</div></main>"#), "{after_swap}");
	assert_eq!(after_resolve, after_swap);
	let names: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();
	assert_eq!(names, ["comments"]);
	assert_eq!(log.logouts.get(), 0);
	assert_eq!(history.location().pathname, "/posts");
}

#[rstest]
fn test_no_layout_routes_render_while_loading() {
	let (_tx, rx) = oneshot::channel::<()>();
	let rx = RefCell::new(Some(rx));
	let admin = posts_admin()
		.child(radmin_admin::custom_routes_no_layout([radmin_router::route("/register", "register form").into()]))
		.function(move |_| {
			let rx = rx.borrow_mut().take();
			Ok(ResolvedChildren::later(async move {
				if let Some(rx) = rx {
					let _ = rx.await;
				}
				Ok::<Vec<Node>, AuthError>(Vec::new())
			}))
		})
		.build()
		.unwrap();
	let (_, root) = mount(admin, "/register");

	assert_eq!(root.render_to_string(), "register form");
}

#[rstest]
#[case::authenticated(true, "/posts", 0)]
#[case::anonymous(false, "/login", 1)]
fn test_require_auth(#[case] authenticated: bool, #[case] settled: &str, #[case] logouts: usize) {
	// Arrange
	let auth = ScriptedAuth::new(authenticated);
	let log = Rc::clone(&auth.log);
	let admin = posts_admin()
		.settings(AdminSettings::default().with_require_auth(true))
		.auth_provider(auth)
		.child(Resource::new("posts").list(record_list("posts")))
		.build()
		.unwrap();
	let (history, root) = mount(admin, "/posts");

	// Act
	let html = root.render_to_string();

	// Assert
	assert_eq!(history.location().pathname, settled);
	assert_eq!(log.logouts.get(), logouts);
	assert!(log.check_auth_calls.get() >= 1);
	if authenticated {
		assert!(html.contains("<li>Hello</li>"), "{html}");
	} else {
		assert_eq!(html, "login form");
	}
}

#[rstest]
fn test_home_redirects_to_first_accessible_resource() {
	// Arrange
	let auth = ScriptedAuth::new(true).accessible(&["comments"]);
	let log = Rc::clone(&auth.log);
	let admin = posts_admin()
		.auth_provider(auth)
		.child(Resource::new("posts").list("post list"))
		.child(Resource::new("tags"))
		.child(Resource::new("comments").list("comment list"))
		.build()
		.unwrap();
	let (history, root) = mount(admin, "/");

	// Act
	let html = root.render_to_string();

	// Assert
	assert_eq!(history.location().pathname, "/comments");
	assert!(html.contains("<main>comment list</main>"), "{html}");
	assert_eq!(*log.can_access_calls.borrow(), ["posts", "comments"]);
}

#[rstest]
fn test_can_access_is_not_asked_without_has_can_access() {
	// Arrange
	let auth = ScriptedAuth::new(true);
	let log = Rc::clone(&auth.log);
	let admin = posts_admin()
		.auth_provider(auth)
		.child(Resource::new("posts").list("post list"))
		.child(Resource::new("comments").list("comment list"))
		.build()
		.unwrap();
	let (history, root) = mount(admin, "/");

	// Act
	root.render();

	// Assert
	assert_eq!(history.location().pathname, "/posts");
	assert!(log.can_access_calls.borrow().is_empty());
}

#[rstest]
fn test_home_is_empty_without_accessible_resource() {
	let auth = ScriptedAuth::new(true).accessible(&[]);
	let admin = posts_admin()
		.auth_provider(auth)
		.child(Resource::new("posts").list("post list"))
		.build()
		.unwrap();
	let (history, root) = mount(admin, "/");

	let html = root.render_to_string();

	assert_eq!(history.location().pathname, "/");
	assert!(html.contains("<main></main>"), "{html}");
}
