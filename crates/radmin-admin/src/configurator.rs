//! Turns admin children into routes and resources, resolving the function
//! child once permissions are known.

use crate::auth::{use_logout, use_permissions};
use crate::children::{AdminChildren, AdminRouterStatus, ResolvedChildren, ResourceElement, RoutesAndResources};
use crate::context::use_resource_registry;
use crate::registry::ResourceDefinition;
use radmin_view::{ByAddress, Cleanup, Node, Scope};
use serde_json::Value;
use std::rc::Rc;

/// What the admin route tree is built from.
#[derive(Debug, Clone)]
pub struct ConfiguredRoutes {
	pub custom_routes_with_layout: Vec<Node>,
	pub custom_routes_without_layout: Vec<Node>,
	pub resources: Vec<ResourceElement>,
	pub status: AdminRouterStatus,
}

/// Partitions `children` and resolves the function child, if any.
///
/// Static children are available on the first render. The function child is
/// called once permissions have loaded, and its result is appended to the
/// static entries. A function result that arrives after `children` changed
/// or permissions changed is dropped. A failing function child, or a failed
/// permission fetch when there is one, logs the user out.
pub fn use_configure_admin_router_from_children(
	scope: &Scope,
	children: &Rc<AdminChildren>,
	has_dashboard: bool,
) -> ConfiguredRoutes {
	let permissions = use_permissions(scope);
	let logout = use_logout(scope);
	let spawner = scope.spawner();
	let function = match children.single_function() {
		Ok(function) => function,
		Err(err) => {
			tracing::error!(error = %err, "ignoring function children");
			None
		}
	};
	let has_function = function.is_some();

	let sorted = scope.use_state(|| RoutesAndResources::from_nodes(&children.nodes()));
	let status = scope.use_state(|| sorted.with(|sorted| AdminRouterStatus::initial(has_function, sorted, has_dashboard)));
	let generation = scope.use_ref(|| 0_u64);

	scope.use_effect(
		(ByAddress(Rc::clone(children)), permissions.clone(), has_dashboard),
		{
			let children = Rc::clone(children);
			let permissions = permissions.clone();
			let sorted = sorted.clone();
			let status = status.clone();
			move || {
				if permissions.is_loading {
					return None;
				}
				let current = *generation.borrow();
				let fresh = RoutesAndResources::from_nodes(&children.nodes());
				status.set_if_changed(AdminRouterStatus::initial(has_function, &fresh, has_dashboard));
				sorted.set(fresh);

				if let Some(function) = function {
					if let Some(err) = &permissions.error {
						tracing::error!(error = %err, "could not fetch permissions for the function child");
						logout.call();
						return None;
					}
					match function(&permissions.permissions) {
						Ok(ResolvedChildren::Now(nodes)) => {
							sorted.update(|sorted| sorted.merge(RoutesAndResources::from_nodes(&nodes)));
							status.set(AdminRouterStatus::Ready);
						}
						Ok(ResolvedChildren::Later(future)) => {
							let generation = Rc::clone(&generation);
							spawner.spawn(async move {
								let result = future.await;
								if *generation.borrow() != current {
									tracing::debug!("dropping children resolved for superseded props");
									return;
								}
								match result {
									Ok(nodes) => {
										sorted.update(|sorted| sorted.merge(RoutesAndResources::from_nodes(&nodes)));
										status.set(AdminRouterStatus::Ready);
									}
									Err(err) => {
										tracing::error!(error = %err, "function child failed");
										logout.call();
									}
								}
							});
						}
						Err(err) => {
							tracing::error!(error = %err, "function child failed");
							logout.call();
						}
					}
				}

				let cleanup: Cleanup = Box::new(move || *generation.borrow_mut() += 1);
				Some(cleanup)
			}
		},
	);

	let sorted = sorted.get();
	use_register_resources(scope, &sorted.resources, &permissions.permissions);

	ConfiguredRoutes {
		custom_routes_with_layout: sorted.custom_routes_with_layout,
		custom_routes_without_layout: sorted.custom_routes_without_layout,
		resources: sorted.resources,
		status: status.get(),
	}
}

/// Keeps the registry in sync with `resources`. Definitions are unregistered
/// when the list changes or the admin unmounts.
fn use_register_resources(scope: &Scope, resources: &[ResourceElement], permissions: &Value) {
	let registry = use_resource_registry(scope);
	let definitions: Vec<ResourceDefinition> = resources
		.iter()
		.map(|resource| resource.props.definition(permissions))
		.collect();
	scope.use_effect(definitions.clone(), move || {
		let registry = registry?;
		let names: Vec<String> = definitions.iter().map(|definition| definition.name.clone()).collect();
		for definition in definitions {
			registry.register(definition);
		}
		let cleanup: Cleanup = Box::new(move || {
			for name in &names {
				registry.unregister(name);
			}
		});
		Some(cleanup)
	});
}
