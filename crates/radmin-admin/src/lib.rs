//! # radmin-admin
//!
//! The admin layer of radmin, rendered through [`radmin_router`].
//!
//! An [`Admin`] takes a data provider, an optional auth provider and its
//! children: [`Resource`] elements, [`custom_routes`] groups and at most one
//! function of the user's permissions. It builds one route tree:
//!
//! - no-layout custom routes, reachable whatever the auth status,
//! - inside the layout: with-layout custom routes, one mount per resource at
//!   `{name}/*`, the home page at `/` and a catch-all.
//!
//! While the function child resolves (or `require_auth` is checking), only
//! no-layout routes render; everything else shows the loading page after a
//! grace delay.

mod admin;
mod admin_routes;
mod auth;
mod children;
mod configurator;
mod context;
mod custom_routes;
mod data;
mod defaults;
mod error;
mod paths;
mod registry;
mod resource;
mod settings;

pub use admin::Admin;
pub use admin_routes::{
	AdminRoutesProps, AuthGate, FirstResource, core_admin_routes, use_first_resource_with_list_access,
	use_require_auth,
};
pub use auth::{
	AuthProvider, CanAccessParams, LogoutFn, LogoutIfAccessDenied, Permissions, PermissionsState, logout_on_mount,
	use_auth_provider, use_data_provider, use_logout, use_logout_if_access_denied, use_permissions,
	use_permissions_context, with_permissions,
};
pub use children::{AdminChild, AdminChildren, AdminRouterStatus, ChildrenFn, ResolvedChildren, ResourceElement, RoutesAndResources};
pub use configurator::{ConfiguredRoutes, use_configure_admin_router_from_children};
pub use context::{
	AdminContext, DefaultTitle, HasDashboard, ResourceContext, admin_context_provider, has_dashboard_provider,
	use_admin_context, use_default_title, use_has_dashboard, use_resource_context, use_resource_registry,
};
pub use custom_routes::{CUSTOM_ROUTES, custom_routes, custom_routes_layout, custom_routes_no_layout};
pub use data::{
	CreateParams, DataProvider, DeleteManyParams, DeleteParams, GetListParams, GetListResult, GetManyParams,
	GetManyReferenceParams, GetOneParams, IdsResult, Pagination, RecordResult, Sort, SortOrder, UpdateManyParams,
	UpdateParams,
};
pub use defaults::{LayoutFn, default_catch_all, default_layout, default_loading, default_ready, loading_gate};
pub use error::{AdminError, AuthError, DataError};
pub use paths::{PathKind, create_path};
pub use registry::{ResourceDefinition, ResourceRegistry};
pub use resource::{RESOURCE, Resource, ResourceProps, resource_props};
pub use settings::AdminSettings;
