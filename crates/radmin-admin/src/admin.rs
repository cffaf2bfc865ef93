//! The `Admin` root.

use crate::admin_routes::{AdminRoutesProps, core_admin_routes};
use crate::auth::AuthProvider;
use crate::children::{AdminChildren, ResolvedChildren, RoutesAndResources};
use crate::context::{AdminContext, DefaultTitle, admin_context_provider};
use crate::data::DataProvider;
use crate::defaults::{LayoutFn, default_catch_all, default_layout, default_loading, default_ready};
use crate::error::{AdminError, AuthError};
use crate::settings::AdminSettings;
use radmin_router::{Basename, EngineRouterProvider, RouteConfig, RouterProvider, basename_provider, router_provider_context};
use radmin_view::{Node, provide};
use serde_json::Value;
use std::rc::Rc;

/// Builds the node tree of an admin.
///
/// ```
/// use radmin_admin::{Admin, Resource};
/// # use radmin_admin::*;
/// # use async_trait::async_trait;
/// # struct Empty;
/// # #[async_trait(?Send)]
/// # impl DataProvider for Empty {
/// # 	async fn get_list(&self, _: &str, _: GetListParams) -> Result<GetListResult, DataError> { Ok(GetListResult::default()) }
/// # 	async fn get_one(&self, _: &str, _: GetOneParams) -> Result<RecordResult, DataError> { unimplemented!() }
/// # 	async fn get_many(&self, _: &str, _: GetManyParams) -> Result<GetListResult, DataError> { unimplemented!() }
/// # 	async fn get_many_reference(&self, _: &str, _: GetManyReferenceParams) -> Result<GetListResult, DataError> { unimplemented!() }
/// # 	async fn create(&self, _: &str, _: CreateParams) -> Result<RecordResult, DataError> { unimplemented!() }
/// # 	async fn update(&self, _: &str, _: UpdateParams) -> Result<RecordResult, DataError> { unimplemented!() }
/// # 	async fn update_many(&self, _: &str, _: UpdateManyParams) -> Result<IdsResult, DataError> { unimplemented!() }
/// # 	async fn delete(&self, _: &str, _: DeleteParams) -> Result<RecordResult, DataError> { unimplemented!() }
/// # 	async fn delete_many(&self, _: &str, _: DeleteManyParams) -> Result<IdsResult, DataError> { unimplemented!() }
/// # }
///
/// let admin = Admin::new()
/// 	.data_provider(Empty)
/// 	.child(Resource::new("posts").list("the posts"))
/// 	.build();
///
/// assert!(admin.is_ok());
/// ```
pub struct Admin {
	data_provider: Option<Rc<dyn DataProvider>>,
	auth_provider: Option<Rc<dyn AuthProvider>>,
	router_provider: Option<Rc<dyn RouterProvider>>,
	settings: AdminSettings,
	dashboard: Option<Node>,
	layout: Option<LayoutFn>,
	loading: Option<Node>,
	catch_all: Option<Node>,
	ready: Option<Node>,
	login_page: Option<Node>,
	children: AdminChildren,
}

impl Default for Admin {
	fn default() -> Self {
		Self {
			data_provider: None,
			auth_provider: None,
			router_provider: None,
			settings: AdminSettings::default(),
			dashboard: None,
			layout: None,
			loading: None,
			catch_all: None,
			ready: Some(default_ready()),
			login_page: None,
			children: AdminChildren::new(),
		}
	}
}

impl Admin {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn data_provider(mut self, provider: impl DataProvider + 'static) -> Self {
		self.data_provider = Some(Rc::new(provider));
		self
	}

	pub fn auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
		self.auth_provider = Some(Rc::new(provider));
		self
	}

	/// Routes through `provider` instead of the built-in engine.
	pub fn router_provider(mut self, provider: Rc<dyn RouterProvider>) -> Self {
		self.router_provider = Some(provider);
		self
	}

	pub fn settings(mut self, settings: AdminSettings) -> Self {
		self.settings = settings;
		self
	}

	pub fn dashboard(mut self, dashboard: impl Into<Node>) -> Self {
		self.dashboard = Some(dashboard.into());
		self
	}

	pub fn layout(mut self, layout: impl Fn(Node) -> Node + 'static) -> Self {
		self.layout = Some(Rc::new(layout));
		self
	}

	pub fn loading(mut self, loading: impl Into<Node>) -> Self {
		self.loading = Some(loading.into());
		self
	}

	pub fn catch_all(mut self, catch_all: impl Into<Node>) -> Self {
		self.catch_all = Some(catch_all.into());
		self
	}

	/// Page shown while the admin has nothing to route.
	pub fn ready(mut self, ready: impl Into<Node>) -> Self {
		self.ready = Some(ready.into());
		self
	}

	/// Drops the default ready page, making an admin with nothing to route a
	/// configuration error.
	pub fn without_ready_page(mut self) -> Self {
		self.ready = None;
		self
	}

	/// Mounted at the login path of the settings, outside the layout.
	pub fn login_page(mut self, login_page: impl Into<Node>) -> Self {
		self.login_page = Some(login_page.into());
		self
	}

	/// Adds a `Resource`, a `CustomRoutes` group or a fragment of them.
	pub fn child(mut self, child: impl Into<Node>) -> Self {
		self.children = self.children.child(child);
		self
	}

	/// Adds the function child, called with the user's permissions.
	pub fn function(
		mut self,
		function: impl Fn(&Value) -> Result<ResolvedChildren, AuthError> + 'static,
	) -> Self {
		self.children = self.children.function(function);
		self
	}

	/// Checks the configuration and assembles the tree.
	///
	/// # Errors
	///
	/// - [`AdminError::InvalidSettings`] if the settings do not validate
	/// - [`AdminError::MissingDataProvider`] without a data provider
	/// - [`AdminError::MultipleFunctionChildren`] with more than one function
	///   child
	/// - [`AdminError::EmptyAdmin`] if there is nothing to route and the
	///   ready page was dropped
	pub fn build(self) -> Result<Node, AdminError> {
		self.settings.validate()?;
		let data = self.data_provider.ok_or(AdminError::MissingDataProvider)?;
		let function = self.children.single_function()?;
		if self.ready.is_none()
			&& function.is_none()
			&& self.dashboard.is_none()
			&& RoutesAndResources::from_nodes(&self.children.nodes()).is_empty()
		{
			return Err(AdminError::EmptyAdmin);
		}

		let settings = self.settings;
		let router: Rc<dyn RouterProvider> = self.router_provider.unwrap_or_else(|| Rc::new(EngineRouterProvider));
		let mut context = AdminContext::new(data, settings.clone());
		if let Some(auth) = self.auth_provider {
			context = context.with_auth(auth);
		}

		let routes_props = AdminRoutesProps {
			children: Rc::new(self.children),
			dashboard: self.dashboard,
			layout: self.layout.unwrap_or_else(default_layout),
			loading: self.loading.unwrap_or_else(default_loading),
			catch_all: self.catch_all.unwrap_or_else(default_catch_all),
			ready: self.ready,
			require_auth: settings.require_auth,
			loading_delay: settings.loading_delay(),
		};

		let mut top = Vec::new();
		if let Some(login_page) = self.login_page {
			top.push(router.route(RouteConfig::new(settings.login_path.clone(), login_page)));
		}
		top.push(router.route(RouteConfig::new("/*", core_admin_routes(routes_props))));
		let tree = router.router_wrapper(settings.basename.clone(), vec![router.routes(top)]);

		tracing::debug!(title = %settings.title, basename = ?settings.basename, "admin built");
		let basename = Basename::new(settings.basename.as_deref().unwrap_or_default());
		Ok(router_provider_context(
			router,
			admin_context_provider(
				context,
				provide(DefaultTitle(settings.title.clone()), basename_provider(basename, tree)),
			),
		))
	}
}
