//! Contexts shared by everything under one admin.

use crate::auth::AuthProvider;
use crate::data::DataProvider;
use crate::registry::ResourceRegistry;
use crate::settings::AdminSettings;
use radmin_view::{Node, Scope, provide};
use std::fmt;
use std::rc::Rc;

/// Collaborators of one admin instance. The registry is created with the
/// admin and dropped with it, so two admins never share resources.
#[derive(Clone)]
pub struct AdminContext {
	pub auth: Option<Rc<dyn AuthProvider>>,
	pub data: Rc<dyn DataProvider>,
	pub registry: Rc<ResourceRegistry>,
	pub settings: Rc<AdminSettings>,
}

impl AdminContext {
	pub fn new(data: Rc<dyn DataProvider>, settings: AdminSettings) -> Self {
		Self {
			auth: None,
			data,
			registry: Rc::new(ResourceRegistry::new()),
			settings: Rc::new(settings),
		}
	}

	pub fn with_auth(mut self, auth: Rc<dyn AuthProvider>) -> Self {
		self.auth = Some(auth);
		self
	}
}

impl fmt::Debug for AdminContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AdminContext")
			.field("has_auth", &self.auth.is_some())
			.field("registry", &self.registry)
			.field("settings", &self.settings)
			.finish()
	}
}

pub fn admin_context_provider(context: AdminContext, child: impl Into<Node>) -> Node {
	provide(context, child)
}

pub fn use_admin_context(scope: &Scope) -> Option<AdminContext> {
	scope.context::<AdminContext>()
}

pub fn use_resource_registry(scope: &Scope) -> Option<Rc<ResourceRegistry>> {
	use_admin_context(scope).map(|context| context.registry)
}

/// Whether the admin was given a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasDashboard(pub bool);

pub fn has_dashboard_provider(has_dashboard: bool, child: impl Into<Node>) -> Node {
	provide(HasDashboard(has_dashboard), child)
}

pub fn use_has_dashboard(scope: &Scope) -> bool {
	scope.context::<HasDashboard>().is_some_and(|HasDashboard(has)| has)
}

/// Title used when a page sets none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultTitle(pub String);

pub fn use_default_title(scope: &Scope) -> String {
	scope
		.context::<DefaultTitle>()
		.map(|DefaultTitle(title)| title)
		.unwrap_or_default()
}

/// Name of the resource a subtree belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceContext(pub String);

pub fn use_resource_context(scope: &Scope) -> Option<String> {
	scope.context::<ResourceContext>().map(|ResourceContext(name)| name)
}
