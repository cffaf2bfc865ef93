//! The `Resource` element.

use crate::context::ResourceContext;
use crate::registry::ResourceDefinition;
use radmin_router::{RouteConfig, use_router_provider};
use radmin_view::{Element, Node, Props, Scope, provide};
use serde_json::Value;
use std::rc::Rc;

/// Type marker of resource elements.
pub const RESOURCE: &str = "Resource";

/// Props of a [`Resource`].
#[derive(Debug, Clone, Default)]
pub struct ResourceProps {
	pub name: String,
	pub list: Option<Node>,
	pub create: Option<Node>,
	pub edit: Option<Node>,
	pub show: Option<Node>,
	pub options: Value,
	pub icon: Option<String>,
	/// Extra routes mounted under the resource path.
	pub children: Vec<Node>,
}

impl ResourceProps {
	/// The definition registered for these props.
	pub fn definition(&self, _permissions: &Value) -> ResourceDefinition {
		ResourceDefinition {
			name: self.name.clone(),
			options: self.options.clone(),
			has_list: self.list.is_some(),
			has_create: self.create.is_some(),
			has_edit: self.edit.is_some(),
			has_show: self.show.is_some(),
			icon: self.icon.clone(),
		}
	}
}

/// A named CRUD entity with optional list, create, edit and show views.
///
/// Mounted at `{name}/*`, it routes `create`, `:id/show`, `:id` and the list
/// under its own path, then any extra route children.
#[derive(Debug, Clone, Default)]
pub struct Resource(ResourceProps);

impl Resource {
	pub fn new(name: impl Into<String>) -> Self {
		Self(ResourceProps {
			name: name.into(),
			options: Value::Null,
			..ResourceProps::default()
		})
	}

	pub fn list(mut self, list: impl Into<Node>) -> Self {
		self.0.list = Some(list.into());
		self
	}

	pub fn create(mut self, create: impl Into<Node>) -> Self {
		self.0.create = Some(create.into());
		self
	}

	pub fn edit(mut self, edit: impl Into<Node>) -> Self {
		self.0.edit = Some(edit.into());
		self
	}

	pub fn show(mut self, show: impl Into<Node>) -> Self {
		self.0.show = Some(show.into());
		self
	}

	pub fn options(mut self, options: Value) -> Self {
		self.0.options = options;
		self
	}

	pub fn icon(mut self, icon: impl Into<String>) -> Self {
		self.0.icon = Some(icon.into());
		self
	}

	pub fn route(mut self, route: impl Into<Node>) -> Self {
		self.0.children.push(route.into());
		self
	}

	pub fn props(&self) -> &ResourceProps {
		&self.0
	}
}

impl From<Resource> for Node {
	fn from(resource: Resource) -> Self {
		let name = resource.0.name.clone();
		let props = Props::new().with_data(Rc::new(resource.0));
		Element::component(RESOURCE, props, render_resource)
			.with_key(name)
			.into()
	}
}

/// Props of a resource element, if `element` is one.
pub fn resource_props(element: &Element) -> Option<Rc<ResourceProps>> {
	if element.component_name() != Some(RESOURCE) {
		return None;
	}
	let props = element.props().data::<Rc<ResourceProps>>().cloned();
	if props.is_none() {
		tracing::error!("a Resource element must carry ResourceProps to be registered");
	}
	props
}

fn render_resource(scope: &Scope, props: &Props) -> Node {
	let Some(resource) = props.data::<Rc<ResourceProps>>() else {
		return Node::Empty;
	};
	let router = use_router_provider(scope);
	let views = [
		("create/*", &resource.create),
		(":id/show/*", &resource.show),
		(":id/*", &resource.edit),
		("/*", &resource.list),
	];
	let mut children: Vec<Node> = views
		.into_iter()
		.filter_map(|(path, view)| view.as_ref().map(|view| router.route(RouteConfig::new(path, view.clone()))))
		.collect();
	children.extend(resource.children.iter().cloned());
	provide(ResourceContext(resource.name.clone()), router.routes(children))
}
