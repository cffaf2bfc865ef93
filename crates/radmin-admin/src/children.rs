//! Admin children: static elements plus at most one function of permissions.

use crate::custom_routes::custom_routes_layout;
use crate::error::{AdminError, AuthError};
use crate::resource::{ResourceProps, resource_props};
use futures::future::LocalBoxFuture;
use radmin_view::Node;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

/// What a function child returns.
pub enum ResolvedChildren {
	Now(Vec<Node>),
	Later(LocalBoxFuture<'static, Result<Vec<Node>, AuthError>>),
}

impl ResolvedChildren {
	pub fn later(future: impl Future<Output = Result<Vec<Node>, AuthError>> + 'static) -> Self {
		Self::Later(Box::pin(future))
	}
}

impl fmt::Debug for ResolvedChildren {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Now(nodes) => f.debug_tuple("Now").field(nodes).finish(),
			Self::Later(_) => f.write_str("Later(..)"),
		}
	}
}

/// Computes more children from the user's permissions.
pub type ChildrenFn = Rc<dyn Fn(&Value) -> Result<ResolvedChildren, AuthError>>;

#[derive(Clone)]
pub enum AdminChild {
	Node(Node),
	Function(ChildrenFn),
}

impl fmt::Debug for AdminChild {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Node(node) => f.debug_tuple("Node").field(node).finish(),
			Self::Function(_) => f.write_str("Function(..)"),
		}
	}
}

/// The children of an admin.
#[derive(Debug, Clone, Default)]
pub struct AdminChildren(Vec<AdminChild>);

impl AdminChildren {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn child(mut self, node: impl Into<Node>) -> Self {
		self.0.push(AdminChild::Node(node.into()));
		self
	}

	pub fn function(mut self, function: impl Fn(&Value) -> Result<ResolvedChildren, AuthError> + 'static) -> Self {
		self.0.push(AdminChild::Function(Rc::new(function)));
		self
	}

	pub fn iter(&self) -> impl Iterator<Item = &AdminChild> {
		self.0.iter()
	}

	pub fn nodes(&self) -> Vec<Node> {
		self.0
			.iter()
			.filter_map(|child| match child {
				AdminChild::Node(node) => Some(node.clone()),
				AdminChild::Function(_) => None,
			})
			.collect()
	}

	/// The function child, if any.
	///
	/// # Errors
	///
	/// [`AdminError::MultipleFunctionChildren`] when there is more than one.
	pub fn single_function(&self) -> Result<Option<ChildrenFn>, AdminError> {
		let mut functions = self.0.iter().filter_map(|child| match child {
			AdminChild::Function(function) => Some(Rc::clone(function)),
			AdminChild::Node(_) => None,
		});
		let first = functions.next();
		if functions.next().is_some() {
			return Err(AdminError::MultipleFunctionChildren);
		}
		Ok(first)
	}
}

/// A resource element together with its props.
#[derive(Debug, Clone)]
pub struct ResourceElement {
	pub node: Node,
	pub props: Rc<ResourceProps>,
}

/// Children sorted by where they render.
#[derive(Debug, Clone, Default)]
pub struct RoutesAndResources {
	pub custom_routes_with_layout: Vec<Node>,
	pub custom_routes_without_layout: Vec<Node>,
	pub resources: Vec<ResourceElement>,
}

impl RoutesAndResources {
	/// Sorts `nodes`, flattening fragments. Anything that is neither a
	/// resource nor a custom route group is ignored.
	pub fn from_nodes(nodes: &[Node]) -> Self {
		let mut sorted = Self::default();
		sorted.collect(nodes);
		sorted
	}

	fn collect(&mut self, nodes: &[Node]) {
		for node in nodes {
			match node {
				Node::Fragment(children) => self.collect(children),
				Node::Element(element) => {
					if let Some(no_layout) = custom_routes_layout(element) {
						let routes = Node::fragment(element.props().children.clone());
						if no_layout {
							self.custom_routes_without_layout.push(routes);
						} else {
							self.custom_routes_with_layout.push(routes);
						}
					} else if let Some(props) = resource_props(element) {
						self.resources.push(ResourceElement {
							node: node.clone(),
							props,
						});
					}
				}
				_ => {}
			}
		}
	}

	/// Appends `other` after the entries already present.
	pub fn merge(&mut self, other: RoutesAndResources) {
		self.custom_routes_with_layout.extend(other.custom_routes_with_layout);
		self.custom_routes_without_layout.extend(other.custom_routes_without_layout);
		self.resources.extend(other.resources);
	}

	pub fn is_empty(&self) -> bool {
		self.resources.is_empty() && self.custom_routes_with_layout.is_empty() && self.custom_routes_without_layout.is_empty()
	}
}

/// Lifecycle of the children resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRouterStatus {
	Loading,
	Empty,
	Ready,
}

impl AdminRouterStatus {
	/// Status before any function child has resolved. A dashboard alone is
	/// enough to be ready.
	pub fn initial(has_function_child: bool, sorted: &RoutesAndResources, has_dashboard: bool) -> Self {
		if has_function_child {
			Self::Loading
		} else if sorted.is_empty() && !has_dashboard {
			Self::Empty
		} else {
			Self::Ready
		}
	}
}
