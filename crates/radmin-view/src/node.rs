//! Component tree nodes.
//!
//! A [`Node`] is the declarative description of what should be rendered. It is
//! cheap to clone: component render functions and typed payloads are shared
//! behind `Rc`.

use crate::scope::Scope;
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// Render function of a named component.
pub type RenderFn = Rc<dyn Fn(&Scope, &Props) -> Node>;

/// A node of the component tree.
#[derive(Clone, Default)]
pub enum Node {
	/// Renders nothing.
	#[default]
	Empty,
	/// A text node.
	Text(Cow<'static, str>),
	/// A list of sibling nodes.
	Fragment(Vec<Node>),
	/// A tag or a component.
	Element(Element),
	/// Makes a context value visible to the wrapped subtree.
	Provider(Provider),
}

impl Node {
	/// Creates a text node.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment.
	pub fn fragment(children: impl IntoIterator<Item = Node>) -> Self {
		Self::Fragment(children.into_iter().collect())
	}

	/// Creates a component element.
	pub fn component<F>(name: &'static str, props: Props, render: F) -> Self
	where
		F: Fn(&Scope, &Props) -> Node + 'static,
	{
		Self::Element(Element::component(name, props, render))
	}

	/// Returns the element if this node is one.
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Self::Element(el) => Some(el),
			_ => None,
		}
	}

	/// Returns `true` for [`Node::Empty`].
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}
}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Empty => f.write_str("Empty"),
			Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
			Self::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
			Self::Element(el) => el.fmt(f),
			Self::Provider(p) => f
				.debug_struct("Provider")
				.field("type", &p.type_name)
				.field("child", &p.child)
				.finish(),
		}
	}
}

impl From<Element> for Node {
	fn from(el: Element) -> Self {
		Self::Element(el)
	}
}

impl From<&'static str> for Node {
	fn from(text: &'static str) -> Self {
		Self::Text(Cow::Borrowed(text))
	}
}

impl From<String> for Node {
	fn from(text: String) -> Self {
		Self::Text(Cow::Owned(text))
	}
}

impl From<Vec<Node>> for Node {
	fn from(children: Vec<Node>) -> Self {
		Self::Fragment(children)
	}
}

impl<T: Into<Node>> From<Option<T>> for Node {
	fn from(node: Option<T>) -> Self {
		node.map(Into::into).unwrap_or_default()
	}
}

/// What an element renders as.
#[derive(Clone)]
pub enum ElementKind {
	/// A plain tag such as `div`.
	Tag(Cow<'static, str>),
	/// A named component. The name doubles as the element's type marker.
	Component {
		/// Type marker.
		name: &'static str,
		/// Render function.
		render: RenderFn,
	},
}

/// A tag or component together with its props.
#[derive(Clone)]
pub struct Element {
	kind: ElementKind,
	props: Props,
	key: Option<String>,
}

impl Element {
	/// Creates a tag element.
	pub fn tag(tag: impl Into<Cow<'static, str>>) -> Self {
		Self {
			kind: ElementKind::Tag(tag.into()),
			props: Props::default(),
			key: None,
		}
	}

	/// Creates a component element.
	pub fn component<F>(name: &'static str, props: Props, render: F) -> Self
	where
		F: Fn(&Scope, &Props) -> Node + 'static,
	{
		Self {
			kind: ElementKind::Component {
				name,
				render: Rc::new(render),
			},
			props,
			key: None,
		}
	}

	/// Adds an attribute (tags only render attributes).
	pub fn attr(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Cow<'static, str>>) -> Self {
		self.props.attrs.push((name.into(), value.into()));
		self
	}

	/// Appends a child.
	pub fn child(mut self, child: impl Into<Node>) -> Self {
		self.props.children.push(child.into());
		self
	}

	/// Sets the reconciliation key.
	pub fn with_key(mut self, key: impl Into<String>) -> Self {
		self.key = Some(key.into());
		self
	}

	/// Returns the element kind.
	pub fn kind(&self) -> &ElementKind {
		&self.kind
	}

	/// Returns the component name, or `None` for tags.
	pub fn component_name(&self) -> Option<&'static str> {
		match &self.kind {
			ElementKind::Component { name, .. } => Some(name),
			ElementKind::Tag(_) => None,
		}
	}

	/// Tag or component name.
	pub fn name(&self) -> &str {
		match &self.kind {
			ElementKind::Component { name, .. } => name,
			ElementKind::Tag(tag) => tag,
		}
	}

	pub fn props(&self) -> &Props {
		&self.props
	}

	pub fn key(&self) -> Option<&str> {
		self.key.as_deref()
	}
}

impl fmt::Debug for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Element")
			.field("name", &self.name())
			.field("key", &self.key)
			.field("props", &self.props)
			.finish()
	}
}

/// Element props.
///
/// `path`, `index` and `element` are the route-shaped props: any element
/// carrying at least one of them is treated as a route by the router.
#[derive(Clone, Default)]
pub struct Props {
	pub path: Option<String>,
	pub index: Option<bool>,
	pub element: Option<Box<Node>>,
	pub children: Vec<Node>,
	pub attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	data: Option<Rc<dyn Any>>,
}

impl Props {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub fn index(mut self, index: bool) -> Self {
		self.index = Some(index);
		self
	}

	pub fn element(mut self, element: impl Into<Node>) -> Self {
		self.element = Some(Box::new(element.into()));
		self
	}

	pub fn child(mut self, child: impl Into<Node>) -> Self {
		self.children.push(child.into());
		self
	}

	pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
		self.children.extend(children);
		self
	}

	pub fn attr(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Cow<'static, str>>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Attaches a typed payload, replacing any previous one.
	pub fn with_data<T: Any>(mut self, data: T) -> Self {
		self.data = Some(Rc::new(data));
		self
	}

	/// Returns the typed payload if it has type `T`.
	pub fn data<T: Any>(&self) -> Option<&T> {
		self.data.as_deref()?.downcast_ref::<T>()
	}

	/// Looks up an attribute by name.
	pub fn get_attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_ref())
	}

	/// Whether these props qualify their element as a route.
	pub fn is_route_like(&self) -> bool {
		self.path.is_some() || self.index.is_some() || self.element.is_some()
	}
}

impl fmt::Debug for Props {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Props")
			.field("path", &self.path)
			.field("index", &self.index)
			.field("element", &self.element)
			.field("children", &self.children)
			.field("attrs", &self.attrs)
			.field("has_data", &self.data.is_some())
			.finish()
	}
}

/// A context value scoped to a subtree.
#[derive(Clone)]
pub struct Provider {
	pub(crate) type_id: TypeId,
	pub(crate) type_name: &'static str,
	pub(crate) value: Rc<dyn Any>,
	pub(crate) key: Option<String>,
	pub(crate) child: Box<Node>,
}

/// Wraps `child` so that descendants see `value` through [`Scope::context`].
pub fn provide<T: Any>(value: T, child: impl Into<Node>) -> Node {
	Node::Provider(Provider {
		type_id: TypeId::of::<T>(),
		type_name: std::any::type_name::<T>(),
		value: Rc::new(value),
		key: None,
		child: Box::new(child.into()),
	})
}

/// Like [`provide`], but the subtree is remounted whenever `key` changes.
pub fn provide_keyed<T: Any>(key: impl Into<String>, value: T, child: impl Into<Node>) -> Node {
	match provide(value, child) {
		Node::Provider(mut provider) => {
			provider.key = Some(key.into());
			Node::Provider(provider)
		}
		other => other,
	}
}
