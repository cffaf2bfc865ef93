//! The `CustomRoutes` element.

use radmin_view::{Element, Node, Props};

/// Type marker of custom route groups.
pub const CUSTOM_ROUTES: &str = "CustomRoutes";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CustomRoutesProps {
	no_layout: bool,
}

/// Routes rendered inside the admin layout.
pub fn custom_routes(routes: impl IntoIterator<Item = Node>) -> Element {
	group(routes, false)
}

/// Routes rendered outside the layout, reachable whatever the auth status.
pub fn custom_routes_no_layout(routes: impl IntoIterator<Item = Node>) -> Element {
	group(routes, true)
}

fn group(routes: impl IntoIterator<Item = Node>, no_layout: bool) -> Element {
	let props = Props::new()
		.children(routes)
		.with_data(CustomRoutesProps { no_layout });
	Element::component(CUSTOM_ROUTES, props, |_, props| Node::fragment(props.children.clone()))
}

/// `Some(no_layout)` if `element` is a custom route group.
pub fn custom_routes_layout(element: &Element) -> Option<bool> {
	if element.component_name() != Some(CUSTOM_ROUTES) {
		return None;
	}
	Some(
		element
			.props()
			.data::<CustomRoutesProps>()
			.is_some_and(|props| props.no_layout),
	)
}
