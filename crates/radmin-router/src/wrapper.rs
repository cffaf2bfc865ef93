//! Embedded versus standalone mounting.

use crate::engine::{EngineRouter, router_root};
use crate::history::History;
use crate::hooks::use_in_router_context;
use radmin_view::{Node, Props};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
struct WrapperBasename(Option<String>);

/// Renders `children` inside the host router when one is mounted above, and
/// inside a router of its own, on hash history, otherwise.
pub fn router_wrapper(basename: Option<String>, children: impl IntoIterator<Item = Node>) -> Node {
	let props = Props::new()
		.children(children)
		.with_data(WrapperBasename(basename));
	Node::component("RouterWrapper", props, |scope, props| {
		let embedded = use_in_router_context(scope);
		if embedded {
			return Node::fragment(props.children.clone());
		}
		let basename = props.data::<WrapperBasename>().cloned().unwrap_or_default();
		internal_router(basename.0, props.children.clone())
	})
}

fn internal_router(basename: Option<String>, children: Vec<Node>) -> Node {
	let props = Props::new()
		.children(children)
		.with_data(WrapperBasename(basename));
	Node::component("InternalRouter", props, |scope, props| {
		// The root is fixed at creation, so it renders whatever children the
		// latest render stored here.
		let current = scope.use_ref(Node::default);
		*current.borrow_mut() = Node::fragment(props.children.clone());

		let router = scope.use_ref(|| None::<Rc<EngineRouter>>);
		let mut slot = router.borrow_mut();
		let router = slot.get_or_insert_with(|| {
			let basename = props
				.data::<WrapperBasename>()
				.and_then(|basename| basename.0.clone())
				.unwrap_or_default();
			tracing::debug!(basename = %basename, "creating internal hash router");
			let start = if basename.is_empty() { "/".to_owned() } else { basename.clone() };
			let root = children_root(Rc::clone(&current));
			Rc::new(EngineRouter::new(History::hash_at(&start), root).with_basepath(basename))
		});
		router_root(Rc::clone(router))
	})
}

fn children_root(current: Rc<RefCell<Node>>) -> Node {
	Node::component("InternalRoot", Props::new(), move |_, _| current.borrow().clone())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::use_router;
	use radmin_view::Root;
	use rstest::rstest;

	fn probe() -> Node {
		Node::component("Probe", Props::new(), |scope, _| match use_router(scope) {
			Some(router) => Node::text(format!("{:?}@{}", router.history().kind(), router.location().pathname)),
			None => Node::text("none"),
		})
	}

	#[rstest]
	fn test_standalone_creates_hash_router_at_basename() {
		let root = Root::new(router_wrapper(Some("/admin".into()), [probe()]));

		assert_eq!(root.render_to_string(), "Hash@/admin");
	}

	#[rstest]
	fn test_embedded_reuses_host_router() {
		let host = Rc::new(EngineRouter::new(History::memory_at("/host"), router_wrapper(None, [probe()])));

		let root = Root::new(router_root(host));

		assert_eq!(root.render_to_string(), "Memory@/host");
	}

	#[rstest]
	fn test_internal_router_is_created_once() {
		// Arrange
		let seen = Rc::new(RefCell::new(Vec::new()));
		let recorder = {
			let seen = Rc::clone(&seen);
			Node::component("Recorder", Props::new(), move |scope, _| {
				if let Some(router) = use_router(scope) {
					seen.borrow_mut().push(Rc::as_ptr(&router) as usize);
				}
				Node::Empty
			})
		};
		let root = Root::new(router_wrapper(None, [recorder]));

		// Act
		root.render();
		root.render();

		// Assert
		let seen = seen.borrow();
		assert!(seen.len() >= 2);
		assert!(seen.iter().all(|ptr| *ptr == seen[0]));
	}
}
