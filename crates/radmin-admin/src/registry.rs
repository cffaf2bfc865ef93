//! Resource definitions registered by an admin.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::{Cell, RefCell};

/// What the admin knows about a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
	pub name: String,
	pub options: Value,
	pub has_list: bool,
	pub has_create: bool,
	pub has_edit: bool,
	pub has_show: bool,
	pub icon: Option<String>,
}

/// Registry of resource definitions, keyed by name, in registration order.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
	definitions: RefCell<Vec<ResourceDefinition>>,
	registrations: Cell<usize>,
}

impl ResourceRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `definition`, replacing any entry with the same name.
	/// Returns `false` without touching the registry when an equal entry is
	/// already present.
	pub fn register(&self, definition: ResourceDefinition) -> bool {
		let mut definitions = self.definitions.borrow_mut();
		match definitions.iter_mut().find(|existing| existing.name == definition.name) {
			Some(existing) if *existing == definition => return false,
			Some(existing) => *existing = definition,
			None => definitions.push(definition),
		}
		self.registrations.set(self.registrations.get() + 1);
		tracing::debug!(count = definitions.len(), "resource registered");
		true
	}

	pub fn unregister(&self, name: &str) {
		self.definitions.borrow_mut().retain(|definition| definition.name != name);
	}

	pub fn get(&self, name: &str) -> Option<ResourceDefinition> {
		self.definitions
			.borrow()
			.iter()
			.find(|definition| definition.name == name)
			.cloned()
	}

	pub fn definitions(&self) -> Vec<ResourceDefinition> {
		self.definitions.borrow().clone()
	}

	/// How many registrations actually changed the registry.
	pub fn registrations(&self) -> usize {
		self.registrations.get()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn posts() -> ResourceDefinition {
		ResourceDefinition {
			name: "posts".into(),
			has_list: true,
			options: json!({"label": "Posts"}),
			..Default::default()
		}
	}

	#[rstest]
	fn test_register_is_idempotent() {
		// Arrange
		let registry = ResourceRegistry::new();

		// Act
		let first = registry.register(posts());
		let second = registry.register(posts());

		// Assert
		assert!(first);
		assert!(!second);
		assert_eq!(registry.registrations(), 1);
		assert_eq!(registry.definitions().len(), 1);
	}

	#[rstest]
	fn test_changed_definition_replaces_entry() {
		let registry = ResourceRegistry::new();
		registry.register(posts());

		let changed = registry.register(ResourceDefinition {
			has_edit: true,
			..posts()
		});

		assert!(changed);
		assert_eq!(registry.registrations(), 2);
		assert!(registry.get("posts").unwrap().has_edit);
	}

	#[rstest]
	fn test_unregister() {
		let registry = ResourceRegistry::new();
		registry.register(posts());

		registry.unregister("posts");

		assert!(registry.get("posts").is_none());
	}
}
