//! Providers and probes shared by the admin integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use radmin_admin::{
	AuthError, AuthProvider, CanAccessParams, CreateParams, DataError, DataProvider, DeleteManyParams, DeleteParams,
	GetListParams, GetListResult, GetManyParams, GetManyReferenceParams, GetOneParams, IdsResult, RecordResult,
	UpdateManyParams, UpdateParams, use_data_provider,
};
use radmin_router::{EngineRouter, History, router_root};
use radmin_view::{Element, Node, Props, Root};
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Records per resource, read by `get_list`.
#[derive(Default)]
pub struct MemoryData {
	records: HashMap<String, Vec<Value>>,
	pub calls: Rc<RefCell<Vec<String>>>,
}

impl MemoryData {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, resource: &str, records: Vec<Value>) -> Self {
		self.records.insert(resource.to_owned(), records);
		self
	}

	fn unsupported(&self, method: &str) -> DataError {
		self.calls.borrow_mut().push(method.to_owned());
		DataError::new(format!("{method} is not supported"), Some(501))
	}
}

#[async_trait(?Send)]
impl DataProvider for MemoryData {
	async fn get_list(&self, resource: &str, _params: GetListParams) -> Result<GetListResult, DataError> {
		self.calls.borrow_mut().push(format!("get_list:{resource}"));
		let data = self.records.get(resource).cloned().unwrap_or_default();
		Ok(GetListResult {
			total: Some(data.len() as u64),
			data,
		})
	}

	async fn get_one(&self, _: &str, _: GetOneParams) -> Result<RecordResult, DataError> {
		Err(self.unsupported("get_one"))
	}

	async fn get_many(&self, _: &str, _: GetManyParams) -> Result<GetListResult, DataError> {
		Err(self.unsupported("get_many"))
	}

	async fn get_many_reference(&self, _: &str, _: GetManyReferenceParams) -> Result<GetListResult, DataError> {
		Err(self.unsupported("get_many_reference"))
	}

	async fn create(&self, _: &str, _: CreateParams) -> Result<RecordResult, DataError> {
		Err(self.unsupported("create"))
	}

	async fn update(&self, _: &str, _: UpdateParams) -> Result<RecordResult, DataError> {
		Err(self.unsupported("update"))
	}

	async fn update_many(&self, _: &str, _: UpdateManyParams) -> Result<IdsResult, DataError> {
		Err(self.unsupported("update_many"))
	}

	async fn delete(&self, _: &str, _: DeleteParams) -> Result<RecordResult, DataError> {
		Err(self.unsupported("delete"))
	}

	async fn delete_many(&self, _: &str, _: DeleteManyParams) -> Result<IdsResult, DataError> {
		Err(self.unsupported("delete_many"))
	}
}

/// Shared view of what a [`ScriptedAuth`] was asked.
#[derive(Default)]
pub struct AuthLog {
	pub logouts: Cell<usize>,
	pub check_auth_calls: Cell<usize>,
	pub can_access_calls: RefCell<Vec<String>>,
}

/// An auth provider answering from fixed values.
pub struct ScriptedAuth {
	pub authenticated: bool,
	pub permissions: Value,
	/// Resources `can_access` allows; `None` leaves `can_access` unimplemented.
	pub accessible: Option<HashSet<String>>,
	/// Returned by `get_permissions` instead of `permissions` when set.
	pub permissions_error: Option<AuthError>,
	pub log: Rc<AuthLog>,
}

impl ScriptedAuth {
	pub fn new(authenticated: bool) -> Self {
		Self {
			authenticated,
			permissions: json!("user"),
			accessible: None,
			permissions_error: None,
			log: Rc::default(),
		}
	}

	pub fn permissions(mut self, permissions: Value) -> Self {
		self.permissions = permissions;
		self
	}

	pub fn failing_permissions(mut self, error: AuthError) -> Self {
		self.permissions_error = Some(error);
		self
	}

	pub fn accessible(mut self, resources: &[&str]) -> Self {
		self.accessible = Some(resources.iter().map(|r| (*r).to_owned()).collect());
		self
	}
}

#[async_trait(?Send)]
impl AuthProvider for ScriptedAuth {
	async fn login(&self, _: Value) -> Result<(), AuthError> {
		Ok(())
	}

	async fn logout(&self) -> Result<Option<String>, AuthError> {
		self.log.logouts.set(self.log.logouts.get() + 1);
		Ok(None)
	}

	async fn check_auth(&self, _: Value) -> Result<(), AuthError> {
		self.log.check_auth_calls.set(self.log.check_auth_calls.get() + 1);
		if self.authenticated {
			Ok(())
		} else {
			Err(AuthError::Unauthenticated)
		}
	}

	async fn check_error(&self, error: &DataError) -> Result<(), AuthError> {
		match error.status() {
			Some(401 | 403) => Err(AuthError::AccessDenied),
			_ => Ok(()),
		}
	}

	async fn get_permissions(&self, _: Value) -> Result<Value, AuthError> {
		match &self.permissions_error {
			Some(error) => Err(error.clone()),
			None => Ok(self.permissions.clone()),
		}
	}

	async fn can_access(&self, params: CanAccessParams) -> Result<bool, AuthError> {
		self.log.can_access_calls.borrow_mut().push(params.resource.clone());
		Ok(self
			.accessible
			.as_ref()
			.is_none_or(|accessible| accessible.contains(&params.resource)))
	}

	fn has_can_access(&self) -> bool {
		self.accessible.is_some()
	}
}

/// A list view that fetches `resource` and renders one item per record
/// title.
pub fn record_list(resource: &'static str) -> Node {
	Node::component("RecordList", Props::new(), move |scope, _| {
		let data = use_data_provider(scope);
		let records = scope.use_state(Vec::<Value>::new);
		let spawner = scope.spawner();
		scope.use_effect((), {
			let records = records.clone();
			move || {
				let data = data?;
				spawner.spawn(async move {
					if let Ok(result) = data.get_list(resource, GetListParams::default()).await {
						records.set(result.data);
					}
				});
				None
			}
		});
		let mut list = Element::tag("ul").attr("class", resource);
		for record in records.get() {
			let title = record["title"].as_str().unwrap_or_default().to_owned();
			list = list.child(Element::tag("li").child(Node::text(title)));
		}
		list.into()
	})
}

/// Mounts `admin` inside a host router over memory history at `at`.
pub fn mount(admin: Node, at: &str) -> (Rc<History>, Root) {
	let history = History::memory_at(at);
	let root = Root::new(router_root(Rc::new(EngineRouter::new(Rc::clone(&history), admin))));
	(history, root)
}

/// Like [`mount`] with a caller-driven clock.
pub fn mount_with_clock(admin: Node, at: &str, clock: Rc<radmin_view::ManualClock>) -> (Rc<History>, Root) {
	let history = History::memory_at(at);
	let root = Root::with_clock(router_root(Rc::new(EngineRouter::new(Rc::clone(&history), admin))), clock);
	(history, root)
}
