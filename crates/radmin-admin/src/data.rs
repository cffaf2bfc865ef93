//! The data provider contract.
//!
//! Records are opaque JSON values; every method takes the resource name and
//! resolves or rejects with a [`DataError`].

use crate::error::DataError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	pub page: u32,
	pub per_page: u32,
}

impl Default for Pagination {
	fn default() -> Self {
		Self { page: 1, per_page: 10 }
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
	#[default]
	Asc,
	Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
	pub field: String,
	pub order: SortOrder,
}

impl Default for Sort {
	fn default() -> Self {
		Self {
			field: "id".to_owned(),
			order: SortOrder::Asc,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetListParams {
	pub pagination: Pagination,
	pub sort: Sort,
	pub filter: Value,
	pub meta: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetListResult {
	pub data: Vec<Value>,
	pub total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetOneParams {
	pub id: Value,
	pub meta: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetManyParams {
	pub ids: Vec<Value>,
	pub meta: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetManyReferenceParams {
	pub target: String,
	pub id: Value,
	pub pagination: Pagination,
	pub sort: Sort,
	pub filter: Value,
	pub meta: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateParams {
	pub data: Value,
	pub meta: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateParams {
	pub id: Value,
	pub data: Value,
	pub previous_data: Option<Value>,
	pub meta: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateManyParams {
	pub ids: Vec<Value>,
	pub data: Value,
	pub meta: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteParams {
	pub id: Value,
	pub previous_data: Option<Value>,
	pub meta: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteManyParams {
	pub ids: Vec<Value>,
	pub meta: Option<Value>,
}

/// A single record, as returned by `get_one`, `create`, `update` and
/// `delete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
	pub data: Value,
}

/// Ids touched by `update_many` and `delete_many`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdsResult {
	pub data: Vec<Value>,
}

/// Backend access for every resource.
#[async_trait(?Send)]
pub trait DataProvider {
	async fn get_list(&self, resource: &str, params: GetListParams) -> Result<GetListResult, DataError>;

	async fn get_one(&self, resource: &str, params: GetOneParams) -> Result<RecordResult, DataError>;

	async fn get_many(&self, resource: &str, params: GetManyParams) -> Result<GetListResult, DataError>;

	async fn get_many_reference(
		&self,
		resource: &str,
		params: GetManyReferenceParams,
	) -> Result<GetListResult, DataError>;

	async fn create(&self, resource: &str, params: CreateParams) -> Result<RecordResult, DataError>;

	async fn update(&self, resource: &str, params: UpdateParams) -> Result<RecordResult, DataError>;

	async fn update_many(&self, resource: &str, params: UpdateManyParams) -> Result<IdsResult, DataError>;

	async fn delete(&self, resource: &str, params: DeleteParams) -> Result<RecordResult, DataError>;

	async fn delete_many(&self, resource: &str, params: DeleteManyParams) -> Result<IdsResult, DataError>;
}
