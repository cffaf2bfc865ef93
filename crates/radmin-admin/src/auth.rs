//! The auth provider contract and the hooks built on it.

use crate::context::use_admin_context;
use crate::data::DataProvider;
use crate::error::{AuthError, DataError};
use async_trait::async_trait;
use radmin_router::NavigateOptions;
use radmin_router::use_router_provider;
use radmin_view::{Cleanup, Node, Props, Scope};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// What `can_access` is asked about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanAccessParams {
	pub action: String,
	pub resource: String,
	pub record: Option<Value>,
}

impl CanAccessParams {
	pub fn new(action: impl Into<String>, resource: impl Into<String>) -> Self {
		Self {
			action: action.into(),
			resource: resource.into(),
			record: None,
		}
	}
}

/// Authentication and authorization backend.
#[async_trait(?Send)]
pub trait AuthProvider {
	async fn login(&self, params: Value) -> Result<(), AuthError>;

	/// Returns where to send the user afterwards, or `None` for the login
	/// page.
	async fn logout(&self) -> Result<Option<String>, AuthError>;

	async fn check_auth(&self, params: Value) -> Result<(), AuthError>;

	/// Decides whether a failed data call means the user must be logged out.
	async fn check_error(&self, error: &DataError) -> Result<(), AuthError>;

	async fn get_permissions(&self, params: Value) -> Result<Value, AuthError>;

	/// Only consulted when [`has_can_access`](Self::has_can_access) returns
	/// `true`. A provider overriding this must override that too, or its
	/// answers are never asked for.
	async fn can_access(&self, _params: CanAccessParams) -> Result<bool, AuthError> {
		Ok(true)
	}

	/// Whether [`can_access`](Self::can_access) is implemented. Without it
	/// every resource counts as accessible and `can_access` is never called.
	fn has_can_access(&self) -> bool {
		false
	}
}

/// Logs the user out and sends them to the login page, replacing history.
#[derive(Clone)]
pub struct LogoutFn(Rc<dyn Fn()>);

impl LogoutFn {
	pub fn call(&self) {
		(self.0)()
	}
}

impl fmt::Debug for LogoutFn {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("LogoutFn")
	}
}

pub fn use_auth_provider(scope: &Scope) -> Option<Rc<dyn AuthProvider>> {
	use_admin_context(scope).and_then(|context| context.auth.clone())
}

pub fn use_data_provider(scope: &Scope) -> Option<Rc<dyn DataProvider>> {
	use_admin_context(scope).map(|context| Rc::clone(&context.data))
}

pub fn use_logout(scope: &Scope) -> LogoutFn {
	let context = use_admin_context(scope);
	let navigate = use_router_provider(scope).use_navigate(scope);
	let spawner = scope.spawner();
	LogoutFn(Rc::new(move || {
		let auth = context.as_ref().and_then(|context| context.auth.clone());
		let login_path = context
			.as_ref()
			.map(|context| context.settings.login_path.clone())
			.unwrap_or_else(|| "/login".to_owned());
		let navigate = match &navigate {
			Ok(navigate) => Some(navigate.clone()),
			Err(err) => {
				tracing::error!(error = %err, "logout cannot redirect");
				None
			}
		};
		spawner.spawn(async move {
			let redirect = match auth {
				Some(auth) => match auth.logout().await {
					Ok(redirect) => redirect,
					Err(err) => {
						tracing::warn!(error = %err, "auth provider failed to log out");
						None
					}
				},
				None => None,
			};
			if let Some(navigate) = navigate {
				navigate.navigate(redirect.unwrap_or(login_path), NavigateOptions::replace());
			}
		});
	}))
}

/// Hands `error` to `check_error` and logs out when it rejects.
#[derive(Clone)]
pub struct LogoutIfAccessDenied {
	auth: Option<Rc<dyn AuthProvider>>,
	logout: LogoutFn,
}

impl LogoutIfAccessDenied {
	pub async fn check(&self, error: &DataError) -> bool {
		let Some(auth) = &self.auth else {
			return false;
		};
		match auth.check_error(error).await {
			Ok(()) => false,
			Err(err) => {
				tracing::debug!(error = %err, "access denied; logging out");
				self.logout.call();
				true
			}
		}
	}

	/// Logs out when an auth call failed because the user is not allowed in.
	/// Returns whether it did.
	pub fn deny(&self, error: &AuthError) -> bool {
		match error {
			AuthError::Unauthenticated | AuthError::AccessDenied => {
				tracing::debug!(error = %error, "auth failure; logging out");
				self.logout.call();
				true
			}
			_ => {
				tracing::warn!(error = %error, "auth provider call failed");
				false
			}
		}
	}
}

pub fn use_logout_if_access_denied(scope: &Scope) -> LogoutIfAccessDenied {
	LogoutIfAccessDenied {
		auth: use_auth_provider(scope),
		logout: use_logout(scope),
	}
}

/// Permissions of the current user.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionsState {
	pub permissions: Value,
	pub is_loading: bool,
	/// Set when `get_permissions` failed. `permissions` is then `null`.
	pub error: Option<AuthError>,
}

/// Fetches permissions once, on mount. Without an auth provider permissions
/// are `null` and immediately available.
pub fn use_permissions(scope: &Scope) -> PermissionsState {
	let auth = use_auth_provider(scope);
	let has_auth = auth.is_some();
	let state = scope.use_state(move || PermissionsState {
		permissions: Value::Null,
		is_loading: has_auth,
		error: None,
	});
	let spawner = scope.spawner();
	scope.use_effect((), {
		let state = state.clone();
		move || {
			let auth = auth?;
			spawner.spawn(async move {
				let (permissions, error) = match auth.get_permissions(Value::Null).await {
					Ok(permissions) => (permissions, None),
					Err(err) => {
						tracing::debug!(error = %err, "could not fetch permissions");
						(Value::Null, Some(err))
					}
				};
				state.set(PermissionsState {
					permissions,
					is_loading: false,
					error,
				});
			});
			None
		}
	});
	state.get()
}

/// Logs out as soon as it mounts.
pub fn logout_on_mount() -> Node {
	Node::component("LogoutOnMount", Props::new(), |scope, _| {
		let logout = use_logout(scope);
		scope.use_effect((), move || {
			logout.call();
			None::<Cleanup>
		});
		Node::Empty
	})
}

/// Available to a permission-checked subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Permissions(pub Value);

pub fn use_permissions_context(scope: &Scope) -> Option<Value> {
	scope.context::<Permissions>().map(|Permissions(value)| value)
}

/// Renders `component` once `check_auth` passes, logging out on failure.
/// The permissions are provided to `component` as [`Permissions`].
pub fn with_permissions(auth_params: Value, component: Node) -> Node {
	let props = Props::new().element(component).with_data(auth_params);
	Node::component("WithPermissions", props, |scope, props| {
		let auth = use_auth_provider(scope);
		let logout = use_logout(scope);
		let permissions = use_permissions(scope);
		let params = props.data::<Value>().cloned().unwrap_or(Value::Null);
		let spawner = scope.spawner();
		scope.use_effect(params.clone(), move || {
			let auth = auth?;
			spawner.spawn(async move {
				if let Err(err) = auth.check_auth(params).await {
					tracing::debug!(error = %err, "check_auth failed; logging out");
					logout.call();
				}
			});
			None
		});
		let component = props.element.as_deref().cloned().unwrap_or_default();
		radmin_view::provide(Permissions(permissions.permissions), component)
	})
}
