//! Admin errors.

use radmin_router::RouterError;

/// Configuration errors, reported by [`Admin::build`](crate::Admin::build)
/// before anything renders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AdminError {
	#[error("you can only provide one function child to the admin")]
	MultipleFunctionChildren,
	#[error("the admin needs a data provider")]
	MissingDataProvider,
	#[error("the admin is empty; provide a ready component, or pass Resource or CustomRoutes as children")]
	EmptyAdmin,
	#[error("invalid admin settings: {message}")]
	InvalidSettings { message: String },
	#[error(transparent)]
	Router(#[from] RouterError),
}

/// Errors reported by an [`AuthProvider`](crate::AuthProvider).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
	#[error("not authenticated")]
	Unauthenticated,
	#[error("access denied")]
	AccessDenied,
	/// Any other provider failure, optionally with an HTTP-like status.
	#[error("{message}")]
	Provider { message: String, status: Option<u16> },
}

impl AuthError {
	pub fn provider(message: impl Into<String>) -> Self {
		Self::Provider {
			message: message.into(),
			status: None,
		}
	}
}

/// Errors reported by a [`DataProvider`](crate::DataProvider).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DataError {
	#[error("{message}")]
	Provider { message: String, status: Option<u16> },
}

impl DataError {
	pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
		Self::Provider {
			message: message.into(),
			status,
		}
	}

	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Provider { status, .. } => *status,
		}
	}
}
