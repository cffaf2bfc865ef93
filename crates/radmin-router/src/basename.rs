//! The mount prefix of the admin.

use radmin_view::{Node, Scope, provide};

/// A fixed URL prefix under which everything is mounted, e.g. `/admin`.
///
/// Stored without a trailing slash; `/` and the empty string both mean "no
/// basename".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basename(String);

impl Basename {
	pub fn new(basename: impl AsRef<str>) -> Self {
		let trimmed = basename.as_ref().trim_end_matches('/');
		if trimmed.is_empty() {
			return Self::default();
		}
		if trimmed.starts_with('/') {
			Self(trimmed.to_owned())
		} else {
			Self(format!("/{trimmed}"))
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Removes the basename from `pathname`, segment-aware. Returns `None`
	/// when `pathname` lies outside the basename.
	///
	/// ```
	/// use radmin_router::Basename;
	///
	/// let basename = Basename::new("/admin");
	/// assert_eq!(basename.strip("/admin/posts").as_deref(), Some("/posts"));
	/// assert_eq!(basename.strip("/admin").as_deref(), Some("/"));
	/// assert_eq!(basename.strip("/administrator"), None);
	/// ```
	pub fn strip(&self, pathname: &str) -> Option<String> {
		if self.is_empty() {
			return Some(pathname.to_owned());
		}
		let rest = pathname.strip_prefix(self.0.as_str())?;
		if rest.is_empty() {
			Some("/".to_owned())
		} else if rest.starts_with('/') {
			Some(rest.to_owned())
		} else {
			None
		}
	}

	/// Prefixes an absolute `path` with the basename unless it already
	/// carries it. Relative paths are returned unchanged.
	pub fn resolve(&self, path: &str) -> String {
		if self.is_empty() || !path.starts_with('/') {
			return path.to_owned();
		}
		if self.strip(path).is_some() {
			return path.to_owned();
		}
		format!("{}{path}", self.0)
	}
}

impl From<&str> for Basename {
	fn from(basename: &str) -> Self {
		Self::new(basename)
	}
}

impl From<String> for Basename {
	fn from(basename: String) -> Self {
		Self::new(basename)
	}
}

/// Makes `basename` visible to every routing hook below.
pub fn basename_provider(basename: impl Into<Basename>, child: impl Into<Node>) -> Node {
	provide(basename.into(), child)
}

/// The nearest basename, or the empty one.
pub fn use_basename(scope: &Scope) -> Basename {
	scope.context::<Basename>().unwrap_or_default()
}
