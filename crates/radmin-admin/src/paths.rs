//! Paths of resource views.

use radmin_router::encode_uri_component;
use serde::{Deserialize, Serialize};

/// Which view of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
	List,
	Create,
	Edit,
	Show,
}

/// Builds the path of a resource view under `basename`.
///
/// Edit and show need a record id; without one the list path is returned.
///
/// ```
/// use radmin_admin::{PathKind, create_path};
///
/// assert_eq!(create_path("/admin", "posts", PathKind::Show, Some("a/b")), "/admin/posts/a%2Fb/show");
/// assert_eq!(create_path("", "/posts", PathKind::Create, None), "/posts/create");
/// ```
pub fn create_path(basename: &str, resource: &str, kind: PathKind, id: Option<&str>) -> String {
	let base = format!("{basename}/{resource}");
	let path = match (kind, id) {
		(PathKind::List, _) | (PathKind::Edit | PathKind::Show, None) => base,
		(PathKind::Create, _) => format!("{base}/create"),
		(PathKind::Edit, Some(id)) => format!("{base}/{}", encode_uri_component(id)),
		(PathKind::Show, Some(id)) => format!("{base}/{}/show", encode_uri_component(id)),
	};
	collapse_slashes(&path)
}

fn collapse_slashes(path: &str) -> String {
	let mut out = String::with_capacity(path.len());
	for c in path.chars() {
		if c == '/' && out.ends_with('/') {
			continue;
		}
		out.push(c);
	}
	out
}
