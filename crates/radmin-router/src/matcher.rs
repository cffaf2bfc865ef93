//! Segment-based path matching.
//!
//! Patterns are compared segment by segment against the pathname. No regular
//! expression is ever built from a pattern, so matching is linear in the
//! length of the input and adversarial pathnames cannot trigger catastrophic
//! backtracking.
//!
//! Supported pattern syntax:
//!
//! - static segments, compared literally (`.` and friends are not wildcards),
//! - `:name` segments, binding one percent-decoded pathname segment,
//! - a trailing `/*` splat, binding the decoded remainder (possibly empty),
//! - the catch-alls `*` and `/*`.

use crate::location::decode_uri_component;
use std::collections::HashMap;

/// Params extracted from a match.
pub type Params = HashMap<String, String>;

/// Key of the splat param.
pub const SPLAT: &str = "*";

/// A path pattern with its end policy.
///
/// With `end == true` (the default) the pathname must not have more segments
/// than the pattern, unless the pattern ends with a splat. With `end == false`
/// the pattern matches as a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
	pub path: String,
	pub end: bool,
}

impl RoutePattern {
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			end: true,
		}
	}

	/// A pattern that matches any pathname it is a prefix of.
	pub fn prefix(path: impl Into<String>) -> Self {
		Self::new(path).end(false)
	}

	pub fn end(mut self, end: bool) -> Self {
		self.end = end;
		self
	}
}

impl From<&str> for RoutePattern {
	fn from(path: &str) -> Self {
		Self::new(path)
	}
}

impl From<String> for RoutePattern {
	fn from(path: String) -> Self {
		Self::new(path)
	}
}

impl From<&String> for RoutePattern {
	fn from(path: &String) -> Self {
		Self::new(path.as_str())
	}
}

impl From<&RoutePattern> for RoutePattern {
	fn from(pattern: &RoutePattern) -> Self {
		pattern.clone()
	}
}

/// A successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
	/// Decoded params.
	pub params: Params,
	/// The matched portion of the pathname, including any splat remainder.
	pub pathname: String,
	/// The portion matched by the non-splat segments; nested routes mount here.
	pub pathname_base: String,
}

impl RouteMatch {
	fn root() -> Self {
		Self {
			params: Params::new(),
			pathname: "/".to_owned(),
			pathname_base: "/".to_owned(),
		}
	}
}

/// Matches `pattern` against `pathname`.
///
/// Returns `None` on any mismatch; never panics.
///
/// # Example
///
/// ```
/// use radmin_router::{RoutePattern, match_path};
///
/// let m = match_path("/posts/:id", "/posts/123").unwrap();
/// assert_eq!(m.params["id"], "123");
/// assert_eq!(m.pathname_base, "/posts/123");
///
/// assert!(match_path("/posts", "/posts/1").is_none());
/// assert!(match_path(RoutePattern::prefix("/posts"), "/posts/1").is_some());
/// ```
pub fn match_path(pattern: impl Into<RoutePattern>, pathname: &str) -> Option<RouteMatch> {
	let RoutePattern { path, end } = pattern.into();

	if path == "*" || path == "/*" {
		let rest = if path == "/*" {
			pathname.strip_prefix('/').unwrap_or(pathname)
		} else {
			pathname
		};
		return Some(RouteMatch {
			params: Params::from([(SPLAT.to_owned(), rest.to_owned())]),
			pathname: pathname.to_owned(),
			pathname_base: "/".to_owned(),
		});
	}

	if path.is_empty() || path == "/" {
		let at_root = pathname.is_empty() || pathname == "/";
		return (at_root || !end).then(RouteMatch::root);
	}

	let normalized = normalize(&path);
	let has_splat = normalized.ends_with("/*");

	let mut pattern_segments: Vec<&str> = segments(&normalized).collect();
	if has_splat && pattern_segments.last() == Some(&SPLAT) {
		pattern_segments.pop();
	}
	let pathname_segments: Vec<&str> = segments(pathname).collect();

	if pattern_segments.len() > pathname_segments.len() {
		return None;
	}
	if end && !has_splat && pathname_segments.len() > pattern_segments.len() {
		return None;
	}

	let mut params = Params::new();
	for (pattern_segment, segment) in pattern_segments.iter().zip(&pathname_segments) {
		match pattern_segment.strip_prefix(':') {
			Some(name) => {
				params.insert(name.to_owned(), decode_uri_component(segment));
			}
			None if pattern_segment != segment => return None,
			None => {}
		}
	}

	let base_len = pattern_segments.len();
	if has_splat {
		let rest = pathname_segments[base_len..].join("/");
		params.insert(SPLAT.to_owned(), decode_uri_component(&rest));
	}
	let matched_len = if has_splat {
		pathname_segments.len()
	} else {
		base_len
	};

	Some(RouteMatch {
		params,
		pathname: join(&pathname_segments[..matched_len]),
		pathname_base: join(&pathname_segments[..base_len]),
	})
}

/// Leading slash enforced, one trailing slash removed (unless root).
fn normalize(path: &str) -> String {
	let mut normalized = if path.starts_with('/') {
		path.to_owned()
	} else {
		format!("/{path}")
	};
	if normalized.len() > 1 && normalized.ends_with('/') {
		normalized.pop();
	}
	normalized
}

/// Non-empty `/`-separated segments; repeated slashes collapse.
fn segments(path: &str) -> impl Iterator<Item = &str> {
	path.split('/').filter(|segment| !segment.is_empty())
}

fn join(segments: &[&str]) -> String {
	format!("/{}", segments.join("/"))
}
