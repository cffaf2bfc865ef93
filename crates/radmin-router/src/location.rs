//! Router-agnostic locations and navigation targets.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Characters `encodeURIComponent` leaves untouched.
pub const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Percent-encodes one path segment.
pub fn encode_uri_component(value: &str) -> String {
	utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Percent-decodes one path segment. `+` is kept as is. Input that does not
/// decode to valid UTF-8 is returned unchanged.
pub fn decode_uri_component(raw: &str) -> String {
	match percent_decode_str(raw).decode_utf8() {
		Ok(decoded) => decoded.into_owned(),
		Err(_) => {
			tracing::debug!(segment = raw, "segment is not valid percent-encoded UTF-8; keeping it raw");
			raw.to_owned()
		}
	}
}

/// Snapshot of the current URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterLocation {
	pub pathname: String,
	/// Query string including the leading `?`, or empty.
	pub search: String,
	/// Fragment including the leading `#`, or empty.
	pub hash: String,
	/// Opaque data attached by whoever navigated here.
	pub state: Value,
	pub key: String,
}

impl RouterLocation {
	/// Parses an href such as `/posts?page=2#top`.
	pub fn parse(href: &str) -> Self {
		let (pathname, search, hash) = split_href(href);
		Self {
			pathname,
			search,
			hash,
			state: Value::Null,
			key: String::new(),
		}
	}

	pub fn href(&self) -> String {
		format!("{}{}{}", self.pathname, self.search, self.hash)
	}
}

/// Splits an href into `(pathname, search, hash)`. An empty pathname becomes
/// `/`.
pub fn split_href(href: &str) -> (String, String, String) {
	let (rest, hash) = match href.find('#') {
		Some(at) => (&href[..at], &href[at..]),
		None => (href, ""),
	};
	let (pathname, search) = match rest.find('?') {
		Some(at) => (&rest[..at], &rest[at..]),
		None => (rest, ""),
	};
	let pathname = if pathname.is_empty() { "/" } else { pathname };
	(pathname.to_owned(), search.to_owned(), hash.to_owned())
}

/// Appends search and hash exactly once, adding `?`/`#` when missing.
pub fn append_search_and_hash(url: &mut String, search: Option<&str>, hash: Option<&str>) {
	if let Some(search) = search.filter(|s| !s.is_empty()) {
		if !search.starts_with('?') {
			url.push('?');
		}
		url.push_str(search);
	}
	if let Some(hash) = hash.filter(|h| !h.is_empty()) {
		if !hash.starts_with('#') {
			url.push('#');
		}
		url.push_str(hash);
	}
}

/// Parts of a location to navigate to. Missing parts are left unchanged or
/// empty, see [`NavigateFn`](crate::NavigateFn).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialLocation {
	pub pathname: Option<String>,
	pub search: Option<String>,
	pub hash: Option<String>,
	pub state: Option<Value>,
}

impl PartialLocation {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn pathname(mut self, pathname: impl Into<String>) -> Self {
		self.pathname = Some(pathname.into());
		self
	}

	pub fn search(mut self, search: impl Into<String>) -> Self {
		self.search = Some(search.into());
		self
	}

	pub fn hash(mut self, hash: impl Into<String>) -> Self {
		self.hash = Some(hash.into());
		self
	}

	pub fn state(mut self, state: Value) -> Self {
		self.state = Some(state);
		self
	}
}

/// A navigation target.
#[derive(Debug, Clone, PartialEq)]
pub enum To {
	/// Move through history by this many entries.
	Delta(isize),
	/// A path, possibly with query and fragment.
	Path(String),
	/// A partial location.
	Location(PartialLocation),
}

impl From<isize> for To {
	fn from(delta: isize) -> Self {
		Self::Delta(delta)
	}
}

impl From<i32> for To {
	fn from(delta: i32) -> Self {
		Self::Delta(delta as isize)
	}
}

impl From<&str> for To {
	fn from(path: &str) -> Self {
		Self::Path(path.to_owned())
	}
}

impl From<String> for To {
	fn from(path: String) -> Self {
		Self::Path(path)
	}
}

impl From<PartialLocation> for To {
	fn from(location: PartialLocation) -> Self {
		Self::Location(location)
	}
}
