//! Rendered output.
//!
//! A render pass turns the [`Node`](crate::Node) tree into a [`View`]: all
//! components resolved, only tags and text left.

use std::borrow::Cow;

/// Rendered view tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
	/// A rendered tag.
	Element(ElementView),
	/// A text node.
	Text(Cow<'static, str>),
	/// Siblings without a wrapper.
	Fragment(Vec<View>),
	/// Nothing.
	#[default]
	Empty,
}

/// A rendered tag with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementView {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<View>,
	is_void: bool,
}

/// Void elements that cannot have children.
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

impl ElementView {
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = VOID_ELEMENTS.contains(&tag.as_ref());
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
		}
	}

	pub fn attr(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Cow<'static, str>>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	pub fn child(mut self, child: View) -> Self {
		self.children.push(child);
		self
	}

	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Looks up an attribute value.
	pub fn get_attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_ref())
	}

	pub fn child_views(&self) -> &[View] {
		&self.children
	}
}

impl View {
	/// Renders the view to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_to_string_inner(&mut output);
		output
	}

	fn render_to_string_inner(&self, output: &mut String) {
		match self {
			View::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());

				for (name, value) in el.attrs() {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if el.is_void {
					output.push_str(" />");
				} else {
					output.push('>');
					for child in el.child_views() {
						child.render_to_string_inner(output);
					}
					output.push_str("</");
					output.push_str(el.tag_name());
					output.push('>');
				}
			}
			View::Text(text) => output.push_str(&html_escape(text)),
			View::Fragment(children) => {
				for child in children {
					child.render_to_string_inner(output);
				}
			}
			View::Empty => {}
		}
	}

	/// Concatenated text content, without markup.
	pub fn text_content(&self) -> String {
		let mut output = String::new();
		self.collect_text(&mut output);
		output
	}

	fn collect_text(&self, output: &mut String) {
		match self {
			View::Element(el) => el.children.iter().for_each(|c| c.collect_text(output)),
			View::Text(text) => output.push_str(text),
			View::Fragment(children) => children.iter().for_each(|c| c.collect_text(output)),
			View::Empty => {}
		}
	}

	/// Depth-first search for the first element with the given tag.
	pub fn find_element(&self, tag: &str) -> Option<&ElementView> {
		match self {
			View::Element(el) if el.tag_name() == tag => Some(el),
			View::Element(el) => el.children.iter().find_map(|c| c.find_element(tag)),
			View::Fragment(children) => children.iter().find_map(|c| c.find_element(tag)),
			View::Text(_) | View::Empty => None,
		}
	}
}

/// Escapes HTML special characters.
fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}
