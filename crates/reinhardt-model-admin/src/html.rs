//! HTML attribute rendering for list templates

use html_escape::encode_double_quoted_attribute;
use std::fmt;

/// Ordered set of HTML attributes rendered as ` key="value"` pairs.
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::html::HtmlAttributes;
///
/// let mut attrs = HtmlAttributes::new();
/// attrs.insert("data-ordering", "false");
/// attrs.insert("title", "Tom & \"Jerry\"");
///
/// assert_eq!(
///     attrs.render(),
///     r#" data-ordering="false" title="Tom &amp; &quot;Jerry&quot;""#
/// );
/// assert_eq!(HtmlAttributes::new().render(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlAttributes {
	attributes: Vec<(String, String)>,
}

impl HtmlAttributes {
	/// Create an empty attribute set
	pub fn new() -> Self {
		Self::default()
	}

	/// Set an attribute, replacing the value of an existing key in place
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		let key = key.into();
		let value = value.into();
		match self.attributes.iter_mut().find(|(k, _)| *k == key) {
			Some((_, existing)) => *existing = value,
			None => self.attributes.push((key, value)),
		}
		self
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	pub fn is_empty(&self) -> bool {
		self.attributes.is_empty()
	}

	pub fn len(&self) -> usize {
		self.attributes.len()
	}

	/// Render the attributes, each prefixed by a space; empty input renders to `""`
	pub fn render(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for HtmlAttributes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (key, value) in &self.attributes {
			write!(
				f,
				" {}=\"{}\"",
				encode_double_quoted_attribute(key),
				encode_double_quoted_attribute(value)
			)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn empty_attributes_render_nothing() {
		// Arrange
		let attrs = HtmlAttributes::new();

		// Act
		let rendered = attrs.render();

		// Assert
		assert_eq!(rendered, "");
		assert!(attrs.is_empty());
	}

	#[rstest]
	fn insert_replaces_existing_key_in_place() {
		// Arrange
		let mut attrs = HtmlAttributes::new();
		attrs.insert("a", "1").insert("b", "2");

		// Act
		attrs.insert("a", "3");

		// Assert
		assert_eq!(attrs.render(), r#" a="3" b="2""#);
		assert_eq!(attrs.len(), 2);
		assert_eq!(attrs.get("a"), Some("3"));
	}

	#[rstest]
	#[case("Tom & Jerry", r#" title="Tom &amp; Jerry""#)]
	#[case("say \"hi\"", r#" title="say &quot;hi&quot;""#)]
	fn escapes_attribute_values(#[case] input: &str, #[case] expected: &str) {
		// Arrange
		let mut attrs = HtmlAttributes::new();

		// Act
		attrs.insert("title", input);

		// Assert
		assert_eq!(attrs.render(), expected);
	}
}
