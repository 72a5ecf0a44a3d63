//! Create/edit form descriptors
//!
//! Every model descriptor owns exactly one [`Form`], created together with the
//! descriptor. Form items are registered inside
//! [`ModelItem::form`](crate::ModelItem::form).

use crate::context;
use crate::error::AdminResult;
use crate::naming;
use serde::{Deserialize, Serialize};

/// Widget used to edit a form item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormItemKind {
	Text,
	Textarea,
	Checkbox,
	Date,
	Hidden,
	/// Choice between `(value, display)` options
	Select(Vec<(String, String)>),
}

/// One editable field of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormItem {
	pub name: String,
	pub label: String,
	pub kind: FormItemKind,
	pub required: bool,
	pub default: Option<String>,
}

impl FormItem {
	/// Create a form item; the label defaults to the humanized name
	pub fn new(name: impl Into<String>, kind: FormItemKind) -> Self {
		let name = name.into();
		Self {
			label: naming::humanize(&name),
			name,
			kind,
			required: false,
			default: None,
		}
	}

	pub fn text(name: impl Into<String>) -> Self {
		Self::new(name, FormItemKind::Text)
	}

	pub fn textarea(name: impl Into<String>) -> Self {
		Self::new(name, FormItemKind::Textarea)
	}

	pub fn checkbox(name: impl Into<String>) -> Self {
		Self::new(name, FormItemKind::Checkbox)
	}

	pub fn date(name: impl Into<String>) -> Self {
		Self::new(name, FormItemKind::Date)
	}

	pub fn hidden(name: impl Into<String>) -> Self {
		Self::new(name, FormItemKind::Hidden)
	}

	pub fn select(
		name: impl Into<String>,
		options: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
	) -> Self {
		let options = options
			.into_iter()
			.map(|(value, display)| (value.into(), display.into()))
			.collect();
		Self::new(name, FormItemKind::Select(options))
	}

	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn default_value(mut self, value: impl Into<String>) -> Self {
		self.default = Some(value.into());
		self
	}
}

/// Form descriptor of one administered model
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::form::{Form, FormItem};
///
/// let mut form = Form::new();
/// form.add(FormItem::text("title").required());
/// form.add(FormItem::textarea("body"));
///
/// assert_eq!(form.len(), 2);
/// assert!(form.get("title").is_some_and(|item| item.required));
/// assert_eq!(form.names(), vec!["title", "body"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
	items: Vec<FormItem>,
}

impl Form {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append an item; registration order is display order
	pub fn add(&mut self, item: FormItem) -> &mut Self {
		self.items.push(item);
		self
	}

	pub fn items(&self) -> &[FormItem] {
		&self.items
	}

	/// First item with the given name
	pub fn get(&self, name: &str) -> Option<&FormItem> {
		self.items.iter().find(|item| item.name == name)
	}

	pub fn names(&self) -> Vec<&str> {
		self.items.iter().map(|item| item.name.as_str()).collect()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

/// Register a form item on the descriptor currently being configured
pub fn register(item: FormItem) -> AdminResult<()> {
	context::with_current("form::register", |model| {
		model.add_form_item(item);
	})
}

/// Register a text input with an explicit label
pub fn text(name: impl Into<String>, label: impl Into<String>) -> AdminResult<()> {
	let item = FormItem::text(name).label(label);
	context::with_current("form::text", |model| {
		model.add_form_item(item);
	})
}

/// Register a textarea with an explicit label
pub fn textarea(name: impl Into<String>, label: impl Into<String>) -> AdminResult<()> {
	let item = FormItem::textarea(name).label(label);
	context::with_current("form::textarea", |model| {
		model.add_form_item(item);
	})
}

/// Register a checkbox with an explicit label
pub fn checkbox(name: impl Into<String>, label: impl Into<String>) -> AdminResult<()> {
	let item = FormItem::checkbox(name).label(label);
	context::with_current("form::checkbox", |model| {
		model.add_form_item(item);
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::AdminError;
	use rstest::rstest;

	#[rstest]
	fn label_defaults_to_humanized_name() {
		assert_eq!(FormItem::date("published_at").label, "Published at");
		assert_eq!(FormItem::text("title").label("Headline").label, "Headline");
	}

	#[rstest]
	fn select_collects_options_in_order() {
		// Act
		let item = FormItem::select("status", [("draft", "Draft"), ("live", "Live")]);

		// Assert
		assert_eq!(
			item.kind,
			FormItemKind::Select(vec![
				("draft".to_string(), "Draft".to_string()),
				("live".to_string(), "Live".to_string()),
			])
		);
	}

	#[rstest]
	fn get_returns_first_match() {
		let mut form = Form::new();
		form.add(FormItem::text("slug"))
			.add(FormItem::hidden("slug").default_value("x"));
		assert_eq!(form.get("slug").map(|item| &item.kind), Some(&FormItemKind::Text));
		assert_eq!(form.len(), 2);
	}

	#[rstest]
	fn builders_fail_outside_configuration_block() {
		assert!(matches!(
			text("title", "Title"),
			Err(AdminError::NoCurrentModel(_))
		));
	}
}
