//! List view columns
//!
//! Columns are registered inside [`ModelItem::columns`](crate::ModelItem::columns),
//! either explicitly through the descriptor passed to the callback or through
//! the free builder functions of this module, which attach to the descriptor
//! currently being configured.
//!
//! # Examples
//!
//! ```
//! use reinhardt_model_admin::column::{self, AdminColumn};
//! use reinhardt_model_admin::{AdminModel, AdminSite};
//!
//! struct Post;
//! impl AdminModel for Post {}
//!
//! let site = AdminSite::new("Admin");
//! site.model::<Post>().columns(|_| {
//!     column::string("title", "Title").unwrap();
//!     column::date("published_at", None).unwrap();
//!     column::count("comments", "Comments").unwrap();
//! });
//!
//! let posts = site.get("posts").unwrap();
//! let labels: Vec<String> = posts.get_columns().iter().map(|c| c.label()).collect();
//! assert_eq!(labels, vec!["Title", "Published at", "Comments"]);
//! ```

use crate::context;
use crate::error::AdminResult;
use crate::model::ModelType;
use crate::naming;

/// Rendering descriptor for one list view field
pub trait AdminColumn: Send + Sync {
	/// Field (or relation) the column reads
	fn name(&self) -> &str;

	/// Header text
	fn label(&self) -> String;

	/// Whether the list may be sorted by this column
	fn is_sortable(&self) -> bool {
		true
	}

	/// Finalization hook, run once the `columns` block that registered the
	/// column has finished and before the block's descriptor stops being
	/// current. May run more than once when blocks on the same model nest.
	fn control(&mut self, _model: &ModelType) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
	/// Plain text value
	String,
	/// Number of related records
	Count,
	/// Date or timestamp, with an optional display format
	Date { format: Option<String> },
	/// Yes/no value
	Boolean,
}

/// Built-in list column
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::column::{AdminColumn, Column};
///
/// let column = Column::string("email").with_label("E-mail").sortable(false);
/// assert_eq!(column.name(), "email");
/// assert_eq!(column.label(), "E-mail");
/// assert!(!column.is_sortable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
	name: String,
	label: Option<String>,
	kind: ColumnKind,
	sortable: bool,
}

impl Column {
	pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
		Self {
			name: name.into(),
			label: None,
			kind,
			sortable: true,
		}
	}

	pub fn string(name: impl Into<String>) -> Self {
		Self::new(name, ColumnKind::String)
	}

	/// Count columns are computed and never sortable
	pub fn count(name: impl Into<String>) -> Self {
		Self::new(name, ColumnKind::Count).sortable(false)
	}

	pub fn date(name: impl Into<String>) -> Self {
		Self::new(name, ColumnKind::Date { format: None })
	}

	pub fn boolean(name: impl Into<String>) -> Self {
		Self::new(name, ColumnKind::Boolean)
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Set the display format of a date column; ignored for other kinds
	pub fn format(mut self, format: impl Into<String>) -> Self {
		if let ColumnKind::Date { format: slot } = &mut self.kind {
			*slot = Some(format.into());
		}
		self
	}

	pub fn kind(&self) -> &ColumnKind {
		&self.kind
	}
}

impl AdminColumn for Column {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> String {
		self.label
			.clone()
			.unwrap_or_else(|| naming::humanize(&self.name))
	}

	fn is_sortable(&self) -> bool {
		self.sortable
	}

	fn control(&mut self, model: &ModelType) {
		if self.label.is_none() {
			let label = naming::humanize(&self.name);
			tracing::trace!(model = model.class(), column = %self.name, %label, "defaulted column label");
			self.label = Some(label);
		}
	}
}

/// Register a column on the descriptor currently being configured
pub fn register(column: impl AdminColumn + 'static) -> AdminResult<()> {
	context::with_current("column::register", |item| {
		item.add_column(column);
	})
}

/// Register a text column with an explicit header
pub fn string(name: impl Into<String>, label: impl Into<String>) -> AdminResult<()> {
	let column = Column::string(name).with_label(label);
	context::with_current("column::string", |item| {
		item.add_column(column);
	})
}

/// Register a count column with an explicit header
pub fn count(name: impl Into<String>, label: impl Into<String>) -> AdminResult<()> {
	let column = Column::count(name).with_label(label);
	context::with_current("column::count", |item| {
		item.add_column(column);
	})
}

/// Register a date column; the header defaults to the humanized field name
pub fn date(name: impl Into<String>, label: Option<&str>) -> AdminResult<()> {
	let mut column = Column::date(name);
	if let Some(label) = label {
		column = column.with_label(label);
	}
	context::with_current("column::date", |item| {
		item.add_column(column);
	})
}
