//! Administered model types
//!
//! A model becomes administrable by implementing [`AdminModel`]. The admin never
//! instantiates a model to learn about it: everything it needs is declared
//! statically and captured in a [`ModelMeta`].

use crate::naming;
use std::any::{Any, type_name};
use std::collections::HashMap;

/// A type-erased model instance handed to permission predicates and renderers.
pub type Record = dyn Any + Send + Sync;

/// Trait for records that can be administered
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::AdminModel;
///
/// struct MenuEntry {
///     position: i32,
/// }
///
/// impl AdminModel for MenuEntry {
///     fn order_field() -> Option<&'static str> {
///         Some("position")
///     }
/// }
///
/// assert_eq!(MenuEntry::model_name(), "MenuEntry");
/// assert_eq!(MenuEntry::table_name(), "menu_entries");
/// ```
pub trait AdminModel: Any + Send + Sync {
	/// Short model name, by default the last segment of the Rust type path
	fn model_name() -> &'static str {
		naming::short_name(type_name::<Self>())
	}

	/// Database table backing the model
	fn table_name() -> String {
		naming::to_snake_case(&naming::pluralize(Self::model_name()))
	}

	/// Field holding an explicit, user-managed row order.
	///
	/// Models that declare one are not reorderable by drag and drop in the list
	/// view.
	fn order_field() -> Option<&'static str> {
		None
	}
}

/// Static facts about one administered model type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMeta {
	/// Full Rust type path
	pub class: String,
	pub name: String,
	pub table: String,
	pub order_field: Option<&'static str>,
}

impl ModelMeta {
	pub fn of<M: AdminModel>() -> Self {
		Self {
			class: type_name::<M>().to_string(),
			name: M::model_name().to_string(),
			table: M::table_name(),
			order_field: M::order_field(),
		}
	}

	/// Whether the model declares an explicit order field
	pub fn has_order_field(&self) -> bool {
		self.order_field.is_some()
	}
}

/// Handle identifying the model a descriptor administers.
///
/// The class path is always known; the metadata is only present when the path
/// could be resolved to a registered [`AdminModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelType {
	class: String,
	meta: Option<ModelMeta>,
}

impl ModelType {
	/// Handle for a statically known model type
	pub fn of<M: AdminModel>() -> Self {
		let meta = ModelMeta::of::<M>();
		Self {
			class: meta.class.clone(),
			meta: Some(meta),
		}
	}

	/// Handle for a class path with optional resolved metadata
	pub fn new(class: impl Into<String>, meta: Option<ModelMeta>) -> Self {
		Self {
			class: class.into(),
			meta,
		}
	}

	/// Handle for a class path that could not be resolved
	pub fn unresolved(class: impl Into<String>) -> Self {
		Self::new(class, None)
	}

	pub fn class(&self) -> &str {
		&self.class
	}

	pub fn meta(&self) -> Option<&ModelMeta> {
		self.meta.as_ref()
	}

	pub fn is_resolved(&self) -> bool {
		self.meta.is_some()
	}

	/// Last segment of the class path
	pub fn short_name(&self) -> &str {
		naming::short_name(&self.class)
	}
}

/// Lookup from class paths to model metadata
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::{AdminModel, ModelTypes};
///
/// struct Article;
/// impl AdminModel for Article {}
///
/// let mut types = ModelTypes::new();
/// types.register_as::<Article>("blog::Article");
///
/// assert_eq!(types.resolve("blog::Article").map(|m| m.table.as_str()), Some("articles"));
/// assert!(types.resolve("blog::Comment").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelTypes {
	types: HashMap<String, ModelMeta>,
}

impl ModelTypes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a model under its Rust type path
	pub fn register<M: AdminModel>(&mut self) -> &ModelMeta {
		let meta = ModelMeta::of::<M>();
		let class = meta.class.clone();
		self.types.entry(class).or_insert(meta)
	}

	/// Register a model under an additional class path (e.g. the key used in
	/// settings files)
	pub fn register_as<M: AdminModel>(&mut self, path: impl Into<String>) -> &ModelMeta {
		self.register::<M>();
		self.types
			.entry(path.into())
			.or_insert_with(ModelMeta::of::<M>)
	}

	pub fn resolve(&self, path: &str) -> Option<&ModelMeta> {
		self.types.get(path)
	}

	pub fn contains(&self, path: &str) -> bool {
		self.types.contains_key(path)
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}
}
