//! Admin site: the registry of model descriptors
//!
//! An [`AdminSite`] is created once by the application bootstrap and owns every
//! [`ModelItem`] registered on it. Descriptors register themselves when they
//! are constructed, so there is no separate registration step.

use crate::error::{AdminError, AdminResult};
use crate::model::{AdminModel, ModelType, ModelTypes};
use crate::model_item::ModelItem;
use crate::settings::AdminSettings;
use parking_lot::RwLock;

/// Registry of administered models
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::{AdminModel, AdminSite};
///
/// struct Article;
/// impl AdminModel for Article {}
///
/// let site = AdminSite::new("Newsroom");
/// site.model::<Article>().title("Articles");
///
/// let article = site.get("articles").unwrap();
/// assert_eq!(article.get_title().as_deref(), Some("Articles"));
/// assert_eq!(site.len(), 1);
/// ```
pub struct AdminSite {
	settings: AdminSettings,
	types: RwLock<ModelTypes>,
	items: RwLock<Vec<ModelItem>>,
}

impl AdminSite {
	/// Create a site with default settings and the given name
	pub fn new(name: impl Into<String>) -> Self {
		let settings = AdminSettings {
			site_name: name.into(),
			..AdminSettings::default()
		};
		Self::with_settings(settings)
	}

	pub fn with_settings(settings: AdminSettings) -> Self {
		Self {
			settings,
			types: RwLock::new(ModelTypes::new()),
			items: RwLock::new(Vec::new()),
		}
	}

	pub fn name(&self) -> &str {
		&self.settings.site_name
	}

	pub fn settings(&self) -> &AdminSettings {
		&self.settings
	}

	/// Make `M` resolvable by its Rust type path
	pub fn register_type<M: AdminModel>(&self) -> &Self {
		self.types.write().register::<M>();
		self
	}

	/// Make `M` resolvable by an additional class path
	pub fn register_type_as<M: AdminModel>(&self, path: impl Into<String>) -> &Self {
		self.types.write().register_as::<M>(path);
		self
	}

	/// Resolve a class path to a model type handle
	pub fn resolve(&self, class: &str) -> ModelType {
		let meta = self.types.read().resolve(class).cloned();
		ModelType::new(class, meta)
	}

	/// Construct and register the descriptor for `M`
	pub fn model<M: AdminModel>(&self) -> ModelItem {
		self.register_type::<M>();
		ModelItem::new(self, ModelType::of::<M>())
	}

	/// Construct and register the descriptor for a class path.
	///
	/// The path is resolved through the registered model types; an unknown path
	/// still yields a descriptor, which is then treated as orderable.
	pub fn model_by_name(&self, class: &str) -> ModelItem {
		let model_type = self.resolve(class);
		if !model_type.is_resolved() {
			tracing::warn!(model = class, "model type is not registered; assuming it is orderable");
		}
		ModelItem::new(self, model_type)
	}

	/// Add a descriptor to the registry
	pub fn add_item(&self, item: ModelItem) {
		let alias = item.get_alias();
		let mut items = self.items.write();
		if items.iter().any(|existing| existing.get_alias() == alias) {
			tracing::warn!(%alias, model = item.model_class(), "alias is already registered");
		}
		tracing::debug!(%alias, model = item.model_class(), "registered admin model");
		items.push(item);
	}

	/// All descriptors in registration order
	pub fn items(&self) -> Vec<ModelItem> {
		self.items.read().clone()
	}

	/// First descriptor currently served under `alias`
	pub fn get(&self, alias: &str) -> Option<ModelItem> {
		self.items
			.read()
			.iter()
			.find(|item| item.get_alias() == alias)
			.cloned()
	}

	/// Like [`get`](Self::get), but an unknown alias is an error
	pub fn require(&self, alias: &str) -> AdminResult<ModelItem> {
		self.get(alias)
			.ok_or_else(|| AdminError::ModelNotRegistered(alias.to_string()))
	}

	/// First descriptor administering the given class path
	pub fn get_by_class(&self, class: &str) -> Option<ModelItem> {
		self.items
			.read()
			.iter()
			.find(|item| item.model_class() == class)
			.cloned()
	}

	pub fn contains(&self, alias: &str) -> bool {
		self.get(alias).is_some()
	}

	pub fn len(&self) -> usize {
		self.items.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.read().is_empty()
	}
}

impl Default for AdminSite {
	fn default() -> Self {
		Self::with_settings(AdminSettings::default())
	}
}

impl std::fmt::Debug for AdminSite {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AdminSite")
			.field("name", &self.name())
			.field("models", &self.len())
			.finish()
	}
}
