//! Per-model admin descriptor
//!
//! A [`ModelItem`] describes how one model is presented in the admin panel: the
//! list columns and filters, the edit form, the create/edit/delete permissions
//! and a few display properties. Configuration is fluent and happens once at
//! bootstrap; renderers read it afterwards.
//!
//! # Examples
//!
//! ```
//! use reinhardt_model_admin::{AdminModel, AdminSite, column, filter, form};
//!
//! struct Post {
//!     published: bool,
//! }
//! impl AdminModel for Post {}
//!
//! let site = AdminSite::new("Blog admin");
//! site.model::<Post>()
//!     .title("Posts")
//!     .with(["author"])
//!     .deny_deleting_when_model(|post: &Post| post.published)
//!     .columns(|_| {
//!         column::string("title", "Title").unwrap();
//!         column::count("comments", "Comments").unwrap();
//!     })
//!     .filters(|_| {
//!         filter::field("author_id", "By author").unwrap();
//!     })
//!     .form(|_| {
//!         form::text("title", "Title").unwrap();
//!         form::textarea("body", "Body").unwrap();
//!     });
//!
//! let posts = site.require("posts").unwrap();
//! assert_eq!(posts.get_columns().len(), 2);
//! assert!(posts.is_creatable());
//! assert!(!posts.is_deletable(&Post { published: true }));
//! assert!(posts.is_deletable(&Post { published: false }));
//! ```

use crate::column::AdminColumn;
use crate::context::ContextGuard;
use crate::dispatch::{self, Verb};
use crate::error::{AdminError, AdminResult};
use crate::filter::{Filter, ListFilter};
use crate::form::{Form, FormItem};
use crate::html::HtmlAttributes;
use crate::model::{AdminModel, ModelType, Record};
use crate::naming;
use crate::permission::{CreateDenier, Gate, GateArg, GateKind, RecordDenier};
use crate::query::{FilterParams, ListQuery};
use crate::settings::ModelSettings;
use crate::site::AdminSite;
use parking_lot::{RwLock, RwLockReadGuard};
use std::fmt;
use std::sync::Arc;

/// Alias used when a class path yields no usable name
const FALLBACK_ALIAS: &str = "items";

/// Hook run once at the end of every `columns` block
pub type ColumnsHook = dyn Fn(&ModelItem) + Send + Sync;

struct ItemState {
	alias: String,
	with: Vec<String>,
	title: Option<String>,
	creatable: Gate<CreateDenier>,
	editable: Gate<RecordDenier>,
	deletable: Gate<RecordDenier>,
}

struct ModelItemInner {
	model_type: ModelType,
	orderable: bool,
	state: RwLock<ItemState>,
	columns: RwLock<Vec<Box<dyn AdminColumn>>>,
	column_hooks: RwLock<Vec<Arc<ColumnsHook>>>,
	filters: RwLock<Vec<Arc<dyn ListFilter>>>,
	form: RwLock<Form>,
}

/// Admin descriptor of one model.
///
/// Cloning yields another handle to the same descriptor.
#[derive(Clone)]
pub struct ModelItem {
	inner: Arc<ModelItemInner>,
}

impl ModelItem {
	/// Create the descriptor for `model_type` and register it on `site`.
	///
	/// Settings found for the model class are applied before registration.
	pub fn new(site: &AdminSite, model_type: ModelType) -> Self {
		let mut alias = naming::alias_for(model_type.class());
		if alias.is_empty() {
			alias = FALLBACK_ALIAS.to_string();
		}

		let orderable = match model_type.meta() {
			Some(meta) => !meta.has_order_field(),
			None => true,
		};

		let item = Self {
			inner: Arc::new(ModelItemInner {
				orderable,
				state: RwLock::new(ItemState {
					alias,
					with: Vec::new(),
					title: None,
					creatable: Gate::Allow,
					editable: Gate::Allow,
					deletable: Gate::Allow,
				}),
				columns: RwLock::new(Vec::new()),
				column_hooks: RwLock::new(Vec::new()),
				filters: RwLock::new(Vec::new()),
				form: RwLock::new(Form::new()),
				model_type,
			}),
		};

		if let Some(settings) = site.settings().model(item.model_class()) {
			item.apply_settings(settings);
		}
		site.add_item(item.clone());
		item
	}

	fn apply_settings(&self, settings: &ModelSettings) {
		if let Some(alias) = &settings.alias {
			self.set_alias(alias.as_str());
		}
		if let Some(title) = &settings.title {
			self.title(title.as_str());
		}
		if let Some(with) = &settings.with {
			self.with(with.iter().map(String::as_str));
		}
		for entry in &settings.deny {
			if let Err(err) = self.call(&format!("deny{entry}"), GateArg::None) {
				tracing::warn!(model = self.model_class(), %entry, error = %err, "ignored deny setting");
			}
		}
	}

	/// Whether both handles point at the same descriptor
	pub fn ptr_eq(&self, other: &ModelItem) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	// ----- identity -----

	pub fn model_type(&self) -> &ModelType {
		&self.inner.model_type
	}

	/// Class path of the administered model
	pub fn model_class(&self) -> &str {
		self.inner.model_type.class()
	}

	/// Table of the administered model, when its type is resolved
	pub fn model_table(&self) -> Option<String> {
		self.inner.model_type.meta().map(|meta| meta.table.clone())
	}

	/// URL-safe name the model is served under
	pub fn get_alias(&self) -> String {
		self.inner.state.read().alias.clone()
	}

	/// Set the alias. An empty alias is ignored.
	pub fn set_alias(&self, alias: impl Into<String>) -> &Self {
		let alias = alias.into();
		if alias.is_empty() {
			tracing::warn!(model = self.model_class(), "ignored empty admin alias");
			return self;
		}
		self.inner.state.write().alias = alias;
		self
	}

	/// Same as [`set_alias`](Self::set_alias)
	pub fn as_alias(&self, alias: impl Into<String>) -> &Self {
		self.set_alias(alias)
	}

	pub fn title(&self, title: impl Into<String>) -> &Self {
		self.inner.state.write().title = Some(title.into());
		self
	}

	pub fn get_title(&self) -> Option<String> {
		self.inner.state.read().title.clone()
	}

	/// Replace the relations eager-loaded with the list rows.
	///
	/// See also [`with_relations!`](crate::with_relations) for the argument-list
	/// form.
	pub fn with(&self, relations: impl IntoIterator<Item = impl Into<String>>) -> &Self {
		self.inner.state.write().with = relations.into_iter().map(Into::into).collect();
		self
	}

	pub fn get_with(&self) -> Vec<String> {
		self.inner.state.read().with.clone()
	}

	// ----- permissions -----

	/// Whether rows may be dragged into a new order in the list view
	pub fn is_orderable(&self) -> bool {
		self.inner.orderable
	}

	pub fn is_creatable(&self) -> bool {
		let gate = self.inner.state.read().creatable.clone();
		gate.is_allowed()
	}

	pub fn is_editable(&self, record: &Record) -> bool {
		let gate = self.inner.state.read().editable.clone();
		gate.is_allowed_for(record)
	}

	pub fn is_deletable(&self, record: &Record) -> bool {
		let gate = self.inner.state.read().deletable.clone();
		gate.is_allowed_for(record)
	}

	pub fn deny_creating(&self) -> &Self {
		self.deny_creating_if(true)
	}

	/// `true` denies creating, `false` restores the default
	pub fn deny_creating_if(&self, deny: bool) -> &Self {
		self.inner.state.write().creatable = Gate::from_deny_flag(deny);
		self
	}

	/// Deny creating whenever `denier` returns `true`
	pub fn deny_creating_when(&self, denier: impl Fn() -> bool + Send + Sync + 'static) -> &Self {
		self.inner.state.write().creatable = Gate::<CreateDenier>::deny_when(denier);
		self
	}

	pub fn deny_editing(&self) -> &Self {
		self.deny_editing_if(true)
	}

	pub fn deny_editing_if(&self, deny: bool) -> &Self {
		self.inner.state.write().editable = Gate::from_deny_flag(deny);
		self
	}

	pub fn deny_editing_when(
		&self,
		denier: impl Fn(&Record) -> bool + Send + Sync + 'static,
	) -> &Self {
		self.inner.state.write().editable = Gate::<RecordDenier>::deny_when(denier);
		self
	}

	/// Deny editing records of type `M` for which `denier` returns `true`
	pub fn deny_editing_when_model<M, P>(&self, denier: P) -> &Self
	where
		M: AdminModel,
		P: Fn(&M) -> bool + Send + Sync + 'static,
	{
		self.inner.state.write().editable = Gate::<RecordDenier>::deny_when_model(denier);
		self
	}

	pub fn deny_deleting(&self) -> &Self {
		self.deny_deleting_if(true)
	}

	pub fn deny_deleting_if(&self, deny: bool) -> &Self {
		self.inner.state.write().deletable = Gate::from_deny_flag(deny);
		self
	}

	pub fn deny_deleting_when(
		&self,
		denier: impl Fn(&Record) -> bool + Send + Sync + 'static,
	) -> &Self {
		self.inner.state.write().deletable = Gate::<RecordDenier>::deny_when(denier);
		self
	}

	pub fn deny_deleting_when_model<M, P>(&self, denier: P) -> &Self
	where
		M: AdminModel,
		P: Fn(&M) -> bool + Send + Sync + 'static,
	{
		self.inner.state.write().deletable = Gate::<RecordDenier>::deny_when_model(denier);
		self
	}

	pub fn deny_editing_and_deleting(&self) -> &Self {
		self.deny_editing_and_deleting_if(true)
	}

	pub fn deny_editing_and_deleting_if(&self, deny: bool) -> &Self {
		let mut state = self.inner.state.write();
		state.editable = Gate::from_deny_flag(deny);
		state.deletable = Gate::from_deny_flag(deny);
		drop(state);
		self
	}

	/// Deny both editing and deleting whenever `denier` returns `true`
	pub fn deny_editing_and_deleting_when(
		&self,
		denier: impl Fn(&Record) -> bool + Send + Sync + 'static,
	) -> &Self {
		let gate = Gate::<RecordDenier>::deny_when(denier);
		let mut state = self.inner.state.write();
		state.editable = gate.clone();
		state.deletable = gate;
		drop(state);
		self
	}

	pub fn deny_editing_and_deleting_when_model<M, P>(&self, denier: P) -> &Self
	where
		M: AdminModel,
		P: Fn(&M) -> bool + Send + Sync + 'static,
	{
		let gate = Gate::<RecordDenier>::deny_when_model(denier);
		let mut state = self.inner.state.write();
		state.editable = gate.clone();
		state.deletable = gate;
		drop(state);
		self
	}

	/// Apply a configuration verb given by name.
	///
	/// Supported verbs are `as` (with a text argument) and `deny<Types>` such as
	/// `denyCreating` or `denyEditingAndDeleting`. For deny verbs, no argument
	/// denies, a boolean is negated (`false` restores the default) and a
	/// predicate is stored as a denier.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_model_admin::{AdminError, AdminModel, AdminSite, GateArg};
	///
	/// struct Tag;
	/// impl AdminModel for Tag {}
	///
	/// let site = AdminSite::default();
	/// let tags = site.model::<Tag>();
	///
	/// tags.call("denyEditingAndDeleting", GateArg::None).unwrap();
	/// assert!(!tags.is_editable(&Tag));
	/// assert!(!tags.is_deletable(&Tag));
	///
	/// tags.call("denyEditing", false).unwrap();
	/// assert!(tags.is_editable(&Tag));
	///
	/// tags.call("as", "labels").unwrap();
	/// assert_eq!(tags.get_alias(), "labels");
	///
	/// assert!(matches!(
	///     tags.call("frobnicate", GateArg::None),
	///     Err(AdminError::MethodNotFound { .. })
	/// ));
	/// ```
	pub fn call(&self, method: &str, arg: impl Into<GateArg>) -> AdminResult<&Self> {
		let arg = arg.into();
		match dispatch::parse_verb(method) {
			Some(Verb::Alias) => match arg {
				GateArg::Text(alias) if !alias.is_empty() => Ok(self.set_alias(alias)),
				_ => Err(AdminError::InvalidArgument {
					method: method.to_string(),
					expected: "a non-empty alias".to_string(),
				}),
			},
			Some(Verb::Deny(kinds)) => self.deny_by_name(method, &kinds, &arg),
			None => Err(AdminError::MethodNotFound {
				model: self.model_class().to_string(),
				method: method.to_string(),
			}),
		}
	}

	fn deny_by_name(&self, method: &str, kinds: &[GateKind], arg: &GateArg) -> AdminResult<&Self> {
		let invalid = || AdminError::InvalidArgument {
			method: method.to_string(),
			expected: "no argument, a bool, or a predicate taking the gate's arguments".to_string(),
		};

		// Convert for every target before touching any gate
		let mut create = None;
		let mut record = None;
		for kind in kinds {
			match kind {
				GateKind::Creatable => create = Some(arg.create_gate().ok_or_else(invalid)?),
				GateKind::Editable | GateKind::Deletable => {
					record = Some(arg.record_gate().ok_or_else(invalid)?)
				}
			}
		}

		let mut state = self.inner.state.write();
		for kind in kinds {
			match (kind, &create, &record) {
				(GateKind::Creatable, Some(gate), _) => state.creatable = gate.clone(),
				(GateKind::Editable, _, Some(gate)) => state.editable = gate.clone(),
				(GateKind::Deletable, _, Some(gate)) => state.deletable = gate.clone(),
				_ => {}
			}
			tracing::debug!(model = self.model_class(), gate = kind.field_name(), ?arg, "applied {method}");
		}
		drop(state);
		Ok(self)
	}

	// ----- columns -----

	/// Register list columns.
	///
	/// `f` receives this descriptor, which is also current for the free
	/// builders in [`column`](crate::column) while `f` runs. Afterwards, with
	/// the descriptor still current, every column added by the block is
	/// finalized through [`AdminColumn::control`] and then every hook
	/// installed with [`after_columns`](Self::after_columns) runs once. Both
	/// may register further columns; those are not finalized again.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_model_admin::column::{self, Column};
	/// use reinhardt_model_admin::{AdminModel, AdminSite};
	///
	/// struct Post;
	/// impl AdminModel for Post {}
	///
	/// let site = AdminSite::default();
	/// let posts = site.model::<Post>();
	/// posts.after_columns(|item| {
	///     item.add_column(Column::string("_actions").with_label(""));
	/// });
	///
	/// posts.columns(|_| {
	///     column::string("title", "Title").unwrap();
	/// });
	///
	/// let names: Vec<String> = posts.get_columns().iter().map(|c| c.name().to_string()).collect();
	/// assert_eq!(names, vec!["title", "_actions"]);
	/// ```
	pub fn columns(&self, f: impl FnOnce(&ModelItem)) -> &Self {
		let start = self.inner.columns.read().len();
		let _guard = ContextGuard::enter(self);
		f(self);
		self.control_columns(start);
		self
	}

	/// Fallible form of [`columns`](Self::columns). On error the columns added
	/// so far stay registered but are not finalized.
	pub fn try_columns<E>(&self, f: impl FnOnce(&ModelItem) -> Result<(), E>) -> Result<&Self, E> {
		let start = self.inner.columns.read().len();
		let _guard = ContextGuard::enter(self);
		f(self)?;
		self.control_columns(start);
		Ok(self)
	}

	fn control_columns(&self, start: usize) {
		// Hooks may register columns, so none of them runs under the lock
		let mut added = {
			let mut columns = self.inner.columns.write();
			let start = start.min(columns.len());
			columns.split_off(start)
		};
		for column in &mut added {
			column.control(&self.inner.model_type);
		}
		let finalized = added.len();
		{
			let mut columns = self.inner.columns.write();
			let start = start.min(columns.len());
			let registered_by_control = columns.split_off(start);
			columns.extend(added);
			columns.extend(registered_by_control);
		}

		let hooks = self.inner.column_hooks.read().clone();
		for hook in &hooks {
			hook(self);
		}

		tracing::debug!(
			model = self.model_class(),
			finalized,
			hooks = hooks.len(),
			total = self.inner.columns.read().len(),
			"finalized admin columns"
		);
	}

	/// Run `hook` at the end of every later `columns` block, while this
	/// descriptor is still current. Runs even when the block added nothing.
	pub fn after_columns(&self, hook: impl Fn(&ModelItem) + Send + Sync + 'static) -> &Self {
		self.inner.column_hooks.write().push(Arc::new(hook));
		self
	}

	/// Append a column; duplicates are kept
	pub fn add_column(&self, column: impl AdminColumn + 'static) -> &Self {
		self.inner.columns.write().push(Box::new(column));
		self
	}

	/// Columns in registration order
	pub fn get_columns(&self) -> RwLockReadGuard<'_, Vec<Box<dyn AdminColumn>>> {
		self.inner.columns.read()
	}

	// ----- filters -----

	/// Register list filters; see [`columns`](Self::columns) for the context
	/// rules
	pub fn filters(&self, f: impl FnOnce(&ModelItem)) -> &Self {
		let _guard = ContextGuard::enter(self);
		f(self);
		self
	}

	pub fn try_filters<E>(&self, f: impl FnOnce(&ModelItem) -> Result<(), E>) -> Result<&Self, E> {
		let _guard = ContextGuard::enter(self);
		f(self)?;
		Ok(self)
	}

	/// Start a parameter filter named `name`
	pub fn filter(name: impl Into<String>) -> Filter {
		Filter::new(name)
	}

	/// Append a filter; duplicates are kept
	pub fn add_filter(&self, filter: impl ListFilter + 'static) -> &Self {
		self.inner.filters.write().push(Arc::new(filter));
		self
	}

	/// Filters in registration order
	pub fn get_filters(&self) -> RwLockReadGuard<'_, Vec<Arc<dyn ListFilter>>> {
		self.inner.filters.read()
	}

	/// Run every filter against `query` in registration order.
	///
	/// Returns the descriptions reported by active filters, in the same order.
	/// The query is narrowed in place, including by filters that report no
	/// description. Filters run without holding the descriptor's locks, so
	/// they may configure the descriptor themselves.
	pub fn apply_filters(&self, query: &mut ListQuery, parameters: &FilterParams) -> Vec<String> {
		let filters = self.inner.filters.read().clone();
		let titles: Vec<String> = filters
			.iter()
			.filter_map(|filter| filter.apply(query, parameters))
			.filter(|title| !title.is_empty())
			.collect();
		tracing::trace!(
			model = self.model_class(),
			filters = filters.len(),
			active = titles.len(),
			conditions = query.conditions().len(),
			"applied admin filters"
		);
		titles
	}

	/// A fresh list query on the model table, eager-loading the `with` relations
	pub fn query(&self) -> ListQuery {
		let table = self
			.model_table()
			.unwrap_or_else(|| naming::alias_for(self.model_class()));
		let mut query = ListQuery::new(table);
		query.with(self.get_with());
		query
	}

	// ----- form -----

	/// Configure the form; see [`columns`](Self::columns) for the context rules
	pub fn form(&self, f: impl FnOnce(&ModelItem)) -> &Self {
		let _guard = ContextGuard::enter(self);
		f(self);
		self
	}

	pub fn try_form<E>(&self, f: impl FnOnce(&ModelItem) -> Result<(), E>) -> Result<&Self, E> {
		let _guard = ContextGuard::enter(self);
		f(self)?;
		Ok(self)
	}

	pub fn get_form(&self) -> RwLockReadGuard<'_, Form> {
		self.inner.form.read()
	}

	/// Append a form item; the form itself is never replaced
	pub fn add_form_item(&self, item: FormItem) -> &Self {
		self.inner.form.write().add(item);
		self
	}

	// ----- rendering -----

	/// Attributes for the list table element
	pub fn table_attributes(&self) -> HtmlAttributes {
		let mut attributes = HtmlAttributes::new();
		if !self.is_orderable() {
			attributes.insert("data-ordering", "false");
		}
		attributes
	}

	/// Rendered [`table_attributes`](Self::table_attributes): empty when the model
	/// is orderable, ` data-ordering="false"` otherwise
	pub fn render_table_attributes(&self) -> String {
		self.table_attributes().render()
	}
}

impl fmt::Debug for ModelItem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.inner.state.read();
		f.debug_struct("ModelItem")
			.field("model", &self.model_class())
			.field("alias", &state.alias)
			.field("title", &state.title)
			.field("orderable", &self.inner.orderable)
			.field("creatable", &state.creatable)
			.field("editable", &state.editable)
			.field("deletable", &state.deletable)
			.field("columns", &self.inner.columns.read().len())
			.field("column_hooks", &self.inner.column_hooks.read().len())
			.field("filters", &self.inner.filters.read().len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::{self, Column};
	use crate::context;
	use crate::filter;
	use crate::form;
	use rstest::{fixture, rstest};
	use std::sync::atomic::{AtomicBool, Ordering};

	struct Article {
		locked: bool,
	}
	impl AdminModel for Article {}

	struct Slide;
	impl AdminModel for Slide {
		fn order_field() -> Option<&'static str> {
			Some("position")
		}
	}

	#[fixture]
	fn site() -> AdminSite {
		AdminSite::new("Admin")
	}

	#[rstest]
	fn defaults(site: AdminSite) {
		// Act
		let item = site.model::<Article>();

		// Assert
		assert_eq!(item.get_alias(), "articles");
		assert_eq!(item.get_title(), None);
		assert!(item.get_with().is_empty());
		assert!(item.is_orderable());
		assert!(item.is_creatable());
		assert!(item.is_editable(&Article { locked: false }));
		assert!(item.is_deletable(&Article { locked: false }));
		assert!(item.get_form().is_empty());
		assert_eq!(item.model_table().as_deref(), Some("articles"));
	}

	#[rstest]
	fn declared_order_field_disables_ordering(site: AdminSite) {
		let slides = site.model::<Slide>();
		assert!(!slides.is_orderable());
		assert_eq!(slides.render_table_attributes(), r#" data-ordering="false""#);
		assert_eq!(site.model::<Article>().render_table_attributes(), "");
	}

	#[rstest]
	fn empty_alias_is_ignored(site: AdminSite) {
		let item = site.model::<Article>();
		item.set_alias("");
		assert_eq!(item.get_alias(), "articles");
	}

	#[rstest]
	#[case(None, false)]
	#[case(Some(true), false)]
	#[case(Some(false), true)]
	fn deny_creating_flags(site: AdminSite, #[case] flag: Option<bool>, #[case] creatable: bool) {
		// Arrange
		let item = site.model::<Article>();

		// Act
		match flag {
			None => item.deny_creating(),
			Some(deny) => item.deny_creating_if(deny),
		};

		// Assert
		assert_eq!(item.is_creatable(), creatable);
	}

	#[rstest]
	fn create_denier_is_evaluated_on_every_query(site: AdminSite) {
		// Arrange
		let item = site.model::<Article>();
		let closed = Arc::new(AtomicBool::new(false));
		let flag = Arc::clone(&closed);
		item.deny_creating_when(move || flag.load(Ordering::SeqCst));

		// Act & Assert
		assert!(item.is_creatable());
		closed.store(true, Ordering::SeqCst);
		assert!(!item.is_creatable());
	}

	#[rstest]
	fn editing_and_deleting_share_one_denier(site: AdminSite) {
		// Arrange
		let item = site.model::<Article>();

		// Act
		item.deny_editing_and_deleting_when_model(|article: &Article| article.locked);

		// Assert
		let locked = Article { locked: true };
		let open = Article { locked: false };
		assert!(!item.is_editable(&locked));
		assert!(!item.is_deletable(&locked));
		assert!(item.is_editable(&open));
		assert!(item.is_deletable(&open));
		assert!(item.is_creatable());
	}

	#[rstest]
	fn call_rejects_mismatched_predicates_atomically(site: AdminSite) {
		// Arrange
		let item = site.model::<Article>();

		// Act
		let result = item.call("denyCreatingAndEditing", GateArg::create(|| true));

		// Assert
		assert!(matches!(result, Err(AdminError::InvalidArgument { .. })));
		assert!(item.is_creatable());
		assert!(item.is_editable(&Article { locked: false }));
	}

	#[rstest]
	fn call_as_requires_text(site: AdminSite) {
		let item = site.model::<Article>();
		assert!(matches!(
			item.call("as", GateArg::None),
			Err(AdminError::InvalidArgument { .. })
		));
		item.call("as", "posts").unwrap();
		assert_eq!(item.get_alias(), "posts");
	}

	#[rstest]
	fn call_reports_unknown_method(site: AdminSite) {
		// Act
		let err = site.model::<Article>().call("frobnicate", GateArg::None).unwrap_err();

		// Assert
		match err {
			AdminError::MethodNotFound { model, method } => {
				assert!(model.ends_with("::Article"));
				assert_eq!(method, "frobnicate");
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[rstest]
	fn columns_finalize_only_after_the_block(site: AdminSite) {
		// Arrange
		let item = site.model::<Article>();

		// Act
		item.columns(|item| {
			item.add_column(Column::string("created_at"));
			column::string("title", "Title").unwrap();
			assert!(context::current().unwrap().ptr_eq(item));
		});

		// Assert
		let labels: Vec<String> = item.get_columns().iter().map(|c| c.label()).collect();
		assert_eq!(labels, vec!["Created at", "Title"]);
		assert!(context::current().is_none());
	}

	#[rstest]
	fn failing_block_restores_context(site: AdminSite) {
		// Arrange
		let outer = site.model::<Article>();
		let inner = site.model::<Slide>();

		// Act
		outer.columns(|outer| {
			let result: Result<&ModelItem, &str> = inner.try_filters(|_| {
				filter::field("kind", "Kind").unwrap();
				Err("broken filter block")
			});
			assert!(result.is_err());
			column::string("title", "Title").unwrap();
			assert!(context::current().unwrap().ptr_eq(outer));
		});

		// Assert
		assert_eq!(outer.get_columns().len(), 1);
		assert!(outer.get_filters().is_empty());
		assert_eq!(inner.get_filters().len(), 1);
		assert!(inner.get_columns().is_empty());
	}

	#[rstest]
	fn form_items_register_on_the_current_model(site: AdminSite) {
		// Arrange
		let item = site.model::<Article>();

		// Act
		item.form(|item| {
			form::text("title", "Title").unwrap();
			item.add_form_item(FormItem::checkbox("locked"));
		});

		// Assert
		assert_eq!(item.get_form().names(), vec!["title", "locked"]);
	}

	#[rstest]
	fn query_uses_table_and_eager_relations(site: AdminSite) {
		let item = site.model::<Article>();
		item.with(["author", "tags"]);
		let query = item.query();
		assert_eq!(query.table(), "articles");
		assert_eq!(query.eager(), ["author", "tags"]);
	}

	#[rstest]
	fn filter_factory_builds_named_filter() {
		let filter = ModelItem::filter("status").title("Status");
		assert_eq!(filter.name(), "status");
	}

	#[rstest]
	fn debug_output_names_the_model(site: AdminSite) {
		let item = site.model::<Article>();
		item.deny_creating();
		let debug = format!("{item:?}");
		assert!(debug.contains("articles"));
		assert!(debug.contains("creatable: Deny"));
	}

	struct RowSelector;

	impl AdminColumn for RowSelector {
		fn name(&self) -> &str {
			"_select"
		}

		fn label(&self) -> String {
			String::new()
		}

		fn control(&mut self, _model: &ModelType) {
			column::register(Column::string("_control")).unwrap();
		}
	}

	#[rstest]
	fn control_may_register_columns(site: AdminSite) {
		// Arrange
		let item = site.model::<Article>();

		// Act
		item.columns(|_| {
			column::register(RowSelector).unwrap();
			column::string("title", "Title").unwrap();
		});

		// Assert
		let names: Vec<String> = item.get_columns().iter().map(|c| c.name().to_string()).collect();
		assert_eq!(names, vec!["_select", "title", "_control"]);
		assert!(context::current().is_none());
	}

	#[rstest]
	fn after_columns_runs_once_per_block(site: AdminSite) {
		// Arrange
		let item = site.model::<Article>();
		item.after_columns(|current| {
			assert!(context::current().is_some_and(|active| active.ptr_eq(current)));
			column::register(Column::string("_actions")).unwrap();
		});

		// Act
		item.columns(|_| {});
		item.columns(|_| {
			column::string("title", "Title").unwrap();
		});

		// Assert
		let names: Vec<String> = item.get_columns().iter().map(|c| c.name().to_string()).collect();
		assert_eq!(names, vec!["_actions", "title", "_actions"]);
	}

	#[rstest]
	fn filters_may_configure_their_descriptor(site: AdminSite) {
		// Arrange
		let item = site.model::<Article>();
		let handle = item.clone();
		item.add_filter(
			Filter::new("status")
				.scope(move |query, value| {
					handle.add_filter(Filter::new("late"));
					query.where_eq("status", value);
				})
				.title("By status"),
		);
		let mut query = item.query();
		let parameters = FilterParams::from([("status".to_string(), "draft".to_string())]);

		// Act
		let titles = item.apply_filters(&mut query, &parameters);

		// Assert
		assert_eq!(titles, vec!["By status"]);
		assert_eq!(item.get_filters().len(), 2);
		assert_eq!(query.conditions().len(), 1);
	}
}
