//! # Reinhardt Model Admin
//!
//! Declarative per-model configuration for an admin panel.
//!
//! Each administered model gets a [`ModelItem`] describing its list columns,
//! list filters, edit form, create/edit/delete permissions and display
//! properties. Descriptors are created through an [`AdminSite`], which keeps
//! them discoverable by alias for the rendering layer.
//!
//! ## Quick Start
//!
//! ```
//! use reinhardt_model_admin::{AdminModel, AdminSite, column, with_relations};
//!
//! struct User {
//!     is_superuser: bool,
//! }
//!
//! impl AdminModel for User {
//!     fn table_name() -> String {
//!         "auth_user".to_string()
//!     }
//! }
//!
//! let site = AdminSite::new("Back office");
//! let users = site.model::<User>();
//! with_relations!(users, "roles", "groups")
//!     .as_alias("people")
//!     .deny_creating()
//!     .deny_deleting_when_model(|user: &User| user.is_superuser)
//!     .columns(|_| {
//!         column::string("email", "E-mail").unwrap();
//!         column::date("last_login", None).unwrap();
//!     });
//!
//! let people = site.get("people").unwrap();
//! assert_eq!(people.get_with(), vec!["roles", "groups"]);
//! assert_eq!(people.query().table(), "auth_user");
//! assert!(!people.is_creatable());
//! assert!(people.is_deletable(&User { is_superuser: false }));
//! ```
//!
//! ## Configuration blocks
//!
//! [`ModelItem::columns`], [`ModelItem::filters`] and [`ModelItem::form`] make
//! their descriptor current while the callback runs, so the free builders in
//! [`column`], [`filter`] and [`form`] register on it. Blocks nest, and the
//! previous descriptor is restored on exit. Outside any block the builders
//! return [`AdminError::NoCurrentModel`].
//!
//! ## Settings
//!
//! Aliases, titles, relations and denied actions can also come from a TOML
//! file loaded into [`AdminSettings`]; see the [`settings`] module.

pub mod column;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod form;
pub mod html;
pub mod model;
pub mod model_item;
pub mod naming;
pub mod permission;
pub mod query;
pub mod settings;
pub mod site;

pub use column::{AdminColumn, Column, ColumnKind};
pub use error::{AdminError, AdminResult};
pub use filter::{Filter, ListFilter};
pub use form::{Form, FormItem, FormItemKind};
pub use html::HtmlAttributes;
pub use model::{AdminModel, ModelMeta, ModelType, ModelTypes, Record};
pub use model_item::{ColumnsHook, ModelItem};
pub use permission::{CreateDenier, Gate, GateArg, GateKind, RecordDenier};
pub use query::{Condition, FilterParams, ListQuery, Operator, Value};
pub use settings::{AdminSettings, ModelSettings};
pub use site::AdminSite;

/// Set the eager-loaded relations of a [`ModelItem`] from an argument list.
///
/// `with_relations!(item, "a", "b")` is the same as `item.with(["a", "b"])`.
#[macro_export]
macro_rules! with_relations {
	($item:expr, $($relation:expr),+ $(,)?) => {
		$item.with([$(::std::string::String::from($relation)),+])
	};
}
