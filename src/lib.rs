//! # Reinhardt Admin Models
//!
//! Declarative admin panel configuration for Reinhardt models.
//!
//! This crate re-exports [`reinhardt_model_admin`] under a single namespace and
//! offers a [`prelude`] with the items needed to describe administered models.
//!
//! ## Example
//!
//! ```rust
//! use reinhardt_admin_models::prelude::*;
//!
//! struct Comment {
//!     spam: bool,
//! }
//! impl AdminModel for Comment {}
//!
//! let site = AdminSite::new("Moderation");
//! site.model::<Comment>()
//!     .deny_creating()
//!     .deny_editing_when_model(|comment: &Comment| comment.spam)
//!     .columns(|_| {
//!         column::string("author", "Author").unwrap();
//!     });
//!
//! let comments = site.require("comments").unwrap();
//! assert!(!comments.is_editable(&Comment { spam: true }));
//! ```

pub use reinhardt_model_admin::*;

/// Prelude for configuring admin models
pub mod prelude {
	pub use reinhardt_model_admin::{
		AdminColumn, AdminError, AdminModel, AdminResult, AdminSettings, AdminSite, Column, Filter,
		FilterParams, Form, FormItem, GateArg, ListFilter, ListQuery, ModelItem, Record, column,
		filter, form, with_relations,
	};
}
