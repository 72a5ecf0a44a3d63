//! Create/edit/delete permission gates
//!
//! A gate stores what the configuration said, in "deny" polarity: callers register
//! predicates answering "should this be denied?". Readers only ever see the
//! allowed polarity through [`Gate::is_allowed`] and [`Gate::is_allowed_for`].

use crate::model::{AdminModel, Record};
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether creating new records is denied
pub type CreateDenier = dyn Fn() -> bool + Send + Sync;

/// Predicate deciding whether an action on an existing record is denied
pub type RecordDenier = dyn Fn(&Record) -> bool + Send + Sync;

/// Permission gate for one admin action
pub enum Gate<F: ?Sized> {
	/// Always allowed (the default)
	Allow,
	/// Always denied
	Deny,
	/// Denied whenever the predicate returns `true`
	DenyWhen(Arc<F>),
}

impl<F: ?Sized> Gate<F> {
	/// Gate for a boolean deny flag: `true` denies, `false` allows
	pub fn from_deny_flag(deny: bool) -> Self {
		if deny { Gate::Deny } else { Gate::Allow }
	}

	pub fn is_predicate(&self) -> bool {
		matches!(self, Gate::DenyWhen(_))
	}
}

impl Gate<CreateDenier> {
	pub fn deny_when(predicate: impl Fn() -> bool + Send + Sync + 'static) -> Self {
		Gate::DenyWhen(Arc::new(predicate))
	}

	pub fn is_allowed(&self) -> bool {
		match self {
			Gate::Allow => true,
			Gate::Deny => false,
			Gate::DenyWhen(denier) => !denier(),
		}
	}
}

impl Gate<RecordDenier> {
	pub fn deny_when(predicate: impl Fn(&Record) -> bool + Send + Sync + 'static) -> Self {
		Gate::DenyWhen(Arc::new(predicate))
	}

	/// Gate from a predicate over a concrete model type.
	///
	/// Records of any other type are denied.
	pub fn deny_when_model<M, P>(predicate: P) -> Self
	where
		M: AdminModel,
		P: Fn(&M) -> bool + Send + Sync + 'static,
	{
		Self::deny_when(move |record: &Record| record.downcast_ref::<M>().is_none_or(&predicate))
	}

	pub fn is_allowed_for(&self, record: &Record) -> bool {
		match self {
			Gate::Allow => true,
			Gate::Deny => false,
			Gate::DenyWhen(denier) => !denier(record),
		}
	}
}

impl<F: ?Sized> Default for Gate<F> {
	fn default() -> Self {
		Gate::Allow
	}
}

impl<F: ?Sized> Clone for Gate<F> {
	fn clone(&self) -> Self {
		match self {
			Gate::Allow => Gate::Allow,
			Gate::Deny => Gate::Deny,
			Gate::DenyWhen(denier) => Gate::DenyWhen(Arc::clone(denier)),
		}
	}
}

impl<F: ?Sized> fmt::Debug for Gate<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Gate::Allow => f.write_str("Allow"),
			Gate::Deny => f.write_str("Deny"),
			Gate::DenyWhen(_) => f.write_str("DenyWhen(<predicate>)"),
		}
	}
}

/// The three gated admin actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
	Creatable,
	Editable,
	Deletable,
}

impl GateKind {
	/// Look a gate up by its field name (`creatable`, `editable`, `deletable`)
	pub fn from_field(field: &str) -> Option<Self> {
		match field {
			"creatable" => Some(GateKind::Creatable),
			"editable" => Some(GateKind::Editable),
			"deletable" => Some(GateKind::Deletable),
			_ => None,
		}
	}

	pub fn field_name(self) -> &'static str {
		match self {
			GateKind::Creatable => "creatable",
			GateKind::Editable => "editable",
			GateKind::Deletable => "deletable",
		}
	}
}

/// The argument of a verb dispatched by name
#[derive(Clone, Default)]
pub enum GateArg {
	/// No argument
	#[default]
	None,
	Flag(bool),
	Text(String),
	Create(Arc<CreateDenier>),
	Record(Arc<RecordDenier>),
}

impl GateArg {
	pub fn create(predicate: impl Fn() -> bool + Send + Sync + 'static) -> Self {
		GateArg::Create(Arc::new(predicate))
	}

	pub fn record(predicate: impl Fn(&Record) -> bool + Send + Sync + 'static) -> Self {
		GateArg::Record(Arc::new(predicate))
	}

	/// Gate for the create action: no argument denies, flags are negated.
	pub(crate) fn create_gate(&self) -> Option<Gate<CreateDenier>> {
		match self {
			GateArg::None => Some(Gate::Deny),
			GateArg::Flag(deny) => Some(Gate::from_deny_flag(*deny)),
			GateArg::Create(denier) => Some(Gate::DenyWhen(Arc::clone(denier))),
			GateArg::Text(_) | GateArg::Record(_) => None,
		}
	}

	/// Gate for a per-record action: no argument denies, flags are negated.
	pub(crate) fn record_gate(&self) -> Option<Gate<RecordDenier>> {
		match self {
			GateArg::None => Some(Gate::Deny),
			GateArg::Flag(deny) => Some(Gate::from_deny_flag(*deny)),
			GateArg::Record(denier) => Some(Gate::DenyWhen(Arc::clone(denier))),
			GateArg::Text(_) | GateArg::Create(_) => None,
		}
	}
}

impl From<bool> for GateArg {
	fn from(value: bool) -> Self {
		GateArg::Flag(value)
	}
}

impl From<&str> for GateArg {
	fn from(value: &str) -> Self {
		GateArg::Text(value.to_string())
	}
}

impl From<String> for GateArg {
	fn from(value: String) -> Self {
		GateArg::Text(value)
	}
}

impl fmt::Debug for GateArg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			GateArg::None => f.write_str("None"),
			GateArg::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
			GateArg::Text(text) => f.debug_tuple("Text").field(text).finish(),
			GateArg::Create(_) => f.write_str("Create(<predicate>)"),
			GateArg::Record(_) => f.write_str("Record(<predicate>)"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	struct Post {
		locked: bool,
	}
	impl AdminModel for Post {}

	#[rstest]
	fn default_gate_allows() {
		let gate: Gate<CreateDenier> = Gate::default();
		assert!(gate.is_allowed());
	}

	#[rstest]
	#[case(true, false)]
	#[case(false, true)]
	fn create_predicate_is_inverted(#[case] denies: bool, #[case] allowed: bool) {
		// Arrange
		let gate = Gate::<CreateDenier>::deny_when(move || denies);

		// Act & Assert
		assert_eq!(gate.is_allowed(), allowed);
	}

	#[rstest]
	fn record_predicate_sees_the_instance() {
		// Arrange
		let gate = Gate::<RecordDenier>::deny_when_model(|post: &Post| post.locked);

		// Act & Assert
		assert!(!gate.is_allowed_for(&Post { locked: true }));
		assert!(gate.is_allowed_for(&Post { locked: false }));
	}

	#[rstest]
	fn typed_predicate_denies_foreign_records() {
		let gate = Gate::<RecordDenier>::deny_when_model(|_: &Post| false);
		assert!(!gate.is_allowed_for(&42_u32));
	}

	#[rstest]
	#[case(GateArg::None, false)]
	#[case(GateArg::Flag(true), false)]
	#[case(GateArg::Flag(false), true)]
	fn arg_conversion_negates_flags(#[case] arg: GateArg, #[case] allowed: bool) {
		let gate = arg.create_gate().unwrap();
		assert_eq!(gate.is_allowed(), allowed);
		let gate = arg.record_gate().unwrap();
		assert_eq!(gate.is_allowed_for(&()), allowed);
	}

	#[rstest]
	fn mismatched_predicate_arity_is_rejected() {
		assert!(GateArg::create(|| true).record_gate().is_none());
		assert!(GateArg::record(|_| true).create_gate().is_none());
		assert!(GateArg::from("x").create_gate().is_none());
	}

	#[rstest]
	#[case("creatable", Some(GateKind::Creatable))]
	#[case("editable", Some(GateKind::Editable))]
	#[case("deletable", Some(GateKind::Deletable))]
	#[case("viewable", None)]
	fn gate_kind_from_field(#[case] field: &str, #[case] expected: Option<GateKind>) {
		assert_eq!(GateKind::from_field(field), expected);
		if let Some(kind) = expected {
			assert_eq!(kind.field_name(), field);
		}
	}
}
