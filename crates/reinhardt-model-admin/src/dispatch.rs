//! Verb parsing for configuration applied by method name
//!
//! Settings files and scripted configuration only know verbs as strings
//! (`"as"`, `"denyEditingAndDeleting"`). This module turns such a name into
//! the operation it stands for; [`ModelItem::call`](crate::ModelItem::call)
//! applies it.

use crate::permission::GateKind;
use regex::Regex;
use std::sync::LazyLock;

static DENY_VERB: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^deny(?<types>.+)$").expect("DENY_VERB: invalid regex pattern")
});

/// An operation named by a configuration verb
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
	/// `as`: set the alias
	Alias,
	/// `deny<Types>`: deny one or more gated actions
	Deny(Vec<GateKind>),
}

/// Parse a verb name. Returns `None` when the name does not denote any operation.
///
/// For `deny<Types>`, every `ing` in `<Types>` becomes `able`, the result is
/// lowercased and split on `and`; each part must name a gate field.
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::dispatch::{Verb, parse_verb};
/// use reinhardt_model_admin::GateKind;
///
/// assert_eq!(parse_verb("as"), Some(Verb::Alias));
/// assert_eq!(
///     parse_verb("denyEditingAndDeleting"),
///     Some(Verb::Deny(vec![GateKind::Editable, GateKind::Deletable]))
/// );
/// assert_eq!(parse_verb("denyViewing"), None);
/// assert_eq!(parse_verb("frobnicate"), None);
/// ```
pub fn parse_verb(method: &str) -> Option<Verb> {
	if method == "as" {
		return Some(Verb::Alias);
	}

	let captures = DENY_VERB.captures(method)?;
	let fields = deny_fields(&captures["types"]);
	tracing::trace!(method, ?fields, "rewrote deny verb");

	fields
		.iter()
		.map(|field| GateKind::from_field(field))
		.collect::<Option<Vec<_>>>()
		.map(Verb::Deny)
}

/// Field names targeted by the `<Types>` part of a deny verb.
///
/// The `ing` → `able` rewrite is a plain substring replacement, so it also
/// applies to an `ing` in the middle of a word.
pub fn deny_fields(types: &str) -> Vec<String> {
	types
		.replace("ing", "able")
		.to_lowercase()
		.split("and")
		.map(str::to_string)
		.collect()
}
