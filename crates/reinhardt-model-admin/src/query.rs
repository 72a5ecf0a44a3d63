//! List query builder narrowed by admin filters
//!
//! `ListQuery` is the contract between list filters and the ORM layer: filters
//! push conditions onto it, the ORM turns it into SQL. Nothing here executes a
//! query.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request parameters visible to list filters (usually the query string).
pub type FilterParams = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
	Eq,
	Ne,
	Gt,
	Gte,
	Lt,
	Lte,
	Contains,
	StartsWith,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
	String(String),
	Integer(i64),
	Boolean(bool),
	Null,
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Integer(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Boolean(value)
	}
}

/// A single `field <operator> value` restriction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
	pub field: String,
	pub operator: Operator,
	pub value: Value,
}

impl Condition {
	pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
		Self {
			field: field.into(),
			operator,
			value: value.into(),
		}
	}
}

/// Query for an admin list view
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::query::{ListQuery, Operator};
///
/// let mut query = ListQuery::new("users");
/// query.where_eq("is_active", true).push("age", Operator::Gte, 18_i64);
///
/// assert_eq!(query.table(), "users");
/// assert_eq!(query.conditions().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
	table: String,
	conditions: Vec<Condition>,
	eager: Vec<String>,
}

impl ListQuery {
	pub fn new(table: impl Into<String>) -> Self {
		Self {
			table: table.into(),
			conditions: Vec::new(),
			eager: Vec::new(),
		}
	}

	/// Add a condition
	pub fn filter(&mut self, condition: Condition) -> &mut Self {
		self.conditions.push(condition);
		self
	}

	/// Add a `field <operator> value` condition
	pub fn push(
		&mut self,
		field: impl Into<String>,
		operator: Operator,
		value: impl Into<Value>,
	) -> &mut Self {
		self.filter(Condition::new(field, operator, value))
	}

	/// Add a `field = value` condition
	pub fn where_eq(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.push(field, Operator::Eq, value)
	}

	/// Replace the set of relations loaded together with the rows
	pub fn with(&mut self, relations: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
		self.eager = relations.into_iter().map(Into::into).collect();
		self
	}

	pub fn table(&self) -> &str {
		&self.table
	}

	pub fn conditions(&self) -> &[Condition] {
		&self.conditions
	}

	pub fn eager(&self) -> &[String] {
		&self.eager
	}

	/// Whether no filter has narrowed the query yet
	pub fn is_unfiltered(&self) -> bool {
		self.conditions.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn conditions_keep_insertion_order() {
		// Arrange
		let mut query = ListQuery::new("posts");

		// Act
		query
			.where_eq("status", "published")
			.push("title", Operator::Contains, "rust")
			.where_eq("author_id", 7_i64);

		// Assert
		let fields: Vec<&str> = query.conditions().iter().map(|c| c.field.as_str()).collect();
		assert_eq!(fields, vec!["status", "title", "author_id"]);
		assert_eq!(query.conditions()[2].value, Value::Integer(7));
		assert!(!query.is_unfiltered());
	}

	#[rstest]
	fn with_replaces_eager_relations() {
		let mut query = ListQuery::new("posts");
		query.with(["author"]);
		query.with(["tags", "comments"]);
		assert_eq!(query.eager(), ["tags", "comments"]);
	}
}
