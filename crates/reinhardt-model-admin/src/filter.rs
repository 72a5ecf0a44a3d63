//! List filters
//!
//! A filter narrows the list query from request parameters and reports a
//! human readable description of the constraint it applied, which the list
//! view shows as "active filters".

use crate::context;
use crate::error::AdminResult;
use crate::query::{FilterParams, ListQuery};
use std::fmt;
use std::sync::Arc;

/// Trait for list filters
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::filter::ListFilter;
/// use reinhardt_model_admin::query::{FilterParams, ListQuery};
///
/// struct PublishedOnly;
///
/// impl ListFilter for PublishedOnly {
///     fn name(&self) -> &str {
///         "published"
///     }
///
///     fn apply(&self, query: &mut ListQuery, parameters: &FilterParams) -> Option<String> {
///         parameters.get("published")?;
///         query.where_eq("status", "published");
///         Some("Published posts".to_string())
///     }
/// }
/// ```
pub trait ListFilter: Send + Sync {
	/// Request parameter the filter reacts to
	fn name(&self) -> &str;

	/// Narrow `query` according to `parameters`.
	///
	/// Returns a description of the applied constraint, or `None` when there is
	/// nothing to show (the query may still have been narrowed).
	fn apply(&self, query: &mut ListQuery, parameters: &FilterParams) -> Option<String>;
}

type ScopeFn = dyn Fn(&mut ListQuery, &str) + Send + Sync;
type TitleFn = dyn Fn(&str) -> String + Send + Sync;

#[derive(Clone)]
enum FilterTarget {
	/// `field = <parameter>`
	Field(String),
	/// Custom narrowing with the parameter value
	Scope(Arc<ScopeFn>),
}

#[derive(Clone)]
enum FilterTitle {
	Text(String),
	Dynamic(Arc<TitleFn>),
}

/// Built-in parameter filter
///
/// When the request carries a non-empty parameter named like the filter, the
/// query is narrowed to `field = value` (the field defaults to the filter
/// name) or by a custom scope.
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::filter::{Filter, ListFilter};
/// use reinhardt_model_admin::query::{FilterParams, ListQuery};
///
/// let filter = Filter::new("author")
///     .field("author_id")
///     .title_with(|value| format!("Written by #{value}"));
///
/// let mut query = ListQuery::new("posts");
/// let params = FilterParams::from([("author".to_string(), "7".to_string())]);
///
/// assert_eq!(filter.apply(&mut query, &params), Some("Written by #7".to_string()));
/// assert_eq!(query.conditions()[0].field, "author_id");
/// ```
#[derive(Clone)]
pub struct Filter {
	name: String,
	target: Option<FilterTarget>,
	title: Option<FilterTitle>,
}

impl Filter {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			target: None,
			title: None,
		}
	}

	/// Compare this field instead of the one named like the filter
	pub fn field(mut self, field: impl Into<String>) -> Self {
		self.target = Some(FilterTarget::Field(field.into()));
		self
	}

	/// Narrow the query with a custom scope instead of an equality check
	pub fn scope(mut self, scope: impl Fn(&mut ListQuery, &str) + Send + Sync + 'static) -> Self {
		self.target = Some(FilterTarget::Scope(Arc::new(scope)));
		self
	}

	/// Fixed description reported while the filter is active
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(FilterTitle::Text(title.into()));
		self
	}

	/// Description computed from the parameter value
	pub fn title_with(mut self, title: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
		self.title = Some(FilterTitle::Dynamic(Arc::new(title)));
		self
	}
}

impl ListFilter for Filter {
	fn name(&self) -> &str {
		&self.name
	}

	fn apply(&self, query: &mut ListQuery, parameters: &FilterParams) -> Option<String> {
		let value = parameters
			.get(&self.name)
			.map(String::as_str)
			.filter(|value| !value.is_empty())?;

		match &self.target {
			Some(FilterTarget::Scope(scope)) => scope(query, value),
			Some(FilterTarget::Field(field)) => {
				query.where_eq(field.as_str(), value);
			}
			None => {
				query.where_eq(self.name.as_str(), value);
			}
		}

		match &self.title {
			Some(FilterTitle::Text(text)) => Some(text.clone()),
			Some(FilterTitle::Dynamic(title)) => Some(title(value)),
			None => None,
		}
	}
}

impl fmt::Debug for Filter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let target = match &self.target {
			Some(FilterTarget::Field(field)) => field.as_str(),
			Some(FilterTarget::Scope(_)) => "<scope>",
			None => self.name.as_str(),
		};
		f.debug_struct("Filter")
			.field("name", &self.name)
			.field("target", &target)
			.field("has_title", &self.title.is_some())
			.finish()
	}
}

/// Register a filter on the descriptor currently being configured
pub fn register(filter: impl ListFilter + 'static) -> AdminResult<()> {
	context::with_current("filter::register", |item| {
		item.add_filter(filter);
	})
}

/// Register an equality filter on `name` with a fixed title
pub fn field(name: impl Into<String>, title: impl Into<String>) -> AdminResult<()> {
	let filter = Filter::new(name).title(title);
	context::with_current("filter::field", |item| {
		item.add_filter(filter);
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::query::{Operator, Value};
	use rstest::rstest;

	fn params(pairs: &[(&str, &str)]) -> FilterParams {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[rstest]
	fn missing_parameter_leaves_query_untouched() {
		// Arrange
		let filter = Filter::new("status").title("By status");
		let mut query = ListQuery::new("posts");

		// Act
		let title = filter.apply(&mut query, &params(&[("other", "x")]));

		// Assert
		assert_eq!(title, None);
		assert!(query.is_unfiltered());
	}

	#[rstest]
	fn empty_parameter_is_ignored() {
		let filter = Filter::new("status");
		let mut query = ListQuery::new("posts");
		assert_eq!(filter.apply(&mut query, &params(&[("status", "")])), None);
		assert!(query.is_unfiltered());
	}

	#[rstest]
	fn untitled_filter_narrows_without_description() {
		// Arrange
		let filter = Filter::new("status");
		let mut query = ListQuery::new("posts");

		// Act
		let title = filter.apply(&mut query, &params(&[("status", "draft")]));

		// Assert
		assert_eq!(title, None);
		assert_eq!(query.conditions().len(), 1);
		assert_eq!(query.conditions()[0].operator, Operator::Eq);
		assert_eq!(query.conditions()[0].value, Value::String("draft".to_string()));
	}

	#[rstest]
	fn scope_replaces_equality() {
		// Arrange
		let filter = Filter::new("q")
			.scope(|query, value| {
				query.push("title", Operator::Contains, value);
			})
			.title("Search");
		let mut query = ListQuery::new("posts");

		// Act
		let title = filter.apply(&mut query, &params(&[("q", "rust")]));

		// Assert
		assert_eq!(title.as_deref(), Some("Search"));
		assert_eq!(query.conditions()[0].operator, Operator::Contains);
	}
}
