//! Admin site settings
//!
//! Settings are usually kept in a TOML file next to the project settings:
//!
//! ```toml
//! site_name = "Back office"
//!
//! [models."app::models::User"]
//! alias = "people"
//! title = "People"
//! with = ["roles"]
//! deny = ["Creating", "EditingAndDeleting"]
//! ```
//!
//! Each `deny` entry is the suffix of a `deny<Types>` verb.

use crate::dispatch::{self, Verb};
use crate::error::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_SITE_NAME: &str = "Administration";

/// Settings of an admin site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
	/// Name shown in the admin header
	pub site_name: String,
	/// Per-model overrides, keyed by model class path
	pub models: BTreeMap<String, ModelSettings>,
}

impl Default for AdminSettings {
	fn default() -> Self {
		Self {
			site_name: DEFAULT_SITE_NAME.to_string(),
			models: BTreeMap::new(),
		}
	}
}

/// Overrides applied to one model descriptor when it is constructed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelSettings {
	pub alias: Option<String>,
	pub title: Option<String>,
	/// Relations loaded together with the list rows
	pub with: Option<Vec<String>>,
	/// Denied actions, e.g. `"Creating"` or `"EditingAndDeleting"`
	pub deny: Vec<String>,
}

impl AdminSettings {
	/// Parse and validate settings from TOML
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_model_admin::AdminSettings;
	///
	/// let settings = AdminSettings::from_toml_str(r#"
	///     site_name = "Back office"
	///
	///     [models."app::User"]
	///     alias = "people"
	///     deny = ["Deleting"]
	/// "#).unwrap();
	///
	/// assert_eq!(settings.site_name, "Back office");
	/// assert_eq!(settings.model("app::User").and_then(|m| m.alias.as_deref()), Some("people"));
	///
	/// assert!(AdminSettings::from_toml_str(r#"
	///     [models."app::User"]
	///     deny = ["Viewing"]
	/// "#).is_err());
	/// ```
	pub fn from_toml_str(source: &str) -> AdminResult<Self> {
		let settings: Self =
			toml::from_str(source).map_err(|e| AdminError::InvalidSettings(e.to_string()))?;
		settings.validate()?;
		Ok(settings)
	}

	/// Read, parse and validate a TOML settings file
	pub fn from_file(path: impl AsRef<Path>) -> AdminResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|e| {
			AdminError::InvalidSettings(format!("failed to read {}: {}", path.display(), e))
		})?;
		tracing::debug!(path = %path.display(), "loading admin settings");
		Self::from_toml_str(&source)
	}

	/// Check every model override
	pub fn validate(&self) -> AdminResult<()> {
		for (class, model) in &self.models {
			model
				.validate()
				.map_err(|reason| AdminError::InvalidSettings(format!("models.\"{class}\": {reason}")))?;
		}
		Ok(())
	}

	/// Overrides for a model class path
	pub fn model(&self, class: &str) -> Option<&ModelSettings> {
		self.models.get(class)
	}
}

impl ModelSettings {
	fn validate(&self) -> Result<(), String> {
		if self.alias.as_deref().is_some_and(str::is_empty) {
			return Err("alias must not be empty".to_string());
		}
		for entry in &self.deny {
			let verb = format!("deny{entry}");
			if !matches!(dispatch::parse_verb(&verb), Some(Verb::Deny(_))) {
				return Err(format!("unknown deny entry '{entry}'"));
			}
		}
		Ok(())
	}
}
