//! Error types for model admin configuration

use thiserror::Error;

/// Model admin configuration error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminError {
	/// A configuration verb that the descriptor does not understand
	#[error("Method '{method}' not found on admin model '{model}'")]
	MethodNotFound {
		/// Class path of the administered model
		model: String,
		/// The method name that was attempted
		method: String,
	},

	/// A known verb was called with an argument it cannot accept
	#[error("Invalid argument for '{method}': expected {expected}")]
	InvalidArgument {
		/// The method name that was attempted
		method: String,
		/// Description of the accepted argument shapes
		expected: String,
	},

	/// A builder function was used outside a configuration block
	#[error("No admin model is being configured; '{0}' must be called inside columns(), filters() or form()")]
	NoCurrentModel(String),

	/// No descriptor is registered under the requested alias
	#[error("Model '{0}' is not registered with admin")]
	ModelNotRegistered(String),

	/// Settings could not be read or failed validation
	#[error("Invalid admin settings: {0}")]
	InvalidSettings(String),
}

/// Result type for model admin operations
pub type AdminResult<T> = Result<T, AdminError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn method_not_found_names_model_and_method() {
		// Arrange
		let err = AdminError::MethodNotFound {
			model: "app::models::User".to_string(),
			method: "frobnicate".to_string(),
		};

		// Act
		let message = err.to_string();

		// Assert
		assert!(message.contains("app::models::User"));
		assert!(message.contains("frobnicate"));
	}

	#[rstest]
	fn no_current_model_mentions_builder() {
		let err = AdminError::NoCurrentModel("column::string".to_string());
		assert!(err.to_string().contains("column::string"));
	}
}
