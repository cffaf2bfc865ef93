//! Admin settings.

use crate::error::AdminError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings of an admin.
///
/// ```
/// use radmin_admin::AdminSettings;
///
/// let settings = AdminSettings::from_toml(r#"
/// title = "Back office"
/// basename = "/admin"
/// require_auth = true
/// "#).unwrap();
///
/// assert_eq!(settings.basename.as_deref(), Some("/admin"));
/// assert_eq!(settings.loading_delay_ms, 1000);
/// assert_eq!(settings.login_path, "/login");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
	pub title: String,
	/// Mount prefix of the admin.
	pub basename: Option<String>,
	/// Only no-layout custom routes are reachable until `check_auth` passes.
	pub require_auth: bool,
	/// Grace period before the loading page shows up.
	pub loading_delay_ms: u64,
	pub login_path: String,
}

impl Default for AdminSettings {
	fn default() -> Self {
		Self {
			title: "Radmin".to_owned(),
			basename: None,
			require_auth: false,
			loading_delay_ms: 1000,
			login_path: "/login".to_owned(),
		}
	}
}

impl AdminSettings {
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	pub fn with_basename(mut self, basename: impl Into<String>) -> Self {
		self.basename = Some(basename.into());
		self
	}

	pub fn with_require_auth(mut self, require_auth: bool) -> Self {
		self.require_auth = require_auth;
		self
	}

	pub fn with_loading_delay(mut self, delay: Duration) -> Self {
		self.loading_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
		self
	}

	pub fn loading_delay(&self) -> Duration {
		Duration::from_millis(self.loading_delay_ms)
	}

	/// Load settings from a TOML file.
	///
	/// # Errors
	///
	/// Returns [`AdminError::InvalidSettings`] if the file cannot be read,
	/// parsed or validated.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AdminError> {
		let content = std::fs::read_to_string(path.as_ref()).map_err(|e| AdminError::InvalidSettings {
			message: format!("{}: {e}", path.as_ref().display()),
		})?;
		Self::from_toml(&content)
	}

	/// Parse settings from a TOML string. Missing keys take their defaults.
	pub fn from_toml(content: &str) -> Result<Self, AdminError> {
		let settings: Self = toml::from_str(content).map_err(|e| AdminError::InvalidSettings {
			message: e.to_string(),
		})?;
		settings.validate()?;
		Ok(settings)
	}

	pub fn validate(&self) -> Result<(), AdminError> {
		if !self.login_path.starts_with('/') {
			return Err(AdminError::InvalidSettings {
				message: format!("login_path must be absolute, got {:?}", self.login_path),
			});
		}
		if let Some(basename) = &self.basename
			&& !basename.is_empty()
			&& !basename.starts_with('/')
		{
			return Err(AdminError::InvalidSettings {
				message: format!("basename must start with '/', got {basename:?}"),
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_empty_toml_gives_defaults() {
		assert_eq!(AdminSettings::from_toml("").unwrap(), AdminSettings::default());
	}

	#[rstest]
	#[case("login_path = \"login\"")]
	#[case("basename = \"admin\"")]
	#[case("loading_delay_ms = \"soon\"")]
	fn test_invalid_settings(#[case] content: &str) {
		let result = AdminSettings::from_toml(content);

		assert!(matches!(result, Err(AdminError::InvalidSettings { .. })));
	}

	#[rstest]
	fn test_from_file() {
		// Arrange
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("admin.toml");
		std::fs::write(&path, "title = \"Back office\"\nloading_delay_ms = 0\n").unwrap();

		// Act
		let settings = AdminSettings::from_file(&path).unwrap();
		let missing = AdminSettings::from_file(dir.path().join("missing.toml"));

		// Assert
		assert_eq!(settings.title, "Back office");
		assert_eq!(settings.loading_delay(), Duration::ZERO);
		assert!(matches!(missing, Err(AdminError::InvalidSettings { .. })));
	}

	#[rstest]
	fn test_builders() {
		let settings = AdminSettings::default()
			.with_basename("/admin")
			.with_loading_delay(Duration::from_millis(250));

		assert_eq!(settings.loading_delay(), Duration::from_millis(250));
		assert_eq!(settings.basename.as_deref(), Some("/admin"));
	}
}
