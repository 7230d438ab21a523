use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a [`NotifyConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed into a configuration.
    #[error("failed to parse notification config: {0}")]
    Parse(#[from] toml::de::Error),

    /// `max_dispatch_depth = 0` would refuse every dispatch.
    #[error("max_dispatch_depth must be at least 1")]
    ZeroDispatchDepth,
}

/// Per-entity notification settings.
///
/// # Examples
///
/// ```
/// use chemwire::notify::NotifyConfig;
///
/// let config = NotifyConfig::from_toml_str("max_dispatch_depth = 32")?;
/// assert!(config.enabled);
/// assert_eq!(config.max_dispatch_depth, Some(32));
/// # Ok::<(), chemwire::notify::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifyConfig {
    /// When `false` the entity accepts no new listeners and never dispatches.
    pub enabled: bool,

    /// Nesting limit for re-entrant dispatch. `None` disables the guard.
    pub max_dispatch_depth: Option<usize>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_dispatch_depth: None,
        }
    }
}

impl NotifyConfig {
    /// Configuration for entities that never notify.
    pub fn silent() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        debug!(
            enabled = config.enabled,
            max_dispatch_depth = ?config.max_dispatch_depth,
            "loaded notification config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_dispatch_depth == Some(0) {
            return Err(ConfigError::ZeroDispatchDepth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = NotifyConfig::from_toml_str("").unwrap();
        assert_eq!(config, NotifyConfig::default());
        assert!(config.enabled);
        assert_eq!(config.max_dispatch_depth, None);
    }

    #[test]
    fn parses_all_fields() {
        let config = NotifyConfig::from_toml_str("enabled = false\nmax_dispatch_depth = 8\n").unwrap();
        assert!(!config.enabled);
        assert_eq!(config.max_dispatch_depth, Some(8));
    }

    #[test]
    fn rejects_zero_depth() {
        let err = NotifyConfig::from_toml_str("max_dispatch_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDispatchDepth));
        assert_eq!(err.to_string(), "max_dispatch_depth must be at least 1");
    }

    #[test]
    fn rejects_unknown_keys_and_bad_types() {
        let err = NotifyConfig::from_toml_str("verbose = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let err = NotifyConfig::from_toml_str("enabled = \"yes\"").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse notification config"));
    }

    #[test]
    fn silent_disables_delivery() {
        assert!(!NotifyConfig::silent().enabled);
        assert!(NotifyConfig::silent().validate().is_ok());
    }
}
