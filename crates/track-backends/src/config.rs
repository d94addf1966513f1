use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::BackendError;

/// Channel used when none is configured.
pub const DEFAULT_CHANNEL: &str = "tracking";

/// Default cap on the length of one record, in characters.
pub const DEFAULT_MAX_EVENT_SIZE: usize = 50_000;

/// Prefix of environment variables overriding the configuration.
pub const ENV_PREFIX: &str = "TRACK_";

/// Settings for [`LoggerBackend`](crate::LoggerBackend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Logging channel the records are written to.
    #[serde(default = "default_name")]
    pub name: String,
    /// Records longer than this many characters are cut. `0` disables the cap.
    #[serde(default = "default_max_event_size")]
    pub max_event_size: usize,
    /// Escape non-ASCII characters in records as `\uXXXX`.
    #[serde(default)]
    pub ascii_only: bool,
}

fn default_name() -> String {
    DEFAULT_CHANNEL.to_string()
}

fn default_max_event_size() -> usize {
    DEFAULT_MAX_EVENT_SIZE
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            max_event_size: default_max_event_size(),
            ascii_only: false,
        }
    }
}

impl LoggerConfig {
    /// Layers defaults, then the TOML file at `path` (if any), then
    /// `TRACK_*` environment variables.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(LoggerConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Config`] if a source cannot be parsed or the
    /// channel name is empty.
    pub fn load(path: Option<&Path>) -> Result<Self, BackendError> {
        let config: LoggerConfig = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values no source may set, such as a blank channel name. Call
    /// again after overriding fields by hand.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Config`] if the channel name is empty.
    pub fn validate(&self) -> Result<(), BackendError> {
        if self.name.trim().is_empty() {
            return Err(figment::Error::from("name must not be empty").into());
        }
        Ok(())
    }

    /// The cap as an option, `None` meaning unlimited.
    pub fn event_size_limit(&self) -> Option<usize> {
        (self.max_event_size > 0).then_some(self.max_event_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config = LoggerConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, LoggerConfig::default());
            assert_eq!(config.name, "tracking");
            assert_eq!(config.event_size_limit(), Some(50_000));
            Ok(())
        });
    }

    #[test]
    fn file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "track.toml",
                r#"
                name = "track.backends.logger.test"
                max_event_size = 1000
                "#,
            )?;
            jail.set_env("TRACK_MAX_EVENT_SIZE", "0");
            jail.set_env("TRACK_ASCII_ONLY", "true");

            let config =
                LoggerConfig::load(Some(Path::new("track.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.name, "track.backends.logger.test");
            assert_eq!(config.max_event_size, 0);
            assert_eq!(config.event_size_limit(), None);
            assert!(config.ascii_only);
            Ok(())
        });
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        Jail::expect_with(|_jail| {
            let config = LoggerConfig::load(Some(Path::new("absent.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config, LoggerConfig::default());
            Ok(())
        });
    }

    #[test]
    fn empty_name_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("track.toml", r#"name = "  ""#)?;
            let err = LoggerConfig::load(Some(Path::new("track.toml"))).unwrap_err();
            assert!(matches!(err, BackendError::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn validate_catches_blank_override() {
        let mut config = LoggerConfig::default();
        assert!(config.validate().is_ok());

        config.name = String::new();
        assert!(matches!(config.validate(), Err(BackendError::Config(_))));
    }

    #[test]
    fn malformed_value_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("TRACK_MAX_EVENT_SIZE", "lots");
            assert!(LoggerConfig::load(None).is_err());
            Ok(())
        });
    }
}
