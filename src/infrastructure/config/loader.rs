use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::Group;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Video base path cannot be empty")]
    EmptyVideoBasePath,

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("At least one baseline must be configured")]
    NoBaselines,

    #[error("Duplicate baseline name: {0}")]
    DuplicateBaseline(String),

    #[error("At least one login code must be configured")]
    NoLoginCodes,

    #[error("Login code '{code}' maps to invalid group {group}. Must be 1, 2 or 3")]
    InvalidLoginGroup { code: String, group: u8 },

    #[error("Test ID prefix '{0}' must not contain path separators")]
    InvalidTestIdPrefix(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .vidpref/config.yaml (project config, created by init)
    /// 3. .vidpref/local.yaml (local overrides, optional)
    /// 4. Environment variables (VIDPREF_* prefix, highest priority)
    ///
    /// The login-code table is not merged: the highest layer that sets
    /// `login_codes` replaces the built-in codes instead of extending them.
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Self::defaults()?)
            .merge(Yaml::file(".vidpref/config.yaml"))
            .merge(Yaml::file(".vidpref/local.yaml"))
            .merge(Env::prefixed("VIDPREF_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Self::defaults()?)
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("VIDPREF_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Programmatic defaults without the login-code table, which falls back
    /// to its serde default only when no layer provides one.
    fn defaults() -> Result<Serialized<serde_json::Value>> {
        let mut defaults = serde_json::to_value(Config::default())
            .context("Failed to serialize default configuration")?;
        if let Some(table) = defaults.as_object_mut() {
            table.remove("login_codes");
        }
        Ok(Serialized::defaults(defaults))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let study = &config.study;
        if study.video_base_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyVideoBasePath);
        }
        if study.reference_method.is_empty() {
            return Err(ConfigError::EmptyField("study.reference_method"));
        }
        if study.source_folder.is_empty() {
            return Err(ConfigError::EmptyField("study.source_folder"));
        }
        if study.video_extension.is_empty() {
            return Err(ConfigError::EmptyField("study.video_extension"));
        }

        if study.baselines.is_empty() {
            return Err(ConfigError::NoBaselines);
        }
        let mut names = HashSet::new();
        for baseline in &study.baselines {
            if baseline.name.is_empty() {
                return Err(ConfigError::EmptyField("baseline name"));
            }
            if baseline.folder.is_empty() {
                return Err(ConfigError::EmptyField("baseline folder"));
            }
            if !names.insert(baseline.name.as_str()) {
                return Err(ConfigError::DuplicateBaseline(baseline.name.clone()));
            }
        }

        if config.login_codes.is_empty() {
            return Err(ConfigError::NoLoginCodes);
        }
        for (code, &group) in &config.login_codes {
            if Group::try_from(group).is_err() {
                return Err(ConfigError::InvalidLoginGroup {
                    code: code.clone(),
                    group,
                });
            }
        }

        if config.results.test_id_prefix.contains(['/', '\\']) {
            return Err(ConfigError::InvalidTestIdPrefix(
                config.results.test_id_prefix.clone(),
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        Ok(())
    }
}
