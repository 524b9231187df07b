//! Project initialization for `vidpref init`
//!
//! Creates the `.vidpref/` configuration directory, a commented default
//! config file and the results directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration template content
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# vidpref configuration
# Override settings by editing this file, adding .vidpref/local.yaml, or
# setting environment variables with the VIDPREF_ prefix
#
# Example environment variables:
#   export VIDPREF_STUDY__VIDEO_BASE_PATH=/data/videos/test
#   export VIDPREF_STUDY__SEED=3
#   export VIDPREF_LOGGING__LEVEL=debug

study:
  # Root of the video tree: {video_base_path}/{folder}/{filename}
  video_base_path: "videos/test"

  # Folder (and recorded name) of the method under evaluation
  reference_method: "prune0.149"

  # Folder holding the unedited source videos
  source_folder: "davis_eval_proc"

  # Extension of eligible videos, without the dot
  video_extension: "mp4"

  # Seed for the group split; every rater of a study must share it
  seed: 0

  # Baselines compared against the reference, in comparison order
  baselines:
    - name: "no_prune"
      folder: "no_prune"

prompts:
  # JSON array of {"edit_vid": "..."} entries; missing file means no prompts
  path: "eval_prune.json"

results:
  # One CSV log per session is written here
  dir: "results"
  test_id_prefix: "testID"

# Login codes mapped to groups: 1 = first half, 2 = second half, 3 = all.
# This table replaces the built-in 1111/2222/all codes; remove a line to retire it.
login_codes:
  "1111": 1
  "2222": 2
  "all": 3

logging:
  # Log level: trace, debug, info, warn, error
  level: "warn"

  # Console log format: json, pretty
  format: "pretty"

  # Set to write JSON logs to a directory as well
  # log_dir: ".vidpref/logs"

  # File rotation: daily, hourly, never
  rotation: "never"
"#;

/// Setup paths and directories
pub struct SetupPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub results_dir: PathBuf,
}

impl SetupPaths {
    /// Get setup paths for the current directory
    pub fn new() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self::under(current_dir))
    }

    /// Setup paths rooted at `root`
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let config_dir = root.join(".vidpref");
        Self {
            config_file: config_dir.join("config.yaml"),
            results_dir: root.join("results"),
            config_dir,
        }
    }

    /// Check if the project is already initialized
    pub fn is_initialized(&self) -> bool {
        self.config_file.exists()
    }
}

/// Create the configuration directory
pub fn create_config_dir(paths: &SetupPaths) -> Result<()> {
    fs::create_dir_all(&paths.config_dir).context("Failed to create config directory")
}

/// Create the default configuration file. Returns `false` when an existing
/// file was left in place.
pub fn create_config_file(paths: &SetupPaths, force: bool) -> Result<bool> {
    if paths.config_file.exists() && !force {
        return Ok(false);
    }

    fs::write(&paths.config_file, DEFAULT_CONFIG_TEMPLATE)
        .context("Failed to write config file")?;

    Ok(true)
}

/// Create the results directory
pub fn create_results_dir(paths: &SetupPaths) -> Result<()> {
    fs::create_dir_all(&paths.results_dir).context("Failed to create results directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Config;
    use crate::infrastructure::config::ConfigLoader;

    #[test]
    fn test_template_is_valid_config() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        ConfigLoader::validate(&config).unwrap();
        assert_eq!(config.study.reference_method, "prune0.149");
        assert_eq!(config.login_codes.get("2222"), Some(&2));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_create_config_file_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SetupPaths::under(dir.path());
        assert!(!paths.is_initialized());

        create_config_dir(&paths).unwrap();
        assert!(create_config_file(&paths, false).unwrap());
        assert!(paths.is_initialized());

        fs::write(&paths.config_file, "study: {}\n").unwrap();
        assert!(!create_config_file(&paths, false).unwrap());
        assert_eq!(fs::read_to_string(&paths.config_file).unwrap(), "study: {}\n");

        assert!(create_config_file(&paths, true).unwrap());
        assert_eq!(
            fs::read_to_string(&paths.config_file).unwrap(),
            DEFAULT_CONFIG_TEMPLATE
        );
    }

    #[test]
    fn test_create_results_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SetupPaths::under(dir.path());
        create_results_dir(&paths).unwrap();
        assert!(dir.path().join("results").is_dir());
    }
}
