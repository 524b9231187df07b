use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration structure for vidpref
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Video store layout and assignment settings
    #[serde(default)]
    pub study: StudyConfig,

    /// Prompt document location
    #[serde(default)]
    pub prompts: PromptsConfig,

    /// Result log storage
    #[serde(default)]
    pub results: ResultsConfig,

    /// Shared-secret codes mapped to group ids (1, 2 or 3)
    #[serde(default = "default_login_codes")]
    pub login_codes: BTreeMap<String, u8>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_login_codes() -> BTreeMap<String, u8> {
    BTreeMap::from([
        ("1111".to_string(), 1),
        ("2222".to_string(), 2),
        ("all".to_string(), 3),
    ])
}

impl Default for Config {
    fn default() -> Self {
        Self {
            study: StudyConfig::default(),
            prompts: PromptsConfig::default(),
            results: ResultsConfig::default(),
            login_codes: default_login_codes(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Layout of the backing video store:
/// `{video_base_path}/{folder}/{filename}.{video_extension}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StudyConfig {
    /// Root of the video tree
    #[serde(default = "default_video_base_path")]
    pub video_base_path: PathBuf,

    /// Folder (and display name) of the reference method
    #[serde(default = "default_reference_method")]
    pub reference_method: String,

    /// Folder holding the unedited source videos
    #[serde(default = "default_source_folder")]
    pub source_folder: String,

    /// Extension of eligible video files, without the dot
    #[serde(default = "default_video_extension")]
    pub video_extension: String,

    /// Seed for the group split shuffle
    #[serde(default)]
    pub seed: u64,

    /// Baselines compared against the reference method, in comparison order
    #[serde(default = "default_baselines")]
    pub baselines: Vec<BaselineConfig>,
}

fn default_video_base_path() -> PathBuf {
    PathBuf::from("videos/test")
}

fn default_reference_method() -> String {
    "prune0.149".to_string()
}

fn default_source_folder() -> String {
    "davis_eval_proc".to_string()
}

fn default_video_extension() -> String {
    "mp4".to_string()
}

fn default_baselines() -> Vec<BaselineConfig> {
    vec![BaselineConfig {
        name: "no_prune".to_string(),
        folder: "no_prune".to_string(),
    }]
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            video_base_path: default_video_base_path(),
            reference_method: default_reference_method(),
            source_folder: default_source_folder(),
            video_extension: default_video_extension(),
            seed: 0,
            baselines: default_baselines(),
        }
    }
}

/// One baseline variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineConfig {
    /// Name recorded in the result log
    pub name: String,

    /// Folder under the video base path holding its outputs
    pub folder: String,
}

/// Prompt document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PromptsConfig {
    /// Path to the JSON prompt document
    #[serde(default = "default_prompts_path")]
    pub path: PathBuf,
}

fn default_prompts_path() -> PathBuf {
    PathBuf::from("eval_prune.json")
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            path: default_prompts_path(),
        }
    }
}

/// Result log storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResultsConfig {
    /// Directory acting as the result blob store
    #[serde(default = "default_results_dir")]
    pub dir: PathBuf,

    /// Prefix placed before the group id in log names
    #[serde(default = "default_test_id_prefix")]
    pub test_id_prefix: String,
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_test_id_prefix() -> String {
    "testID".to_string()
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            dir: default_results_dir(),
            test_id_prefix: default_test_id_prefix(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files (console only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "never".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
