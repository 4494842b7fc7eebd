use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Configuration for one search session.
///
/// # Configuration Locations
///
/// The configuration can be loaded from multiple locations in order of
/// precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.namescout.yaml` in the current directory
/// 3. Global `$HOME/.config/namescout/config.yaml`
///
/// # Configuration Format
///
/// The configuration uses YAML format. Example:
/// ```yaml
/// # Substring to look for in file names (case-insensitive)
/// query: "invoice"
///
/// # Root directory whose subtree is searched
/// root_dir: "/home/me/projects"
///
/// # Walker pool size (default: CPU cores)
/// thread_count: 8
///
/// # Also test files directly under root_dir against the query
/// include_root_files: false
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
///
/// When using the CLI, command-line arguments take precedence over config
/// file values; the merging behavior is defined in `merge_with_cli`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Substring the file name must contain, compared case-insensitively.
    /// Empty matches every file.
    #[serde(default)]
    pub query: String,

    /// Root directory whose immediate subdirectories are searched
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Number of walker threads drawing directory tasks from the work queue.
    /// Defaults to the number of CPU cores.
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Whether files directly under `root_dir` (not inside any
    /// subdirectory) are also tested against the query. Off by default:
    /// the search descends into subdirectories only.
    #[serde(default)]
    pub include_root_files: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or_else(|| NonZeroUsize::new(1).unwrap())
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            root_dir: default_root_dir(),
            thread_count: default_thread_count(),
            include_root_files: false,
            log_level: default_log_level(),
        }
    }
}

impl SearchConfig {
    /// Convenience constructor for the common root + query case.
    pub fn for_query(root_dir: impl Into<PathBuf>, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            root_dir: root_dir.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // Default config locations
        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("namescout/config.yaml")),
            // Local config
            Some(PathBuf::from(".namescout.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        // Add existing config files
        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // Build and deserialize
        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli_config: SearchConfig) -> Self {
        // CLI values take precedence over config file values
        if !cli_config.query.is_empty() {
            self.query = cli_config.query;
        }
        if cli_config.root_dir != default_root_dir() {
            self.root_dir = cli_config.root_dir;
        }
        if cli_config.thread_count != default_thread_count() {
            self.thread_count = cli_config.thread_count;
        }
        if cli_config.include_root_files {
            self.include_root_files = true;
        }
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }
}
