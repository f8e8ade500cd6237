//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config FILE`, or `config.toml` in the platform config dir)
//! 3. `PROFILEDUPE_*` environment variables
//! 4. CLI flags, applied with [`Config::merge_generate_args`] and
//!    [`Config::merge_detect_args`]
//!
//! # Example
//!
//! ```toml
//! platforms = ["instagram", "twitter"]
//! unique_profiles = 1000
//! duplicate_profiles = 25
//! output_dir = "data"
//! format = "json"
//! shard_size = 4096
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{DetectArgs, GenerateArgs, OutputFormat};
use crate::generator::{DEFAULT_DUPLICATE_PROFILES, DEFAULT_PLATFORMS, DEFAULT_UNIQUE_PROFILES};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "PROFILEDUPE_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Platforms to generate datasets for.
    pub platforms: Vec<String>,
    /// Distinct identities per generated dataset.
    pub unique_profiles: usize,
    /// Copies of the injected identity per generated dataset.
    pub duplicate_profiles: usize,
    /// Directory generated datasets are written to.
    pub output_dir: PathBuf,
    /// Duplicate report format.
    pub format: OutputFormat,
    /// Prefix CSV report rows with a group number.
    pub group_ids: bool,
    /// Treat "no duplicates" as an error instead of writing an empty report.
    pub require_duplicates: bool,
    /// Group over parallel shards of this many records.
    pub shard_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platforms: DEFAULT_PLATFORMS.iter().map(|p| (*p).to_string()).collect(),
            unique_profiles: DEFAULT_UNIQUE_PROFILES,
            duplicate_profiles: DEFAULT_DUPLICATE_PROFILES,
            output_dir: PathBuf::from("."),
            format: OutputFormat::Csv,
            group_ids: false,
            require_duplicates: false,
            shard_size: None,
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults on any error.
    ///
    /// `explicit` is the `--config` path; without it the platform default
    /// location is used when it exists.
    #[must_use]
    pub fn load(explicit: Option<&Path>) -> Self {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    log::warn!("Config file {} not found, using defaults", path.display());
                }
                Self::load_from_path(path)
            }
            None => match Self::default_path() {
                Some(path) => Self::load_from_path(&path),
                None => Self::load_from_figment(Self::base_figment()),
            },
        }
    }

    /// Load configuration from a specific TOML file plus environment.
    ///
    /// A missing file contributes nothing. An unparsable file or a value of
    /// the wrong type logs a warning and yields the defaults.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        Self::load_from_figment(Self::figment(path))
    }

    /// Like [`Config::load_from_path`] but reports errors.
    ///
    /// # Errors
    ///
    /// Returns the figment error for malformed TOML or mistyped values.
    pub fn try_load_from_path(path: &Path) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    /// Default configuration file location for this platform.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "profiledupe", "profiledupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Provider stack for a given config file.
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    fn base_figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    fn load_from_figment(figment: Figment) -> Self {
        match figment.extract() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Apply `generate` CLI flags on top of this configuration.
    pub fn merge_generate_args(&mut self, args: &GenerateArgs) {
        if !args.platforms.is_empty() {
            self.platforms = args.platforms.clone();
        }
        if let Some(unique) = args.unique {
            self.unique_profiles = unique;
        }
        if let Some(duplicates) = args.duplicates {
            self.duplicate_profiles = duplicates;
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir = dir.clone();
        }
    }

    /// Apply `detect` CLI flags on top of this configuration.
    pub fn merge_detect_args(&mut self, args: &DetectArgs) {
        if let Some(format) = args.format {
            self.format = format;
        }
        if args.group_ids {
            self.group_ids = true;
        }
        if args.require_duplicates {
            self.require_duplicates = true;
        }
        if args.shard_size.is_some() {
            self.shard_size = args.shard_size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(
            config.platforms,
            vec!["instagram", "twitter", "threads", "facebook"]
        );
        assert_eq!(config.unique_profiles, 450);
        assert_eq!(config.duplicate_profiles, 50);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.shard_size, None);
    }

    #[test]
    fn test_serialize_toml() {
        let config = Config {
            format: OutputFormat::Json,
            unique_profiles: 3,
            ..Config::default()
        };
        let content = toml::to_string_pretty(&config).unwrap();
        assert!(content.contains("format = \"json\""));
        assert!(content.contains("unique_profiles = 3"));
    }

    #[test]
    fn test_merge_generate_args() {
        let cli = Cli::try_parse_from([
            "profiledupe",
            "generate",
            "-p",
            "threads",
            "--unique",
            "12",
        ])
        .unwrap();
        let mut config = Config::default();
        if let Commands::Generate(args) = &cli.command {
            config.merge_generate_args(args);
        }
        assert_eq!(config.platforms, vec!["threads"]);
        assert_eq!(config.unique_profiles, 12);
        assert_eq!(config.duplicate_profiles, 50);
    }

    #[test]
    fn test_merge_detect_args_keeps_unset_values() {
        let mut config = Config {
            format: OutputFormat::Json,
            shard_size: Some(100),
            ..Config::default()
        };
        let cli = Cli::try_parse_from(["profiledupe", "detect", "in.csv", "--group-ids"]).unwrap();
        if let Commands::Detect(args) = &cli.command {
            config.merge_detect_args(args);
        }
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.shard_size, Some(100));
        assert!(config.group_ids);
        assert!(!config.require_duplicates);
    }
}
