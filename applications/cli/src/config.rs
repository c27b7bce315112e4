/// Application configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use smoothloop_core::LoopOptions;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "smoothloop.toml";

/// Prefix of the environment variables overriding the config file
pub const ENV_PREFIX: &str = "SMOOTHLOOP";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Loop durations, read from the top level (`cf_length = 2.0`)
    #[serde(flatten)]
    pub loop_options: LoopOptions,

    #[serde(default = "default_filename_suffix")]
    pub filename_suffix: String,

    #[serde(default)]
    pub overwrite: bool,

    #[serde(default)]
    pub verbosity: Verbosity,

    #[serde(default)]
    pub on_error: FailurePolicy,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Debug,
    #[default]
    Info,
    Error,
    Quiet,
}

impl Verbosity {
    /// `EnvFilter` directive for this level
    pub fn directive(self) -> &'static str {
        match self {
            Verbosity::Debug => "debug",
            Verbosity::Info => "info",
            Verbosity::Error => "error",
            Verbosity::Quiet => "off",
        }
    }
}

/// What the batch driver does when a file fails
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failing file
    #[default]
    Abort,
    /// Log the failure and go on with the next file
    Skip,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `config_file` must exist; otherwise `smoothloop.toml` in
    /// the working directory is used when present.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let environment = config::Environment::with_prefix(ENV_PREFIX).try_parsing(true);
        Self::load_from(config_file, environment)
    }

    fn load_from(config_file: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match config_file {
            Some(path) => {
                settings = settings.add_source(
                    config::File::from(path)
                        .format(config::FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with SMOOTHLOOP_)
        settings = settings.add_source(environment);

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.filename_suffix.is_empty() && !self.overwrite {
            return Err(CliError::Config(
                "the filename suffix cannot be empty (use --overwrite instead)".to_string(),
            ));
        }

        self.loop_options.validate()?;
        Ok(())
    }
}

// Default values
fn default_filename_suffix() -> String {
    ".L".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            loop_options: LoopOptions::default(),
            filename_suffix: default_filename_suffix(),
            overwrite: false,
            verbosity: Verbosity::default(),
            on_error: FailurePolicy::default(),
        }
    }
}
