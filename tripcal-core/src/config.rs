//! tripcal configuration.
//!
//! Sources, later ones win:
//! 1. `~/.config/tripcal/config.toml` (optional)
//! 2. `TRIPCAL_*` environment variables, e.g. `TRIPCAL_MODEL`
//! 3. `GEMINI_API_KEY`, only when no key was set above

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{TripcalError, TripcalResult};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_LISTEN: &str = "127.0.0.1:4096";
static DEFAULT_OUTPUT_DIR: &str = ".";

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

/// Which completion service to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    /// Canned offline response
    Fake,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct TripcalConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Where the CLI writes calendar files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Address tripcal-server binds to
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for TripcalConfig {
    fn default() -> Self {
        TripcalConfig {
            provider: ProviderKind::default(),
            model: default_model(),
            temperature: default_temperature(),
            api_key: None,
            output_dir: default_output_dir(),
            listen: default_listen(),
        }
    }
}

impl fmt::Debug for TripcalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripcalConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("output_dir", &self.output_dir)
            .field("listen", &self.listen)
            .finish()
    }
}

impl TripcalConfig {
    pub fn config_path() -> TripcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TripcalError::Config("Could not determine config directory".into()))?
            .join("tripcal");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> TripcalResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path` (which may not exist) plus the environment.
    pub fn load_from(path: &Path) -> TripcalResult<Self> {
        let mut config: TripcalConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("TRIPCAL").try_parsing(true))
            .build()
            .map_err(|e| TripcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TripcalError::Config(e.to_string()))?;

        if config.api_key.as_deref().is_none_or(|key| key.trim().is_empty()) {
            config.api_key = std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
        }

        Ok(config)
    }

    /// Output directory with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.output_dir.to_string_lossy()).into_owned();
        PathBuf::from(expanded)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TripcalResult<()> {
        let contents = format!(
            "\
# tripcal configuration

# Completion service: \"gemini\" or \"fake\" (offline sample itinerary)
# provider = \"gemini\"

# Model identifier and sampling temperature:
# model = \"{}\"
# temperature = {}

# API key (GEMINI_API_KEY in the environment also works):
# api_key = \"...\"

# Where `tripcal plan` writes calendar files:
# output_dir = \"~/Downloads\"

# Address for tripcal-server:
# listen = \"{}\"
",
            DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_LISTEN
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TripcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TripcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
