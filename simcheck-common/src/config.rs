//! Configuration resolution for simcheck services
//!
//! Settings resolve through four tiers, highest priority first:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file (`<config dir>/simcheck/<module>.toml`)
//! 4. Compiled default
//!
//! A missing or unreadable config file falls through to the next tier; it
//! never terminates startup.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Resolved gateway settings
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// HTTP listen port
    pub port: u16,
    /// Base URL of the external analysis engine
    pub engine_url: String,
    /// Directory where uploads are spooled for the duration of one request
    pub uploads_dir: PathBuf,
}

/// Compiled fallback values (lowest tier)
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub port: u16,
    pub engine_url: String,
    pub uploads_dir: PathBuf,
}

impl CompiledDefaults {
    pub fn new() -> Self {
        Self {
            port: 3000,
            engine_url: "http://127.0.0.1:5001".to_string(),
            uploads_dir: std::env::temp_dir().join("simcheck-uploads"),
        }
    }
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk TOML schema. Every field is optional; absent fields fall through
/// to the compiled defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub engine_url: Option<String>,
    pub uploads_dir: Option<PathBuf>,
}

impl TomlConfig {
    /// Load the module's config file, tolerating absence.
    pub fn load(module_name: &str) -> Option<Self> {
        let path = Self::config_file_path(module_name)?;
        Self::load_from_path(&path)
    }

    /// Load a specific config file; `None` when missing or malformed.
    pub fn load_from_path(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                debug!("No config file at {}", path.display());
                return None;
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring malformed config file {}: {}", path.display(), e);
                None
            }
        }
    }

    fn config_file_path(module_name: &str) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("simcheck").join(format!("{module_name}.toml")))
    }
}

/// Four-tier settings resolver
///
/// CLI overrides are injected by the binary; environment variables and the
/// TOML file are consulted here.
pub struct SettingsResolver {
    module_name: String,
    cli_port: Option<u16>,
    cli_engine_url: Option<String>,
    cli_uploads_dir: Option<PathBuf>,
}

impl SettingsResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_port: None,
            cli_engine_url: None,
            cli_uploads_dir: None,
        }
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.cli_port = port;
        self
    }

    pub fn with_engine_url(mut self, url: Option<String>) -> Self {
        self.cli_engine_url = url;
        self
    }

    pub fn with_uploads_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.cli_uploads_dir = dir;
        self
    }

    /// Walk the tiers for each setting and log where each value came from.
    pub fn resolve(&self) -> GatewaySettings {
        let defaults = CompiledDefaults::new();
        let toml_config = TomlConfig::load(&self.module_name).unwrap_or_default();

        let port = self
            .cli_port
            .or_else(|| env_parsed("SIMCHECK_PORT"))
            .or(toml_config.port)
            .unwrap_or(defaults.port);

        let engine_url = self
            .cli_engine_url
            .clone()
            .or_else(|| std::env::var("SIMCHECK_ENGINE_URL").ok())
            .or(toml_config.engine_url)
            .unwrap_or(defaults.engine_url);

        let uploads_dir = self
            .cli_uploads_dir
            .clone()
            .or_else(|| std::env::var("SIMCHECK_UPLOADS_DIR").ok().map(PathBuf::from))
            .or(toml_config.uploads_dir)
            .unwrap_or(defaults.uploads_dir);

        info!(
            port = port,
            engine_url = %engine_url,
            uploads_dir = %uploads_dir.display(),
            "Resolved gateway settings"
        );

        GatewaySettings {
            port,
            engine_url,
            uploads_dir,
        }
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable {} value: {}", name, raw);
            None
        }
    }
}

/// Creates the uploads directory at startup
pub struct UploadsDirInitializer {
    dir: PathBuf,
}

impl UploadsDirInitializer {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Create the directory (and parents) if missing; safe to call again.
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            Error::Config(format!(
                "failed to create uploads directory {}: {}",
                self.dir.display(),
                e
            ))
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
