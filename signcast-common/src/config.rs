//! Configuration loading and root folder resolution
//!
//! The root folder holds the `signcast.toml` config file and any log files.
//! Resolution priority, highest first:
//! 1. Command-line argument (handled by the caller)
//! 2. Environment variable (`SIGNCAST_ROOT_FOLDER`, then `SIGNCAST_ROOT`)
//! 3. Per-module TOML config file (`~/.config/signcast/<module>.toml`)
//! 4. OS-dependent compiled default
//!
//! A missing config file never terminates startup: defaults apply with a
//! warning.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variables consulted for the root folder, in priority order
const ROOT_ENV_VARS: [&str; 2] = ["SIGNCAST_ROOT_FOLDER", "SIGNCAST_ROOT"];

/// Compiled per-platform defaults used when no configuration is present
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl CompiledDefaults {
    /// Defaults for the platform this binary was compiled for
    pub fn for_current_platform() -> Self {
        let root_folder = if cfg!(target_os = "linux") {
            // ~/.local/share/signcast (or /var/lib/signcast for system-wide)
            dirs::data_local_dir()
                .map(|d| d.join("signcast"))
                .unwrap_or_else(|| PathBuf::from("/var/lib/signcast"))
        } else if cfg!(target_os = "macos") {
            // ~/Library/Application Support/signcast
            dirs::data_dir()
                .map(|d| d.join("signcast"))
                .unwrap_or_else(|| PathBuf::from("/Library/Application Support/signcast"))
        } else if cfg!(target_os = "windows") {
            // %LOCALAPPDATA%\signcast
            dirs::data_local_dir()
                .map(|d| d.join("signcast"))
                .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\signcast"))
        } else {
            PathBuf::from("./signcast_data")
        };

        Self {
            root_folder,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// Resolves the root folder from environment, config file, or defaults
///
/// The command-line argument outranks everything here; callers that have one
/// should skip the resolver entirely.
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
}

impl RootFolderResolver {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
        }
    }

    /// Resolve the root folder, never failing
    pub fn resolve(&self) -> PathBuf {
        for var in ROOT_ENV_VARS {
            if let Ok(path) = std::env::var(var) {
                if !path.is_empty() {
                    debug!("Root folder from {}: {}", var, path);
                    return PathBuf::from(path);
                }
            }
        }

        if let Some(path) = self.root_folder_from_config_file() {
            return path;
        }

        CompiledDefaults::for_current_platform().root_folder
    }

    /// Per-module config file location (`~/.config/signcast/<module>.toml`)
    fn config_file_path(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("signcast").join(format!("{}.toml", self.module_name)))
    }

    fn root_folder_from_config_file(&self) -> Option<PathBuf> {
        let path = self.config_file_path()?;
        let content = std::fs::read_to_string(&path).ok()?;
        match toml::from_str::<toml::Value>(&content) {
            Ok(value) => value
                .get("root_folder")
                .and_then(|v| v.as_str())
                .map(PathBuf::from),
            Err(e) => {
                warn!("Ignoring unparseable config file {:?}: {}", path, e);
                None
            }
        }
    }
}

/// Prepares a resolved root folder for use
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    /// Create the root folder (and parents) if missing. Idempotent.
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }

    /// Location of the module config file inside the root folder
    pub fn config_file_path(&self) -> PathBuf {
        self.root_folder.join("signcast.toml")
    }
}

/// Bootstrap configuration loaded from `signcast.toml`
///
/// These settings cannot change during runtime. The application must restart
/// to pick up changes to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Root folder override (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Geocoding service configuration (optional)
    #[serde(default)]
    pub geocoding: GeocodingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Geocoding service configuration
///
/// Address lookup is disabled until an access token is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Forward-geocoding endpoint base URL
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Provider access token (optional)
    #[serde(default)]
    pub access_token: Option<String>,

    /// Country bias for lookups (ISO 3166-1 alpha-2)
    #[serde(default = "default_geocoding_country")]
    pub country: String,
}

fn default_port() -> u16 {
    5780
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://api.mapbox.com/geocoding/v5/mapbox.places".to_string()
}

fn default_geocoding_country() -> String {
    "br".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            root_folder: None,
            logging: LoggingConfig::default(),
            geocoding: GeocodingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            access_token: None,
            country: default_geocoding_country(),
        }
    }
}

impl TomlConfig {
    /// Load configuration from a TOML file, falling back to defaults
    ///
    /// A missing file is normal on first run. An unparseable file is reported
    /// and ignored rather than aborting startup.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    debug!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No config file at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    /// Apply command-line overrides (highest priority)
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(port) = overrides.port {
            self.port = port;
        }
    }
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        assert_eq!(default_port(), 5780);
    }

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn test_default_geocoding_country() {
        let config = GeocodingConfig::default();
        assert_eq!(config.country, "br");
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = TomlConfig::default();
        config.apply_overrides(&ConfigOverrides { port: Some(9000) });
        assert_eq!(config.port, 9000);

        config.apply_overrides(&ConfigOverrides::default());
        assert_eq!(config.port, 9000);
    }
}
