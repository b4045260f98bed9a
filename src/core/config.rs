//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.turistamap/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! The backend origin is configured once here; nothing else hardcodes it.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::Coordinate;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TuristaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "https://turistamap-backend.onrender.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
const CONFIG_DIR: &str = ".turistamap";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub log_level: LevelFilter,
    pub storage_path: PathBuf,
    /// `None` means location permission is denied.
    pub location: Option<Coordinate>,
}

/// Values given on the command line; `None` means the flag was not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub storage_path: Option<PathBuf>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the file layer came from. Loading runs before the logger exists,
/// so the outcome is reported through [`ConfigSource::log`] afterwards.
#[derive(Debug)]
pub enum ConfigSource {
    File(PathBuf),
    Generated(PathBuf),
    GenerateFailed(PathBuf, std::io::Error),
    NoHomeDir,
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Generated(path) => {
                info!("No config file found, generated default at {}", path.display())
            }
            ConfigSource::GenerateFailed(path, e) => {
                warn!("Failed to write default config at {}: {}", path.display(), e)
            }
            ConfigSource::NoHomeDir => {
                warn!("Could not determine home directory, using default config")
            }
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.turistamap/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_DIR))
}

/// Returns the path to `~/.turistamap/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.turistamap/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TuristaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<(TuristaConfig, ConfigSource), ConfigError> {
    let Some(path) = config_path() else {
        return Ok((TuristaConfig::default(), ConfigSource::NoHomeDir));
    };

    if !path.exists() {
        let source = match generate_default_config(&path) {
            Ok(()) => ConfigSource::Generated(path),
            Err(e) => ConfigSource::GenerateFailed(path, e),
        };
        return Ok((TuristaConfig::default(), source));
    }

    let config = load_config_from(&path)?;
    Ok((config, ConfigSource::File(path)))
}

pub fn load_config_from(path: &Path) -> Result<TuristaConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# TuristaMap Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# base_url = "https://turistamap-backend.onrender.com"   # Or TURISTAMAP_BASE_URL
# request_timeout_secs = 30
# log_level = "info"                 # "error", "warn", "info", "debug", "trace", "off"

# [storage]
# path = "/home/me/.turistamap/storage.json"            # Or TURISTAMAP_STORAGE

# [location]
# Without both values, location permission is treated as denied.
# latitude = -22.9068
# longitude = -43.1729
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

/// The configured log level, or the default if unset or unknown.
/// Needed before the logger exists, so it reports nothing itself.
pub fn log_level(config: &TuristaConfig) -> LevelFilter {
    config
        .general
        .log_level
        .as_deref()
        .and_then(|level| level.parse().ok())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TuristaConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("TURISTAMAP_BASE_URL").ok())
        .or_else(|| config.general.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Storage path: CLI → env → config → ~/.turistamap/storage.json
    let storage_path = cli
        .storage_path
        .clone()
        .or_else(|| std::env::var("TURISTAMAP_STORAGE").ok().map(PathBuf::from))
        .or_else(|| config.storage.path.as_ref().map(PathBuf::from))
        .unwrap_or_else(default_storage_path);

    // Each coordinate half falls back independently; both are needed.
    let latitude = cli.latitude.or(config.location.latitude);
    let longitude = cli.longitude.or(config.location.longitude);
    let location = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinate {
            latitude,
            longitude,
        }),
        (None, None) => None,
        _ => {
            warn!("Only one of latitude/longitude is set; ignoring location");
            None
        }
    };

    if let Some(level) = config.general.log_level.as_deref()
        && level.parse::<LevelFilter>().is_err()
    {
        warn!("Unknown log level {:?}, using {}", level, DEFAULT_LOG_LEVEL);
    }
    let log_level = log_level(config);

    ResolvedConfig {
        base_url,
        request_timeout: Duration::from_secs(
            config
                .general
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        log_level,
        storage_path,
        location,
    }
}

fn default_storage_path() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from(CONFIG_DIR))
        .join("storage.json")
}
