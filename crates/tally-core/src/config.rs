//! Configuration file loading
//!
//! Settings live in a TOML file:
//!
//! ```toml
//! [database]
//! path = "tally.db"
//! encrypt = true
//!
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//! static_dir = "ui/dist"
//! allowed_origins = ["http://localhost:5173"]
//!
//! [reports]
//! trend_months = 6
//! ```
//!
//! The file is looked up in this order: an explicit path, the `TALLY_CONFIG`
//! environment variable, then `<config dir>/tally/config.toml`. When none is
//! found every setting takes its default. The database passphrase is never
//! read from this file; it comes from `TALLY_DB_KEY` only.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::analytics::DEFAULT_TREND_MONTHS;
use crate::error::{Error, Result};

/// Environment variable pointing at a config file
pub const CONFIG_ENV: &str = "TALLY_CONFIG";

pub const DEFAULT_DB_PATH: &str = "tally.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerSettings,
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    /// Open with SQLCipher using `TALLY_DB_KEY`
    pub encrypt: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Built dashboard assets served at `/`
    pub static_dir: Option<PathBuf>,
    /// Extra CORS origins on top of the localhost defaults
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportsConfig {
    /// Months in the monthly expense trend
    pub trend_months: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: PathBuf::from(DEFAULT_DB_PATH),
                encrypt: true,
            },
            server: ServerSettings {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                static_dir: None,
                allowed_origins: vec![],
            },
            reports: ReportsConfig {
                trend_months: DEFAULT_TREND_MONTHS,
            },
        }
    }
}

/// Default location of the config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tally").join("config.toml"))
}

impl Config {
    /// Load configuration following the lookup order above
    ///
    /// An explicitly named file (argument or `TALLY_CONFIG`) must exist;
    /// the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);

        if let Some(path) = explicit.map(Path::to_path_buf).or(from_env) {
            return Self::from_file(&path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::parse(&content)
    }

    /// Parse TOML text, filling anything missing with defaults
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(database) = raw.database {
            if let Some(path) = database.path {
                config.database.path = path;
            }
            if let Some(encrypt) = database.encrypt {
                config.database.encrypt = encrypt;
            }
        }

        if let Some(server) = raw.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
            config.server.static_dir = server.static_dir;
            if let Some(origins) = server.allowed_origins {
                config.server.allowed_origins = origins;
            }
        }

        if let Some(reports) = raw.reports {
            if let Some(months) = reports.trend_months {
                if months == 0 {
                    return Err(Error::Config(
                        "reports.trend_months must be at least 1".into(),
                    ));
                }
                config.reports.trend_months = months;
            }
        }

        Ok(config)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    database: Option<RawDatabase>,
    server: Option<RawServer>,
    reports: Option<RawReports>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDatabase {
    path: Option<PathBuf>,
    encrypt: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
    allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReports {
    trend_months: Option<usize>,
}
