use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 7125;
pub const DEFAULT_ENDPOINT: &str = "/server/database/item?namespace=gcode_metadata";
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;
pub const DEFAULT_KEEP: usize = 42;
pub const DEFAULT_GCODE_DIR: &str = "~/printer_data/gcode";
pub const DEFAULT_ARCHIVE_DIR: &str = "~/printer_data/gcode/archive";

/// Prefix for environment overrides, e.g. `GCODE_ARCHIVER__SERVER__PORT=7126`.
pub const ENV_PREFIX: &str = "GCODE_ARCHIVER";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub retention: RetentionConfig,
    pub paths: PathsConfig,
    pub safety: SafetyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub endpoint: String,
    pub timeout_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    pub keep: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub gcode_dir: String,
    pub archive_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub conflict: ConflictPolicy,
}

/// What to do when the archive already holds a file with the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    Skip,
    #[default]
    Overwrite,
    Rename,
}

impl std::str::FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(ConflictPolicy::Skip),
            "overwrite" => Ok(ConflictPolicy::Overwrite),
            "rename" => Ok(ConflictPolicy::Rename),
            other => Err(format!(
                "unknown conflict policy '{other}' (expected skip|overwrite|rename)"
            )),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                endpoint: DEFAULT_ENDPOINT.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            retention: RetentionConfig { keep: DEFAULT_KEEP },
            paths: PathsConfig {
                gcode_dir: DEFAULT_GCODE_DIR.to_string(),
                archive_dir: DEFAULT_ARCHIVE_DIR.to_string(),
            },
            safety: SafetyConfig {
                dry_run: false,
                conflict: ConflictPolicy::Overwrite,
            },
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timeout()?;
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero".into()));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".into()));
        }
        Ok(())
    }

    /// HTTP timeout; rejects zero, negative, NaN and values too large for a `Duration`.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        let secs = self.server.timeout_secs;
        match Duration::try_from_secs_f64(secs) {
            Ok(d) if !d.is_zero() => Ok(d),
            _ => Err(ConfigError::Invalid(format!(
                "timeout must be a positive number of seconds, got {secs}"
            ))),
        }
    }

    pub fn gcode_dir(&self) -> PathBuf {
        expand_home(&self.paths.gcode_dir)
    }

    pub fn archive_dir(&self) -> PathBuf {
        expand_home(&self.paths.archive_dir)
    }
}

/// Loads configuration from defaults, an optional TOML file and the environment.
///
/// An explicit `path` must exist; otherwise `config/default.toml` is read when present.
/// Values are not validated here so that command-line overrides can still replace them;
/// call [`AppConfig::validate`] once the final configuration is assembled.
pub fn load(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut settings = config::Config::builder()
        .set_default("server.host", DEFAULT_HOST)?
        .set_default("server.port", i64::from(DEFAULT_PORT))?
        .set_default("server.endpoint", DEFAULT_ENDPOINT)?
        .set_default("server.timeout_secs", DEFAULT_TIMEOUT_SECS)?
        .set_default("retention.keep", DEFAULT_KEEP as i64)?
        .set_default("paths.gcode_dir", DEFAULT_GCODE_DIR)?
        .set_default("paths.archive_dir", DEFAULT_ARCHIVE_DIR)?
        .set_default("safety.dry_run", false)?
        .set_default("safety.conflict", "overwrite")?;
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );
    let cfg: AppConfig = settings.build()?.try_deserialize()?;
    Ok(cfg)
}

/// Expands a leading `~` to the current user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
