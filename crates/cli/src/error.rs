use archiver_core::config::ConfigError;
use archiver_core::SchemaError;
use providers::FetchError;
use thiserror::Error;

pub const EXIT_GENERIC: u8 = 1;
pub const EXIT_TRANSPORT: u8 = 2;

/// Top-level failure of a run. Per-file move problems never end up here.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RunError {
    /// 2 for connectivity and HTTP status failures, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Fetch(e) if e.is_transport() => EXIT_TRANSPORT,
            _ => EXIT_GENERIC,
        }
    }

    /// Line printed to stderr by the binary.
    pub fn user_message(&self) -> String {
        match self {
            RunError::Fetch(e) if e.is_transport() => e.to_string(),
            RunError::Schema(e) => e.to_string(),
            other => format!("Error: {:#}", other),
        }
    }
}
