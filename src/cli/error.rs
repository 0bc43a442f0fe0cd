//! CLI-level errors (wraps domain and settings errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config: {0}")]
    Settings(#[from] SettingsError),

    #[error("render: {0}")]
    Render(#[from] serde_json::Error),

    #[error("serialize settings: {0}")]
    SettingsOutput(#[from] toml::ser::Error),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Render(_) | CliError::SettingsOutput(_) => crate::exitcode::SOFTWARE,
            CliError::Domain(e) => match e {
                DomainError::ChartRead { .. } => crate::exitcode::NOINPUT,
                DomainError::InvalidOrgChart { .. }
                | DomainError::UnknownEntity(_)
                | DomainError::CycleDetected { .. }
                | DomainError::NotComposite(_) => crate::exitcode::DATAERR,
                DomainError::InvalidReference | DomainError::StillAttached { .. } => {
                    crate::exitcode::SOFTWARE
                }
            },
        }
    }
}
