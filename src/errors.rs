use std::process::ExitCode;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::BadRequest(_) => ExitCode::from(2),
            AppError::NotFound(_) => ExitCode::from(3),
            AppError::ExternalServiceError(_) => ExitCode::from(4),
            AppError::InternalError(_) => ExitCode::FAILURE,
        }
    }
}
