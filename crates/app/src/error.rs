use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("counter read error: {0}")]
    CounterRead(String),
    #[error("persistence error: {0}")]
    Persistence(#[from] co2_db::DbError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("reset confirmation code did not match")]
    ResetAuth,
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Rejected user input rather than an engine fault.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::ResetAuth)
    }
}
