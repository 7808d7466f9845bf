use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("Preference error: {0}")]
    Preference(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl AppError {
    pub fn auth<S: Into<String>>(msg: S) -> Self {
        Self::Auth(msg.into())
    }

    pub fn calendar<S: Into<String>>(msg: S) -> Self {
        Self::Calendar(msg.into())
    }

    pub fn preference<S: Into<String>>(msg: S) -> Self {
        Self::Preference(msg.into())
    }

    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn operation_failed<S: Into<String>>(msg: S) -> Self {
        Self::OperationFailed(msg.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_constructors_format() {
        assert_eq!(AppError::auth("no token").to_string(), "Authentication error: no token");
        assert_eq!(
            AppError::invalid_input("unknown calendar").to_string(),
            "Invalid input: unknown calendar"
        );
        assert_eq!(
            AppError::preference("database is locked").to_string(),
            "Preference error: database is locked"
        );
        assert_eq!(AppError::config("bad url").to_string(), "Configuration error: bad url");
    }

    #[test]
    fn test_serde_error_converts() {
        let err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Serialization(_)));
    }
}
