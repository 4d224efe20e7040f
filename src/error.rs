#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Air pollution API error: {0}")]
    AirPollutionApi(String),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    #[error("Location row missing after insert")]
    LocationNotFound,
}

pub type AppResult<T> = Result<T, AppError>;
