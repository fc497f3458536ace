use engine::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{0}")]
    Engine(#[from] EngineError),
    #[error("invalid base_url: {0}")]
    BaseUrl(String),
    #[error("invalid argument: {0}")]
    Argument(String),
}
