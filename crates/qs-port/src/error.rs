use qs_core::ConfigError;
use qs_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("installation configuration rejected: {0}")]
    Config(#[from] ConfigError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("report error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PortResult<T> = Result<T, PortError>;
