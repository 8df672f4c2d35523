use thiserror::Error;
use ts_core::ConfigError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("experiment has no scenarios")]
    EmptyExperiment,
}

pub type SimResult<T> = Result<T, SimError>;
