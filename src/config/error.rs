use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
