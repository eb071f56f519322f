mod cross_validation;
mod error;

pub use cross_validation::{CrossValidationConfig, PartitionStrategy};
pub use error::ConfigError;
