mod cross_validation;

pub use cross_validation::{CrossValidationError, CrossValidationOutcome};
pub use train_and_test::{Harness, test, train_and_test};
