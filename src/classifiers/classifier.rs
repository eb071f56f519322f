use crate::core::Dataset;

/// Batch-trained classifier.
///
/// `Label` is whatever the classifier predicts: a single class, or a
/// collection of classes for multi-label tasks. Errors from either method
/// are handed back to the caller untouched by the harness.
pub trait Classifier {
    type Input;
    type Label;
    type Error;

    /// Trains on the whole dataset at once.
    fn train_batch(&mut self, dataset: &Dataset<Self::Input, Self::Label>)
    -> Result<(), Self::Error>;

    /// Predicts the label of one input. Must not depend on previous calls.
    fn classify(&self, input: &Self::Input) -> Result<Self::Label, Self::Error>;
}
