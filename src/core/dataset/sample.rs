use serde::{Deserialize, Serialize};

/// One labeled example.
///
/// `input` is handed to the classifier untouched; `output` is the expected
/// label (or label set, for multi-label tasks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample<T, L> {
    pub input: T,
    pub output: L,
}

impl<T, L> Sample<T, L> {
    #[inline]
    pub fn new(input: T, output: L) -> Self {
        Self { input, output }
    }
}

impl<T, L> From<(T, L)> for Sample<T, L> {
    fn from((input, output): (T, L)) -> Self {
        Self::new(input, output)
    }
}
