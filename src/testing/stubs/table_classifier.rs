use crate::classifiers::Classifier;
use crate::core::Dataset;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StubError {
    #[error("cannot classify {0:?}")]
    Unclassifiable(String),

    #[error("training refused")]
    TrainingRefused,

    #[error("factory refused")]
    FactoryRefused,
}

#[derive(Debug, Default)]
struct Counters {
    created: AtomicUsize,
    trained: AtomicUsize,
    classified: AtomicUsize,
}

/// Shared view on every [`TableClassifier`] spawned from it.
#[derive(Debug, Clone, Default)]
pub struct SpyHandle {
    counters: Arc<Counters>,
}

impl SpyHandle {
    /// Builds a new classifier tied to this handle, with a fresh id.
    pub fn spawn(&self) -> TableClassifier {
        let id = self.counters.created.fetch_add(1, Ordering::SeqCst) + 1;
        TableClassifier {
            id,
            spy: self.clone(),
            ..TableClassifier::default()
        }
    }

    pub fn created(&self) -> usize {
        self.counters.created.load(Ordering::SeqCst)
    }

    pub fn trained(&self) -> usize {
        self.counters.trained.load(Ordering::SeqCst)
    }

    pub fn classified(&self) -> usize {
        self.counters.classified.load(Ordering::SeqCst)
    }
}

/// Memorizes its training set and answers by exact lookup.
///
/// Unknown inputs get the fallback label `"?"`. Failures and a training
/// delay can be scripted.
#[derive(Debug, Clone)]
pub struct TableClassifier {
    id: usize,
    memory: Vec<(String, String)>,
    fallback: String,
    fail_on: Option<String>,
    refuse_training: bool,
    train_delay: Option<Duration>,
    spy: SpyHandle,
}

impl Default for TableClassifier {
    fn default() -> Self {
        Self {
            id: 0,
            memory: vec![],
            fallback: "?".into(),
            fail_on: None,
            refuse_training: false,
            train_delay: None,
            spy: SpyHandle::default(),
        }
    }
}

impl TableClassifier {
    pub fn failing_on<S: Into<String>>(mut self, input: S) -> Self {
        self.fail_on = Some(input.into());
        self
    }

    pub fn refusing_training(mut self) -> Self {
        self.refuse_training = true;
        self
    }

    pub fn with_train_delay(mut self, delay: Duration) -> Self {
        self.train_delay = Some(delay);
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn memorized(&self) -> usize {
        self.memory.len()
    }
}

impl Classifier for TableClassifier {
    type Input = String;
    type Label = String;
    type Error = StubError;

    fn train_batch(&mut self, dataset: &Dataset<String, String>) -> Result<(), StubError> {
        self.spy.counters.trained.fetch_add(1, Ordering::SeqCst);
        if self.refuse_training {
            return Err(StubError::TrainingRefused);
        }
        if let Some(delay) = self.train_delay {
            thread::sleep(delay);
        }
        self.memory
            .extend(dataset.iter().map(|s| (s.input.clone(), s.output.clone())));
        Ok(())
    }

    fn classify(&self, input: &String) -> Result<String, StubError> {
        self.spy.counters.classified.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.as_ref() == Some(input) {
            return Err(StubError::Unclassifiable(input.clone()));
        }
        Ok(self
            .memory
            .iter()
            .find(|(i, _)| i == input)
            .map(|(_, o)| o.clone())
            .unwrap_or_else(|| self.fallback.clone()))
    }
}
