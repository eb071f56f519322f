use crate::core::dataset::Sample;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;
use std::slice::Iter;

/// Ordered collection of [`Sample`]s.
///
/// `all_classes` optionally lists every label identifier that appears in the
/// set. It is only used for reporting, so a dataset without it is complete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset<T, L> {
    samples: Vec<Sample<T, L>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    all_classes: Option<Vec<String>>,
}

impl<T, L> Dataset<T, L> {
    pub fn new(samples: Vec<Sample<T, L>>) -> Self {
        Self {
            samples,
            all_classes: None,
        }
    }

    pub fn with_all_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.all_classes = Some(classes.into_iter().map(Into::into).collect());
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample<T, L>] {
        &self.samples
    }

    pub fn all_classes(&self) -> Option<&[String]> {
        self.all_classes.as_deref()
    }

    pub fn iter(&self) -> Iter<'_, Sample<T, L>> {
        self.samples.iter()
    }

    pub fn push(&mut self, sample: Sample<T, L>) {
        self.samples.push(sample);
    }
}

impl<T: Clone, L: Clone> Dataset<T, L> {
    /// Copies the samples at `indices`, in the given order, keeping the
    /// class annotation of `self`.
    ///
    /// # Panics
    ///
    /// Panics if any index is `>= self.len()`.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            samples: indices.iter().map(|&i| self.samples[i].clone()).collect(),
            all_classes: self.all_classes.clone(),
        }
    }
}

impl<T: DeserializeOwned, L: DeserializeOwned> Dataset<T, L> {
    /// Reads a dataset from a JSON file.
    ///
    /// Accepts either a bare array of `{"input": .., "output": ..}` objects or
    /// an object `{"samples": [..], "all_classes": [..]}`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading dataset {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing dataset {}", path.display()))
    }
}

impl<T, L> Default for Dataset<T, L> {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl<T, L> FromIterator<Sample<T, L>> for Dataset<T, L> {
    fn from_iter<I: IntoIterator<Item = Sample<T, L>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T, L> IntoIterator for &'a Dataset<T, L> {
    type Item = &'a Sample<T, L>;
    type IntoIter = Iter<'a, Sample<T, L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetRepr<T, L> {
    Bare(Vec<Sample<T, L>>),
    Annotated {
        samples: Vec<Sample<T, L>>,
        #[serde(default)]
        all_classes: Option<Vec<String>>,
    },
}

impl<'de, T, L> Deserialize<'de> for Dataset<T, L>
where
    T: Deserialize<'de>,
    L: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match DatasetRepr::deserialize(deserializer)? {
            DatasetRepr::Bare(samples) => Self::new(samples),
            DatasetRepr::Annotated {
                samples,
                all_classes,
            } => Self {
                samples,
                all_classes,
            },
        })
    }
}
