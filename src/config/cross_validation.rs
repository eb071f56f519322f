use crate::config::ConfigError;
use anyhow::{Context, Result};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

fn default_folds() -> usize {
    5
}

/// How samples are assigned to folds.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PartitionStrategy {
    /// Fold `i` tests on the `i`-th consecutive slice.
    #[default]
    Consecutive,
    /// Consecutive slices over a seeded permutation.
    Shuffled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CrossValidationConfig {
    #[serde(default = "default_folds")]
    #[schemars(
        title = "Folds",
        description = "Number of train/test splits",
        range(min = 2)
    )]
    pub folds: usize,

    #[serde(default)]
    #[schemars(
        title = "Verbosity",
        description = "0 = silent, 1 = summaries, 2 = per-sample detail, 3 = training set dump"
    )]
    pub verbosity: i32,

    #[serde(default)]
    #[schemars(
        title = "Partitioning",
        description = "Consecutive slices or a seeded shuffle"
    )]
    pub partitioning: PartitionStrategy,

    #[serde(default)]
    #[schemars(
        title = "Seed",
        description = "RNG seed for shuffled partitioning (None = 0)"
    )]
    pub seed: Option<u64>,
}

impl Default for CrossValidationConfig {
    fn default() -> Self {
        Self {
            folds: default_folds(),
            verbosity: 0,
            partitioning: PartitionStrategy::default(),
            seed: None,
        }
    }
}

impl CrossValidationConfig {
    pub fn schema() -> Schema {
        schema_for!(CrossValidationConfig)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.folds < 2 {
            return Err(ConfigError::InvalidParameter(format!(
                "folds must be >= 2, got {}",
                self.folds
            )));
        }
        if self.partitioning == PartitionStrategy::Consecutive && self.seed.is_some() {
            return Err(ConfigError::InvalidParameter(
                "seed is only meaningful with shuffled partitioning".into(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).context("parsing cross-validation config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("loading {}", path.display()))
    }
}
