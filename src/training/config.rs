//! Gradient descent configuration with builder pattern.
//!
//! The batch size decides the descent mode: a batch as large as the dataset
//! is full-batch descent, anything smaller is incremental (mini-batch or
//! stochastic) descent.
//!
//! # Example
//!
//! ```
//! use tabfeed::training::{BatchMode, GradientDescentConfig};
//!
//! let config = GradientDescentConfig::builder()
//!     .n_features(3)
//!     .batch_size(16)
//!     .learning_rate(0.05)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.dimension(), 4);
//! assert_eq!(config.batch_mode(16), BatchMode::Full);
//! assert_eq!(config.batch_mode(100), BatchMode::Incremental { batch_size: 16 });
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::logger::Verbosity;
use crate::data::io::Batch;
use crate::error::ConfigError;

/// Cost function minimized by the optimizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostFunction {
    /// Half mean squared error of a linear model `theta[0] + theta[1..] . x`.
    #[default]
    LinearRegression,
}

impl CostFunction {
    /// Cost of parameters `theta` (bias first) over a batch.
    ///
    /// # Panics
    ///
    /// Panics if `theta.len() != batch.features().num_cols() + 1`.
    pub fn evaluate(&self, theta: &[f64], batch: &Batch) -> f64 {
        match self {
            Self::LinearRegression => {
                let features = batch.features();
                assert_eq!(
                    theta.len(),
                    features.num_cols() + 1,
                    "theta length {} does not match {} features plus bias",
                    theta.len(),
                    features.num_cols()
                );
                let (bias, weights) = theta.split_at(1);
                let sum: f64 = features
                    .rows()
                    .zip(batch.labels())
                    .map(|(x, &y)| {
                        let prediction =
                            bias[0] + x.iter().zip(weights).map(|(xi, wi)| xi * wi).sum::<f64>();
                        let residual = prediction - y;
                        residual * residual
                    })
                    .sum();
                0.5 * sum / batch.len() as f64
            }
        }
    }
}

/// How batches relate to the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// Every step sees the whole dataset.
    Full,
    /// Every step sees `batch_size` records.
    Incremental { batch_size: usize },
}

impl BatchMode {
    /// Mode for a dataset of `dataset_len` records.
    pub fn for_dataset(batch_size: usize, dataset_len: usize) -> Self {
        if batch_size >= dataset_len {
            Self::Full
        } else {
            Self::Incremental { batch_size }
        }
    }
}

/// Configuration for a gradient descent run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct GradientDescentConfig {
    /// Features per record (excluding the label).
    pub n_features: usize,

    /// Records per optimizer step. Default: 32.
    #[builder(default = 32)]
    pub batch_size: usize,

    /// Step size. Default: 0.01.
    #[builder(default = 0.01)]
    pub learning_rate: f64,

    /// Number of passes over the data. Default: 10.
    #[builder(default = 10)]
    pub n_epochs: usize,

    /// Cost function. Default: linear regression.
    #[builder(default)]
    pub cost: CostFunction,

    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

impl<S: gradient_descent_config_builder::IsComplete> GradientDescentConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any parameter is invalid:
    /// - `n_features == 0`
    /// - `batch_size == 0`
    /// - `learning_rate` not positive and finite
    /// - `n_epochs == 0`
    pub fn build(self) -> Result<GradientDescentConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl GradientDescentConfig {
    /// Parameter count: one weight per feature plus the bias.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.n_features + 1
    }

    /// Batch mode for a dataset of `dataset_len` records.
    pub fn batch_mode(&self, dataset_len: usize) -> BatchMode {
        BatchMode::for_dataset(self.batch_size, dataset_len)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.n_features == 0 {
            return Err(ConfigError::EmptyFeatures);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        if self.n_epochs == 0 {
            return Err(ConfigError::ZeroEpochs);
        }
        Ok(())
    }
}
