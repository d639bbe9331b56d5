//! Epoch loop that feeds streamed batches to an optimizer step.
//!
//! The runner owns no model state. Each epoch opens a fresh
//! [`StreamingLoader`] over the same source, hands every batch to the
//! caller's step function and reports the record-weighted mean loss.

use crate::data::io::{Batch, LoadError, SourceConfig, StreamingLoader};

use super::callback::LossReporter;
use super::config::{BatchMode, GradientDescentConfig};
use super::logger::TrainingLogger;

/// Per-epoch results of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingHistory {
    /// Mean loss of each epoch, weighted by batch length. `NaN` for an
    /// epoch that saw no records.
    pub epoch_losses: Vec<f64>,
    /// Records seen in one epoch.
    pub n_records: usize,
    /// Whether batches covered the whole dataset.
    pub batch_mode: BatchMode,
}

impl TrainingHistory {
    /// Loss of the last epoch.
    pub fn final_loss(&self) -> Option<f64> {
        self.epoch_losses.last().copied()
    }
}

/// Drives `n_epochs` passes over a source in batches of `batch_size`.
///
/// # Example
///
/// ```
/// use tabfeed::data::io::{DataSource, SourceConfig};
/// use tabfeed::training::{EpochRunner, GradientDescentConfig, LossReporter};
///
/// let csv = b"1,2\n2,4\n3,6\n";
/// let source = SourceConfig::builder()
///     .source(DataSource::memory(csv))
///     .label_column(1)
///     .feature_columns([0])
///     .build()
///     .unwrap();
/// let config = GradientDescentConfig::builder()
///     .n_features(1)
///     .batch_size(2)
///     .n_epochs(3)
///     .build()
///     .unwrap();
///
/// let runner = EpochRunner::new(config);
/// let history = runner
///     .run(&source, &mut LossReporter::none(), |batch| batch.len() as f64)
///     .unwrap();
/// assert_eq!(history.n_records, 3);
/// assert_eq!(history.epoch_losses.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct EpochRunner {
    config: GradientDescentConfig,
}

impl EpochRunner {
    pub fn new(config: GradientDescentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GradientDescentConfig {
        &self.config
    }

    /// Run every epoch, calling `step` once per batch.
    ///
    /// `step` performs one optimizer update and returns the batch loss.
    /// After each epoch the mean loss goes to `reporter`; callback failures
    /// are logged and do not stop the run.
    ///
    /// # Errors
    ///
    /// - any error from opening or reading the source
    /// - [`LoadError::BufferShape`] if the source maps a different number of
    ///   feature columns than `n_features`
    /// - [`LoadError::Config`] if `batch_size` was set to 0 after building
    pub fn run<F>(
        &self,
        source: &SourceConfig<'_>,
        reporter: &mut LossReporter<'_>,
        mut step: F,
    ) -> Result<TrainingHistory, LoadError>
    where
        F: FnMut(&Batch) -> f64,
    {
        let mut logger = TrainingLogger::new(self.config.verbosity);
        logger.start_training(self.config.n_epochs);

        let mut epoch_losses = Vec::with_capacity(self.config.n_epochs);
        let mut n_records = 0;

        for epoch in 0..self.config.n_epochs {
            let mut loader = StreamingLoader::new(source.clone())?;
            if loader.dimension() != self.config.n_features {
                return Err(LoadError::BufferShape {
                    expected: self.config.n_features,
                    found: loader.dimension(),
                });
            }

            let mut weighted = 0.0;
            let mut records = 0;
            for (index, batch) in loader.batches(self.config.batch_size)?.enumerate() {
                let batch = batch?;
                let loss = step(&batch);
                logger.log_batch(epoch, index, batch.len(), loss);
                weighted += loss * batch.len() as f64;
                records += batch.len();
            }

            let loss = if records == 0 {
                f64::NAN
            } else {
                weighted / records as f64
            };
            n_records = records;
            epoch_losses.push(loss);
            logger.log_epoch(epoch, records, loss);
            reporter.report(epoch, loss, &logger);
        }

        logger.finish_training();
        Ok(TrainingHistory {
            epoch_losses,
            n_records,
            batch_mode: self.config.batch_mode(n_records),
        })
    }
}
