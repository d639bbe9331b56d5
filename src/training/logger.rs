//! Structured training progress logging.
//!
//! [`TrainingLogger`] writes through the `log` facade, filtered by a
//! [`Verbosity`] level on top of whatever the installed logger enables.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// How much training progress to report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Nothing.
    #[default]
    Silent,
    /// Callback failures and other anomalies.
    Warning,
    /// Start, per-epoch loss, finish.
    Info,
    /// Everything, including per-batch detail.
    Debug,
}

/// Progress logger for an epoch loop.
#[derive(Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
    n_epochs: usize,
    started: Option<Instant>,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            n_epochs: 0,
            started: None,
        }
    }

    #[inline]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    #[inline]
    fn enabled(&self, level: Verbosity) -> bool {
        self.verbosity >= level
    }

    pub fn start_training(&mut self, n_epochs: usize) {
        self.n_epochs = n_epochs;
        self.started = Some(Instant::now());
        if self.enabled(Verbosity::Info) {
            log::info!("training for {} epochs", n_epochs);
        }
    }

    pub fn log_batch(&self, epoch: usize, batch: usize, rows: usize, loss: f64) {
        if self.enabled(Verbosity::Debug) {
            log::debug!("[{}] batch {}: {} rows, loss {:.6}", epoch, batch, rows, loss);
        }
    }

    pub fn log_epoch(&self, epoch: usize, records: usize, loss: f64) {
        if self.enabled(Verbosity::Info) {
            log::info!(
                "[{}/{}] loss {:.6} over {} records",
                epoch + 1,
                self.n_epochs,
                loss,
                records
            );
        }
    }

    pub fn log_callback_error(&self, epoch: usize, error: &dyn fmt::Display) {
        if self.enabled(Verbosity::Warning) {
            log::warn!("loss callback failed at epoch {}: {}", epoch, error);
        }
    }

    pub fn finish_training(&self) {
        if self.enabled(Verbosity::Info) {
            let elapsed = self.started.map(|t| t.elapsed().as_secs_f64()).unwrap_or(0.0);
            log::info!("training finished in {:.3}s", elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_ordering() {
        assert!(Verbosity::Silent < Verbosity::Warning);
        assert!(Verbosity::Warning < Verbosity::Info);
        assert!(Verbosity::Info < Verbosity::Debug);
        assert_eq!(Verbosity::default(), Verbosity::Silent);
    }

    #[test]
    fn verbosity_serde() {
        let json = serde_json::to_string(&Verbosity::Info).unwrap();
        assert_eq!(json, "\"info\"");
        let back: Verbosity = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(back, Verbosity::Warning);
    }

    #[test]
    fn enabled_levels() {
        let logger = TrainingLogger::new(Verbosity::Info);
        assert!(logger.enabled(Verbosity::Warning));
        assert!(logger.enabled(Verbosity::Info));
        assert!(!logger.enabled(Verbosity::Debug));

        let silent = TrainingLogger::new(Verbosity::Silent);
        assert!(!silent.enabled(Verbosity::Warning));
    }
}
