//! Epoch loss reporting callback.
//!
//! The optimizer's only outward side channel: after every epoch it reports
//! `(epoch_index, loss)`. A failing callback is logged and counted but never
//! interrupts training.

use std::fmt;

use super::logger::TrainingLogger;

type Callback<'f> = Box<dyn FnMut(usize, f64) -> Result<(), String> + 'f>;

/// Wrapper around a user progress callback.
///
/// # Example
///
/// ```
/// use tabfeed::training::{LossReporter, TrainingLogger, Verbosity};
///
/// let mut history = Vec::new();
/// let mut reporter = LossReporter::from_fn(|epoch, loss| history.push((epoch, loss)));
///
/// let logger = TrainingLogger::new(Verbosity::Silent);
/// reporter.report(0, 0.5, &logger);
/// drop(reporter);
/// assert_eq!(history, vec![(0, 0.5)]);
/// ```
pub struct LossReporter<'f> {
    callback: Option<Callback<'f>>,
    failures: usize,
}

impl<'f> LossReporter<'f> {
    /// Wrap a fallible callback.
    pub fn new<F, E>(mut callback: F) -> Self
    where
        F: FnMut(usize, f64) -> Result<(), E> + 'f,
        E: fmt::Display,
    {
        Self {
            callback: Some(Box::new(move |epoch, loss| {
                callback(epoch, loss).map_err(|e| e.to_string())
            })),
            failures: 0,
        }
    }

    /// Wrap a callback that cannot fail.
    pub fn from_fn<F>(mut callback: F) -> Self
    where
        F: FnMut(usize, f64) + 'f,
    {
        Self::new(move |epoch, loss| {
            callback(epoch, loss);
            Ok::<(), std::convert::Infallible>(())
        })
    }

    /// Reporter that discards everything.
    pub fn none() -> Self {
        Self {
            callback: None,
            failures: 0,
        }
    }

    /// Invoke the callback. Errors are logged and swallowed.
    pub fn report(&mut self, epoch: usize, loss: f64, logger: &TrainingLogger) {
        let Some(callback) = self.callback.as_mut() else {
            return;
        };
        if let Err(error) = callback(epoch, loss) {
            self.failures += 1;
            logger.log_callback_error(epoch, &error);
        }
    }

    /// Number of callback invocations that returned an error.
    #[inline]
    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl Default for LossReporter<'_> {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for LossReporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LossReporter")
            .field("has_callback", &self.callback.is_some())
            .field("failures", &self.failures)
            .finish()
    }
}
