//! Optimizer-facing side of the loader.
//!
//! - [`GradientDescentConfig`]: batch size, learning rate, epochs, cost
//! - [`EpochRunner`]: streams batches per epoch into a caller step function
//! - [`LossReporter`]: per-epoch `(epoch, loss)` progress callback
//! - [`TrainingLogger`]: structured logging with verbosity levels
//!
//! No optimizer update rule lives here. The caller owns the parameters and
//! supplies the step.

mod callback;
mod config;
mod epoch;
mod logger;

pub use callback::LossReporter;
pub use config::{BatchMode, CostFunction, GradientDescentConfig, GradientDescentConfigBuilder};
pub use epoch::{EpochRunner, TrainingHistory};
pub use logger::{TrainingLogger, Verbosity};
