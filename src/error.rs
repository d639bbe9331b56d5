//! Configuration validation errors shared by loader and training configs.

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// At least one feature column is required.
    EmptyFeatures,
    /// The label column also appears among the feature columns.
    OverlappingColumns(usize),
    /// A feature column is listed more than once.
    DuplicateFeatureColumn(usize),
    /// Delimiter cannot be a line terminator.
    InvalidDelimiter(u8),
    /// Read chunk size must be at least 1 byte.
    ZeroChunkSize,
    /// Field length limit must be at least 1 byte.
    ZeroFieldLimit,
    /// Batch size must be at least 1.
    ZeroBatchSize,
    /// Learning rate must be positive and finite.
    InvalidLearningRate(f64),
    /// Number of epochs must be at least 1.
    ZeroEpochs,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFeatures => write!(f, "feature_columns must not be empty"),
            Self::OverlappingColumns(col) => {
                write!(f, "column {} is mapped to both the label and a feature", col)
            }
            Self::DuplicateFeatureColumn(col) => {
                write!(f, "feature column {} is listed more than once", col)
            }
            Self::InvalidDelimiter(byte) => {
                write!(f, "delimiter {:?} cannot be a line terminator", *byte as char)
            }
            Self::ZeroChunkSize => write!(f, "chunk_size must be at least 1"),
            Self::ZeroFieldLimit => write!(f, "max_field_len must be at least 1"),
            Self::ZeroBatchSize => write!(f, "batch_size must be at least 1"),
            Self::InvalidLearningRate(v) => {
                write!(f, "learning_rate must be positive, got {}", v)
            }
            Self::ZeroEpochs => write!(f, "n_epochs must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
