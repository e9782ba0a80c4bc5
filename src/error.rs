use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("failed to read config file")]
    ReadFile,
    #[display("failed to parse config: {reason}")]
    Parse { reason: String },
    #[display("invalid config: {field}")]
    Validation { field: String },
}

#[derive(Debug, Display, Error)]
pub enum FeedError {
    #[display("failed to read series file")]
    ReadFile,
    #[display("failed to parse series from {source_name}")]
    Parse { source_name: String },
    #[display("invalid price at index {index}: {reason}")]
    InvalidPoint { index: usize, reason: String },
}

#[derive(Debug, Display, Error)]
pub enum IndicatorError {
    #[display("unknown indicator kind: {kind}")]
    UnknownKind { kind: String },
    #[display("invalid parameter: {name}")]
    InvalidParameter { name: String },
    #[display("unknown pattern detector: {name}")]
    UnknownDetector { name: String },
}
