//! Error type for config I/O and RON (de)serialization.

/// Failure modes when reading, writing, or round-tripping the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// The config file or its parent directory could not be written.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file contents are not valid RON for the current schema.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// The in-memory config could not be rendered as RON text.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}
