//! Error types for clustermap

use thiserror::Error;

/// Main error type for clustermap
#[derive(Error, Debug)]
pub enum ClustermapError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// External command could not be spawned or exited unsuccessfully
    #[error("Error executing command {command}: {message}")]
    Command { command: String, message: String },

    /// The scheduler reported no nodes for a partition
    #[error("No nodes found in partition {0}")]
    NoNodes(String),

    /// CSV decoding error
    #[error("CSV error: {0}")]
    Csv(String),

    /// The usage CSV has no header row
    #[error("Usage CSV is empty: missing header row")]
    MissingHeader,

    /// A usage row does not have exactly three columns
    #[error("Malformed usage row at line {line}: expected 3 columns, found {columns}")]
    MalformedRow { line: u64, columns: usize },

    /// A GPU list token is not an unsigned integer
    #[error("Invalid GPU index {token:?} at line {line}")]
    InvalidGpuToken { line: u64, token: String },

    /// A GPU index does not name one of the node's slots
    #[error("GPU index {index} out of range for node {node}")]
    GpuIndexOutOfRange { node: String, index: u32 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for clustermap operations
pub type ClustermapResult<T> = Result<T, ClustermapError>;

impl From<serde_json::Error> for ClustermapError {
    fn from(err: serde_json::Error) -> Self {
        ClustermapError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ClustermapError {
    fn from(err: toml::de::Error) -> Self {
        ClustermapError::Config(err.to_string())
    }
}

impl From<csv::Error> for ClustermapError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => ClustermapError::Io(io),
            _ => ClustermapError::Csv(message),
        }
    }
}
