use thiserror::Error;

/// errors raised while reading an instance, validating parameters or exporting results.
#[derive(Error, Debug)]
pub enum ColorError {
    /// structurally invalid graph input (bad header, out of range edge, etc.)
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// missing or out of domain parameter
    #[error("configuration error: {0}")]
    Configuration(String),

    /// unable to read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// unable to (de)serialize parameters or statistics
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ColorError {
    /// creates a malformed input error
    pub fn malformed(message: impl Into<String>) -> Self {
        ColorError::MalformedInput(message.into())
    }

    /// creates a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        ColorError::Configuration(message.into())
    }
}
