//! Error types for the Hargassner client
//!
//! Only configuration problems ever reach the caller. Connection and decode
//! errors are absorbed by the reader task and surface through statistics.

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, HargassnerError>;

/// Main error type for client operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HargassnerError {
    /// Firmware template could not be compiled
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Line decoding error
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Rejected client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors while compiling a firmware template
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Template text is not well-formed markup
    #[error("Malformed template: {0}")]
    Malformed(String),

    /// Root element is not a parameter project
    #[error("Unexpected root element <{found}>, expected <DAQPRJ>")]
    UnexpectedRoot { found: String },

    /// Channel attribute could not be parsed
    #[error("Invalid {attribute} '{value}' on channel '{channel}'")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
        channel: String,
    },

    /// Channel id beyond the supported slot range
    #[error("Channel id {id} out of range on channel '{channel}' (0-{max})")]
    IdOutOfRange {
        id: usize,
        max: usize,
        channel: String,
    },

    /// Digital bit outside the 32-bit slot
    #[error("Bit {bit} out of range on digital channel '{channel}' (0-31)")]
    BitOutOfRange { bit: usize, channel: String },

    /// Neither the requested nor the fallback template compiled
    #[error("No usable template: {requested}; fallback: {fallback}")]
    NoUsableTemplate { requested: String, fallback: String },
}

/// Errors on the boiler socket
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectionError {
    /// Connection attempt failed
    #[error("Connection to {addr} failed: {reason}")]
    ConnectFailed { addr: String, reason: String },

    /// Connection attempt did not complete in time
    #[error("Connection to {addr} timed out after {timeout_ms}ms")]
    ConnectTimeout { addr: String, timeout_ms: u64 },

    /// Read failed on an established connection
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Peer closed the stream
    #[error("Connection closed by boiler")]
    Closed,
}

/// Errors decoding a single telemetry line
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Line does not start with the telemetry marker
    #[error("Not a telemetry line")]
    NotTelemetry,

    /// Line qualified but no parameter could be extracted
    #[error("No parameter decoded from {tokens} tokens (expected {expected})")]
    NoValues { tokens: usize, expected: usize },
}

/// Error reported by a sample observer
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Observer failed: {0}")]
pub struct ObserverError(pub String);

impl ObserverError {
    /// Create an observer error from any message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
