//! # Hargassner - Boiler telemetry client
//!
//! Reads the plain-text telemetry stream of Hargassner pellet boilers over
//! telnet and decodes it with the parameter table of the boiler's firmware.
//!
//! ## Key Features
//!
//! - **Firmware-driven decoding**: DAQPRJ templates compiled once into a slot table
//! - **Bit-packed digital channels**: boolean flags masked out of shared integer slots
//! - **Resilient connection**: timeouts and capped exponential backoff, retried forever
//! - **Snapshots and observers**: poll the latest sample or get pushed each one
//!
//! ## Quick Start
//!
//! ```rust
//! use hargassner::{Language, LineDecoder, SchemaCompiler, Value};
//! use std::sync::Arc;
//!
//! let template = "<DAQPRJ><ANALOG>\
//!     <CHANNEL id='0' name='ZK'/>\
//!     <CHANNEL id='1' name='TK' unit='°C'/>\
//!     <CHANNEL id='2' name='TRG'/>\
//!     </ANALOG><DIGITAL>\
//!     <CHANNEL id='0' bit='0' name='Stoerung'/>\
//!     </DIGITAL></DAQPRJ>";
//!
//! let schema = SchemaCompiler::new(Language::En).compile_template(template).unwrap();
//! assert_eq!(schema.expected_token_count(), 4);
//!
//! let decoder = LineDecoder::new(Arc::new(schema));
//! let sample = decoder.decode("pm 7 55.3 180 1").unwrap();
//! assert_eq!(sample.value("ZK"), Some(Value::Integer(7)));
//! assert_eq!(sample.value("Stoerung"), Some(Value::Bool(true)));
//! ```
//!
//! Against a real boiler, use the [`TelemetryClient`]:
//!
//! ```rust,no_run
//! use hargassner::{ClientConfig, TelemetryClient};
//!
//! # async fn run() -> hargassner::Result<()> {
//! let client = TelemetryClient::new(ClientConfig::new("192.168.1.50"))?;
//! client.start().await?;
//!
//! let snapshot = client.snapshot();
//! println!("connected: {}", snapshot.connection.connected);
//!
//! client.stop().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Built-in firmware templates and parameter descriptions
//! - [`schema`]: Template compilation
//! - [`decoder`]: Telemetry line decoding
//! - [`frame`]: Byte stream to line framing
//! - [`recovery`]: Reconnection backoff
//! - [`metrics`]: Client statistics and the current sample
//! - [`observer`]: Push notification of samples
//! - [`client`]: Connection management and the public client
//! - [`boiler`]: Boiler state, fault codes and pellet energy

// Modules
pub mod boiler;
pub mod catalog;
pub mod client;
pub mod decoder;
pub mod error;
pub mod frame;
pub mod metrics;
pub mod observer;
pub mod recovery;
pub mod schema;

// Re-exports for convenient access
pub use boiler::BoilerState;
pub use catalog::{Language, DEFAULT_FIRMWARE};
pub use client::{
    ClientConfig, ConnectionInfo, ConnectionState, TelemetryClient, TelemetrySnapshot,
};
pub use decoder::{DecodedSample, DecodedValue, LineDecoder, Value};
pub use error::{
    ConnectionError, DecodeError, HargassnerError, ObserverError, Result, SchemaError,
};
pub use frame::{AssembledLines, FrameAssembler, TextEncoding};
pub use metrics::{Statistics, StatisticsRegistry};
pub use observer::{ObserverId, ObserverList, SampleObserver};
pub use recovery::{Backoff, BackoffConfig};
pub use schema::{ChannelKind, ParameterDefinition, Schema, SchemaCompiler};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_catalog_line_roundtrip() {
        let schema = SchemaCompiler::default().for_firmware(DEFAULT_FIRMWARE).unwrap();
        let expected = schema.expected_token_count();
        let line = format!("pm {}", vec!["1"; expected].join(" "));

        let sample = LineDecoder::new(std::sync::Arc::new(schema))
            .decode(&line)
            .unwrap();
        assert!(sample.is_complete());
        assert_eq!(sample.value("ZK"), Some(Value::Integer(1)));
    }
}
