// Hargassner Testdata - Synthetic telemetry and mock boiler
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Hargassner Testdata
//!
//! Test tooling for the Hargassner telemetry client.
//!
//! This crate provides:
//!
//! - **Line generation**: `pm` lines shaped by a compiled firmware schema
//! - **Mock boiler**: a TCP server streaming lines like the boiler's telnet port
//! - **Catalog validation**: consistency checks over firmware templates
//!
//! ## Quick Start
//!
//! ```rust
//! use hargassner_testdata::{BoilerPhase, MessageGenerator};
//!
//! let mut generator = MessageGenerator::for_firmware("V14_1HAR_q1", Some(42)).unwrap();
//! let line = generator.generate(BoilerPhase::Running);
//!
//! assert!(line.starts_with("pm "));
//! assert_eq!(line.split_whitespace().count(), 1 + 121);
//! ```
//!
//! ## Mock Boiler
//!
//! ```rust,no_run
//! use hargassner::{ClientConfig, TelemetryClient};
//! use hargassner_testdata::{MessageGenerator, MockBoiler, MockBoilerConfig};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = MessageGenerator::for_firmware("V14_1HAR_q1", None)?.schema().clone();
//! let boiler = MockBoiler::start(
//!     schema,
//!     MockBoilerConfig::new().with_interval(Duration::from_millis(100)),
//! )
//! .await?;
//!
//! let client = TelemetryClient::new(ClientConfig::new("127.0.0.1").with_port(boiler.port()))?;
//! client.start().await?;
//! # Ok(())
//! # }
//! ```

pub mod generator;
pub mod mock;
pub mod validator;

// Re-exports for convenience
pub use generator::{BoilerPhase, GeneratorError, MessageGenerator};
pub use mock::{MockBoiler, MockBoilerConfig};
pub use validator::{ParameterValidator, ValidationReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
