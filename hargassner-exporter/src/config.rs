// Hargassner Exporter - Command line configuration
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Command line arguments and their translation into a client config.

use clap::Parser;
use hargassner::{catalog, ClientConfig, HargassnerError, Language, Schema, SchemaCompiler};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Host used when the exporter talks to its own simulated boiler.
pub const SIMULATOR_HOST: &str = "127.0.0.1";

/// Hargassner Prometheus Exporter
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Boiler IP address or hostname
    #[arg(long)]
    pub host: Option<String>,

    /// Boiler telnet port
    #[arg(long, default_value = "23")]
    pub boiler_port: u16,

    /// Firmware version selecting the parameter template
    #[arg(short, long, default_value = catalog::DEFAULT_FIRMWARE)]
    pub firmware: String,

    /// Template file overriding the built-in catalog entry
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Description language (en, de)
    #[arg(long, default_value = "en")]
    pub language: Language,

    /// Port to listen on
    #[arg(short, long, default_value = "9100")]
    pub port: u16,

    /// Seconds between connection metric refreshes
    #[arg(short, long, default_value = "5")]
    pub interval: u64,

    /// Serve a simulated boiler on a local port and read from it
    #[arg(long)]
    pub simulate: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Exporter errors.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Neither a host nor simulation was requested
    #[error("No boiler host given (use --host or --simulate)")]
    MissingHost,

    /// Template file could not be read
    #[error("Could not read template {path}: {source}")]
    TemplateRead {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Client configuration or schema rejected
    #[error(transparent)]
    Client(#[from] HargassnerError),

    /// Refresh interval of zero
    #[error("Refresh interval must be at least one second")]
    InvalidInterval,

    /// HTTP or simulator socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Args {
    /// Poll interval for connection metrics.
    pub fn refresh_interval(&self) -> Result<Duration, ExporterError> {
        if self.interval == 0 {
            return Err(ExporterError::InvalidInterval);
        }
        Ok(Duration::from_secs(self.interval))
    }

    /// Build the client config, reading the template file if one is given.
    ///
    /// With `--simulate` the host is the local simulator and the port is
    /// filled in once it is listening.
    pub fn client_config(&self) -> Result<ClientConfig, ExporterError> {
        let host = match (&self.host, self.simulate) {
            (_, true) => SIMULATOR_HOST.to_string(),
            (Some(host), false) => host.clone(),
            (None, false) => return Err(ExporterError::MissingHost),
        };

        let mut config = ClientConfig::new(host)
            .with_port(self.boiler_port)
            .with_firmware(self.firmware.clone())
            .with_language(self.language);

        if let Some(path) = &self.template {
            let text =
                std::fs::read_to_string(path).map_err(|source| ExporterError::TemplateRead {
                    path: path.clone(),
                    source,
                })?;
            config = config.with_template(text);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Compile the schema the client will decode with.
pub fn compile_schema(config: &ClientConfig) -> Result<Arc<Schema>, ExporterError> {
    let compiler = SchemaCompiler::new(config.language);
    let schema = match &config.template {
        Some(text) => compiler
            .compile(text, catalog::default_template())
            .map_err(HargassnerError::from)?,
        None => compiler
            .for_firmware(&config.firmware)
            .map_err(HargassnerError::from)?,
    };
    Ok(Arc::new(schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("hargassner-exporter").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--host", "192.168.1.50"]);
        let config = args.client_config().unwrap();

        assert_eq!(config.host, "192.168.1.50");
        assert_eq!(config.port, 23);
        assert_eq!(config.firmware, catalog::DEFAULT_FIRMWARE);
        assert_eq!(config.language, Language::En);
        assert!(config.template.is_none());
        assert_eq!(args.port, 9100);
        assert_eq!(args.refresh_interval().unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn test_missing_host() {
        let args = parse(&[]);
        assert!(matches!(
            args.client_config(),
            Err(ExporterError::MissingHost)
        ));
    }

    #[test]
    fn test_simulate_uses_local_host() {
        let args = parse(&["--simulate", "--language", "de"]);
        let config = args.client_config().unwrap();
        assert_eq!(config.host, SIMULATOR_HOST);
        assert_eq!(config.language, Language::De);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let args = parse(&["--host", "boiler", "--interval", "0"]);
        assert!(matches!(
            args.refresh_interval(),
            Err(ExporterError::InvalidInterval)
        ));
    }

    #[test]
    fn test_template_file_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "<DAQPRJ><ANALOG><CHANNEL id='0' name='ZK'/><CHANNEL id='1' name='TK'/></ANALOG>\
             <DIGITAL><CHANNEL id='0' bit='0' name='Störung'/></DIGITAL></DAQPRJ>"
        )
        .unwrap();

        let path = file.path().to_string_lossy().to_string();
        let args = parse(&["--host", "boiler", "--template", &path]);
        let config = args.client_config().unwrap();
        let schema = compile_schema(&config).unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(schema.expected_token_count(), 3);
    }

    #[test]
    fn test_missing_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.xml");
        let args = parse(&["--host", "boiler", "--template", path.to_str().unwrap()]);

        assert!(matches!(
            args.client_config(),
            Err(ExporterError::TemplateRead { .. })
        ));
    }

    #[test]
    fn test_catalog_schema() {
        let args = parse(&["--host", "boiler"]);
        let schema = compile_schema(&args.client_config().unwrap()).unwrap();
        assert_eq!(schema.expected_token_count(), 121);
    }
}
