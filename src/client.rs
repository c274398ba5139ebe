// Hargassner - Boiler telemetry client
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Connection management and the public client
//!
//! A [`TelemetryClient`] owns one background task that keeps a TCP
//! connection to the boiler alive:
//!
//! ```text
//! Disconnected --connect ok--> Connected --EOF / read error--> Disconnected
//!      ^                                                            |
//!      +------ Connecting <------------- backoff elapsed <----------+
//! ```
//!
//! Read timeouts are idle periods, not failures. Every other failure is
//! counted, logged, and followed by an exponential backoff that resets on
//! the first successful read. There is no retry ceiling.
//!
//! Callers only ever see copies: [`TelemetryClient::snapshot`] takes a short
//! lock around the latest sample and counters, never around socket I/O.

use crate::catalog::{self, Language, DEFAULT_FIRMWARE};
use crate::decoder::{DecodedSample, LineDecoder, DEFAULT_MARKER};
use crate::error::{ConnectionError, HargassnerError, ObserverError, Result};
use crate::frame::{FrameAssembler, TextEncoding, DEFAULT_MAX_PARTIAL_LINE};
use crate::metrics::{Statistics, StatisticsRegistry};
use crate::observer::{ObserverId, SampleObserver};
use crate::recovery::{Backoff, BackoffConfig};
use crate::schema::{Schema, SchemaCompiler};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// Default telnet port of the boiler controller
pub const DEFAULT_PORT: u16 = 23;

/// Socket connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// No socket
    #[default]
    Disconnected,
    /// Connect attempt in progress
    Connecting,
    /// Socket established
    Connected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        };
        f.write_str(name)
    }
}

/// Connection metadata published next to the sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    /// Current socket state
    pub state: ConnectionState,
    /// Shorthand for `state == Connected`
    pub connected: bool,
    /// Time of the last successful decode
    pub last_update: Option<DateTime<Utc>>,
    /// Counters
    pub statistics: Statistics,
    /// Tokens per line the schema expects
    pub expected_token_count: usize,
    /// Firmware the schema was compiled from
    pub firmware: String,
}

/// Copy of everything a poller needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Latest decoded sample, possibly stale
    pub sample: Option<DecodedSample>,
    /// Connection metadata
    pub connection: ConnectionInfo,
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Boiler host name or address
    pub host: String,
    /// Boiler TCP port
    pub port: u16,
    /// Firmware version used to pick the catalog template
    pub firmware: String,
    /// Description language
    pub language: Language,
    /// Inline template text overriding the catalog
    pub template: Option<String>,
    /// Bound on a single connect attempt
    pub connect_timeout: Duration,
    /// Idle period after which a read is re-polled
    pub read_timeout: Duration,
    /// Reconnect backoff
    pub backoff: BackoffConfig,
    /// Socket read buffer size
    pub read_buffer_size: usize,
    /// How long `start` waits for the first connection
    pub startup_wait: Duration,
    /// Telemetry line marker
    pub marker: String,
    /// Encodings tried on each line, in order
    pub encodings: Vec<TextEncoding>,
    /// Bound on a buffered partial line
    pub max_partial_line: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            firmware: DEFAULT_FIRMWARE.to_string(),
            language: Language::default(),
            template: None,
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(10),
            backoff: BackoffConfig::default(),
            read_buffer_size: 65536,
            startup_wait: Duration::from_secs(5),
            marker: DEFAULT_MARKER.to_string(),
            encodings: TextEncoding::DEFAULT_CHAIN.to_vec(),
            max_partial_line: DEFAULT_MAX_PARTIAL_LINE,
        }
    }
}

impl ClientConfig {
    /// Default configuration for `host`
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// Set the TCP port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the firmware version
    pub fn with_firmware(mut self, firmware: impl Into<String>) -> Self {
        self.firmware = firmware.into();
        self
    }

    /// Set the description language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Use an inline template instead of the catalog
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the reconnect backoff
    pub fn with_backoff(mut self, backoff: BackoffConfig) -> Self {
        self.backoff = backoff;
        self
    }

    /// Set how long `start` waits for the first connection
    pub fn with_startup_wait(mut self, wait: Duration) -> Self {
        self.startup_wait = wait;
        self
    }

    /// Set the telemetry marker
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Set the encoding chain
    pub fn with_encodings(mut self, encodings: impl Into<Vec<TextEncoding>>) -> Self {
        self.encodings = encodings.into();
        self
    }

    /// `host:port` for logs and errors
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Reject settings the connection task cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(HargassnerError::InvalidConfig(msg.to_string()));

        if self.host.trim().is_empty() {
            return invalid("host must not be empty");
        }
        if self.port == 0 {
            return invalid("port must not be 0");
        }
        if self.connect_timeout.is_zero() || self.read_timeout.is_zero() {
            return invalid("timeouts must be greater than zero");
        }
        if self.backoff.base.is_zero() || self.backoff.base > self.backoff.max {
            return invalid("backoff base must be positive and not exceed its cap");
        }
        if !(self.backoff.multiplier >= 1.0 && self.backoff.multiplier.is_finite()) {
            return invalid("backoff multiplier must be at least 1");
        }
        if self.read_buffer_size == 0 {
            return invalid("read buffer size must not be 0");
        }
        if self.marker.is_empty() || self.marker.contains(char::is_whitespace) {
            return invalid("marker must be a non-empty word");
        }
        Ok(())
    }
}

/// Boiler telemetry client
///
/// Construction compiles the schema and is the only fallible step. After
/// [`start`](Self::start) every network or decode problem is absorbed and
/// reported through [`statistics`](Self::statistics) and
/// [`state`](Self::state).
pub struct TelemetryClient {
    config: ClientConfig,
    schema: Arc<Schema>,
    registry: Arc<StatisticsRegistry>,
    state: Arc<watch::Sender<ConnectionState>>,
    shutdown: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl TelemetryClient {
    /// Create a client, compiling the template for the configured firmware
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let compiler = SchemaCompiler::new(config.language);
        let schema = match &config.template {
            Some(text) => compiler.compile(text, catalog::default_template())?,
            None => compiler.for_firmware(&config.firmware)?,
        };
        info!(
            "Compiled {} schema: {} parameters, {} tokens per line",
            schema.firmware(),
            schema.len(),
            schema.expected_token_count()
        );

        Self::with_schema(config, Arc::new(schema))
    }

    /// Create a client around an already compiled schema
    pub fn with_schema(config: ClientConfig, schema: Arc<Schema>) -> Result<Self> {
        config.validate()?;
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        let (shutdown, _) = watch::channel(false);

        Ok(Self {
            config,
            schema,
            registry: Arc::new(StatisticsRegistry::new()),
            state: Arc::new(state),
            shutdown,
            task: Mutex::new(None),
        })
    }

    /// Start the connection task
    ///
    /// Waits up to `startup_wait` for the first connection and returns the
    /// state reached. Not being connected yet is not an error; the task
    /// keeps retrying in the background.
    pub async fn start(&self) -> Result<ConnectionState> {
        let mut state_rx = self.state.subscribe();
        {
            let mut task = self.task.lock();
            if task.is_some() {
                warn!("Client for {} already started", self.config.address());
                return Ok(self.state());
            }

            self.shutdown.send_replace(false);
            let worker = ConnectionWorker::new(
                &self.config,
                Arc::clone(&self.schema),
                Arc::clone(&self.registry),
                Arc::clone(&self.state),
                self.shutdown.subscribe(),
            );
            *task = Some(tokio::spawn(worker.run()));
        }

        let connected = matches!(
            timeout(
                self.config.startup_wait,
                state_rx.wait_for(|state| *state == ConnectionState::Connected),
            )
            .await,
            Ok(Ok(_))
        );
        if !connected {
            warn!(
                "No connection to {} within {:?}, retrying in background",
                self.config.address(),
                self.config.startup_wait
            );
        }

        Ok(self.state())
    }

    /// Stop the connection task and release the socket
    ///
    /// Idempotent. Returns once the task has exited.
    pub async fn stop(&self) {
        self.shutdown.send_replace(true);
        let handle = self.task.lock().take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                error!("Connection task ended abnormally: {}", err);
            }
            info!("Client for {} stopped", self.config.address());
        }
    }

    /// Check if the connection task is running
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    /// Latest sample and connection metadata
    pub fn snapshot(&self) -> TelemetrySnapshot {
        let (statistics, sample) = self.registry.snapshot();
        let state = self.state();
        TelemetrySnapshot {
            sample,
            connection: ConnectionInfo {
                state,
                connected: state == ConnectionState::Connected,
                last_update: statistics.last_update,
                statistics,
                expected_token_count: self.schema.expected_token_count(),
                firmware: self.schema.firmware().to_string(),
            },
        }
    }

    /// Current connection state (best effort)
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Check if the socket is established
    pub fn connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Receiver notified on every state change
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Copy of the counters
    pub fn statistics(&self) -> Statistics {
        self.registry.statistics()
    }

    /// Copy of the latest sample
    pub fn latest_sample(&self) -> Option<DecodedSample> {
        self.registry.latest_sample()
    }

    /// Time of the last successful decode
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.registry.last_update()
    }

    /// Tokens per line the schema expects
    pub fn expected_token_count(&self) -> usize {
        self.schema.expected_token_count()
    }

    /// Compiled schema
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Register a closure called on every decoded sample
    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&DecodedSample) -> std::result::Result<(), ObserverError> + Send + Sync + 'static,
    {
        self.registry.observers().subscribe(Arc::new(observer))
    }

    /// Register a shared observer
    pub fn subscribe_observer(&self, observer: Arc<dyn SampleObserver>) -> ObserverId {
        self.registry.observers().subscribe(observer)
    }

    /// Remove an observer; returns false if it was not registered
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.registry.observers().unsubscribe(id)
    }
}

impl fmt::Debug for TelemetryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelemetryClient")
            .field("address", &self.config.address())
            .field("firmware", &self.schema.firmware())
            .field("state", &self.state())
            .finish()
    }
}

impl Drop for TelemetryClient {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
        if let Some(handle) = self.task.get_mut().take() {
            handle.abort();
        }
    }
}

/// Why a connection ended
#[derive(Debug)]
enum Exit {
    Shutdown,
    Failed(ConnectionError),
}

/// State owned by the background task
struct ConnectionWorker {
    host: String,
    port: u16,
    address: String,
    connect_timeout: Duration,
    read_timeout: Duration,
    buffer: Vec<u8>,
    decoder: LineDecoder,
    assembler: FrameAssembler,
    backoff: Backoff,
    registry: Arc<StatisticsRegistry>,
    state: Arc<watch::Sender<ConnectionState>>,
    shutdown: watch::Receiver<bool>,
}

impl ConnectionWorker {
    fn new(
        config: &ClientConfig,
        schema: Arc<Schema>,
        registry: Arc<StatisticsRegistry>,
        state: Arc<watch::Sender<ConnectionState>>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            address: config.address(),
            connect_timeout: config.connect_timeout,
            read_timeout: config.read_timeout,
            buffer: vec![0; config.read_buffer_size],
            decoder: LineDecoder::with_marker(schema, config.marker.clone()),
            assembler: FrameAssembler::new()
                .with_marker(config.marker.clone())
                .with_encodings(config.encodings.clone())
                .with_max_partial(config.max_partial_line),
            backoff: Backoff::new(config.backoff),
            registry,
            state,
            shutdown,
        }
    }

    async fn run(mut self) {
        info!("Connection task started for {}", self.address);

        loop {
            let exit = match self.connect().await {
                Ok(stream) => {
                    info!("Connected to boiler at {}", self.address);
                    self.set_state(ConnectionState::Connected);
                    self.read_loop(stream).await
                }
                Err(exit) => exit,
            };

            // Socket is gone; fragments never join across connections
            self.assembler.reset();
            self.set_state(ConnectionState::Disconnected);

            let err = match exit {
                Exit::Shutdown => break,
                Exit::Failed(err) => err,
            };
            self.registry.record_connection_failure(&err);
            let delay = self.backoff.next_delay();
            warn!("{}; reconnecting in {:?}", err, delay);

            tokio::select! {
                _ = stop_requested(&mut self.shutdown) => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        self.set_state(ConnectionState::Disconnected);
        info!("Connection task for {} stopped", self.address);
    }

    async fn connect(&mut self) -> std::result::Result<TcpStream, Exit> {
        self.set_state(ConnectionState::Connecting);
        debug!("Connecting to {}", self.address);

        let attempt = timeout(
            self.connect_timeout,
            TcpStream::connect((self.host.as_str(), self.port)),
        );
        let result = tokio::select! {
            _ = stop_requested(&mut self.shutdown) => return Err(Exit::Shutdown),
            result = attempt => result,
        };

        match result {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(err)) => Err(Exit::Failed(ConnectionError::ConnectFailed {
                addr: self.address.clone(),
                reason: err.to_string(),
            })),
            Err(_) => Err(Exit::Failed(ConnectionError::ConnectTimeout {
                addr: self.address.clone(),
                timeout_ms: self.connect_timeout.as_millis() as u64,
            })),
        }
    }

    async fn read_loop(&mut self, mut stream: TcpStream) -> Exit {
        loop {
            let read = tokio::select! {
                _ = stop_requested(&mut self.shutdown) => return Exit::Shutdown,
                read = timeout(self.read_timeout, stream.read(&mut self.buffer)) => read,
            };

            match read {
                Err(_) => debug!("No data from {} for {:?}", self.address, self.read_timeout),
                Ok(Ok(0)) => return Exit::Failed(ConnectionError::Closed),
                Ok(Ok(len)) => {
                    self.backoff.reset();
                    self.handle_chunk(len);
                }
                Ok(Err(err)) => return Exit::Failed(ConnectionError::ReadFailed(err.to_string())),
            }
        }
    }

    fn handle_chunk(&mut self, len: usize) {
        self.registry.record_bytes(len);
        let lines = self.assembler.on_bytes(&self.buffer[..len]);
        self.registry.record_dropped(lines.dropped);

        for line in &lines.telemetry {
            self.registry.record_line();
            match self.decoder.decode(line) {
                Ok(sample) => self.registry.record_sample(sample),
                Err(err) => {
                    debug!("Discarding line: {}", err);
                    self.registry.record_decode_error(&err);
                }
            }
        }
    }

    fn set_state(&self, state: ConnectionState) {
        let previous = self.state.send_replace(state);
        if previous != state {
            debug!("Connection state {} -> {}", previous, state);
        }
    }
}

/// Resolves once a stop is requested or the client is gone
async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "<DAQPRJ><ANALOG>\
        <CHANNEL id='0' name='ZK'/>\
        <CHANNEL id='1' name='TK' unit='°C'/>\
        </ANALOG><DIGITAL>\
        <CHANNEL id='0' bit='0' name='Stoerung'/>\
        </DIGITAL></DAQPRJ>";

    #[test]
    fn test_default_config() {
        let config = ClientConfig::new("192.168.1.50");
        assert_eq!(config.port, 23);
        assert_eq!(config.firmware, DEFAULT_FIRMWARE);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.read_buffer_size, 65536);
        assert_eq!(config.marker, "pm");
        assert!(config.validate().is_ok());
        assert_eq!(config.address(), "192.168.1.50:23");
    }

    #[test]
    fn test_ipv6_address() {
        assert_eq!(ClientConfig::new("::1").with_port(2323).address(), "[::1]:2323");
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let base = ClientConfig::new("boiler");
        let cases = vec![
            ClientConfig::default(),
            base.clone().with_port(0),
            base.clone().with_read_timeout(Duration::ZERO),
            base.clone().with_backoff(BackoffConfig::new(
                Duration::from_secs(10),
                Duration::from_secs(5),
            )),
            base.clone().with_marker(""),
        ];
        for config in cases {
            assert!(matches!(
                config.validate(),
                Err(HargassnerError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_new_compiles_catalog_schema() {
        let client = TelemetryClient::new(ClientConfig::new("boiler")).unwrap();
        assert_eq!(client.expected_token_count(), 121);
        assert_eq!(client.state(), ConnectionState::Disconnected);
        assert!(!client.is_running());
    }

    #[test]
    fn test_unknown_firmware_falls_back() {
        let client =
            TelemetryClient::new(ClientConfig::new("boiler").with_firmware("V99_9XYZ")).unwrap();
        assert_eq!(client.schema().firmware(), DEFAULT_FIRMWARE);
    }

    #[test]
    fn test_inline_template() {
        let client =
            TelemetryClient::new(ClientConfig::new("boiler").with_template(TEMPLATE)).unwrap();
        assert_eq!(client.expected_token_count(), 3);
    }

    #[test]
    fn test_broken_template_uses_catalog_fallback() {
        let client =
            TelemetryClient::new(ClientConfig::new("boiler").with_template("<not closed"))
                .unwrap();
        assert_eq!(client.expected_token_count(), 121);
    }

    #[test]
    fn test_snapshot_before_start() {
        let client =
            TelemetryClient::new(ClientConfig::new("boiler").with_template(TEMPLATE)).unwrap();
        let snapshot = client.snapshot();
        assert!(snapshot.sample.is_none());
        assert!(!snapshot.connection.connected);
        assert_eq!(snapshot.connection.expected_token_count, 3);
        assert_eq!(snapshot.connection.statistics, Statistics::default());
    }

    #[test]
    fn test_state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ConnectionState::Connected).unwrap(),
            "\"connected\""
        );
    }

    #[tokio::test]
    async fn test_stop_without_start_is_noop() {
        let client = TelemetryClient::new(ClientConfig::new("boiler")).unwrap();
        client.stop().await;
        client.stop().await;
        assert_eq!(client.state(), ConnectionState::Disconnected);
    }
}
