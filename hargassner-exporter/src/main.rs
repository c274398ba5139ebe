// Hargassner Exporter - Prometheus exporter for boiler telemetry
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Hargassner Exporter
//!
//! Prometheus exporter for Hargassner pellet boiler telemetry.
//!
//! ## Usage
//!
//! ```bash
//! # Read from a boiler
//! hargassner-exporter --host 192.168.1.50 --firmware V14_1HAR_q1
//!
//! # Run against a simulated boiler on custom port
//! hargassner-exporter --simulate --port 9090
//! ```

mod config;
mod metrics;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use clap::Parser;
use config::{Args, ExporterError};
use hargassner::boiler::{self, BoilerState};
use hargassner::{ConnectionInfo, DecodedSample, ObserverError, TelemetryClient, TelemetrySnapshot};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "simulate")]
use hargassner::Schema;
#[cfg(feature = "simulate")]
use hargassner_testdata::{MockBoiler, MockBoilerConfig};

/// Application state shared across handlers.
struct AppState {
    client: Arc<TelemetryClient>,
    simulated: bool,
    start_time: Instant,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Hargassner Exporter v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ExporterError> {
    #[cfg(not(feature = "simulate"))]
    let args = if args.simulate {
        warn!("Simulate feature not enabled, ignoring --simulate");
        Args {
            simulate: false,
            ..args
        }
    } else {
        args
    };

    let refresh = args.refresh_interval()?;
    let client_config = args.client_config()?;
    let schema = config::compile_schema(&client_config)?;
    info!(
        "Schema {}: {} parameters, {} tokens per line",
        schema.firmware(),
        schema.len(),
        schema.expected_token_count()
    );

    #[cfg(feature = "simulate")]
    let (client_config, simulator) = if args.simulate {
        let simulator = start_simulator(Arc::clone(&schema)).await?;
        (client_config.with_port(simulator.port()), Some(simulator))
    } else {
        (client_config, None)
    };

    let client = Arc::new(TelemetryClient::with_schema(client_config, schema)?);
    client.subscribe(|sample: &DecodedSample| -> Result<(), ObserverError> {
        metrics::update_sample_metrics(sample);
        Ok(())
    });
    metrics::update_connection_metrics(&client.snapshot().connection);

    let state = client.start().await?;
    info!("Boiler {} is {}", client.config().address(), state);

    let poller = tokio::spawn(poll_connection(Arc::clone(&client), refresh));

    // Create app state
    let app_state = Arc::new(AppState {
        client: Arc::clone(&client),
        simulated: args.simulate,
        start_time: Instant::now(),
    });

    // Build router
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/status", get(status_handler))
        .route("/sample", get(sample_handler))
        .with_state(app_state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Starting server on http://{}", addr);
    info!("Metrics endpoint: http://{}/metrics", addr);

    let served = match TcpListener::bind(addr).await {
        Ok(listener) => axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await,
        Err(e) => Err(e),
    };

    info!("Shutting down");
    poller.abort();
    client.stop().await;

    #[cfg(feature = "simulate")]
    if let Some(simulator) = simulator {
        simulator.stop().await;
    }

    served?;
    Ok(())
}

/// Serve a simulated boiler on an ephemeral local port.
#[cfg(feature = "simulate")]
async fn start_simulator(schema: Arc<Schema>) -> Result<MockBoiler, ExporterError> {
    let config = MockBoilerConfig::new()
        .with_interval(Duration::from_secs(1))
        .with_noise_every(10)
        .with_fault_probability(0.01);
    let simulator = MockBoiler::start(schema, config).await?;
    info!("Simulated boiler listening on {}", simulator.local_addr());
    Ok(simulator)
}

/// Refresh connection metrics and log connection changes.
async fn poll_connection(client: Arc<TelemetryClient>, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    let mut was_connected = None;

    loop {
        ticker.tick().await;
        let info = client.snapshot().connection;

        if was_connected != Some(info.connected) {
            if info.connected {
                info!("Receiving telemetry ({})", info.firmware);
            } else {
                warn!(
                    "Boiler not connected: {}",
                    info.statistics.last_error.as_deref().unwrap_or("no data yet")
                );
            }
            was_connected = Some(info.connected);
        }

        metrics::update_connection_metrics(&info);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Root handler - shows a simple HTML page.
async fn root_handler() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Hargassner Exporter</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }
        h1 { color: #2c3e50; }
        a { color: #3498db; text-decoration: none; }
        a:hover { text-decoration: underline; }
        .endpoints { background: #f8f9fa; padding: 20px; border-radius: 8px; margin: 20px 0; }
        .endpoint { margin: 10px 0; }
        code { background: #e9ecef; padding: 2px 6px; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>Hargassner Exporter</h1>
    <p>Prometheus exporter for Hargassner pellet boiler telemetry.</p>

    <div class="endpoints">
        <h2>Endpoints</h2>
        <div class="endpoint"><a href="/metrics">/metrics</a> - Prometheus metrics</div>
        <div class="endpoint"><a href="/health">/health</a> - Health check</div>
        <div class="endpoint"><a href="/ready">/ready</a> - Readiness check (503 until connected)</div>
        <div class="endpoint"><a href="/status">/status</a> - Connection status (JSON)</div>
        <div class="endpoint"><a href="/sample">/sample</a> - Latest decoded sample (JSON)</div>
    </div>

    <h2>Metrics</h2>
    <ul>
        <li><code>hargassner_parameter_value</code> - Analog parameters by name and unit</li>
        <li><code>hargassner_digital_state</code> - Digital parameters (0/1)</li>
        <li><code>hargassner_boiler_state</code> - Boiler state code</li>
        <li><code>hargassner_boiler_fault</code> - Fault flag</li>
        <li><code>hargassner_consumed_energy_kwh</code> - Energy of consumed pellets</li>
        <li><code>hargassner_connected</code> - Connection state</li>
        <li><code>hargassner_client_statistics</code> - Line, sample, error and reconnect counters</li>
    </ul>
</body>
</html>"#,
    )
}

/// Metrics handler - returns Prometheus text format.
async fn metrics_handler() -> impl IntoResponse {
    match metrics::encode_metrics() {
        Ok(text) => (
            StatusCode::OK,
            [("Content-Type", "text/plain; charset=utf-8")],
            text,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("Content-Type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {}", e),
        ),
    }
}

/// Health check handler.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness check handler.
async fn ready_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if state.client.connected() {
        (StatusCode::OK, "Ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Not connected")
    }
}

/// Status information response.
#[derive(Serialize)]
struct StatusResponse {
    version: String,
    uptime_secs: u64,
    simulated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    boiler_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    operation_status: Option<String>,
    connection: ConnectionInfo,
}

/// Status handler - returns JSON status information.
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let snapshot = state.client.snapshot();
    let language = state.client.config().language;

    let (boiler_state, operation_status) = match &snapshot.sample {
        Some(sample) => (
            BoilerState::from_sample(sample).map(|s| s.label(language).to_string()),
            Some(boiler::operation_status(sample, language)),
        ),
        None => (None, None),
    };

    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        simulated: state.simulated,
        boiler_state,
        operation_status,
        connection: snapshot.connection,
    })
}

/// Sample handler - returns the latest snapshot as JSON.
async fn sample_handler(State(state): State<Arc<AppState>>) -> Json<TelemetrySnapshot> {
    Json(state.client.snapshot())
}
