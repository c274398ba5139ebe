// Hargassner Exporter - Prometheus metrics definitions
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Prometheus metrics for boiler monitoring.
//!
//! Parameter gauges are refreshed from each decoded sample. Connection and
//! client statistics gauges are refreshed from snapshots on a timer.

use hargassner::boiler::{self, BoilerState, FAULT_PARAMETER};
use hargassner::{ConnectionInfo, DecodedSample, Value};
use lazy_static::lazy_static;
use prometheus::{register_gauge, register_gauge_vec, Encoder, Gauge, GaugeVec, TextEncoder};

lazy_static! {
    // ============================================================
    // Boiler Parameters (from DecodedSample)
    // ============================================================

    /// Analog parameter values (labeled by parameter name and unit).
    pub static ref PARAMETER_VALUE: GaugeVec = register_gauge_vec!(
        "hargassner_parameter_value",
        "Decoded analog parameter value",
        &["parameter", "unit"]
    ).unwrap();

    /// Digital parameter states (labeled by parameter name).
    pub static ref DIGITAL_STATE: GaugeVec = register_gauge_vec!(
        "hargassner_digital_state",
        "Decoded digital parameter state (1=set, 0=clear)",
        &["parameter"]
    ).unwrap();

    /// Boiler state code from `ZK`.
    pub static ref BOILER_STATE: Gauge = register_gauge!(
        "hargassner_boiler_state",
        "Boiler state code (0-12, see BoilerState)"
    ).unwrap();

    /// Whether the boiler reports a fault.
    pub static ref BOILER_FAULT: Gauge = register_gauge!(
        "hargassner_boiler_fault",
        "Boiler fault flag (1=fault, 0=ok)"
    ).unwrap();

    /// Thermal energy of the consumed pellets.
    pub static ref CONSUMED_ENERGY_KWH: Gauge = register_gauge!(
        "hargassner_consumed_energy_kwh",
        "Estimated thermal energy of consumed pellets in kWh"
    ).unwrap();

    /// Tokens in the last decoded line.
    pub static ref SAMPLE_TOKENS: Gauge = register_gauge!(
        "hargassner_sample_tokens",
        "Value tokens in the last decoded line"
    ).unwrap();

    // ============================================================
    // Connection (from ConnectionInfo)
    // ============================================================

    /// Whether the client holds a live connection.
    pub static ref CONNECTED: Gauge = register_gauge!(
        "hargassner_connected",
        "Boiler connection state (1=connected, 0=not connected)"
    ).unwrap();

    /// Tokens per line the schema expects.
    pub static ref EXPECTED_TOKENS: Gauge = register_gauge!(
        "hargassner_expected_tokens",
        "Value tokens per line expected by the firmware schema"
    ).unwrap();

    /// Unix time of the last decoded sample.
    pub static ref LAST_UPDATE_SECONDS: Gauge = register_gauge!(
        "hargassner_last_update_timestamp_seconds",
        "Unix time of the last decoded sample"
    ).unwrap();

    // ============================================================
    // Client Statistics (from Statistics)
    // ============================================================

    /// Client counters (labeled by counter name).
    pub static ref CLIENT_STATISTICS: GaugeVec = register_gauge_vec!(
        "hargassner_client_statistics",
        "Telemetry client counters since start",
        &["counter"]
    ).unwrap();

    /// Total samples seen by the exporter's observer.
    pub static ref SAMPLES_OBSERVED_TOTAL: Gauge = register_gauge!(
        "hargassner_exporter_samples_total",
        "Total samples observed by the exporter"
    ).unwrap();
}

/// Update parameter metrics from a decoded sample.
pub fn update_sample_metrics(sample: &DecodedSample) {
    for (name, decoded) in sample.iter() {
        match decoded.value {
            Value::Bool(set) => DIGITAL_STATE
                .with_label_values(&[name])
                .set(if set { 1.0 } else { 0.0 }),
            value => PARAMETER_VALUE
                .with_label_values(&[name, decoded.unit.as_deref().unwrap_or("")])
                .set(value.as_f64()),
        }
    }

    if let Some(state) = BoilerState::from_sample(sample) {
        BOILER_STATE.set(f64::from(state.code()));
    }
    if let Some(fault) = sample.value(FAULT_PARAMETER).and_then(|v| v.as_bool()) {
        BOILER_FAULT.set(if fault { 1.0 } else { 0.0 });
    }
    if let Some(kwh) = boiler::consumed_energy_kwh(sample) {
        CONSUMED_ENERGY_KWH.set(kwh);
    }
    SAMPLE_TOKENS.set(sample.token_count as f64);
    SAMPLES_OBSERVED_TOTAL.inc();
}

/// Update connection and statistics metrics.
pub fn update_connection_metrics(info: &ConnectionInfo) {
    CONNECTED.set(if info.connected { 1.0 } else { 0.0 });
    EXPECTED_TOKENS.set(info.expected_token_count as f64);
    if let Some(last_update) = info.last_update {
        LAST_UPDATE_SECONDS.set(last_update.timestamp() as f64);
    }

    let stats = &info.statistics;
    let counters = [
        ("lines_received", stats.lines_received),
        ("samples_decoded", stats.samples_decoded),
        ("decode_errors", stats.decode_errors),
        ("reconnect_attempts", stats.reconnect_attempts),
        ("length_mismatches", stats.length_mismatches),
        ("dropped_lines", stats.dropped_lines),
        ("bytes_received", stats.bytes_received),
    ];
    for (counter, value) in counters {
        CLIENT_STATISTICS
            .with_label_values(&[counter])
            .set(value as f64);
    }
}

/// Encode all metrics to Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
