//! Client statistics and the current sample
//!
//! The registry is owned by one client instance. The reader task is the
//! only writer; pollers copy out snapshots under a short-held lock.

use crate::decoder::DecodedSample;
use crate::error::{ConnectionError, DecodeError};
use crate::observer::ObserverList;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Monotonic client counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Telemetry lines seen (decoded or not)
    pub lines_received: u64,
    /// Lines decoded into a sample
    pub samples_decoded: u64,
    /// Telemetry lines that failed to decode
    pub decode_errors: u64,
    /// Failure-triggered reconnect cycles
    pub reconnect_attempts: u64,
    /// Decoded lines whose token count differed from the schema
    pub length_mismatches: u64,
    /// Non-telemetry lines ignored
    pub dropped_lines: u64,
    /// Raw bytes read from the socket
    pub bytes_received: u64,
    /// Most recent connection or decode error
    pub last_error: Option<String>,
    /// Time of the last successful decode
    pub last_update: Option<DateTime<Utc>>,
}

impl Statistics {
    /// Share of telemetry lines that decoded (0.0 - 1.0)
    pub fn decode_ratio(&self) -> f64 {
        if self.lines_received == 0 {
            return 0.0;
        }
        self.samples_decoded as f64 / self.lines_received as f64
    }

    /// Generate a human-readable report
    pub fn report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Hargassner Telemetry Statistics ===\n\n");
        report.push_str(&format!("Telemetry lines: {}\n", self.lines_received));
        report.push_str(&format!("Samples decoded: {}\n", self.samples_decoded));
        report.push_str(&format!("Decode errors: {}\n", self.decode_errors));
        report.push_str(&format!(
            "Decode ratio: {:.1}%\n",
            self.decode_ratio() * 100.0
        ));
        report.push_str(&format!("Length mismatches: {}\n", self.length_mismatches));
        report.push_str(&format!("Ignored lines: {}\n", self.dropped_lines));
        report.push_str(&format!("Bytes received: {}\n", self.bytes_received));
        report.push_str(&format!(
            "Reconnect attempts: {}\n",
            self.reconnect_attempts
        ));
        if let Some(ts) = self.last_update {
            report.push_str(&format!("Last update: {}\n", ts.to_rfc3339()));
        }
        if let Some(err) = &self.last_error {
            report.push_str(&format!("Last error: {}\n", err));
        }

        report
    }
}

#[derive(Debug, Default)]
struct Current {
    statistics: Statistics,
    sample: Option<DecodedSample>,
}

/// Thread-safe statistics, latest sample and observers
#[derive(Debug, Default)]
pub struct StatisticsRegistry {
    current: Mutex<Current>,
    observers: ObserverList,
}

impl StatisticsRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Observers notified on every decoded sample
    pub fn observers(&self) -> &ObserverList {
        &self.observers
    }

    /// Count raw bytes read from the socket
    pub fn record_bytes(&self, count: usize) {
        self.current.lock().statistics.bytes_received += count as u64;
    }

    /// Count ignored non-telemetry lines
    pub fn record_dropped(&self, count: usize) {
        if count > 0 {
            self.current.lock().statistics.dropped_lines += count as u64;
        }
    }

    /// Count a qualifying telemetry line
    pub fn record_line(&self) {
        self.current.lock().statistics.lines_received += 1;
    }

    /// Make `sample` current and notify observers
    pub fn record_sample(&self, sample: DecodedSample) {
        {
            let mut current = self.current.lock();
            let stats = &mut current.statistics;
            stats.samples_decoded += 1;
            stats.last_update = Some(Utc::now());
            if !sample.is_complete() {
                stats.length_mismatches += 1;
            }
            current.sample = Some(sample.clone());
        }
        self.observers.notify(&sample);
    }

    /// Count a failed decode; the current sample is kept
    pub fn record_decode_error(&self, err: &DecodeError) {
        let mut current = self.current.lock();
        current.statistics.decode_errors += 1;
        current.statistics.last_error = Some(err.to_string());
    }

    /// Count a failure that schedules a reconnect
    pub fn record_connection_failure(&self, err: &ConnectionError) {
        let mut current = self.current.lock();
        current.statistics.reconnect_attempts += 1;
        current.statistics.last_error = Some(err.to_string());
    }

    /// Copy of the counters
    pub fn statistics(&self) -> Statistics {
        self.current.lock().statistics.clone()
    }

    /// Copy of the current sample
    pub fn latest_sample(&self) -> Option<DecodedSample> {
        self.current.lock().sample.clone()
    }

    /// Time of the last successful decode
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.current.lock().statistics.last_update
    }

    /// Consistent copy of counters and sample
    pub fn snapshot(&self) -> (Statistics, Option<DecodedSample>) {
        let current = self.current.lock();
        (current.statistics.clone(), current.sample.clone())
    }
}
