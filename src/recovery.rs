// Hargassner - Boiler telemetry client
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Reconnection backoff
//!
//! Delays double after each consecutive failed connect-or-read cycle, are
//! capped, and fall back to the base delay after any successful read.
//! There is no retry ceiling: a boiler may be offline for days.

use std::time::Duration;

/// Backoff configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffConfig {
    /// Delay after the first failure
    pub base: Duration,
    /// Upper bound on the delay
    pub max: Duration,
    /// Growth factor per consecutive failure
    pub multiplier: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(5),
            max: Duration::from_secs(300),
            multiplier: 2.0,
        }
    }
}

impl BackoffConfig {
    /// Doubling backoff between `base` and `max`
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max,
            ..Default::default()
        }
    }

    /// Delay for a given consecutive failure (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(i32::MAX as u32) as i32;
        let delay_ms = self.base.as_millis() as f64 * self.multiplier.powi(exponent);
        if !delay_ms.is_finite() || delay_ms >= self.max.as_millis() as f64 {
            return self.max;
        }
        Duration::from_millis(delay_ms as u64).min(self.max)
    }
}

/// Exponential backoff state owned by the connection task
#[derive(Debug, Clone)]
pub struct Backoff {
    config: BackoffConfig,
    failures: u32,
}

impl Backoff {
    /// Create a backoff starting at the base delay
    pub fn new(config: BackoffConfig) -> Self {
        Self {
            config,
            failures: 0,
        }
    }

    /// Delay to wait before the next attempt; advances the sequence
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.config.delay_for_attempt(self.failures);
        self.failures = self.failures.saturating_add(1);
        delay
    }

    /// Delay the next failure would wait, without advancing
    pub fn peek(&self) -> Duration {
        self.config.delay_for_attempt(self.failures)
    }

    /// Consecutive failures since the last reset
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Return to the base delay
    pub fn reset(&mut self) {
        self.failures = 0;
    }

    /// Configuration
    pub fn config(&self) -> &BackoffConfig {
        &self.config
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(BackoffConfig::default())
    }
}
