// Hargassner - Boiler telemetry client
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Push notification of decoded samples
//!
//! Observers run synchronously on the reader task, in registration order.
//! A failing or panicking observer is logged and skipped; it never stops
//! later observers or future decodes.

use crate::decoder::DecodedSample;
use crate::error::ObserverError;
use log::error;
use parking_lot::Mutex;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Receives every successfully decoded sample
pub trait SampleObserver: Send + Sync {
    /// Called with the sample that just became current
    fn on_sample(&self, sample: &DecodedSample) -> Result<(), ObserverError>;
}

impl<F> SampleObserver for F
where
    F: Fn(&DecodedSample) -> Result<(), ObserverError> + Send + Sync,
{
    fn on_sample(&self, sample: &DecodedSample) -> Result<(), ObserverError> {
        self(sample)
    }
}

/// Handle returned by [`ObserverList::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered set of observers
#[derive(Default)]
pub struct ObserverList {
    observers: Mutex<Vec<(ObserverId, Arc<dyn SampleObserver>)>>,
    next_id: AtomicU64,
}

impl ObserverList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer
    pub fn subscribe(&self, observer: Arc<dyn SampleObserver>) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.lock().push((id, observer));
        id
    }

    /// Remove an observer; returns false if it was not registered
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Number of registered observers
    pub fn len(&self) -> usize {
        self.observers.lock().len()
    }

    /// Check if no observer is registered
    pub fn is_empty(&self) -> bool {
        self.observers.lock().is_empty()
    }

    /// Deliver a sample to every observer; returns the number that failed
    pub fn notify(&self, sample: &DecodedSample) -> usize {
        // Observers may (un)subscribe from inside the callback
        let observers: Vec<_> = self
            .observers
            .lock()
            .iter()
            .map(|(id, observer)| (*id, Arc::clone(observer)))
            .collect();

        let mut failed = 0;
        for (id, observer) in observers {
            match panic::catch_unwind(AssertUnwindSafe(|| observer.on_sample(sample))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    error!("Error in data callback {}: {}", id, err);
                    failed += 1;
                }
                Err(_) => {
                    error!("Data callback {} panicked", id);
                    failed += 1;
                }
            }
        }
        failed
    }
}

impl fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("observers", &self.len())
            .finish()
    }
}
