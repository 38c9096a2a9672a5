//! Snapshot types for serializing captured moments.
//!
//! This module provides serializable snapshot types that can be used to
//! capture and export the state of moment sources in any serde format.
//!
//! # Feature Flag
//!
//! This module requires the `serde` feature:
//!
//! ```toml
//! [dependencies]
//! momenti = { version = "0.1", features = ["serde"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use momenti::counter::PerformanceCounter;
//! use momenti::snapshot::CounterSnapshot;
//!
//! let mut counter = PerformanceCounter::new().with_name("startup");
//! counter.capture("ready")?;
//!
//! let snapshot = CounterSnapshot::from_observable(&counter);
//! let json = serde_json::to_string(&snapshot)?;
//! ```

use crate::moment::{Moment, MomentId};
use crate::observers::{display_name, with_deltas, Observable};
use serde::{Deserialize, Serialize};

/// A snapshot of a single moment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MomentSnapshot {
    /// The moment's id.
    pub id: MomentId,
    /// The moment's message.
    pub message: String,
    /// Capture timestamp in milliseconds, as read from the counter's clock.
    pub timestamp_ms: f64,
    /// Milliseconds since the previous moment of the same counter.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub delta_ms: Option<f64>,
}

impl MomentSnapshot {
    /// Creates a snapshot of `moment` with the given delta.
    pub fn new(moment: &Moment, delta_ms: Option<f64>) -> Self {
        Self {
            id: moment.id().clone(),
            message: moment.message().to_string(),
            timestamp_ms: moment.timestamp(),
            delta_ms,
        }
    }
}

/// A snapshot of every moment held by one source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CounterSnapshot {
    /// The name of the source, `(unnamed)` if it has none.
    pub name: String,
    /// The moments in capture order.
    pub moments: Vec<MomentSnapshot>,
}

impl CounterSnapshot {
    /// Creates a new counter snapshot.
    pub fn new(name: impl Into<String>, moments: Vec<MomentSnapshot>) -> Self {
        Self {
            name: name.into(),
            moments,
        }
    }

    /// Creates a snapshot from an observable source.
    pub fn from_observable(source: &dyn Observable) -> Self {
        Self {
            name: display_name(source),
            moments: with_deltas(source.moments())
                .map(|(moment, delta)| MomentSnapshot::new(moment, delta))
                .collect(),
        }
    }

    /// Finds a moment by id.
    pub fn get(&self, id: &MomentId) -> Option<&MomentSnapshot> {
        self.moments.iter().find(|m| &m.id == id)
    }

    /// Time between the first and last moment, or `None` when empty.
    pub fn span_ms(&self) -> Option<f64> {
        match (self.moments.first(), self.moments.last()) {
            (Some(first), Some(last)) => Some(last.timestamp_ms - first.timestamp_ms),
            _ => None,
        }
    }
}

/// A collection of counter snapshots taken at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    /// Optional wall-clock timestamp in milliseconds since Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp_ms: Option<u64>,
    /// The counter snapshots.
    pub counters: Vec<CounterSnapshot>,
}

impl SessionSnapshot {
    /// Creates a new session snapshot with the given counters.
    pub fn new(counters: Vec<CounterSnapshot>) -> Self {
        Self {
            timestamp_ms: None,
            counters,
        }
    }

    /// Creates a new session snapshot with counters and a timestamp.
    pub fn with_timestamp(counters: Vec<CounterSnapshot>, timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms: Some(timestamp_ms),
            counters,
        }
    }

    /// Finds a counter by name.
    pub fn get(&self, name: &str) -> Option<&CounterSnapshot> {
        self.counters.iter().find(|c| c.name == name)
    }

    /// Collects snapshots from an iterator of observable sources.
    pub fn collect<'a>(sources: impl Iterator<Item = &'a dyn Observable>) -> Self {
        Self::new(sources.map(CounterSnapshot::from_observable).collect())
    }
}
