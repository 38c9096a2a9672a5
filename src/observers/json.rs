//! JSON observer for serializing captured moments.
//!
//! This module provides [`JsonObserver`], which serializes a collection of
//! [`Observable`] sources to JSON using the [`snapshot`](crate::snapshot) types.
//!
//! # Feature Flag
//!
//! This module requires the `json` feature:
//!
//! ```toml
//! [dependencies]
//! momenti = { version = "0.1", features = ["json"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use momenti::counter::PerformanceCounter;
//! use momenti::observers::Observable;
//! use momenti::observers::json::JsonObserver;
//!
//! let mut startup = PerformanceCounter::new().with_name("startup");
//! startup.capture("ready")?;
//!
//! let counters: Vec<&dyn Observable> = vec![&startup];
//! let json = JsonObserver::new().to_json(counters.into_iter())?;
//! // [{"name":"startup","moments":[{"id":123...,"message":"ready","timestamp_ms":0.004}]}]
//! ```

use crate::observers::{Observable, Result};
use crate::snapshot::{CounterSnapshot, SessionSnapshot};

/// Configuration for the JSON observer.
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Whether to pretty-print the JSON output.
    pub pretty: bool,
    /// Whether to include a wall-clock timestamp in the output.
    pub include_timestamp: bool,
    /// Whether to wrap counters in a [`SessionSnapshot`] object.
    pub wrap_in_snapshot: bool,
}

/// An observer that serializes moment sources to JSON format.
///
/// By default the output is a JSON array of [`CounterSnapshot`]s. With
/// [`wrap_in_snapshot`](Self::wrap_in_snapshot) it becomes a single
/// [`SessionSnapshot`] object, optionally stamped with the current time.
#[derive(Debug, Clone, Default)]
pub struct JsonObserver {
    config: JsonConfig,
}

impl JsonObserver {
    /// Creates a new JSON observer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new JSON observer with the specified configuration.
    pub fn with_config(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Enables or disables pretty-printing.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.config.pretty = enabled;
        self
    }

    /// Enables or disables timestamp inclusion.
    ///
    /// Only has effect when `wrap_in_snapshot` is also enabled.
    pub fn include_timestamp(mut self, enabled: bool) -> Self {
        self.config.include_timestamp = enabled;
        self
    }

    /// Enables or disables wrapping the output in a [`SessionSnapshot`].
    pub fn wrap_in_snapshot(mut self, enabled: bool) -> Self {
        self.config.wrap_in_snapshot = enabled;
        self
    }

    /// Collects sources into a vector of [`CounterSnapshot`].
    pub fn collect<'a>(
        &self,
        sources: impl Iterator<Item = &'a dyn Observable>,
    ) -> Vec<CounterSnapshot> {
        sources.map(CounterSnapshot::from_observable).collect()
    }

    /// Serializes sources to a JSON byte vector.
    pub fn to_json_bytes<'a>(
        &self,
        sources: impl Iterator<Item = &'a dyn Observable>,
    ) -> Result<Vec<u8>> {
        let snapshots = self.collect(sources);

        let bytes = if self.config.wrap_in_snapshot {
            let snapshot = if self.config.include_timestamp {
                SessionSnapshot::with_timestamp(snapshots, current_timestamp_ms())
            } else {
                SessionSnapshot::new(snapshots)
            };
            self.serialize(&snapshot)?
        } else {
            self.serialize(&snapshots)?
        };

        Ok(bytes)
    }

    /// Serializes sources to a JSON string.
    pub fn to_json<'a>(&self, sources: impl Iterator<Item = &'a dyn Observable>) -> Result<String> {
        Ok(String::from_utf8(self.to_json_bytes(sources)?)?)
    }

    fn serialize<T: serde::Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let bytes = if self.config.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        Ok(bytes)
    }
}

/// Returns the current timestamp in milliseconds since Unix epoch.
fn current_timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureParams;
    use crate::clock::ManualClock;
    use crate::counter::PerformanceCounter;

    fn startup() -> PerformanceCounter<ManualClock> {
        let clock = ManualClock::new();
        let mut counter = PerformanceCounter::with_clock(clock.clone()).with_name("startup");
        counter
            .capture(CaptureParams::new().with_id("cfg").with_message("config"))
            .unwrap();
        clock.set(4.5);
        counter.capture(CaptureParams::new().with_id(7u64)).unwrap();
        counter
    }

    #[test]
    fn test_to_json_empty() {
        let observer = JsonObserver::new();
        let sources: Vec<&dyn Observable> = vec![];
        let json = observer.to_json(sources.into_iter()).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_to_json_exact() {
        let counter = startup();
        let sources: Vec<&dyn Observable> = vec![&counter];
        let json = JsonObserver::new().to_json(sources.into_iter()).unwrap();

        assert_eq!(
            json,
            r#"[{"name":"startup","moments":[{"id":"cfg","message":"config","timestamp_ms":0.0},{"id":7,"message":"7","timestamp_ms":4.5,"delta_ms":4.5}]}]"#
        );
    }

    #[test]
    fn test_to_json_pretty() {
        let counter = startup();
        let sources: Vec<&dyn Observable> = vec![&counter];
        let json = JsonObserver::new()
            .pretty(true)
            .to_json(sources.into_iter())
            .unwrap();
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_with_snapshot_and_timestamp() {
        let counter = startup();
        let sources: Vec<&dyn Observable> = vec![&counter];
        let json = JsonObserver::new()
            .wrap_in_snapshot(true)
            .include_timestamp(true)
            .to_json(sources.into_iter())
            .unwrap();

        assert!(json.contains("\"counters\""));
        assert!(json.contains("timestamp_ms"));
        assert!(json.starts_with('{'));
    }

    #[test]
    fn test_round_trip_session() {
        let counter = startup();
        let sources: Vec<&dyn Observable> = vec![&counter];
        let json = JsonObserver::new()
            .wrap_in_snapshot(true)
            .to_json(sources.into_iter())
            .unwrap();

        let session: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(session.timestamp_ms, None);
        assert_eq!(session.counters[0].moments[1].id, 7u64.into());
    }

    #[test]
    fn test_to_json_bytes() {
        let counter = startup();
        let sources: Vec<&dyn Observable> = vec![&counter];
        let bytes = JsonObserver::new().to_json_bytes(sources.into_iter()).unwrap();
        let json = String::from_utf8(bytes).unwrap();
        assert!(json.contains("startup"));
    }
}
