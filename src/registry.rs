//! Tag-keyed collection of lazily created counters.
//!
//! A [`CounterRegistry`] is an explicit, owned map from an arbitrary string
//! tag to a [`PerformanceCounter`]. The first lookup of a tag creates the
//! counter, named after the tag; later lookups return the same instance.
//! Counters in a registry share the registry's clock and have disjoint id
//! spaces.
//!
//! # Example
//!
//! ```rust
//! use momenti::registry::CounterRegistry;
//!
//! let mut registry = CounterRegistry::new();
//!
//! registry.get("network").capture("request sent").unwrap();
//! registry.get("render").capture("frame start").unwrap();
//! registry.get("network").capture("response received").unwrap();
//!
//! assert_eq!(registry.len(), 2);
//! assert_eq!(registry.get("network").len(), 2);
//! assert_eq!(registry.get("network").name(), "network");
//! ```

use std::collections::HashMap;

use crate::clock::{Clock, MonotonicClock};
use crate::counter::PerformanceCounter;

/// Lazily creates and caches one counter per tag.
#[derive(Debug)]
pub struct CounterRegistry<C: Clock + Clone = MonotonicClock> {
    clock: C,
    counters: HashMap<String, PerformanceCounter<C>>,
}

impl CounterRegistry<MonotonicClock> {
    /// Creates an empty registry whose counters share one [`MonotonicClock`].
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for CounterRegistry<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Clone> CounterRegistry<C> {
    /// Creates an empty registry handing clones of `clock` to its counters.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            counters: HashMap::new(),
        }
    }

    /// Returns the counter for `tag`, creating it on first use.
    pub fn get(&mut self, tag: &str) -> &mut PerformanceCounter<C> {
        self.counters.entry(tag.to_string()).or_insert_with(|| {
            tracing::debug!(tag, "creating counter");
            PerformanceCounter::with_clock(self.clock.clone()).with_name(tag)
        })
    }

    /// Returns the counter for `tag` without creating it.
    pub fn find(&self, tag: &str) -> Option<&PerformanceCounter<C>> {
        self.counters.get(tag)
    }

    /// Returns `true` if a counter exists for `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.counters.contains_key(tag)
    }

    /// Removes and returns the counter for `tag`.
    pub fn remove(&mut self, tag: &str) -> Option<PerformanceCounter<C>> {
        self.counters.remove(tag)
    }

    /// Returns the existing tags in arbitrary order.
    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.counters.keys().map(String::as_str)
    }

    /// Iterates over all counters in arbitrary order.
    pub fn counters(&self) -> impl Iterator<Item = &PerformanceCounter<C>> + '_ {
        self.counters.values()
    }

    /// Returns the number of counters.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Returns `true` if no counter has been created yet.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
