//! Observer implementations for exporting captured moments.
//!
//! Any [`Observable`] source (every [`PerformanceCounter`](crate::counter::PerformanceCounter)
//! is one) can be handed to an observer:
//!
//! - [`table`] - Pretty-print moments and their deltas using the `tabled` crate
//! - [`json`] - Serialize counters to JSON format
//!
//! # Unified Error Handling
//!
//! All observers use a unified [`ObserverError`] type, allowing you to switch
//! between observers without changing error handling code.
//!
//! # Feature Flags
//!
//! - `table` - Enables the [`table`] module
//! - `json` - Enables the [`json`] module
//! - `full` - Enables all observer modules
//!
//! # Example
//!
//! ```rust,ignore
//! use momenti::counter::PerformanceCounter;
//! use momenti::observers::Observable;
//! use momenti::observers::table::TableObserver;
//!
//! let mut boot = PerformanceCounter::new().with_name("boot");
//! boot.capture("kernel")?;
//! boot.capture("userspace")?;
//!
//! let counters: Vec<&dyn Observable> = vec![&boot];
//! println!("{}", TableObserver::new().render(counters.into_iter()));
//! ```

mod error;

pub use error::{ObserverError, Result};

use crate::moment::Moment;
use std::fmt::Debug;

#[cfg(feature = "table")]
pub mod table;

#[cfg(feature = "json")]
pub mod json;

/// A named source of captured moments.
///
/// Observers only need read access, so this trait is object safe and
/// observers accept iterators of `&dyn Observable`.
pub trait Observable: Debug {
    /// Returns the source's name. Empty when unnamed.
    fn name(&self) -> &str;

    /// Returns the captured moments in capture order.
    fn moments(&self) -> &[Moment];
}

/// Display name of a source, substituting `(unnamed)` for an empty name.
#[cfg(any(feature = "table", feature = "serde"))]
pub(crate) fn display_name(source: &dyn Observable) -> String {
    if source.name().is_empty() {
        "(unnamed)".to_string()
    } else {
        source.name().to_string()
    }
}

/// Pairs each moment with its delta from the previous moment of the same
/// source. The first moment has no delta.
pub fn with_deltas(moments: &[Moment]) -> impl Iterator<Item = (&Moment, Option<f64>)> + '_ {
    moments.iter().enumerate().map(move |(i, moment)| {
        let delta = i
            .checked_sub(1)
            .map(|prev| moment.timestamp() - moments[prev].timestamp());
        (moment, delta)
    })
}
