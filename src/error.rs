//! Error type for capturing and querying moments.
//!
//! [`MomentError`] covers the three ways a counter can reject a request:
//!
//! | Variant | Raised by | Surfaces as |
//! |---------|-----------|-------------|
//! | [`Collision`](MomentError::Collision) | [`capture`](crate::counter::PerformanceCounter::capture) | `Err` to the caller |
//! | [`MissingMoment`](MomentError::MissingMoment) | slice resolution | the slice's rendered text |
//! | [`OutOfOrder`](MomentError::OutOfOrder) | slice validation | the slice's rendered text |
//!
//! Rendering never fails outward: a broken slice is replaced by the error's
//! message and its siblings render normally.
//!
//! # Example
//!
//! ```rust
//! use momenti::counter::PerformanceCounter;
//! use momenti::capture::CaptureParams;
//! use momenti::error::MomentError;
//!
//! let mut counter = PerformanceCounter::new();
//! counter.capture(CaptureParams::new().with_id("boot")).unwrap();
//!
//! let err = counter.capture(CaptureParams::new().with_id("boot")).unwrap_err();
//! assert!(matches!(err, MomentError::Collision { .. }));
//! assert_eq!(err.to_string(), "PerformanceCounter.capture(): id <boot> was already used");
//! ```

use crate::moment::MomentId;
use thiserror::Error;

/// Errors produced while capturing or resolving moments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MomentError {
    /// A capture reused an id that is already stored, under
    /// [`CollisionPolicy::Fail`](crate::capture::CollisionPolicy::Fail).
    #[error("PerformanceCounter.capture(): id <{id}> was already used")]
    Collision {
        /// The id that was already present.
        id: MomentId,
    },

    /// A slice referenced an id with no stored moment.
    #[error("no moment with id <{id}>")]
    MissingMoment {
        /// The id that could not be found.
        id: MomentId,
    },

    /// Two adjacent moments of a slice are listed in an order that
    /// contradicts their timestamps.
    #[error(
        "id <{first_id}> ({first_message}) did not take place before id <{second_id}> ({second_message})"
    )]
    OutOfOrder {
        /// Id of the moment listed first in the request.
        first_id: MomentId,
        /// Message of the moment listed first in the request.
        first_message: String,
        /// Id of the moment listed right after it.
        second_id: MomentId,
        /// Message of the moment listed right after it.
        second_message: String,
    },
}

/// Result type for moment operations.
pub type Result<T> = std::result::Result<T, MomentError>;
