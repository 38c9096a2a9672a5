//! Capture requests.
//!
//! [`PerformanceCounter::capture`](crate::counter::PerformanceCounter::capture)
//! accepts anything convertible into a [`Capture`]: a bare message string or a
//! fully specified [`CaptureParams`]. Both forms are normalized into one
//! [`CaptureParams`] before processing.
//!
//! # Examples
//!
//! ```rust
//! use momenti::capture::{CaptureParams, CollisionPolicy};
//! use momenti::counter::PerformanceCounter;
//!
//! let mut counter = PerformanceCounter::new();
//!
//! // Bare message: random id, message as given.
//! counter.capture("config loaded").unwrap();
//!
//! // Structured request.
//! counter
//!     .capture(
//!         CaptureParams::new()
//!             .with_id("first-frame")
//!             .with_message("first frame rendered")
//!             .with_collision_policy(CollisionPolicy::DontAdd),
//!     )
//!     .unwrap();
//!
//! assert!(counter.has_moment("first-frame"));
//! assert_eq!(counter.len(), 2);
//! ```

use crate::moment::MomentId;

/// What to do when a capture reuses an id that is already stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Reject the capture with [`MomentError::Collision`](crate::error::MomentError::Collision).
    #[default]
    Fail,
    /// Silently keep the existing moment.
    DontAdd,
}

/// A fully specified capture request.
///
/// All fields are optional in spirit: the defaults are a random id, the id's
/// string form as message, [`CollisionPolicy::Fail`], capturing enabled and no
/// clearing.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureParams {
    /// Id of the moment. `None` means a random numeric id.
    pub id: Option<MomentId>,
    /// Display message. `None` means the id's string form.
    pub message: Option<String>,
    /// Behavior when `id` is already stored.
    pub id_collision_policy: CollisionPolicy,
    /// When `false` the capture is a no-op.
    pub should_capture: bool,
    /// When `true` the store is emptied before inserting.
    pub should_clear: bool,
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self {
            id: None,
            message: None,
            id_collision_policy: CollisionPolicy::default(),
            should_capture: true,
            should_clear: false,
        }
    }
}

impl CaptureParams {
    /// Creates a request with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the moment id.
    pub fn with_id(mut self, id: impl Into<MomentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the display message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the collision policy.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.id_collision_policy = policy;
        self
    }

    /// Enables or disables the capture.
    ///
    /// Handy for instrumentation that should only record under a runtime
    /// condition without branching at the call site.
    pub fn with_capture(mut self, should_capture: bool) -> Self {
        self.should_capture = should_capture;
        self
    }

    /// Requests that the store be cleared before this moment is inserted.
    pub fn with_clear(mut self, should_clear: bool) -> Self {
        self.should_clear = should_clear;
        self
    }
}

/// The two accepted shapes of a capture request.
#[derive(Debug, Clone, PartialEq)]
pub enum Capture {
    /// A bare message; everything else takes its default.
    Message(String),
    /// A structured request.
    Params(CaptureParams),
}

impl Capture {
    /// Normalizes the request into a single [`CaptureParams`].
    pub fn into_params(self) -> CaptureParams {
        match self {
            Capture::Message(message) => CaptureParams::new().with_message(message),
            Capture::Params(params) => params,
        }
    }
}

impl From<&str> for Capture {
    fn from(message: &str) -> Self {
        Capture::Message(message.to_string())
    }
}

impl From<String> for Capture {
    fn from(message: String) -> Self {
        Capture::Message(message)
    }
}

impl From<CaptureParams> for Capture {
    fn from(params: CaptureParams) -> Self {
        Capture::Params(params)
    }
}
