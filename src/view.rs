//! View requests: which moments to report and how.
//!
//! A [`ViewRequest`] is an ordered list of [`Slice`]s. Each slice selects
//! either all stored moments (empty id list) or an explicit ordered list of
//! ids, and is rendered in one of two modes:
//!
//! - **all-durations**: one block per moment with the delta from the
//!   previous moment of the slice;
//! - **span**: a single block with the total time covered by the slice.
//!
//! When the mode is left unspecified, a slice naming more than one id is
//! rendered as a span and anything else as all-durations.
//!
//! # Examples
//!
//! ```rust
//! use momenti::view::{Slice, ViewRequest};
//!
//! let view = ViewRequest::from(vec![
//!     Slice::ids(["parse", "typecheck", "codegen"]),
//!     Slice::ids(["parse", "codegen"]).with_title("compile"),
//!     Slice::all().with_span(false),
//! ]);
//!
//! assert_eq!(view.slices().len(), 3);
//! assert!(view.slices()[0].calculates_span());
//! assert!(!view.slices()[2].calculates_span());
//! ```

use crate::moment::MomentId;

/// A single view over a counter's moments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slice {
    /// Ordered ids to include. Empty means every stored moment, in store order.
    pub ids: Vec<MomentId>,
    /// Rendering mode. `None` means span mode iff more than one id is named.
    pub should_calculate_span: Option<bool>,
    /// Title used in span mode instead of the first moment's message.
    pub title: Option<String>,
}

impl Slice {
    /// A slice over every stored moment.
    pub fn all() -> Self {
        Self::default()
    }

    /// A slice over the given ids, in the given order.
    pub fn ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<MomentId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Forces span (`true`) or all-durations (`false`) rendering.
    pub fn with_span(mut self, should_calculate_span: bool) -> Self {
        self.should_calculate_span = Some(should_calculate_span);
        self
    }

    /// Sets the span title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns the effective rendering mode, applying the default.
    pub fn calculates_span(&self) -> bool {
        self.should_calculate_span.unwrap_or(self.ids.len() > 1)
    }
}

/// An ordered list of slices rendered into one report.
///
/// The default request holds a single [`Slice::all`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRequest {
    slices: Vec<Slice>,
}

impl ViewRequest {
    /// Creates a request from the given slices.
    ///
    /// An empty list is allowed and renders as an empty report.
    pub fn new(slices: Vec<Slice>) -> Self {
        Self { slices }
    }

    /// Appends a slice, returning `self` for chaining.
    pub fn with_slice(mut self, slice: Slice) -> Self {
        self.slices.push(slice);
        self
    }

    /// Returns the slices in rendering order.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }
}

impl Default for ViewRequest {
    fn default() -> Self {
        Self::new(vec![Slice::all()])
    }
}

impl From<Slice> for ViewRequest {
    fn from(slice: Slice) -> Self {
        Self::new(vec![slice])
    }
}

impl From<Vec<Slice>> for ViewRequest {
    fn from(slices: Vec<Slice>) -> Self {
        Self::new(slices)
    }
}
