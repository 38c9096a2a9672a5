//! Capability traits shared by every capturing service.
//!
//! A capturing service accumulates diagnostic data in memory and renders it
//! on demand. The contract is split into small capabilities:
//!
//! - [`Clearable`] - the service can drop everything it has captured;
//! - [`Display`] - the service renders itself as text;
//! - [`Showable`] - the service can hand its rendering to a
//!   [`Presenter`], together with a `"copy"` action and a `"clear"` action
//!   bound to [`Clearable::clear`].
//!
//! # Available services
//!
//! | Service | Description |
//! |---------|-------------|
//! | [`PerformanceCounter`](crate::counter::PerformanceCounter) | Timestamped moments and timing reports |
//! | [`Logger`] | Append-only list of lines |
//!
//! # Example
//!
//! ```rust
//! use momenti::alert::{Alert, CLEAR_LABEL};
//! use momenti::services::{Logger, Showable};
//!
//! let mut logger = Logger::new().with_name("events");
//! logger.add("connected");
//! logger.add("synced");
//!
//! let mut presenter = |alert: Alert<'_>| {
//!     assert_eq!(alert.title(), "events");
//!     assert_eq!(alert.message(), "connected\nsynced");
//!     assert_eq!(alert.labels().collect::<Vec<_>>(), vec!["copy", "clear"]);
//!     alert.invoke(CLEAR_LABEL);
//! };
//! logger.show(&mut presenter);
//!
//! assert!(logger.is_empty());
//! ```

mod logger;

pub use logger::Logger;

use crate::alert::{Alert, AlertAction, Presenter, CLEAR_LABEL};
use std::fmt::Display;

/// A service whose captured data can be discarded.
pub trait Clearable {
    /// Discards everything captured so far. Calling it twice is harmless.
    fn clear(&mut self);
}

/// A service that can be rendered and shown through a [`Presenter`].
///
/// Every alert offers two actions, in order: [`COPY_LABEL`](crate::alert::COPY_LABEL) and
/// [`CLEAR_LABEL`].
pub trait Showable: Clearable + Display {
    /// Title used for the alert. Empty by default.
    fn title(&self) -> &str {
        ""
    }

    /// Renders the service and hands the text to `presenter`.
    ///
    /// The copy action emits the copied text through [`log_copied`].
    fn show(&mut self, presenter: &mut dyn Presenter) {
        self.show_with_copy(presenter, &mut log_copied);
    }

    /// Like [`show`](Self::show), but the copy action hands the text to
    /// `copy` instead.
    fn show_with_copy(&mut self, presenter: &mut dyn Presenter, copy: &mut dyn FnMut(String)) {
        let body = self.to_string();
        present(self, body, presenter, copy);
    }
}

/// Shows `body` on behalf of `service`.
///
/// The alert offers a [`COPY_LABEL`](crate::alert::COPY_LABEL) action passing
/// [`Alert::copy_text`] to `copy`, then a [`CLEAR_LABEL`] action bound to
/// the service's [`Clearable::clear`]. Services rendering a non-default view
/// use this directly instead of [`Showable::show`].
pub fn present<S>(
    service: &mut S,
    body: String,
    presenter: &mut dyn Presenter,
    copy: &mut dyn FnMut(String),
) where
    S: Showable + ?Sized,
{
    let title = service.title().to_string();
    let alert = Alert::new(title, body)
        .with_copy(copy)
        .with_action(AlertAction::new(CLEAR_LABEL, move || service.clear()));
    presenter.display(alert);
}

/// Default copy sink: emits the copied text as an `INFO` event.
pub fn log_copied(text: String) {
    tracing::info!(target: "momenti::copy", "{}", text);
}
