//! Display adapter for capturing services.
//!
//! Services never print anything themselves. [`show`](crate::services::Showable::show)
//! builds an [`Alert`] (title, body and a list of [`AlertAction`]s) and hands
//! it to a [`Presenter`], which decides how to display it and whether to
//! invoke one of the actions.
//!
//! # Provided presenters
//!
//! | Presenter | Behavior |
//! |-----------|----------|
//! | [`WriterPresenter`] | Writes the alert to any [`std::io::Write`] |
//! | [`TracingPresenter`] | Emits the alert as a `tracing` event |
//! | any `FnMut(Alert<'_>)` | Custom handling, e.g. invoking `"clear"` |
//!
//! # Example
//!
//! ```rust
//! use momenti::alert::{Alert, AlertAction, Presenter};
//!
//! let mut cleared = false;
//! {
//!     let alert = Alert::new("startup", "boot\n\t\t: -")
//!         .with_action(AlertAction::new("clear", || cleared = true));
//!
//!     let mut presenter = |alert: Alert<'_>| {
//!         assert_eq!(alert.title(), "startup");
//!         alert.invoke("clear");
//!     };
//!     presenter.display(alert);
//! }
//! assert!(cleared);
//! ```

use std::fmt::{self, Debug};
use std::io::Write;

/// Label of the action bound to a service's `clear()`.
pub const CLEAR_LABEL: &str = "clear";

/// Label of the action that copies the alert text.
pub const COPY_LABEL: &str = "copy";

/// A labelled, one-shot callback offered alongside an alert.
pub struct AlertAction<'a> {
    label: String,
    on_invoke: Box<dyn FnOnce() + 'a>,
}

impl<'a> AlertAction<'a> {
    /// Creates an action with the given label and callback.
    pub fn new(label: impl Into<String>, on_invoke: impl FnOnce() + 'a) -> Self {
        Self {
            label: label.into(),
            on_invoke: Box::new(on_invoke),
        }
    }

    /// Returns the action's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the callback, consuming the action.
    pub fn invoke(self) {
        (self.on_invoke)()
    }
}

impl Debug for AlertAction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// A message to display, with the actions the user may pick from.
#[derive(Debug)]
pub struct Alert<'a> {
    title: String,
    message: String,
    actions: Vec<AlertAction<'a>>,
}

impl<'a> Alert<'a> {
    /// Creates an alert without actions.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            actions: Vec::new(),
        }
    }

    /// Appends an action.
    pub fn with_action(mut self, action: AlertAction<'a>) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends a [`COPY_LABEL`] action that hands [`copy_text`](Self::copy_text)
    /// to `sink`.
    ///
    /// The sink stands in for a clipboard; this crate does not touch one.
    pub fn with_copy(mut self, sink: impl FnOnce(String) + 'a) -> Self {
        let text = self.copy_text();
        self.actions
            .push(AlertAction::new(COPY_LABEL, move || sink(text)));
        self
    }

    /// Returns the title. Empty when the service is unnamed.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offered actions in order.
    pub fn actions(&self) -> &[AlertAction<'a>] {
        &self.actions
    }

    /// Returns the labels of the offered actions.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.actions.iter().map(AlertAction::label)
    }

    /// Text suitable for copying: `title\n\nmessage`, or just the message
    /// when the title is empty.
    pub fn copy_text(&self) -> String {
        if self.title.is_empty() {
            self.message.clone()
        } else {
            format!("{}\n\n{}", self.title, self.message)
        }
    }

    /// Invokes the first action with the given label.
    ///
    /// Returns `false` if no such action was offered.
    pub fn invoke(mut self, label: &str) -> bool {
        match self.actions.iter().position(|a| a.label == label) {
            Some(index) => {
                self.actions.swap_remove(index).invoke();
                true
            }
            None => false,
        }
    }
}

/// Something able to display an [`Alert`].
pub trait Presenter {
    /// Displays the alert. The presenter may invoke at most one action.
    fn display(&mut self, alert: Alert<'_>);
}

impl<F> Presenter for F
where
    F: FnMut(Alert<'_>),
{
    fn display(&mut self, alert: Alert<'_>) {
        self(alert)
    }
}

/// Writes alerts to a [`Write`] sink, followed by the action labels.
///
/// Actions are listed but never invoked. Write errors are logged and
/// otherwise ignored, since displaying a report must not fail the caller.
///
/// # Example
///
/// ```rust
/// use momenti::alert::{Alert, Presenter, WriterPresenter};
///
/// let mut presenter = WriterPresenter::new(Vec::new());
/// presenter.display(Alert::new("boot", "ready\n\t\t: -"));
///
/// let out = String::from_utf8(presenter.into_inner()).unwrap();
/// assert_eq!(out, "boot\n\nready\n\t\t: -\n");
/// ```
#[derive(Debug)]
pub struct WriterPresenter<W: Write> {
    writer: W,
}

impl<W: Write> WriterPresenter<W> {
    /// Wraps the given writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_alert(&mut self, alert: &Alert<'_>) -> std::io::Result<()> {
        writeln!(self.writer, "{}", alert.copy_text())?;
        let labels: Vec<&str> = alert.labels().collect();
        if !labels.is_empty() {
            writeln!(self.writer, "[{}]", labels.join("] ["))?;
        }
        self.writer.flush()
    }
}

impl WriterPresenter<std::io::Stderr> {
    /// A presenter writing to standard error.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> Presenter for WriterPresenter<W> {
    fn display(&mut self, alert: Alert<'_>) {
        if let Err(err) = self.write_alert(&alert) {
            tracing::warn!(error = %err, "failed to write alert");
        }
    }
}

/// Emits alerts as `INFO` events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn display(&mut self, alert: Alert<'_>) {
        tracing::info!(title = alert.title(), "{}", alert.message());
    }
}
