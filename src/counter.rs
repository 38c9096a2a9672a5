//! The performance counter: moment store, capture and timing reports.
//!
//! A [`PerformanceCounter`] records named, timestamped moments during a run
//! and renders them afterwards as a human-readable timing report.
//!
//! # Architecture
//!
//! ```text
//!   capture(..) ──► validate id / policy ──► stamp with Clock ──► store
//!                                                                  │
//!   render(view) ◄── per slice: resolve ids ─► check order ─► format
//! ```
//!
//! The store preserves insertion order, which is the order used by slices
//! that do not name explicit ids. It holds at most one moment per id and is
//! only ever emptied as a whole.
//!
//! # Failure containment
//!
//! Only [`capture`](PerformanceCounter::capture) returns errors. When a
//! slice names an unknown id or lists moments against their time order, the
//! slice renders as the error text and the rest of the report is unaffected.
//!
//! # Thread Safety
//!
//! Counters are meant for single-threaded use and need `&mut self` to
//! capture. Share one across threads only behind a lock, or use one counter
//! per worker.

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};

use crate::alert::Presenter;
use crate::capture::{Capture, CollisionPolicy};
use crate::clock::{Clock, MonotonicClock};
use crate::error::{MomentError, Result};
use crate::moment::{Moment, MomentId};
use crate::observers::Observable;
use crate::report::{self, BLOCK_SEPARATOR};
use crate::services::{self, Clearable, Showable};
use crate::view::{Slice, ViewRequest};

/// Records moments and renders timing reports.
///
/// # Examples
///
/// ```rust
/// use momenti::capture::CaptureParams;
/// use momenti::clock::ManualClock;
/// use momenti::counter::PerformanceCounter;
/// use momenti::view::Slice;
///
/// let clock = ManualClock::new();
/// let mut counter = PerformanceCounter::with_clock(clock.clone());
///
/// counter.capture(CaptureParams::new().with_id("A").with_message("start")).unwrap();
/// clock.set(10.0);
/// counter.capture(CaptureParams::new().with_id("B").with_message("mid")).unwrap();
/// clock.set(30.0);
/// counter.capture(CaptureParams::new().with_id("C").with_message("end")).unwrap();
///
/// let durations = counter.render(&Slice::ids(["A", "B", "C"]).with_span(false).into());
/// assert_eq!(durations, "start\n\t\t: -\n\nmid\n\t\t: 10 ms\n\nend\n\t\t: 20 ms");
///
/// let span = counter.render(&Slice::ids(["A", "B", "C"]).into());
/// assert_eq!(span, "start\n\t\t: 30 ms");
/// ```
pub struct PerformanceCounter<C: Clock = MonotonicClock> {
    name: String,
    clock: C,
    moments: Vec<Moment>,
    index: HashMap<MomentId, usize>,
}

impl PerformanceCounter<MonotonicClock> {
    /// Creates an empty, unnamed counter using a fresh [`MonotonicClock`].
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for PerformanceCounter<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> PerformanceCounter<C> {
    /// Creates an empty, unnamed counter reading the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            name: String::new(),
            clock,
            moments: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Sets the name of this counter, returning `self` for method chaining.
    ///
    /// The name is used as the alert title by [`show`](Showable::show) and
    /// by observers.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Returns the counter's name. Empty if never set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the clock used to stamp moments.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Records a moment.
    ///
    /// Accepts a bare message or a [`CaptureParams`](crate::capture::CaptureParams).
    /// In order:
    ///
    /// 1. if capturing is disabled, nothing happens;
    /// 2. if clearing is requested, the store is emptied;
    /// 3. if the id is already stored, the capture fails with
    ///    [`MomentError::Collision`] under [`CollisionPolicy::Fail`] or is
    ///    skipped under [`CollisionPolicy::DontAdd`];
    /// 4. otherwise the clock is read once and the moment is appended.
    ///
    /// Without an explicit id a random numeric id is used, so such moments
    /// cannot practically be looked up again by id.
    ///
    /// # Errors
    ///
    /// Returns [`MomentError::Collision`] when the id is taken and the policy
    /// is [`CollisionPolicy::Fail`]. The existing moment is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use momenti::capture::{CaptureParams, CollisionPolicy};
    /// use momenti::counter::PerformanceCounter;
    ///
    /// let mut counter = PerformanceCounter::new();
    /// counter.capture(CaptureParams::new().with_id(1u64)).unwrap();
    ///
    /// assert!(counter.capture(CaptureParams::new().with_id(1u64)).is_err());
    /// assert!(counter
    ///     .capture(
    ///         CaptureParams::new()
    ///             .with_id(1u64)
    ///             .with_collision_policy(CollisionPolicy::DontAdd)
    ///     )
    ///     .is_ok());
    /// assert_eq!(counter.len(), 1);
    /// ```
    pub fn capture(&mut self, request: impl Into<Capture>) -> Result<()> {
        let params = request.into().into_params();

        if !params.should_capture {
            tracing::trace!(counter = %self.name, "capture disabled, skipping");
            return Ok(());
        }

        if params.should_clear {
            self.clear();
        }

        let id = params.id.unwrap_or_else(MomentId::random);

        if self.index.contains_key(&id) {
            return match params.id_collision_policy {
                CollisionPolicy::Fail => {
                    tracing::debug!(counter = %self.name, %id, "moment id already used");
                    Err(MomentError::Collision { id })
                }
                CollisionPolicy::DontAdd => {
                    tracing::trace!(counter = %self.name, %id, "moment id already used, not adding");
                    Ok(())
                }
            };
        }

        let message = params.message.unwrap_or_else(|| id.to_string());
        let timestamp = self.clock.now();

        tracing::debug!(counter = %self.name, %id, %message, timestamp, "moment captured");

        self.index.insert(id.clone(), self.moments.len());
        self.moments.push(Moment::new(id, message, timestamp));
        Ok(())
    }

    /// Returns `true` if a moment with the given id is stored.
    pub fn has_moment(&self, id: impl Into<MomentId>) -> bool {
        self.index.contains_key(&id.into())
    }

    /// Returns the moment stored under `id`, if any.
    pub fn get(&self, id: impl Into<MomentId>) -> Option<&Moment> {
        self.index
            .get(&id.into())
            .map(|&position| &self.moments[position])
    }

    /// Returns all stored moments in capture order.
    pub fn moments(&self) -> &[Moment] {
        &self.moments
    }

    /// Returns the number of stored moments.
    pub fn len(&self) -> usize {
        self.moments.len()
    }

    /// Returns `true` if no moment is stored.
    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }

    /// Removes every stored moment.
    pub fn clear(&mut self) {
        tracing::debug!(counter = %self.name, moments = self.moments.len(), "moments cleared");
        self.moments.clear();
        self.index.clear();
    }

    /// Renders the report for `view`.
    ///
    /// Each slice is rendered independently and the results are joined with
    /// a blank line. A slice that fails to resolve or validate renders as
    /// the error message. Rendering does not modify the counter, so
    /// repeated calls with the same view return identical text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use momenti::capture::CaptureParams;
    /// use momenti::counter::PerformanceCounter;
    /// use momenti::view::{Slice, ViewRequest};
    ///
    /// let mut counter = PerformanceCounter::new();
    /// counter.capture(CaptureParams::new().with_id("A")).unwrap();
    ///
    /// let report = counter.render(&ViewRequest::from(vec![
    ///     Slice::ids(["A", "Z"]),
    ///     Slice::ids(["A"]),
    /// ]));
    /// assert_eq!(report, "no moment with id <Z>\n\nA\n\t\t: -");
    /// ```
    pub fn render(&self, view: &ViewRequest) -> String {
        tracing::trace!(counter = %self.name, slices = view.slices().len(), "rendering report");
        view.slices()
            .iter()
            .map(|slice| self.render_slice(slice))
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR)
    }

    /// Renders `view` and hands it to `presenter`, offering a `"copy"`
    /// action and a `"clear"` action bound to [`clear`](Self::clear).
    ///
    /// Copied text goes to [`services::log_copied`].
    pub fn show_view(&mut self, view: &ViewRequest, presenter: &mut dyn Presenter) {
        self.show_view_with_copy(view, presenter, &mut services::log_copied);
    }

    /// Like [`show_view`](Self::show_view), with copied text handed to `copy`.
    pub fn show_view_with_copy(
        &mut self,
        view: &ViewRequest,
        presenter: &mut dyn Presenter,
        copy: &mut dyn FnMut(String),
    ) {
        let body = self.render(view);
        services::present(self, body, presenter, copy);
    }

    fn render_slice(&self, slice: &Slice) -> String {
        match self.resolve(&slice.ids) {
            Ok(moments) if slice.calculates_span() => {
                report::render_span(&moments, slice.title.as_deref())
            }
            Ok(moments) => report::render_durations(&moments),
            Err(err) => {
                tracing::debug!(counter = %self.name, error = %err, "slice failed");
                err.to_string()
            }
        }
    }

    /// Looks up the slice's moments and checks that they are listed in
    /// non-decreasing time order.
    fn resolve(&self, ids: &[MomentId]) -> Result<Vec<&Moment>> {
        let moments = if ids.is_empty() {
            self.moments.iter().collect::<Vec<_>>()
        } else {
            ids.iter()
                .map(|id| {
                    self.index
                        .get(id)
                        .map(|&position| &self.moments[position])
                        .ok_or_else(|| MomentError::MissingMoment { id: id.clone() })
                })
                .collect::<Result<Vec<_>>>()?
        };

        for pair in moments.windows(2) {
            let (first, second) = (pair[0], pair[1]);
            if first.timestamp() > second.timestamp() {
                return Err(MomentError::OutOfOrder {
                    first_id: first.id().clone(),
                    first_message: first.message().to_string(),
                    second_id: second.id().clone(),
                    second_message: second.message().to_string(),
                });
            }
        }

        Ok(moments)
    }
}

impl<C: Clock> Clearable for PerformanceCounter<C> {
    fn clear(&mut self) {
        PerformanceCounter::clear(self);
    }
}

impl<C: Clock> Display for PerformanceCounter<C> {
    /// Renders the default view: every moment, all-durations mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&ViewRequest::default()))
    }
}

impl<C: Clock> Showable for PerformanceCounter<C> {
    fn title(&self) -> &str {
        &self.name
    }
}

impl<C: Clock> Observable for PerformanceCounter<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn moments(&self) -> &[Moment] {
        &self.moments
    }
}

impl<C: Clock> Debug for PerformanceCounter<C> {
    /// Output format: `name{ id@timestamp ... }`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.name)?;
        for moment in &self.moments {
            write!(f, " {}@{}", moment.id(), moment.timestamp())?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::{Alert, CLEAR_LABEL, COPY_LABEL};
    use crate::capture::CaptureParams;
    use crate::clock::ManualClock;

    fn id(id: &str) -> CaptureParams {
        CaptureParams::new().with_id(id)
    }

    /// A(t=0,"start"), B(t=10,"mid"), C(t=30,"end").
    fn three_moments() -> (PerformanceCounter<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let mut counter = PerformanceCounter::with_clock(clock.clone());
        counter.capture(id("A").with_message("start")).unwrap();
        clock.set(10.0);
        counter.capture(id("B").with_message("mid")).unwrap();
        clock.set(30.0);
        counter.capture(id("C").with_message("end")).unwrap();
        (counter, clock)
    }

    #[test]
    fn test_new_is_empty() {
        let counter = PerformanceCounter::new();
        assert!(counter.is_empty());
        assert_eq!(counter.len(), 0);
        assert_eq!(counter.name(), "");
        assert_eq!(counter.to_string(), "");
    }

    #[test]
    fn test_has_moment() {
        let (counter, _) = three_moments();
        assert!(counter.has_moment("A"));
        assert!(counter.has_moment("B"));
        assert!(counter.has_moment("C"));
        assert!(!counter.has_moment("D"));
        assert!(!counter.has_moment(1u64));
    }

    #[test]
    fn test_message_capture_uses_random_id() {
        let mut counter = PerformanceCounter::new();
        counter.capture("hello").unwrap();

        let moment = &counter.moments()[0];
        assert_eq!(moment.message(), "hello");
        assert!(matches!(moment.id(), MomentId::Number(_)));
        assert!(counter.has_moment(moment.id()));
    }

    #[test]
    fn test_message_defaults_to_id() {
        let mut counter = PerformanceCounter::new();
        counter.capture(id("boot")).unwrap();
        counter.capture(CaptureParams::new().with_id(17u64)).unwrap();

        assert_eq!(counter.get("boot").unwrap().message(), "boot");
        assert_eq!(counter.get(17u64).unwrap().message(), "17");
    }

    #[test]
    fn test_collision_fail_keeps_existing() {
        let (mut counter, clock) = three_moments();
        clock.set(99.0);

        let err = counter
            .capture(id("A").with_message("again"))
            .unwrap_err();

        assert_eq!(err, MomentError::Collision { id: "A".into() });
        let a = counter.get("A").unwrap();
        assert_eq!(a.message(), "start");
        assert_eq!(a.timestamp(), 0.0);
        assert_eq!(counter.len(), 3);
    }

    #[test]
    fn test_collision_dont_add_keeps_existing() {
        let (mut counter, clock) = three_moments();
        clock.set(99.0);

        counter
            .capture(
                id("B")
                    .with_message("other")
                    .with_collision_policy(CollisionPolicy::DontAdd),
            )
            .unwrap();

        let b = counter.get("B").unwrap();
        assert_eq!(b.message(), "mid");
        assert_eq!(b.timestamp(), 10.0);
        assert_eq!(counter.len(), 3);
    }

    #[test]
    fn test_clock_read_only_on_success() {
        let (mut counter, clock) = three_moments();
        assert_eq!(clock.reads(), 3);

        let _ = counter.capture(id("A"));
        counter
            .capture(id("A").with_collision_policy(CollisionPolicy::DontAdd))
            .unwrap();
        counter.capture(id("D").with_capture(false)).unwrap();
        assert_eq!(clock.reads(), 3);

        counter.capture(id("D")).unwrap();
        assert_eq!(clock.reads(), 4);
    }

    #[test]
    fn test_should_capture_false_is_noop() {
        let (mut counter, _) = three_moments();
        counter
            .capture(id("X").with_capture(false).with_clear(true))
            .unwrap();
        assert_eq!(counter.len(), 3);
        assert!(!counter.has_moment("X"));
    }

    #[test]
    fn test_should_clear_empties_before_insert() {
        let (mut counter, _) = three_moments();
        counter.capture(id("A").with_clear(true)).unwrap();

        assert_eq!(counter.len(), 1);
        assert!(counter.has_moment("A"));
        assert!(!counter.has_moment("B"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (mut counter, _) = three_moments();
        counter.clear();
        counter.clear();
        assert!(counter.is_empty());
        assert!(!counter.has_moment("A"));
        assert_eq!(counter.render(&Slice::all().into()), "");
        assert_eq!(counter.render(&Slice::all().with_span(true).into()), "");
    }

    #[test]
    fn test_ids_reusable_after_clear() {
        let (mut counter, _) = three_moments();
        counter.clear();
        counter.capture(id("A")).unwrap();
        assert_eq!(counter.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (counter, _) = three_moments();
        let ids: Vec<String> = counter.moments().iter().map(|m| m.id().to_string()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_render_default_is_all_durations() {
        let (counter, _) = three_moments();
        assert_eq!(
            counter.to_string(),
            "start\n\t\t: -\n\nmid\n\t\t: 10 ms\n\nend\n\t\t: 20 ms"
        );
        assert_eq!(counter.render(&ViewRequest::default()), counter.to_string());
    }

    #[test]
    fn test_render_all_durations_explicit_ids() {
        let (counter, _) = three_moments();
        let view = Slice::ids(["A", "B", "C"]).with_span(false).into();
        assert_eq!(
            counter.render(&view),
            "start\n\t\t: -\n\nmid\n\t\t: 10 ms\n\nend\n\t\t: 20 ms"
        );
    }

    #[test]
    fn test_render_span() {
        let (counter, _) = three_moments();
        let view = Slice::ids(["A", "B", "C"]).with_span(true).into();
        assert_eq!(counter.render(&view), "start\n\t\t: 30 ms");
    }

    #[test]
    fn test_render_span_default_for_multiple_ids() {
        let (counter, _) = three_moments();
        assert_eq!(counter.render(&Slice::ids(["B", "C"]).into()), "mid\n\t\t: 20 ms");
    }

    #[test]
    fn test_render_span_title() {
        let (counter, _) = three_moments();
        let view = Slice::ids(["A", "C"]).with_title("total").into();
        assert_eq!(counter.render(&view), "total\n\t\t: 30 ms");
    }

    #[test]
    fn test_render_span_over_all() {
        let (counter, _) = three_moments();
        let view = Slice::all().with_span(true).into();
        assert_eq!(counter.render(&view), "start\n\t\t: 30 ms");
    }

    #[test]
    fn test_single_id_defaults_to_durations() {
        let (counter, _) = three_moments();
        assert_eq!(counter.render(&Slice::ids(["C"]).into()), "end\n\t\t: -");
    }

    #[test]
    fn test_missing_id_is_slice_local() {
        let (counter, _) = three_moments();
        let view = ViewRequest::from(vec![Slice::ids(["A", "Z"]), Slice::ids(["A", "C"])]);
        assert_eq!(
            counter.render(&view),
            "no moment with id <Z>\n\nstart\n\t\t: 30 ms"
        );
    }

    #[test]
    fn test_out_of_order_names_both_ids() {
        let (counter, _) = three_moments();
        let report = counter.render(&Slice::ids(["C", "A"]).into());
        assert_eq!(
            report,
            "id <C> (end) did not take place before id <A> (start)"
        );
    }

    #[test]
    fn test_out_of_order_is_slice_local() {
        let (counter, _) = three_moments();
        let view = ViewRequest::from(vec![Slice::ids(["C", "A"]), Slice::ids(["A", "C"])]);
        assert_eq!(
            counter.render(&view),
            "id <C> (end) did not take place before id <A> (start)\n\nstart\n\t\t: 30 ms"
        );
    }

    #[test]
    fn test_out_of_order_in_store_is_reported() {
        let clock = ManualClock::starting_at(50.0);
        let mut counter = PerformanceCounter::with_clock(clock.clone());
        counter.capture(id("late")).unwrap();
        clock.set(20.0);
        counter.capture(id("early")).unwrap();

        assert_eq!(
            counter.to_string(),
            "id <late> (late) did not take place before id <early> (early)"
        );
    }

    #[test]
    fn test_equal_timestamps_are_in_order() {
        let clock = ManualClock::starting_at(5.0);
        let mut counter = PerformanceCounter::with_clock(clock);
        counter.capture(id("x")).unwrap();
        counter.capture(id("y")).unwrap();
        assert_eq!(counter.render(&Slice::ids(["y", "x"]).into()), "y\n\t\t: 0 ms");
    }

    #[test]
    fn test_durations_follow_requested_list() {
        let (counter, _) = three_moments();
        let view = Slice::ids(["A", "C"]).with_span(false).into();
        assert_eq!(counter.render(&view), "start\n\t\t: -\n\nend\n\t\t: 30 ms");
    }

    #[test]
    fn test_empty_view_renders_empty() {
        let (counter, _) = three_moments();
        assert_eq!(counter.render(&ViewRequest::new(Vec::new())), "");
    }

    #[test]
    fn test_render_is_idempotent() {
        let (counter, _) = three_moments();
        let view = ViewRequest::from(vec![
            Slice::all(),
            Slice::ids(["A", "C"]),
            Slice::ids(["C", "B"]),
        ]);
        assert_eq!(counter.render(&view), counter.render(&view));
    }

    #[test]
    fn test_show_view_forwards_report_and_clear() {
        let (counter, _) = three_moments();
        let mut counter = counter.with_name("startup");
        let mut received = String::new();

        counter.show_view(
            &Slice::ids(["A", "C"]).into(),
            &mut |alert: Alert<'_>| {
                received = alert.copy_text();
                assert!(alert.invoke(CLEAR_LABEL));
            },
        );

        assert_eq!(received, "startup\n\nstart\n\t\t: 30 ms");
        assert!(counter.is_empty());
    }

    #[test]
    fn test_show_view_copy_action() {
        let (counter, _) = three_moments();
        let mut counter = counter.with_name("startup");
        let mut labels = Vec::new();
        let mut copied = Vec::new();

        counter.show_view_with_copy(
            &Slice::ids(["A", "C"]).into(),
            &mut |alert: Alert<'_>| {
                labels = alert.labels().map(str::to_string).collect();
                assert!(alert.invoke(COPY_LABEL));
            },
            &mut |text: String| copied.push(text),
        );

        assert_eq!(labels, vec![COPY_LABEL, CLEAR_LABEL]);
        assert_eq!(copied, vec!["startup\n\nstart\n\t\t: 30 ms".to_string()]);
        assert_eq!(counter.len(), 3);
    }

    #[test]
    fn test_show_default_view_without_clearing() {
        let (mut counter, _) = three_moments();
        let mut received = String::new();

        counter.show(&mut |alert: Alert<'_>| received = alert.message().to_string());

        assert_eq!(received, counter.to_string());
        assert_eq!(counter.len(), 3);
    }

    #[test]
    fn test_debug() {
        let (counter, _) = three_moments();
        let counter = counter.with_name("dbg");
        assert_eq!(format!("{:?}", counter), "dbg{ A@0 B@10 C@30 }");
    }
}
