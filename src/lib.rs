//! # Momenti - In-Process Timing Reports
//!
//! A Rust library for recording a sequence of named, timestamped events
//! ("moments") during a single run of an application and rendering them
//! afterwards as a human-readable timing report.
//!
//! It is a lightweight diagnostic counterpart to tracing infrastructure:
//! instead of emitting spans to an external collector, moments accumulate in
//! memory and are formatted on demand, for display or logging.
//!
//! ## The Model
//!
//! - A [`PerformanceCounter`](counter::PerformanceCounter) owns an
//!   insertion-ordered store of [`Moment`](moment::Moment)s, at most one per
//!   [`MomentId`](moment::MomentId).
//! - [`capture`](counter::PerformanceCounter::capture) stamps a new moment
//!   with the counter's [`Clock`](clock::Clock), applying a
//!   [`CollisionPolicy`](capture::CollisionPolicy) when the id is taken.
//! - [`render`](counter::PerformanceCounter::render) turns a
//!   [`ViewRequest`](view::ViewRequest) into text. Each
//!   [`Slice`](view::Slice) of the request becomes either one block per
//!   moment with the delta from its predecessor, or a single span block.
//!
//! ```text
//!   capture("parse")      ─┐
//!   capture("typecheck")   ├─► [ parse@0.0 | typecheck@12.4 | codegen@31.0 ]
//!   capture("codegen")    ─┘                      │
//!                                                 ▼
//!                               render(Slice::all())         render(Slice::ids(["parse", "codegen"]))
//!                               parse                        parse
//!                               		: -                    		: 31 ms
//!
//!                               typecheck
//!                               		: 12 ms
//!
//!                               codegen
//!                               		: 19 ms
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use momenti::capture::CaptureParams;
//! use momenti::counter::PerformanceCounter;
//! use momenti::view::{Slice, ViewRequest};
//!
//! let mut counter = PerformanceCounter::new().with_name("startup");
//!
//! counter.capture(CaptureParams::new().with_id("config").with_message("config loaded")).unwrap();
//! counter.capture(CaptureParams::new().with_id("db").with_message("database connected")).unwrap();
//! counter.capture(CaptureParams::new().with_id("http").with_message("listening")).unwrap();
//!
//! // Every moment with its delta from the previous one.
//! println!("{}", counter);
//!
//! // Total time from config to http, plus a breakdown of the db phase.
//! let report = counter.render(&ViewRequest::from(vec![
//!     Slice::ids(["config", "http"]).with_title("startup total"),
//!     Slice::ids(["config", "db"]).with_span(false),
//! ]));
//! assert!(report.starts_with("startup total\n\t\t: "));
//! ```
//!
//! ## Error Containment
//!
//! Only `capture` can fail, with [`MomentError::Collision`](error::MomentError::Collision).
//! A slice naming an unknown id, or listing moments against their time
//! order, renders as the error text while the other slices of the same
//! report render normally.
//!
//! ## Showing Reports
//!
//! Counters and [`Logger`](services::Logger)s implement
//! [`Showable`](services::Showable): `show` hands the rendered text to an
//! [`alert::Presenter`] together with a `"copy"` action and a `"clear"`
//! action bound to the service's `clear()`. Copied text goes to a sink
//! chosen with `show_with_copy`, or to a `tracing` event by default.
//!
//! ## Thread Safety
//!
//! Counters are designed for single-threaded use; capturing takes
//! `&mut self`. Use one counter per worker or wrap a counter in a lock.
//!
//! ## Observers
//!
//! | Feature | Module | Description |
//! |---------|--------|-------------|
//! | `table` | [`observers::table`] | Pretty-print moments as ASCII tables |
//! | `json` | [`observers::json`] | Serialize counters to JSON |
//! | `serde` | [`snapshot`] | Serializable snapshot types |
//! | `full` | All observers | Enables all observer modules |
//!
//! ## Logging
//!
//! Captures, collisions, clears and failed slices are reported through
//! `tracing` at `debug`/`trace` level. Install any subscriber to see them.

pub mod alert;
pub mod capture;
pub mod clock;
pub mod counter;
pub mod error;
pub mod moment;
pub mod observers;
pub mod registry;
pub mod report;
pub mod services;
pub mod view;

#[cfg(feature = "serde")]
pub mod snapshot;
