//! Text rendering of resolved moment lists.
//!
//! These functions work on a slice's moments after resolution and order
//! validation; they never fail. Durations are rounded to whole milliseconds
//! for display only.
//!
//! Output format:
//!
//! ```text
//! <message>            all-durations mode, one block per moment,
//! 		: <n> ms         blocks separated by a blank line;
//!                      "-" instead of "<n> ms" when n rounds to 0
//!
//! <title>              span mode, a single block
//! 		: <n> ms
//! ```

use crate::moment::Moment;

/// Separator between blocks of a slice and between slices of a report.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Placeholder for a duration that rounds to zero, including the first
/// moment of a slice which has no predecessor.
pub const NO_DURATION: &str = "-";

/// Rounds a millisecond value to the nearest whole millisecond.
#[inline]
pub fn round_ms(millis: f64) -> i64 {
    millis.round() as i64
}

/// Renders one block per moment with its delta from the previous moment of
/// the list.
pub fn render_durations(moments: &[&Moment]) -> String {
    let mut previous: Option<f64> = None;
    moments
        .iter()
        .map(|moment| {
            let timestamp = moment.timestamp();
            let delta = timestamp - previous.unwrap_or(timestamp);
            previous = Some(timestamp);
            block(moment.message(), &duration_label(delta))
        })
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Renders a single block with the total time covered by the list.
///
/// The span is accumulated from consecutive deltas. The block is titled
/// with `title`, or with the first moment's message when no title is given.
/// An empty list renders as an empty string.
pub fn render_span(moments: &[&Moment], title: Option<&str>) -> String {
    let Some(first) = moments.first() else {
        return String::new();
    };

    let span: f64 = moments
        .windows(2)
        .map(|pair| pair[1].timestamp() - pair[0].timestamp())
        .sum();

    block(
        title.unwrap_or_else(|| first.message()),
        &format!("{} ms", round_ms(span)),
    )
}

fn duration_label(millis: f64) -> String {
    match round_ms(millis) {
        0 => NO_DURATION.to_string(),
        rounded => format!("{} ms", rounded),
    }
}

fn block(heading: &str, value: &str) -> String {
    format!("{}\n\t\t: {}", heading, value)
}
