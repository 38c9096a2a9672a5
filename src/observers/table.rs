//! Table observer for pretty-printing captured moments.
//!
//! This module provides [`TableObserver`], which renders the moments of a
//! collection of [`Observable`] sources as a formatted ASCII table using the
//! `tabled` crate. Each row shows a moment and its delta from the previous
//! moment of the same source.
//!
//! # Feature Flag
//!
//! This module requires the `table` feature:
//!
//! ```toml
//! [dependencies]
//! momenti = { version = "0.1", features = ["table"] }
//! ```
//!
//! # Examples
//!
//! ## Standard format
//!
//! ```rust,ignore
//! use momenti::counter::PerformanceCounter;
//! use momenti::observers::Observable;
//! use momenti::observers::table::{TableObserver, TableStyle};
//!
//! let mut startup = PerformanceCounter::new().with_name("startup");
//! startup.capture("config")?;
//! startup.capture("database")?;
//!
//! let counters: Vec<&dyn Observable> = vec![&startup];
//!
//! let observer = TableObserver::new().with_style(TableStyle::Rounded);
//! println!("{}", observer.render(counters.into_iter()));
//! // ╭─────────┬─────────────────────┬──────────┬─────────┬────────────╮
//! // │ Counter │ Id                  │ Message  │ At (ms) │ Delta (ms) │
//! // ├─────────┼─────────────────────┼──────────┼─────────┼────────────┤
//! // │ startup │ 8520224738771374201 │ config   │ 0.002   │ -          │
//! // │ startup │ 1437390442017410117 │ database │ 3.114   │ 3.112      │
//! // ╰─────────┴─────────────────────┴──────────┴─────────┴────────────╯
//! ```
//!
//! ## Compact format (multiple columns)
//!
//! ```rust,ignore
//! let observer = TableObserver::new().compact(true).columns(3);
//! println!("{}", observer.render(counters.into_iter()));
//! // ╭───────────┬─────────────────┬──╮
//! // │ config: - │ database: 3.112 │  │
//! // ╰───────────┴─────────────────┴──╯
//! ```

use crate::observers::{display_name, with_deltas, Observable};
use crate::report::NO_DURATION;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

/// Available table styles for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// ASCII table with simple characters: +, -, |
    Ascii,
    /// Modern rounded corners (default)
    #[default]
    Rounded,
    /// Sharp corners with box-drawing characters
    Sharp,
    /// Modern style with clean lines
    Modern,
    /// GitHub-flavored Markdown table
    Markdown,
    /// Dots for borders
    Dots,
    /// No borders, just spacing
    Blank,
}

/// Separator style between message and delta in compact mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompactSeparator {
    /// Colon separator: "message: delta"
    #[default]
    Colon,
    /// Equals separator: "message = delta"
    Equals,
    /// Arrow separator: "message → delta"
    Arrow,
}

impl CompactSeparator {
    /// Returns the separator string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompactSeparator::Colon => ": ",
            CompactSeparator::Equals => " = ",
            CompactSeparator::Arrow => " → ",
        }
    }
}

/// Configuration for the table observer.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// The style to use for rendering.
    pub style: TableStyle,
    /// Whether to show the header row (only in non-compact mode).
    pub show_header: bool,
    /// Custom title for the table (optional).
    pub title: Option<String>,
    /// Decimal places used for timestamps and deltas.
    pub precision: usize,
    /// Whether to use compact format (message: delta in cells).
    pub compact: bool,
    /// Number of columns in compact mode (default: 1).
    pub columns: usize,
    /// Separator between message and delta in compact mode.
    pub separator: CompactSeparator,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            style: TableStyle::default(),
            show_header: true,
            title: None,
            precision: 3,
            compact: false,
            columns: 1,
            separator: CompactSeparator::default(),
        }
    }
}

/// Internal row representation for tabled (standard mode).
#[derive(Tabled)]
struct MomentRow {
    #[tabled(rename = "Counter")]
    counter: String,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "At (ms)")]
    at: String,
    #[tabled(rename = "Delta (ms)")]
    delta: String,
}

/// An observer that renders moments as a formatted ASCII table.
///
/// Supports two rendering modes:
///
/// 1. **Standard mode**: one row per moment with counter, id, message,
///    timestamp and delta columns
/// 2. **Compact mode**: multi-column grid with "message: delta" cells
#[derive(Debug, Clone, Default)]
pub struct TableObserver {
    config: TableConfig,
}

impl TableObserver {
    /// Creates a new table observer with default settings.
    ///
    /// Default style is [`TableStyle::Rounded`] in standard (non-compact) mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new table observer with the specified configuration.
    pub fn with_config(config: TableConfig) -> Self {
        Self { config }
    }

    /// Sets the table style.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.config.style = style;
        self
    }

    /// Sets whether to show the header row.
    ///
    /// Only applies in standard (non-compact) mode.
    pub fn with_header(mut self, show: bool) -> Self {
        self.config.show_header = show;
        self
    }

    /// Sets an optional title for the table.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    /// Sets the number of decimal places for timestamps and deltas.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.config.precision = precision;
        self
    }

    /// Enables or disables compact mode.
    pub fn compact(mut self, enabled: bool) -> Self {
        self.config.compact = enabled;
        self
    }

    /// Sets the number of columns in compact mode.
    ///
    /// Default is 1. Values less than 1 are treated as 1.
    pub fn columns(mut self, count: usize) -> Self {
        self.config.columns = count.max(1);
        self
    }

    /// Sets the separator between message and delta in compact mode.
    pub fn separator(mut self, sep: CompactSeparator) -> Self {
        self.config.separator = sep;
        self
    }

    /// Applies the configured style to a table.
    fn apply_style(&self, table: &mut Table) {
        match self.config.style {
            TableStyle::Ascii => {
                table.with(Style::ascii());
            }
            TableStyle::Rounded => {
                table.with(Style::rounded());
            }
            TableStyle::Sharp => {
                table.with(Style::sharp());
            }
            TableStyle::Modern => {
                table.with(Style::modern());
            }
            TableStyle::Markdown => {
                table.with(Style::markdown());
            }
            TableStyle::Dots => {
                table.with(Style::dots());
            }
            TableStyle::Blank => {
                table.with(Style::blank());
            }
        }
    }

    fn format_ms(&self, millis: f64) -> String {
        format!("{:.*}", self.config.precision, millis)
    }

    fn format_delta(&self, delta: Option<f64>) -> String {
        delta
            .map(|d| self.format_ms(d))
            .unwrap_or_else(|| NO_DURATION.to_string())
    }

    fn with_title_line(&self, table: String) -> String {
        match &self.config.title {
            Some(title) => format!("{}\n{}", title, table),
            None => table,
        }
    }

    /// Renders moments in compact mode (grid layout).
    fn render_compact<'a>(&self, sources: impl Iterator<Item = &'a dyn Observable>) -> String {
        let cells: Vec<String> = sources
            .flat_map(|source| with_deltas(source.moments()))
            .map(|(moment, delta)| {
                format!(
                    "{}{}{}",
                    moment.message(),
                    self.config.separator.as_str(),
                    self.format_delta(delta)
                )
            })
            .collect();

        if cells.is_empty() {
            return String::new();
        }

        let cols = self.config.columns.max(1);
        let mut builder = Builder::default();

        for chunk in cells.chunks(cols) {
            let mut row: Vec<String> = chunk.to_vec();
            row.resize(cols, String::new());
            builder.push_record(row);
        }

        let mut table = builder.build();
        self.apply_style(&mut table);
        self.with_title_line(table.to_string())
    }

    /// Renders moments in standard mode (one row per moment).
    fn render_standard<'a>(&self, sources: impl Iterator<Item = &'a dyn Observable>) -> String {
        let rows: Vec<MomentRow> = sources
            .flat_map(|source| {
                let counter = display_name(source);
                with_deltas(source.moments()).map(move |(moment, delta)| (counter.clone(), moment, delta))
            })
            .map(|(counter, moment, delta)| MomentRow {
                counter,
                id: moment.id().to_string(),
                message: moment.message().to_string(),
                at: self.format_ms(moment.timestamp()),
                delta: self.format_delta(delta),
            })
            .collect();

        let mut table = Table::new(&rows);
        self.apply_style(&mut table);

        if !self.config.show_header {
            table.with(tabled::settings::Remove::row(
                tabled::settings::object::Rows::first(),
            ));
        }

        self.with_title_line(table.to_string())
    }

    /// Renders the moments of every source as a formatted table string.
    pub fn render<'a>(&self, sources: impl Iterator<Item = &'a dyn Observable>) -> String {
        if self.config.compact {
            self.render_compact(sources)
        } else {
            self.render_standard(sources)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureParams;
    use crate::clock::ManualClock;
    use crate::counter::PerformanceCounter;

    fn startup() -> PerformanceCounter<ManualClock> {
        let clock = ManualClock::new();
        let mut counter = PerformanceCounter::with_clock(clock.clone()).with_name("startup");
        counter
            .capture(CaptureParams::new().with_id("cfg").with_message("config"))
            .unwrap();
        clock.set(12.5);
        counter
            .capture(CaptureParams::new().with_id("db").with_message("database"))
            .unwrap();
        counter
    }

    #[test]
    fn test_render_empty() {
        let observer = TableObserver::new();
        let sources: Vec<&dyn Observable> = vec![];
        let output = observer.render(sources.into_iter());
        assert!(!output.is_empty());
    }

    #[test]
    fn test_render_empty_compact() {
        let observer = TableObserver::new().compact(true).columns(3);
        let sources: Vec<&dyn Observable> = vec![];
        let output = observer.render(sources.into_iter());
        assert!(output.is_empty());
    }

    #[test]
    fn test_render_standard() {
        let counter = startup();
        let sources: Vec<&dyn Observable> = vec![&counter];
        let output = TableObserver::new().render(sources.into_iter());

        assert!(output.contains("Counter"));
        assert!(output.contains("startup"));
        assert!(output.contains("cfg"));
        assert!(output.contains("database"));
        assert!(output.contains("12.500"));
    }

    #[test]
    fn test_render_unnamed() {
        let mut counter = PerformanceCounter::new();
        counter.capture("x").unwrap();
        let sources: Vec<&dyn Observable> = vec![&counter];
        let output = TableObserver::new().render(sources.into_iter());
        assert!(output.contains("(unnamed)"));
    }

    #[test]
    fn test_render_without_header() {
        let counter = startup();
        let sources: Vec<&dyn Observable> = vec![&counter];
        let output = TableObserver::new()
            .with_header(false)
            .render(sources.into_iter());
        assert!(!output.contains("Counter"));
        assert!(output.contains("startup"));
    }

    #[test]
    fn test_render_with_title() {
        let counter = startup();
        let sources: Vec<&dyn Observable> = vec![&counter];
        let output = TableObserver::new()
            .with_title("Boot timings")
            .render(sources.into_iter());
        assert!(output.starts_with("Boot timings\n"));
    }

    #[test]
    fn test_render_compact() {
        let counter = startup();
        let sources: Vec<&dyn Observable> = vec![&counter];
        let output = TableObserver::new()
            .compact(true)
            .columns(2)
            .with_precision(1)
            .render(sources.into_iter());

        assert!(output.contains("config: -"));
        assert!(output.contains("database: 12.5"));
    }

    #[test]
    fn test_render_compact_separator() {
        let counter = startup();
        let sources: Vec<&dyn Observable> = vec![&counter];
        let output = TableObserver::new()
            .compact(true)
            .separator(CompactSeparator::Arrow)
            .with_precision(1)
            .render(sources.iter().copied());
        assert!(output.contains("database → 12.5"));
    }

    #[test]
    fn test_ascii_style() {
        let counter = startup();
        let sources: Vec<&dyn Observable> = vec![&counter];
        let output = TableObserver::new()
            .with_style(TableStyle::Ascii)
            .render(sources.into_iter());
        assert!(output.contains('+'));
    }

    #[test]
    fn test_columns_minimum_is_one() {
        let observer = TableObserver::new().columns(0);
        assert_eq!(observer.config.columns, 1);
    }

    #[test]
    fn test_compact_with_zero_columns_config() {
        let counter = startup();
        let sources: Vec<&dyn Observable> = vec![&counter];
        let output = TableObserver::with_config(TableConfig {
            compact: true,
            columns: 0,
            ..Default::default()
        })
        .render(sources.into_iter());

        assert!(output.contains("config"));
        assert!(output.contains("database"));
    }
}
