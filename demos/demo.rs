//! Demo application showcasing timing reports and observer formats.
//!
//! Run with:
//! ```bash
//! cargo run --example demo --features demo -- --help
//! ```

use clap::{Parser, ValueEnum};
use momenti::alert::{
    Alert, Presenter, TracingPresenter, WriterPresenter, CLEAR_LABEL, COPY_LABEL,
};
use momenti::capture::{CaptureParams, CollisionPolicy};
use momenti::counter::PerformanceCounter;
use momenti::observers::json::JsonObserver;
use momenti::observers::table::{CompactSeparator, TableObserver, TableStyle};
use momenti::observers::Observable;
use momenti::registry::CounterRegistry;
use momenti::services::{Logger, Showable};
use momenti::view::{Slice, ViewRequest};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Output format for the captured moments.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Text timing report (durations and spans)
    Report,
    /// Pretty ASCII table, one row per moment
    Table,
    /// Compact table with multiple columns
    Compact,
    /// JSON format
    Json,
    /// Report shown through an alert presenter
    Alert,
}

/// Table style selection.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum StyleChoice {
    Ascii,
    #[default]
    Rounded,
    Sharp,
    Modern,
    Markdown,
    Dots,
    Blank,
}

impl From<StyleChoice> for TableStyle {
    fn from(choice: StyleChoice) -> Self {
        match choice {
            StyleChoice::Ascii => TableStyle::Ascii,
            StyleChoice::Rounded => TableStyle::Rounded,
            StyleChoice::Sharp => TableStyle::Sharp,
            StyleChoice::Modern => TableStyle::Modern,
            StyleChoice::Markdown => TableStyle::Markdown,
            StyleChoice::Dots => TableStyle::Dots,
            StyleChoice::Blank => TableStyle::Blank,
        }
    }
}

/// Separator style for compact table format.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum SeparatorChoice {
    #[default]
    Colon,
    Equals,
    Arrow,
}

impl From<SeparatorChoice> for CompactSeparator {
    fn from(choice: SeparatorChoice) -> Self {
        match choice {
            SeparatorChoice::Colon => CompactSeparator::Colon,
            SeparatorChoice::Equals => CompactSeparator::Equals,
            SeparatorChoice::Arrow => CompactSeparator::Arrow,
        }
    }
}

/// Where alerts are sent in `alert` format.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum PresenterChoice {
    /// Write to standard error
    #[default]
    Stderr,
    /// Emit as a tracing event
    Log,
}

/// Demo application for momenti - in-process timing reports.
///
/// This demo simulates an application startup and a few requests, capturing
/// moments along the way, then renders them in the selected format.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value = "report")]
    format: OutputFormat,

    /// Table style (for table/compact formats)
    #[arg(short, long, value_enum, default_value = "rounded")]
    style: StyleChoice,

    /// Number of columns (for compact format)
    #[arg(short, long, default_value = "3")]
    columns: usize,

    /// Separator style (for compact format)
    #[arg(long, value_enum, default_value = "colon")]
    separator: SeparatorChoice,

    /// Decimal places for timestamps (table formats)
    #[arg(long, default_value = "3")]
    precision: usize,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// Include timestamp in JSON output
    #[arg(long)]
    timestamp: bool,

    /// Add a title to the output (table formats)
    #[arg(long)]
    title: Option<String>,

    /// Hide header in standard table mode
    #[arg(long)]
    no_header: bool,

    /// Presenter used by the alert format
    #[arg(long, value_enum, default_value = "stderr")]
    presenter: PresenterChoice,

    /// Milliseconds slept per simulated unit of work
    #[arg(long, default_value = "5")]
    unit_ms: u64,

    /// Number of simulated requests
    #[arg(long, default_value = "3")]
    requests: usize,

    /// Deliberately list moments out of order in the report
    #[arg(long)]
    time_travel: bool,
}

fn work(args: &Args, units: u64) {
    thread::sleep(Duration::from_millis(args.unit_ms * units));
}

/// Simulates an application startup, capturing each phase.
fn simulate_startup(args: &Args, counter: &mut PerformanceCounter, log: &mut Logger) {
    let phases: [(&str, &str, u64); 4] = [
        ("config", "configuration loaded", 1),
        ("db", "database connected", 4),
        ("cache", "cache warmed", 2),
        ("http", "listening on :8080", 1),
    ];

    counter
        .capture(
            CaptureParams::new()
                .with_id("start")
                .with_message("process started")
                .with_clear(true),
        )
        .unwrap_or_else(|e| log.add(e.to_string()));

    for (id, message, units) in phases {
        work(args, units);
        counter
            .capture(CaptureParams::new().with_id(id).with_message(message))
            .unwrap_or_else(|e| log.add(e.to_string()));
        log.add(format!("startup: {}", message));
    }

    // A second "listening" event is harmless under DontAdd...
    counter
        .capture(
            CaptureParams::new()
                .with_id("http")
                .with_collision_policy(CollisionPolicy::DontAdd),
        )
        .unwrap_or_else(|e| log.add(e.to_string()));

    // ...and reported under the default policy.
    if let Err(e) = counter.capture(CaptureParams::new().with_id("http")) {
        log.add(e.to_string());
    }
}

/// Simulates request handling, one counter per request.
fn simulate_requests(args: &Args, registry: &mut CounterRegistry) {
    for request in 0..args.requests {
        let counter = registry.get(&format!("request-{}", request));
        counter
            .capture(CaptureParams::new().with_id("recv").with_message("request received"))
            .ok();
        work(args, 1 + request as u64);
        counter
            .capture(CaptureParams::new().with_id("done").with_message("response sent"))
            .ok();
    }
}

fn startup_view(args: &Args) -> ViewRequest {
    let mut view = ViewRequest::from(vec![
        Slice::all(),
        Slice::ids(["start", "http"]).with_title("startup total"),
        Slice::ids(["config", "db", "cache"]).with_span(false),
        Slice::ids(["db", "migrations"]),
    ]);
    if args.time_travel {
        view = view.with_slice(Slice::ids(["http", "config"]));
    }
    view
}

/// Renders counters in the specified format.
fn render_output(args: &Args, counters: Vec<&dyn Observable>) -> String {
    match args.format {
        OutputFormat::Table => {
            let mut observer = TableObserver::new()
                .with_style(args.style.into())
                .with_header(!args.no_header)
                .with_precision(args.precision);

            if let Some(ref title) = args.title {
                observer = observer.with_title(title.clone());
            }

            observer.render(counters.into_iter())
        }

        OutputFormat::Compact => {
            let mut observer = TableObserver::new()
                .compact(true)
                .columns(args.columns)
                .separator(args.separator.into())
                .with_style(args.style.into())
                .with_precision(args.precision);

            if let Some(ref title) = args.title {
                observer = observer.with_title(title.clone());
            }

            observer.render(counters.into_iter())
        }

        OutputFormat::Json => JsonObserver::new()
            .pretty(args.pretty)
            .wrap_in_snapshot(args.timestamp)
            .include_timestamp(args.timestamp)
            .to_json(counters.into_iter())
            .unwrap_or_else(|e| format!("Error: {}", e)),

        OutputFormat::Report | OutputFormat::Alert => String::new(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut startup = PerformanceCounter::new().with_name("startup");
    let mut log = Logger::new().with_name("startup log");
    let mut registry = CounterRegistry::new();

    simulate_startup(&args, &mut startup, &mut log);
    simulate_requests(&args, &mut registry);

    match args.format {
        OutputFormat::Report => {
            println!("{}\n", startup.render(&startup_view(&args)));
            let mut requests: Vec<_> = registry.counters().collect();
            requests.sort_by(|a, b| a.name().cmp(b.name()));
            for counter in requests {
                let view = ViewRequest::from(Slice::ids(["recv", "done"]).with_title(counter.name()));
                println!("{}", counter.render(&view));
            }
            println!("\n{}", log);
        }

        OutputFormat::Alert => {
            let mut presenter: Box<dyn Presenter> = match args.presenter {
                PresenterChoice::Stderr => Box::new(WriterPresenter::stderr()),
                PresenterChoice::Log => Box::new(TracingPresenter),
            };
            startup.show_view(&startup_view(&args), presenter.as_mut());
            log.show(presenter.as_mut());

            // Presenters that pick a button, as a user tapping it would.
            let mut clipboard = String::new();
            startup.show_with_copy(
                &mut |alert: Alert<'_>| {
                    alert.invoke(COPY_LABEL);
                },
                &mut |text: String| clipboard = text,
            );
            eprintln!("copied {} bytes", clipboard.len());

            startup.show(&mut |alert: Alert<'_>| {
                alert.invoke(CLEAR_LABEL);
            });
            eprintln!("moments left after clear: {}", startup.len());
        }

        _ => {
            let mut counters: Vec<&dyn Observable> = vec![&startup];
            let mut requests: Vec<_> = registry.counters().collect();
            requests.sort_by(|a, b| a.name().cmp(b.name()));
            counters.extend(requests.into_iter().map(|c| c as &dyn Observable));
            println!("{}", render_output(&args, counters));
        }
    }
}
