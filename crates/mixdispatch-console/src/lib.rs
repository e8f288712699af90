//! Colorful console output for dispatch solves.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve start/end)
//! - **DEBUG**: Every new incumbent
//! - **TRACE**: Individual branching decisions

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "mixdispatch_solver=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and installs a global subscriber filtered by
/// `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(DispatchConsoleLayer)
            .try_init();
    });
}

fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 __  __ _      ____  _                 _       _
|  \/  (_)_  _|  _ \(_)___ _ __   __ _| |_ ___| |__
| |\/| | \ \/ / | | | / __| '_ \ / _` | __/ __| '_ \
| |  | | |>  <| |_| | \__ \ |_) | (_| | || (__| | | |
|_|  |_|_/_/\_\____/|_|___/ .__/ \__,_|\__\___|_| |_|
                          |_|
"#;

    let version_line = format!("            v{} - Ready-Mix Dispatch Optimizer\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct DispatchConsoleLayer;

impl<S: Subscriber> Layer<S> for DispatchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("mixdispatch_solver") && !target.starts_with("mixdispatch::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    status: Option<String>,
    cost: Option<i64>,
    orders: Option<u64>,
    vehicles: Option<u64>,
    stations: Option<u64>,
    slots: Option<u64>,
    variables: Option<u64>,
    propagators: Option<u64>,
    horizon: Option<u64>,
    node: Option<u64>,
    nodes: Option<u64>,
    failures: Option<u64>,
    solutions: Option<u64>,
    trips: Option<u64>,
    depth: Option<u64>,
    var: Option<u64>,
    value: Option<i64>,
    duration_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "status" => self.status = Some(s.trim_matches('"').to_string()),
            "cost" => self.cost = parse_optional_i64(&s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "orders" => self.orders = Some(value),
            "vehicles" => self.vehicles = Some(value),
            "stations" => self.stations = Some(value),
            "slots" => self.slots = Some(value),
            "variables" => self.variables = Some(value),
            "propagators" => self.propagators = Some(value),
            "horizon" => self.horizon = Some(value),
            "node" => self.node = Some(value),
            "nodes" => self.nodes = Some(value),
            "failures" => self.failures = Some(value),
            "solutions" => self.solutions = Some(value),
            "trips" => self.trips = Some(value),
            "depth" => self.depth = Some(value),
            "var" => self.var = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "cost" => self.cost = Some(value as i64),
            "value" => self.value = Some(value as i64),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "cost" => self.cost = Some(value),
            "value" => self.value = Some(value),
            _ => self.record_u64(field, value.max(0) as u64),
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            _ => {}
        }
    }
}

/// Reads `Some(42)`, `42` or `None`.
fn parse_optional_i64(s: &str) -> Option<i64> {
    let inner = s
        .strip_prefix("Some(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(s);
    inner.parse().ok()
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "incumbent" => format_incumbent(v),
        "node" => format_node(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    format!(
        "{} {} Solving │ {} orders │ {} vehicles │ {} stations │ {} slots │ {} vars │ {} propagators │ horizon {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.orders).bright_yellow(),
        count(v.vehicles).bright_yellow(),
        count(v.stations).bright_yellow(),
        count(v.slots).bright_yellow(),
        count(v.variables).bright_magenta(),
        count(v.propagators).bright_magenta(),
        count(v.horizon).white(),
    )
}

fn format_incumbent(v: &EventVisitor) -> String {
    format!(
        "{} {} Incumbent │ cost {} │ node {} │ {} trips",
        format_elapsed(),
        "★".bright_yellow(),
        format_cost(v.cost).bold(),
        count(v.node).white(),
        count(v.trips).white(),
    )
}

fn format_node(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    format!(
        "{} {} depth {:>5} │ v{} = {}",
        format_elapsed(),
        "·".bright_black(),
        count(v.depth).bright_black(),
        v.var.unwrap_or(0),
        v.value.unwrap_or(0),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let status_colored = match status {
        "optimal" => "OPTIMAL".bright_green().bold().to_string(),
        "infeasible" => "INFEASIBLE".bright_red().bold().to_string(),
        _ => "TRUNCATED".bright_yellow().bold().to_string(),
    };
    let duration = v.duration_ms.unwrap_or(0);

    let mut output = format!(
        "{} {} Solving complete │ {} │ cost {} │ {} nodes │ {} failures │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        status_colored,
        format_cost(v.cost),
        count(v.nodes).white(),
        count(v.failures).white(),
        format_duration_ms(duration).yellow(),
    );

    output.push_str("\n\n");
    output.push_str(&summary_box(status, v.cost));
    output
}

fn summary_box(status: &str, cost: Option<i64>) -> String {
    let inner_width: usize = 58;
    let heading = match status {
        "optimal" => "OPTIMAL SCHEDULE FOUND",
        "infeasible" => "NO FEASIBLE SCHEDULE",
        _ => "BEST SCHEDULE (NOT PROVEN OPTIMAL)",
    };
    let total_pad = inner_width.saturating_sub(heading.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let cost_text = cost.map_or_else(|| "N/A".to_string(), |c| c.to_formatted_string(&Locale::en));

    let mut output = String::new();
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        heading.bold(),
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(
        &"╠══════════════════════════════════════════════════════════╣"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Total Cost:",
        cost_text,
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output
}

fn format_cost(cost: Option<i64>) -> String {
    match cost {
        Some(c) => c.to_formatted_string(&Locale::en).bright_green().to_string(),
        None => "N/A".white().to_string(),
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
