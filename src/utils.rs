use crate::types::Metrics;
use tracing_subscriber::{EnvFilter, fmt};

#[macro_export]
macro_rules! dlog {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

/// Initialize colorful logging.
///
/// Default level is INFO.
/// - `-v` => DEBUG
/// - `-vv` => TRACE
/// - `-q` => WARN
/// - `-qq` => ERROR
///
/// `RUST_LOG` overrides everything (e.g. `RUST_LOG=trace`).
pub fn init_logging(verbose: u8, quiet: u8) {
    let net = verbose as i8 - quiet as i8;
    let level = match net {
        i8::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        2..=i8::MAX => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,merkenn={level}")));

    let show_src = matches!(level, "debug" | "trace");

    fmt()
        .with_env_filter(filter)
        .with_ansi(true)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_file(show_src)
        .with_line_number(show_src)
        .compact()
        .init();
}

/// One-line rendering of the kind-specific metric pair, for list output.
pub fn format_metrics(metrics: Metrics) -> String {
    match metrics {
        Metrics::Running { cadence, pace } => {
            format!("{pace:.1} min/km\t{cadence:.0} spm")
        }
        Metrics::Cycling {
            elevation_gain,
            speed,
        } => format!("{speed:.1} km/h\t{elevation_gain:.0} m"),
    }
}

/// "25 min" under an hour, "1:05 h" above.
pub fn format_duration_min(duration: f64) -> String {
    let total = duration.round().max(0.0) as u64;
    if total < 60 {
        format!("{total} min")
    } else {
        format!("{}:{:02} h", total / 60, total % 60)
    }
}
