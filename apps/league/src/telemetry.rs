use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Checked before `RUST_LOG` so league logging can be tuned on its own.
pub const LOG_ENV: &str = "LEAGUE_LOG";

/// Scoring and migration events at info; driver chatter only when it warns.
pub const DEFAULT_DIRECTIVES: &str = "warn,league=info,migration=info,sqlx=warn,sea_orm=warn";

/// Filter from `LEAGUE_LOG`, then `RUST_LOG`, then [`DEFAULT_DIRECTIVES`].
/// An unparsable variable falls through to the next source.
pub fn league_filter() -> EnvFilter {
    [LOG_ENV, EnvFilter::DEFAULT_ENV]
        .into_iter()
        .find_map(|var| EnvFilter::try_from_env(var).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the process-wide JSON subscriber used by league binaries.
pub fn init_tracing() {
    let json = fmt::layer()
        .json()
        .with_current_span(true)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(league_filter())
        .with(json)
        .init();
}
