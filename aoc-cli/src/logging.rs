//! tracing subscriber setup

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a compact stderr logger; `RUST_LOG` overrides the default filter
pub fn init_logger(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "aoc=debug,aoc_solver=debug,aoc_2020=debug"
    } else if quiet {
        "error"
    } else {
        "aoc=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
