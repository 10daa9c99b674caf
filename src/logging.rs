use tracing_subscriber::{fmt, EnvFilter};

/// Installs the stderr subscriber for the command-line tool.
///
/// `RUST_LOG` selects the filter, falling back to `warn`. `verbose` forces debug
/// output for this crate regardless of the environment.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gclog=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
