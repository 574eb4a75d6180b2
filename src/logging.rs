// Diagnostic logging. Everything goes to stderr so the menu output on
// stdout stays exactly as the user sees it.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set: real faults only.
const DEFAULT_FILTER: &str = "phonebook_cli=warn";

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// default filter. Calling this more than once is harmless.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false),
    );

    let _ = subscriber.try_init();
}
