use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "unreadable_core=info,unreadable_cli=info";

/// Install the stderr subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(filter);
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
