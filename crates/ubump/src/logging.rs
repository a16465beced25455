use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub(crate) const LOG_ENV: &str = "UBUMP_LOG";
const DEFAULT_FILTER: &str = "warn";

fn filter_from(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Logs go to standard error so query commands keep a clean standard output.
pub(crate) fn init() {
    let directive = std::env::var(LOG_ENV).ok();

    let _ = tracing_subscriber::registry()
        .with(filter_from(directive.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
