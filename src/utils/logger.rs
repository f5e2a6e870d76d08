use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` 沒設定時使用的過濾規則
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "response_tables=debug,info"
    } else {
        "response_tables=info"
    }
}

/// Installs the global subscriber. `json` switches to one JSON object per line.
pub fn init_logger(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    let layer = tracing_subscriber::fmt::layer().with_target(false);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}
