//! Tracing subscriber setup. Called once from `main`.

use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(environment: Environment) -> &'static str {
    match environment {
        Environment::Prod => "materials_api=info,tower_http=info",
        Environment::Dev => "materials_api=debug,tower_http=debug",
    }
}

/// Install the global subscriber: JSON lines in prod, human-readable otherwise.
pub fn init(environment: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));
    let registry = tracing_subscriber::registry().with(filter);
    match environment {
        Environment::Prod => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        Environment::Dev => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
