use std::path::PathBuf;

use tracing::warn;
use tracing_subscriber::EnvFilter;

const UR3_MOTION_CONFIG_ENV_NAME: &str = "UR3_MOTION_CONFIG_PATH";

/// Get config path from input or env UR3_MOTION_CONFIG_PATH
pub fn get_config_path(config: Option<PathBuf>) -> Option<PathBuf> {
    if config.is_some() {
        config
    } else {
        std::env::var(UR3_MOTION_CONFIG_ENV_NAME)
            .map(|s| {
                warn!("### ENV VAR {} is used ###", s);
                PathBuf::from(s)
            })
            .ok()
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default
/// `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
