// src/config.rs
// =============================================================================
// Runtime settings, assembled from the global CLI options.
//
// clap already resolves environment fallbacks (GITHUB_TOKEN, GITHUB_API_URL),
// so this only converts raw numbers into Durations and fills in defaults.
// =============================================================================

use std::time::Duration;

use crate::cli::GlobalArgs;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PACING_MS: u64 = 1500;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base: String,
    pub token: Option<String>,
    pub timeout: Duration,
    /// Pause before a freshly generated document is presented. Zero disables it.
    pub pacing: Duration,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
            user_agent: format!("readme-generator/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&GlobalArgs> for Settings {
    fn from(args: &GlobalArgs) -> Self {
        Self {
            api_base: args.api_base.clone(),
            token: args.token.clone().filter(|t| !t.trim().is_empty()),
            timeout: Duration::from_secs(args.timeout_secs),
            pacing: Duration::from_millis(args.pacing_ms),
            ..Settings::default()
        }
    }
}
