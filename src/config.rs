use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "PetTriage";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Application data directory holding the flat-file stores.
/// ~/PetTriage/ on all platforms (user-visible by design).
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Inference-service settings, env-driven with workable defaults.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: String::new(),
            model: "gemini-2.0-flash".to_string(),
            timeout_secs: 12,
        }
    }
}

impl GeminiConfig {
    /// Read `GEMINI_API_URL`, `GEMINI_API_KEY`, `GEMINI_MODEL`, and
    /// `GEMINI_TIMEOUT_SECS`, falling back to defaults for any unset value.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("GEMINI_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or(defaults.api_key),
            model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            timeout_secs: std::env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}
