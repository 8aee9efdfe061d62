pub mod config;
pub mod models;
pub mod pipeline;
pub mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use pipeline::clock::SystemClock;
use pipeline::{GeminiClient, TriageService};
use store::{FileHospitalCatalog, FilePetDirectory};

/// Initialize tracing from RUST_LOG, defaulting to this crate at info.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}

/// Wire up the pipeline with its production collaborators: flat-file stores
/// under the app data directory and the env-configured Gemini client.
pub fn default_service() -> TriageService {
    let data_dir = config::app_data_dir();
    TriageService::new(
        Arc::new(FilePetDirectory::new(&data_dir)),
        Arc::new(FileHospitalCatalog::new(&data_dir)),
        Box::new(GeminiClient::from_env()),
        Box::new(SystemClock),
    )
}
