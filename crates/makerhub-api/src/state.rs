//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use makerhub_auth::jwt::{JwtDecoder, JwtEncoder};
use makerhub_core::config::AppConfig;
use makerhub_core::traits::Mailer;
use makerhub_database::MakerspaceStore;
use makerhub_service::makerspace::{DirectoryService, MakerspaceFinalizer, OnboardingService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Makerspace store (PostgreSQL or in-memory)
    pub store: Arc<dyn MakerspaceStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token verifier
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Onboarding and claim verification
    pub onboarding: Arc<OnboardingService>,
    /// Pending-to-active finalization
    pub finalizer: Arc<MakerspaceFinalizer>,
    /// Public lookups and profile edits
    pub directory: Arc<DirectoryService>,
}

impl AppState {
    /// Wires services around an already-opened store.
    pub fn new(config: AppConfig, store: Arc<dyn MakerspaceStore>, mailer: Arc<dyn Mailer>) -> Self {
        let call_timeout = Duration::from_secs(config.database.operation_timeout_seconds);

        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let onboarding = Arc::new(OnboardingService::new(
            Arc::clone(&store),
            Arc::clone(&jwt_encoder),
            Arc::clone(&jwt_decoder),
            mailer,
            config.mail.clone(),
            call_timeout,
        ));
        let finalizer = Arc::new(MakerspaceFinalizer::new(Arc::clone(&store), call_timeout));
        let directory = Arc::new(DirectoryService::new(Arc::clone(&store), call_timeout));

        Self {
            config: Arc::new(config),
            store,
            jwt_decoder,
            onboarding,
            finalizer,
            directory,
        }
    }

    /// Upper bound on a single store call.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.config.database.operation_timeout_seconds)
    }
}
