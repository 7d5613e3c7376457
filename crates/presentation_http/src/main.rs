//! Talkboard HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{
    AuthService, CatalogService, NormalizationPort, SentenceService, SpeechPort, TokenPort,
    VoiceConfig,
};
use axum::http::{HeaderValue, Method};
use infrastructure::{
    AppConfig, Argon2PasswordHasher, LogFormat, InMemoryCategoryStore, InMemoryProfileStore,
    InMemoryTileStore, InMemoryUserStore, NormalizerAdapter, SpeechAdapter, TokenCodec,
};
use presentation_http::{routes, set_expose_internal_errors, state::AppState};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "talkboard_server=debug,presentation_http=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(config.server.log_format);

    info!("Talkboard v{} starting", env!("CARGO_PKG_VERSION"));

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
    set_expose_internal_errors(config.expose_internal_errors());

    info!(
        environment = %config.environment(),
        host = %config.server.host,
        port = config.server.port,
        normalizer = %config.normalizer.program,
        speech = %config.speech.endpoint(),
        "Configuration loaded"
    );

    let state = build_state(config.clone())?;
    let app = routes::create_router(state)
        .layer(RequestBodyLimitLayer::new(config.server.max_body_size_json_bytes))
        .layer(cors_layer(&config.server.allowed_origins))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let (signalled_tx, signalled_rx) = oneshot::channel();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            info!("Waiting up to {:?} for connections to close", shutdown_timeout);
            let _ = signalled_tx.send(());
        })
        .into_future();

    if drain_within(server, signalled_rx, shutdown_timeout).await? {
        info!("Server shutdown complete");
    } else {
        warn!(
            timeout = ?shutdown_timeout,
            "Connections still open after shutdown timeout, exiting anyway"
        );
    }
    Ok(())
}

/// Run `server` to completion, giving it at most `timeout` once `signalled`
/// fires
///
/// Returns `false` when the timeout cut the drain short.
async fn drain_within<F>(
    server: F,
    signalled: oneshot::Receiver<()>,
    timeout: Duration,
) -> std::io::Result<bool>
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(server);
    let deadline = async {
        if signalled.await.is_ok() {
            tokio::time::sleep(timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = &mut server => result.map(|()| true),
        () = deadline => Ok(false),
    }
}

fn init_tracing(log_format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if log_format == LogFormat::Json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wire adapters, stores and services
fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
    let tokens: Arc<dyn TokenPort> = Arc::new(TokenCodec::from_config(&config.security)?);
    let normalizer: Arc<dyn NormalizationPort> =
        Arc::new(NormalizerAdapter::new(config.normalizer.clone())?);
    let speech: Arc<dyn SpeechPort> = Arc::new(SpeechAdapter::new(config.speech.clone())?);

    if !config.normalizer.working_dir.is_dir() {
        warn!(
            working_dir = %config.normalizer.working_dir.display(),
            "Normalizer working directory is missing; sentence requests will fail"
        );
    }

    let users = Arc::new(InMemoryUserStore::new());
    let catalog = Arc::new(CatalogService::new(
        users.clone(),
        Arc::new(InMemoryProfileStore::new()),
        Arc::new(InMemoryCategoryStore::new()),
        Arc::new(InMemoryTileStore::new()),
    ));
    let auth = AuthService::new(users, Arc::new(Argon2PasswordHasher::new()), tokens.clone())
        .with_default_board(catalog.clone());
    let voice = VoiceConfig {
        speaker: config.speech.default_speaker.clone(),
        speed: config.speech.speed,
    };

    Ok(AppState {
        auth_service: Arc::new(auth),
        catalog_service: catalog,
        sentence_service: Arc::new(SentenceService::with_voice(normalizer, speech, voice)),
        tokens,
        config: Arc::new(config),
    })
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        // Development mode: allow all origins
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
