//! Gatehouse server binary.
//!
//! Wires configuration, the identity store, the session backend, the
//! lifecycle service, and the configured strategy together at startup, then
//! serves the router. Everything is injected explicitly; there is no global
//! state to reach for.

use anyhow::Context;
use gatehouse::api::routes::create_router;
use gatehouse::auth::{
    AuthService, AuthStrategy, BasicAuth, MemorySessions, NoAuth, SessionAuth, SessionBackend,
    StoreSessions,
};
use gatehouse::cli::Cli;
use gatehouse::db::{StoreProvider, UserStore};
use gatehouse::utils::config::{Config, SessionBackendKind, StrategyKind};
use gatehouse::AppState;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "swagger-ui")]
use utoipa::OpenApi;
#[cfg(feature = "swagger-ui")]
use utoipa_swagger_ui::SwaggerUi;

fn init_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    // CLI flags outrank the file and the environment
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(database) = cli.database {
        config.database.url = database;
    }
    if cli.verbose {
        config.server.log_level = "debug".to_string();
    }

    init_logging(&config.server.log_level);

    // Identity store: Turso/DATABASE_PATH environment outranks the file's url
    let provider = match StoreProvider::from_env() {
        StoreProvider::Memory => match config.database.url.as_str() {
            ":memory:" => StoreProvider::Memory,
            path => StoreProvider::Sqlite {
                path: path.to_string(),
            },
        },
        provider => provider,
    };
    let store: Arc<dyn UserStore> = Arc::from(
        provider
            .create_store()
            .await
            .context("opening identity store")?,
    );

    let sessions: Arc<dyn SessionBackend> = match config.auth.session_backend {
        SessionBackendKind::Memory => Arc::new(MemorySessions::new()),
        SessionBackendKind::Store => Arc::new(StoreSessions::new(store.clone())),
    };

    let auth = Arc::new(AuthService::new(store.clone(), sessions.clone()));

    // The session strategy shares the backend, so lifecycle-issued cookies
    // resolve at the gate
    let strategy: Option<Arc<dyn AuthStrategy>> = match config.auth.strategy {
        StrategyKind::None => None,
        StrategyKind::Base => Some(Arc::new(NoAuth)),
        StrategyKind::Basic => Some(Arc::new(BasicAuth::new(store.clone()))),
        StrategyKind::Session => Some(Arc::new(SessionAuth::new(
            store.clone(),
            sessions.clone(),
            config.auth.session_cookie.clone(),
        ))),
    };

    tracing::info!(
        "Auth strategy: {:?}, session backend: {:?}, database: {}",
        config.auth.strategy,
        config.auth.session_backend,
        config.database.url
    );

    let excluded_paths = Arc::new(config.auth.excluded_paths.clone());
    let config = Arc::new(config);

    let state = AppState {
        config: config.clone(),
        store,
        auth,
    };

    let router = create_router(strategy, excluded_paths).with_state(state);

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", gatehouse::api::ApiDoc::openapi()),
    );

    let app = router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!("Gatehouse listening on {}", listener.local_addr()?);
    #[cfg(feature = "swagger-ui")]
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
