use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use story_desk::application::{
    ports::{
        security::TokenManager, storage::PhotoStorage, time::Clock, util::SlugGenerator,
    },
    services::{ApplicationServices, PageSizes, ServiceDependencies},
};
use story_desk::config::AppConfig;
use story_desk::infrastructure::{
    database,
    repositories::{
        PostgresAuthorReadRepository, PostgresAuthorWriteRepository, PostgresCategoryRepository,
        PostgresStoryReadRepository, PostgresStoryWriteRepository,
    },
    security::token::BiscuitTokenManager,
    storage::DiskPhotoStorage,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use story_desk::presentation::http::{routes::build_router, state::HttpState};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url(), config.db_max_connections()).await?;
    database::run_migrations(&pool).await?;

    let token_manager: Arc<dyn TokenManager> =
        Arc::new(BiscuitTokenManager::new(config.biscuit_public_key())?);
    let photo_storage: Arc<dyn PhotoStorage> =
        Arc::new(DiskPhotoStorage::new(config.upload_dir().clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(ServiceDependencies {
        author_write_repo: Arc::new(PostgresAuthorWriteRepository::new(pool.clone())),
        author_read_repo: Arc::new(PostgresAuthorReadRepository::new(pool.clone())),
        story_write_repo: Arc::new(PostgresStoryWriteRepository::new(pool.clone())),
        story_read_repo: Arc::new(PostgresStoryReadRepository::new(pool.clone())),
        category_repo: Arc::new(PostgresCategoryRepository::new(pool)),
        photo_storage,
        token_manager,
        clock,
        slugger,
        page_sizes: PageSizes {
            authors: config.authors_per_page(),
            stories: config.stories_per_page(),
        },
    }));

    let app = build_router(HttpState { services }, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
