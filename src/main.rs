use anyhow::Result;
use article_desk::application::{
    auth::MasterKey,
    ports::{security::TokenManager, time::Clock},
    services::ApplicationServices,
};
use article_desk::config::{AppConfig, Storage};
use article_desk::domain::article::{ArticleReadRepository, ArticleWriteRepository};
use article_desk::infrastructure::{
    database,
    repositories::{InMemoryArticleRepository, PostgresArticleRepository},
    security::token::BiscuitTokenManager,
    time::SystemClock,
};
use article_desk::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
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

type ArticleRepositories = (Arc<dyn ArticleWriteRepository>, Arc<dyn ArticleReadRepository>);

async fn article_repositories(storage: &Storage) -> Result<ArticleRepositories> {
    match storage {
        Storage::Postgres(url) => {
            let pool = database::init_pool(url).await?;
            database::run_migrations(&pool).await?;
            tracing::info!("using postgres article store");
            let repo = Arc::new(PostgresArticleRepository::new(pool));
            let write: Arc<dyn ArticleWriteRepository> = repo.clone();
            let read: Arc<dyn ArticleReadRepository> = repo;
            Ok((write, read))
        }
        Storage::Memory => {
            tracing::warn!("DATABASE_URL not set; articles are kept in memory");
            let repo = Arc::new(InMemoryArticleRepository::new());
            let write: Arc<dyn ArticleWriteRepository> = repo.clone();
            let read: Arc<dyn ArticleReadRepository> = repo;
            Ok((write, read))
        }
    }
}

async fn bootstrap() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let (article_write_repo, article_read_repo) = article_repositories(config.storage()).await?;

    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let master_key = MasterKey::new(config.master_key())?;

    let services = Arc::new(ApplicationServices::new(
        article_write_repo,
        article_read_repo,
        token_manager,
        master_key,
        clock,
    ));

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
            tracing::error!(error = %err, "failed to listen for CTRL+C");
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
                tracing::error!(error = %err, "failed to install terminate handler");
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
