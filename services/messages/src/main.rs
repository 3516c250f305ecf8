use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use common::database::{self, DatabaseConfig};
use messages::{config::ServerConfig, repositories::MIGRATOR, routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Variables already set in the environment take precedence over .env
    let _ = dotenvy::dotenv();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting messages service");

    let server_config = ServerConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    database::migrate(&pool, &MIGRATOR).await?;

    let app_state = AppState::from_pool(pool);
    let app = routes::create_router(app_state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Messages service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Messages service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
