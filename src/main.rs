mod model;
mod server;

use tracing_subscriber::EnvFilter;

use crate::server::{config::Config, router, scheduler::cart_expiry, startup, state::AppState};

#[tokio::main]
async fn main() -> Result<(), server::error::AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session_layer = startup::setup_session_layer(&db).await?;
    let http_client = startup::setup_reqwest_client();

    let state = AppState::new(db.clone(), http_client, config);

    tracing::info!("Starting server");

    // Sweep expired guest carts in the background.
    let scheduler_db = db.clone();
    tokio::spawn(async move {
        if let Err(e) = cart_expiry::start_scheduler(scheduler_db).await {
            tracing::error!("Cart expiry scheduler error: {}", e);
        }
    });

    let app = router::router()
        .layer(session_layer)
        .with_state(state.clone());

    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        server::error::AppError::Internal(format!("Failed to bind {}: {}", addr, e))
    })?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| server::error::AppError::Internal(e.to_string()))?;

    Ok(())
}
