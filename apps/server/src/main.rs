use chrono::Utc;
use edge_revenue_api::construct_router;
use edge_revenue_api::state::State;
use edge_revenue_core::{EntityStore, MemoryStore, MockSource};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

#[tokio::main]
async fn main() -> edge_revenue_types::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting EdgeRevenue API Service");

    let config = config::Config::from_env()?;
    tracing::info!(
        seed = config.mock_seed,
        plan = ?config.demo_plan,
        "Loaded configuration"
    );

    let store: Arc<dyn EntityStore> = Arc::new(MemoryStore::new());
    let mock = MockSource::generate(config.mock_seed, Utc::now().date_naive());
    let state = Arc::new(State::new(store, mock, config.demo_plan));
    state.ensure_seed().await?;

    let app = construct_router(state);

    let addr = format!("{}:{}", config.bind_addr, config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
