//! OpenSASE Storefront - catalog, filters and cart served as JSON

use anyhow::Result;
use opensase_storefront::{api, FileCatalogSource, HttpCatalogSource, StorefrontConfig, StorefrontSession};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();
    let config = StorefrontConfig::from_env()?;

    let mut session = match &config.catalog_file {
        Some(path) => StorefrontSession::open(&FileCatalogSource::new(path)).await,
        None => StorefrontSession::open(&HttpCatalogSource::new(&config.catalog_url)?).await,
    };
    for event in session.take_events() { tracing::info!(?event, "storefront event"); }

    let app = api::router(api::AppState::new(session));
    tracing::info!("🛒 OpenSASE Storefront listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?, app).await?;
    Ok(())
}
