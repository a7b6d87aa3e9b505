use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use otaku_guide_api::{
    api::{create_router, AppState},
    config::{CatalogSource, Config},
    services::providers::{builtin::BuiltinCatalog, jikan::JikanProvider, CatalogProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "otaku_guide_api=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let provider: Arc<dyn CatalogProvider> = match config.catalog_source {
        CatalogSource::Jikan => Arc::new(JikanProvider::new(config.jikan_api_url.clone())),
        CatalogSource::Builtin => Arc::new(BuiltinCatalog::new()),
    };

    tracing::info!(provider = provider.name(), "Catalog provider ready");

    let state = AppState::new(provider);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
