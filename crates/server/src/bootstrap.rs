use std::sync::Arc;

use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::info;
use webshop_core::config::{AppConfig, ConfigError, LoadOptions};
use webshop_db::{
    DelegatingBasketService, DelegatingProductService, InMemoryBasketRepository,
    InMemoryProductRepository, RepositoryError,
};

use crate::flash::FlashStore;
use crate::router::AppState;
use crate::templates::init_templates;

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("sample catalog rejected: {0}")]
    Catalog(#[from] RepositoryError),
    #[error("page templates failed to compile: {0}")]
    Templates(#[from] tera::Error),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let products = InMemoryProductRepository::seeded()?;
    let product_count = products.product_count().await;
    let product_service = Arc::new(DelegatingProductService::new(Arc::new(products)));
    let basket_service =
        Arc::new(DelegatingBasketService::new(Arc::new(InMemoryBasketRepository::default())));
    info!(
        event_name = "system.bootstrap.catalog_seeded",
        correlation_id = "bootstrap",
        product_count,
        "in-memory catalog seeded"
    );

    let flashes = Arc::new(FlashStore::new(
        config.session.cookie_name.clone(),
        config.session.flash_secret.expose_secret().to_string().into(),
    ));
    let templates = Arc::new(init_templates()?);
    info!(
        event_name = "system.bootstrap.templates_loaded",
        correlation_id = "bootstrap",
        template_count = templates.get_template_names().count(),
        "page templates compiled"
    );

    Ok(Application {
        config,
        state: AppState { product_service, basket_service, flashes, templates },
    })
}
