use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tera::Tera;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tracing::debug;
use uuid::Uuid;
use webshop_core::config::ServerConfig;
use webshop_core::errors::InterfaceError;
use webshop_db::{BasketService, ProductService};

use crate::flash::FlashStore;
use crate::{api, health, web};

#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub basket_service: Arc<dyn BasketService>,
    pub flashes: Arc<FlashStore>,
    pub templates: Arc<Tera>,
}

pub fn router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        // HTML routes
        .route("/", get(web::products))
        .route("/product/{id}", get(web::product_by_id))
        // JSON API routes
        .route("/api/products", get(api::api_products))
        .route("/api/products/{id}", get(api::api_product_by_id))
        .route("/api/basket", get(api::api_basket).post(api::api_add_to_basket))
        .route("/api/basket/remove", post(api::api_remove_from_basket))
        .route("/health", get(health::health))
        .nest_service("/static", ServeDir::new(&server.static_dir))
        .fallback(web::not_found)
        .layer(middleware::from_fn(log_request))
        .layer(timeout_layer(Duration::from_secs(server.request_timeout_secs)))
        .with_state(state)
}

fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

pub fn status_for(error: &InterfaceError) -> StatusCode {
    match error {
        InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

async fn log_request(request: Request, next: Next) -> Response {
    debug!(
        event_name = "web.request.received",
        method = %request.method(),
        uri = %request.uri(),
        "handling request"
    );
    next.run(request).await
}
