//! JSON API over the catalog and the basket.
//!
//! Every basket call acts on [`DEFAULT_USER`]; there is no authentication.
//! Failures are answered with an [`ApiError`] body carrying a correlation id
//! that also appears in the logs.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use webshop_core::domain::basket::{Basket, UserId};
use webshop_core::domain::product::{Product, ProductId};
use webshop_core::errors::{ApplicationError, InterfaceError};
use webshop_db::RepositoryError;

use crate::router::{correlation_id, status_for, AppState};

pub const DEFAULT_USER: UserId = UserId(1);

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub correlation_id: String,
}

/// Form body shared by the add and remove endpoints. Fields stay strings so
/// malformed numbers become a 400 with a useful message.
#[derive(Debug, Default, Deserialize)]
pub struct BasketForm {
    pub product_id: Option<String>,
    pub quantity: Option<String>,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub async fn api_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let mut products = state
        .product_service
        .list_products()
        .await
        .map_err(|error| failure("api.products.list_failed", error.into()))?;
    products.sort_by_key(|product| product.id);
    Ok(Json(products))
}

pub async fn api_product_by_id(
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Product>> {
    let id = parse_product_id(Some(&raw_id))
        .map_err(|error| failure("api.product.invalid_id", error))?;
    let product = state
        .product_service
        .show_product(id)
        .await
        .map_err(|error| failure("api.product.lookup_failed", error.into()))?;
    Ok(Json(product))
}

pub async fn api_basket(State(state): State<AppState>) -> ApiResult<Json<Basket>> {
    let basket = state
        .basket_service
        .get_basket(DEFAULT_USER)
        .await
        .map_err(|error| failure("api.basket.get_failed", error.into()))?;
    Ok(Json(basket))
}

pub async fn api_add_to_basket(
    State(state): State<AppState>,
    Form(form): Form<BasketForm>,
) -> ApiResult<StatusCode> {
    let (product_id, quantity) =
        parse_basket_form(&form).map_err(|error| failure("api.basket.invalid_form", error))?;

    state
        .basket_service
        .add_to_basket(DEFAULT_USER, product_id, quantity)
        .await
        .map_err(|error: RepositoryError| failure("api.basket.add_failed", error.into()))?;

    info!(
        event_name = "api.basket.item_added",
        user_id = %DEFAULT_USER,
        product_id = %product_id,
        quantity,
        "item added to basket"
    );
    Ok(StatusCode::OK)
}

pub async fn api_remove_from_basket(
    State(state): State<AppState>,
    Form(form): Form<BasketForm>,
) -> ApiResult<StatusCode> {
    let (product_id, quantity) =
        parse_basket_form(&form).map_err(|error| failure("api.basket.invalid_form", error))?;

    state
        .basket_service
        .remove_from_basket(DEFAULT_USER, product_id, quantity)
        .await
        .map_err(|error: RepositoryError| failure("api.basket.remove_failed", error.into()))?;

    info!(
        event_name = "api.basket.item_removed",
        user_id = %DEFAULT_USER,
        product_id = %product_id,
        "item removed from basket"
    );
    Ok(StatusCode::OK)
}

fn parse_product_id(raw: Option<&String>) -> Result<ProductId, ApplicationError> {
    let raw = raw.ok_or_else(|| ApplicationError::InvalidInput("missing product_id".into()))?;
    raw.parse::<ProductId>()
        .map_err(|_| ApplicationError::InvalidInput(format!("invalid product id `{raw}`")))
}

fn parse_basket_form(form: &BasketForm) -> Result<(ProductId, i64), ApplicationError> {
    let product_id = parse_product_id(form.product_id.as_ref())?;
    let quantity = match form.quantity.as_deref() {
        None | Some("") => 1,
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| ApplicationError::InvalidInput(format!("invalid quantity `{raw}`")))?,
    };
    Ok((product_id, quantity))
}

fn failure(event_name: &'static str, error: ApplicationError) -> (StatusCode, Json<ApiError>) {
    let error = error.into_interface(correlation_id());
    let status = status_for(&error);

    warn!(
        event_name = event_name,
        correlation_id = %error.correlation_id(),
        status = status.as_u16(),
        error = %error,
        "api request failed"
    );

    let message = match &error {
        InterfaceError::NotFound { message, .. } | InterfaceError::BadRequest { message, .. } => {
            message.clone()
        }
        InterfaceError::Internal { .. } => error.user_message().to_string(),
    };
    (status, Json(ApiError { error: message, correlation_id: error.correlation_id().to_string() }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use webshop_core::domain::product::ProductId;
    use webshop_core::errors::{ApplicationError, DomainError};

    use super::{failure, parse_basket_form, BasketForm};

    fn form(product_id: Option<&str>, quantity: Option<&str>) -> BasketForm {
        BasketForm {
            product_id: product_id.map(str::to_string),
            quantity: quantity.map(str::to_string),
        }
    }

    #[test]
    fn quantity_defaults_to_one() {
        assert_eq!(parse_basket_form(&form(Some("2"), None)), Ok((ProductId(2), 1)));
        assert_eq!(parse_basket_form(&form(Some("2"), Some(""))), Ok((ProductId(2), 1)));
        assert_eq!(parse_basket_form(&form(Some("3"), Some("5"))), Ok((ProductId(3), 5)));
    }

    #[test]
    fn malformed_forms_are_invalid_input() {
        for bad in [
            form(None, None),
            form(Some("two"), None),
            form(Some(" 3 "), None),
            form(Some("2"), Some("1.5")),
            form(Some("2"), Some(" 4")),
        ] {
            assert!(matches!(parse_basket_form(&bad), Err(ApplicationError::InvalidInput(_))));
        }
    }

    #[test]
    fn internal_failures_hide_their_cause() {
        let (status, body) =
            failure("test.failure", ApplicationError::Storage("disk on fire".to_string()));

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "An unexpected internal error occurred.");
        assert!(!body.correlation_id.is_empty());
    }

    #[test]
    fn not_found_failures_name_the_missing_product() {
        let (status, body) =
            failure("test.failure", DomainError::ProductNotFound(ProductId(99)).into());

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "product not found: for ID: 99");
    }
}
