//! HTML pages.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use tera::Context;
use tracing::{error, warn};
use webshop_core::domain::product::ProductId;
use webshop_core::errors::{ApplicationError, InterfaceError};

use crate::flash::TakenFlashes;
use crate::router::{correlation_id, status_for, AppState};
use crate::templates::{HOMEPAGE, NOT_FOUND, PRODUCT};

const INVALID_PRODUCT_FLASH: &str = "warning|Invalid product ID given";

pub async fn products(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = correlation_id();

    let mut products = match state.product_service.list_products().await {
        Ok(products) => products,
        Err(error) => {
            return error_page(&state, ApplicationError::from(error).into_interface(&correlation_id))
        }
    };
    products.sort_by_key(|product| product.id);

    let flashes = state.flashes.take_flashes(&headers);
    let mut context = page_context(&flashes.messages);
    context.insert("products", &products);
    render_with_flashes(&state, HOMEPAGE, &context, flashes, &correlation_id)
}

pub async fn product_by_id(
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = correlation_id();

    let Ok(id) = raw_id.parse::<ProductId>() else {
        warn!(
            event_name = "web.product.invalid_id",
            correlation_id = %correlation_id,
            raw_id = %raw_id,
            "redirecting after an invalid product id"
        );
        let mut response = Redirect::temporary("/").into_response();
        match state.flashes.add_flash(&headers, INVALID_PRODUCT_FLASH) {
            Ok(cookie) => {
                response.headers_mut().append(header::SET_COOKIE, cookie);
            }
            Err(err) => error!(
                event_name = "web.flash.store_failed",
                correlation_id = %correlation_id,
                error = %err,
                "could not store flash message"
            ),
        }
        return response;
    };

    let product = match state.product_service.show_product(id).await {
        Ok(product) => product,
        Err(error) => {
            return error_page(&state, ApplicationError::from(error).into_interface(&correlation_id))
        }
    };

    let flashes = state.flashes.take_flashes(&headers);
    let mut context = page_context(&flashes.messages);
    context.insert("product", &product);
    render_with_flashes(&state, PRODUCT, &context, flashes, &correlation_id)
}

/// Fallback for unmatched paths. Pending flashes are left for the next page.
pub async fn not_found(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    warn!(event_name = "web.route.not_found", method = %method, uri = %uri, "no route matched");
    not_found_page(&state)
}

fn page_context(flashes: &BTreeMap<String, String>) -> Context {
    let mut context = Context::new();
    context.insert("user", &false);
    context.insert("flashes", flashes);
    context
}

/// Renders a page that displayed the request's flashes, clearing them on success.
fn render_with_flashes(
    state: &AppState,
    template: &str,
    context: &Context,
    flashes: TakenFlashes,
    correlation_id: &str,
) -> Response {
    match state.templates.render(template, context) {
        Ok(body) => {
            let mut response = (StatusCode::OK, Html(body)).into_response();
            if let Some(clear) = flashes.clear_cookie {
                response.headers_mut().append(header::SET_COOKIE, clear);
            }
            response
        }
        Err(err) => error_page(
            state,
            ApplicationError::Rendering(format!("{template}: {err}")).into_interface(correlation_id),
        ),
    }
}

fn error_page(state: &AppState, error: InterfaceError) -> Response {
    if matches!(error, InterfaceError::NotFound { .. }) {
        return not_found_page(state);
    }

    error!(
        event_name = "web.page.failed",
        correlation_id = %error.correlation_id(),
        error = %error,
        "page request failed"
    );
    let body = Html(format!(
        "<h1>Error</h1><p>{}</p><p>Reference: {}</p>",
        error.user_message(),
        error.correlation_id()
    ));
    (status_for(&error), body).into_response()
}

fn not_found_page(state: &AppState) -> Response {
    let body = state.templates.render(NOT_FOUND, &page_context(&BTreeMap::new())).unwrap_or_else(
        |err| {
            error!(event_name = "web.page.render_failed", error = %err, "404 template failed");
            "<h1>Page not found</h1>".to_string()
        },
    );
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}
