pub mod error;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use log::info;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::{
    config::Config,
    models::{
        filter::{split_list, FilterSet, Viewport},
        listing::ListingsPage,
    },
    services::{listings, overlays},
};
use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Transport form of the listing filters, as received in the query string.
#[derive(Deserialize, Debug, Default)]
pub struct ListingsParams {
    pub west: Option<f64>,
    pub south: Option<f64>,
    pub east: Option<f64>,
    pub north: Option<f64>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub neighborhoods: Option<String>,
    pub property_types: Option<String>,
}

impl ListingsParams {
    /// Rejects out-of-range values instead of coercing them. Each supplied
    /// coordinate is checked even if the viewport ends up incomplete.
    pub fn into_filters(self) -> Result<FilterSet, ApiError> {
        let edges = [
            ("west", self.west, 180.0),
            ("south", self.south, 90.0),
            ("east", self.east, 180.0),
            ("north", self.north, 90.0),
        ];
        for (name, value, limit) in edges {
            if let Some(degrees) = value {
                if !degrees.is_finite() || degrees.abs() > limit {
                    return Err(ApiError::Validation(format!(
                        "{name} must be between -{limit} and {limit}, got {degrees}"
                    )));
                }
            }
        }

        for (name, value) in [("price_min", self.price_min), ("price_max", self.price_max)] {
            if let Some(price) = value.filter(|price| *price < 0) {
                return Err(ApiError::Validation(format!(
                    "{name} must not be negative, got {price}"
                )));
            }
        }

        Ok(FilterSet {
            viewport: Viewport::from_edges(self.west, self.south, self.east, self.north),
            price_min: self.price_min,
            price_max: self.price_max,
            neighborhoods: split_list(self.neighborhoods.as_deref()),
            property_types: split_list(self.property_types.as_deref()),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/listings", get(get_listings))
        .route("/api/layers/:name", get(get_layer))
        .layer(middleware::from_fn(cors_layer))
        .with_state(state)
}

pub async fn start_http_server(
    state: AppState,
    mut shutdown_rx: tokio::sync::broadcast::Receiver<()>,
) -> Result<()> {
    let bind_addr = state.config.http_bind_address.clone();

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind http listener on {bind_addr}"))?;
    info!("Listening on {bind_addr}");
    let app = router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
        .context("HTTP server crashed")
}

async fn cors_layer(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut response = Response::new(axum::body::Body::empty());
        apply_cors_headers(response.headers_mut());
        *response.status_mut() = StatusCode::NO_CONTENT;
        response
    } else {
        let mut response = next.run(req).await;
        apply_cors_headers(response.headers_mut());
        response
    }
}

// Any origin, method and header is allowed; the API is public and read-only.
fn apply_cors_headers(headers: &mut axum::http::HeaderMap) {
    headers.insert(
        axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        axum::http::header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        axum::http::header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("*"),
    );
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_listings(
    State(state): State<AppState>,
    params: Result<Query<ListingsParams>, QueryRejection>,
) -> Result<Json<ListingsPage>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let filters = params.into_filters()?;

    let page = listings::list_listings(state.config.clone(), filters).await?;
    Ok(Json(page))
}

async fn get_layer(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let overlay = overlays::get_overlay(&state.config, &name).await?;
    Ok(Json(overlay))
}
