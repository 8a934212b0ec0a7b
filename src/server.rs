//! JSON HTTP front end over [`RentalService`].

use crate::aggregator::RentalService;
use crate::error::SearchError;
use crate::models::{City, VehicleRecord};
use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleQuery {
    #[serde(default)]
    pub city_slug: String,
    #[serde(default)]
    pub pickup_date: String,
    #[serde(default)]
    pub dropoff_date: String,
}

#[derive(Debug, Serialize)]
pub struct Performance {
    pub execution_time: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclesResponse {
    pub success: bool,
    pub data: Vec<VehicleRecord>,
    pub total: usize,
    pub searched_branches: usize,
    pub total_branches: usize,
    pub parallel_search: bool,
    pub performance: Performance,
}

#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub success: bool,
    pub cities: Vec<City>,
}

/// [`SearchError`] rendered as a `{success: false, error}` body
pub struct ApiError(SearchError);

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SearchError::Validation(_) => StatusCode::BAD_REQUEST,
            SearchError::NotFound { .. } => StatusCode::NOT_FOUND,
            SearchError::Transport(_) => StatusCode::BAD_GATEWAY,
        };

        if self.0.is_client_error() {
            info!("Rejected request: {}", self.0);
        } else {
            error!("Request failed: {}", self.0);
        }

        let body = match &self.0 {
            SearchError::NotFound { .. } => json!({
                "success": false,
                "error": self.0.to_string(),
                "data": [],
            }),
            _ => json!({
                "success": false,
                "error": self.0.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn search_vehicles(
    State(service): State<RentalService>,
    Query(query): Query<VehicleQuery>,
) -> Result<Json<VehiclesResponse>, ApiError> {
    let started = Instant::now();

    let outcome = service
        .get_available_vehicles(&query.city_slug, &query.pickup_date, &query.dropoff_date)
        .await?;

    let elapsed = started.elapsed().as_secs_f64();
    if outcome.branches_searched < outcome.branches_total {
        warn!(
            "Only {}/{} branches answered",
            outcome.branches_searched, outcome.branches_total
        );
    }

    Ok(Json(VehiclesResponse {
        success: true,
        total: outcome.vehicles.len(),
        searched_branches: outcome.branches_searched,
        total_branches: outcome.branches_total,
        parallel_search: outcome.parallel_search,
        data: outcome.vehicles,
        performance: Performance {
            execution_time: format!("{:.2} seconds", elapsed),
        },
    }))
}

async fn cities(State(service): State<RentalService>) -> Result<Json<CitiesResponse>, ApiError> {
    let cities = service.list_cities().await?;
    Ok(Json(CitiesResponse {
        success: true,
        cities,
    }))
}

/// The browser UI may be served from another origin
async fn allow_any_origin(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

pub fn router(service: RentalService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/vehicles", get(search_vehicles))
        .route("/api/cities", get(cities))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(service)
}

/// Bind `bind_addr` and serve until the process is stopped
pub async fn serve(service: RentalService, bind_addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    info!("🚗 Rental Scout listening on http://{}", listener.local_addr()?);
    info!("   GET /api/vehicles?citySlug=&pickupDate=&dropoffDate=");
    info!("   GET /api/cities");
    info!("   GET /health");

    axum::serve(listener, router(service))
        .await
        .context("HTTP server stopped")?;
    Ok(())
}
