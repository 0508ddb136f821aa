//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{TransportMode, ValidationError};
use crate::engine::EngineError;
use crate::planner::PlannedTrip;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Default number of city suggestions.
const DEFAULT_CITY_LIMIT: usize = 10;

/// Upper bound on city suggestions per request.
const MAX_CITY_LIMIT: usize = 50;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/plan-trip", post(plan_trip))
        .route("/api/cities/search", get(search_cities))
        .route("/cities.csv", get(cities_file))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the trip form.
async fn index_page() -> impl IntoResponse {
    let template = IndexTemplate {
        modes: TransportMode::ALL.iter().map(|m| m.as_str()).collect(),
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Search cities by name or country.
async fn search_cities(
    State(state): State<AppState>,
    Query(req): Query<CitySearchRequest>,
) -> Json<CitySearchResponse> {
    let limit = req.limit.unwrap_or(DEFAULT_CITY_LIMIT).min(MAX_CITY_LIMIT);
    let cities = state
        .cities
        .search(&req.q, limit)
        .await
        .into_iter()
        .map(CitySearchResult::from)
        .collect();

    Json(CitySearchResponse { cities })
}

/// The raw city list, for clients that build their own suggestions.
async fn cities_file(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        state.cities.raw().await,
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan a trip with the external engine.
async fn plan_trip(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let html = accepts_html(&headers);

    let trip = match run_planner(&state, &body).await {
        Ok(trip) => trip,
        Err(e) if html => return e.into_html_response(),
        Err(e) => return e.into_response(),
    };

    if !html {
        return Json(PlanTripResponse {
            output: trip.output,
            plan: trip.plan,
        })
        .into_response();
    }

    let rendered = match TripPlanView::from_plan(&trip.plan) {
        TripPlanView::NoRoute => ErrorTemplate {
            title: "No route".to_string(),
            message: NO_ROUTE_MESSAGE.to_string(),
        }
        .render(),
        TripPlanView::Itinerary(itinerary) => TripResultsTemplate { itinerary }.render(),
    };

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => AppError::Internal {
            message: format!("Template error: {}", e),
        }
        .into_html_response(),
    }
}

async fn run_planner(state: &AppState, body: &[u8]) -> Result<PlannedTrip, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanTripRequest = serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "invalid plan-trip JSON");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let request = req.into_trip_request()?;
    let trip = state.planner.plan(&request).await?;
    Ok(trip)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Timeout,
    Internal { message: String },
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "Trip planning timed out".to_string(),
            ),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        }
    }

    /// Render as an HTML error fragment instead of JSON.
    pub fn into_html_response(self) -> Response {
        let (status, message) = self.status_and_message();
        warn!(%status, %message, "request failed");

        let html = ErrorTemplate {
            title: "Error".to_string(),
            message,
        }
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e));
        (status, Html(html)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        // Engine diagnostics stay in the server log.
        error!(error = %e, "engine invocation failed");
        match e {
            EngineError::Timeout { .. } => AppError::Timeout,
            _ => AppError::Internal {
                message: "Failed to plan trip".to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
