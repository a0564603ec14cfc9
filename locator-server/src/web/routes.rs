//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::BackendKind;
use crate::domain::{Coordinate, InvalidCoordinate};
use crate::geocode::GeocodeError;
use crate::resolver::{
    RankedStation, ResolveError, Selection, rank, resolve_nearest_by_address,
};
use crate::suggest::suggest_addresses;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/nearest", get(nearest))
        .route("/api/nearest/by-address", get(nearest_by_address))
        .route("/api/suggest", get(suggest))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let template = IndexTemplate {
        default_k: state.default_selection.limit(usize::MAX),
        station_count: state.catalog.len(),
        address_search_enabled: state.backend != BackendKind::Unconfigured,
    };

    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// The whole catalog, in catalog order.
async fn list_stations(State(state): State<AppState>) -> Json<CatalogResponse> {
    let stations = state
        .catalog
        .iter()
        .map(|(id, station)| StationResult::from_station(id, station))
        .collect();

    Json(CatalogResponse {
        datum: state.catalog.datum(),
        stations,
    })
}

/// Rank stations around a coordinate.
async fn nearest(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<NearestRequest>,
) -> Result<Response, AppError> {
    let selection = selection_from(req.k, req.all, state.default_selection)?;
    let location = Coordinate::new(req.lat, req.lon)?;
    let ranked = rank(location, &state.catalog, selection);

    render_ranked(&state, &headers, location.to_string(), location, &ranked)
}

/// Geocode an address, then rank stations around it.
async fn nearest_by_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<AddressRequest>,
) -> Result<Response, AppError> {
    let selection = selection_from(req.k, req.all, state.default_selection)?;

    let resolved =
        resolve_nearest_by_address(&*state.geocoder, &state.catalog, &req.address, selection)
            .await?;

    info!(
        address = %req.address.trim(),
        location = %resolved.location,
        results = resolved.stations.len(),
        "address search"
    );

    render_ranked(
        &state,
        &headers,
        req.address.trim().to_string(),
        resolved.location,
        &resolved.stations,
    )
}

/// Address suggestions. Never fails: backend errors become an empty list.
async fn suggest(
    State(state): State<AppState>,
    Query(req): Query<SuggestRequest>,
) -> Json<SuggestResponse> {
    let suggestions = match suggest_addresses(&*state.suggester, &req.q).await {
        Ok(suggestions) => suggestions,
        Err(e) => {
            warn!(error = %e, "address suggestions unavailable");
            Vec::new()
        }
    };

    Json(SuggestResponse { suggestions })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Turn `k`/`all` query parameters into a selection.
fn selection_from(
    k: Option<usize>,
    all: Option<bool>,
    default: Selection,
) -> Result<Selection, AppError> {
    match (k, all.unwrap_or(false)) {
        (Some(_), true) => Err(AppError::BadRequest {
            message: "use either k or all, not both".to_string(),
        }),
        (None, true) => Ok(Selection::All),
        (Some(k), false) => Selection::top(k).ok_or_else(|| AppError::BadRequest {
            message: "k must be a positive integer".to_string(),
        }),
        (None, false) => Ok(default),
    }
}

/// Return ranked stations as HTML or JSON based on the Accept header.
fn render_ranked(
    state: &AppState,
    headers: &HeaderMap,
    query: String,
    location: Coordinate,
    ranked: &[RankedStation<'_>],
) -> Result<Response, AppError> {
    if accepts_html(headers) {
        let template = StationListTemplate::new(query, location.to_string(), ranked);
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        let stations = ranked.iter().map(RankedStationResult::from_ranked).collect();

        Ok(Json(NearestResponse {
            query: location.into(),
            datum: state.catalog.datum(),
            stations,
        })
        .into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    InvalidCoordinate(InvalidCoordinate),
    Geocode(GeocodeError),
    Internal { message: String },
}

impl AppError {
    /// HTTP status and machine-readable kind.
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::BadRequest { .. } => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::InvalidCoordinate(_) => (StatusCode::BAD_REQUEST, "invalid_coordinate"),
            AppError::Geocode(GeocodeError::EmptyAddress) => {
                (StatusCode::BAD_REQUEST, "empty_address")
            }
            AppError::Geocode(GeocodeError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "geocode_failed")
            }
            AppError::Geocode(GeocodeError::NotConfigured) => {
                (StatusCode::SERVICE_UNAVAILABLE, "geocode_failed")
            }
            AppError::Geocode(_) => (StatusCode::BAD_GATEWAY, "geocode_failed"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::BadRequest { message } | AppError::Internal { message } => message.clone(),
            AppError::InvalidCoordinate(e) => e.to_string(),
            AppError::Geocode(e) => e.to_string(),
        }
    }
}

impl From<InvalidCoordinate> for AppError {
    fn from(e: InvalidCoordinate) -> Self {
        AppError::InvalidCoordinate(e)
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::InvalidCoordinate(e) => AppError::InvalidCoordinate(e),
            ResolveError::GeocodeFailed(e) => AppError::Geocode(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, kind) = self.status_and_kind();
        let message = self.message();

        if status.is_server_error() {
            error!(%status, kind, %message, "request failed");
        } else {
            warn!(%status, kind, %message, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: kind,
            message,
        });
        (status, body).into_response()
    }
}
