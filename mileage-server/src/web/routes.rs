//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{Duration, NaiveDate};

use crate::domain::Airport;
use crate::planner::{self, RankError, RouteSession, SearchError, SearchRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/routes/build", post(build_routes))
        .route("/routes/rerank", post(rerank_routes))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn parse_date(s: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::BadRequest {
        message: format!("invalid {field} {s:?}, expected YYYY-MM-DD"),
    })
}

/// Search for qualifying itineraries and open a session over the
/// results.
async fn build_routes(
    State(state): State<AppState>,
    Json(req): Json<BuildRoutesRequest>,
) -> Result<Json<BuildRoutesResponse>, AppError> {
    let origin = Airport::parse_normalized(&req.origin).map_err(|_| AppError::BadRequest {
        message: format!("invalid origin airport code: {}", req.origin),
    })?;
    let start_date = parse_date(&req.start_date, "start_date")?;
    let end_date = parse_date(&req.end_date, "end_date")?;
    let min_layover = req
        .min_layover_mins
        .map(Duration::minutes)
        .unwrap_or_else(|| state.config.default_min_layover());

    let request = SearchRequest::new(
        origin,
        req.target_amount,
        min_layover,
        req.max_stops,
        start_date,
        end_date,
    );

    let session = RouteSession::build(&state.catalog, &request, &state.config)?;

    let routes_found = session.routes_found();
    let expansions = session.expansions();
    let weights = session.derived_weights();
    let routes = planner::assemble(session.ranking(), state.config.max_results);
    let session_id = state.sessions.insert(session);

    Ok(Json(BuildRoutesResponse {
        session_id,
        routes_found,
        expansions,
        weights,
        routes,
    }))
}

/// Re-rank a previous search's routes with user weights.
async fn rerank_routes(
    State(state): State<AppState>,
    Json(req): Json<RerankRequest>,
) -> Result<Json<RerankResponse>, AppError> {
    let session = state
        .sessions
        .get(req.session_id)
        .ok_or(AppError::NoActiveSearch {
            session_id: req.session_id,
        })?;

    let ranked = session.rerank(
        req.time_weight,
        req.cost_weight,
        req.connection_weight.unwrap_or(0.0),
    )?;
    let routes = planner::assemble(&ranked, state.config.max_results);

    Ok(Json(RerankResponse {
        session_id: req.session_id,
        routes,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or contract-violating input.
    BadRequest { message: String },

    /// Re-rank against a session that doesn't exist: the search must
    /// run before its results can be re-ranked.
    NoActiveSearch { session_id: u64 },

    /// The request was well-formed but the search couldn't finish it.
    Unprocessable { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(message) => AppError::BadRequest { message },
            SearchError::BudgetExceeded { .. } => AppError::Unprocessable {
                message: e.to_string(),
            },
        }
    }
}

impl From<RankError> for AppError {
    fn from(e: RankError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NoActiveSearch { session_id } => (
                StatusCode::CONFLICT,
                format!("no search session {session_id}; run a search first"),
            ),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
        };

        tracing::warn!(%status, message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
