//! HTTP route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{debug, error, warn};

use crate::domain::{GeoPoint, InvalidCoordinate};
use crate::planner::{CancelToken, PlanError, PlanRequest, PlanResult, Planner};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/catalog/lines", get(list_lines))
        .route(
            "/itinerary/plan",
            get(plan_itinerary_query).post(plan_itinerary),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every line in the catalog.
async fn list_lines(State(state): State<AppState>) -> Json<Vec<LineSummary>> {
    Json(
        state
            .catalog
            .lines()
            .iter()
            .map(LineSummary::from_line)
            .collect(),
    )
}

/// Plan itineraries between two coordinate pairs.
async fn plan_itinerary(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanItineraryResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanItineraryRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid plan request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let request = PlanRequest::new(req.origin.to_point()?, req.destination.to_point()?);
    let result = run_plan(&state, request).await?;
    Ok(Json(PlanItineraryResponse::from_result(&result)))
}

/// Plan itineraries between two coordinate strings.
async fn plan_itinerary_query(
    State(state): State<AppState>,
    Query(query): Query<PlanItineraryQuery>,
) -> Result<Json<PlanItineraryResponse>, AppError> {
    let origin: GeoPoint = query.from.parse()?;
    let destination: GeoPoint = query.to.parse()?;

    let result = run_plan(&state, PlanRequest::new(origin, destination)).await?;
    Ok(Json(PlanItineraryResponse::from_result(&result)))
}

/// Cancels a search when the handler future is dropped, e.g. because the
/// client went away.
struct CancelOnDrop(CancelToken);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

/// Serve a plan from the cache, or run the planner off the async runtime.
async fn run_plan(state: &AppState, request: PlanRequest) -> Result<Arc<PlanResult>, AppError> {
    if let Some(cached) = state.cache.get(&request).await {
        debug!(origin = %request.origin, destination = %request.destination, "plan cache hit");
        return Ok(cached);
    }

    let catalog = state.catalog.clone();
    let config = state.config.clone();
    let cancel = CancelToken::new();
    let _guard = CancelOnDrop(cancel.clone());

    let result = tokio::task::spawn_blocking(move || {
        Planner::new(&catalog, &config).plan_with_cancel(&request, &cancel)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("planner task failed: {e}"),
    })??;

    let result = Arc::new(result);
    state.cache.insert(&request, result.clone()).await;
    debug!(entries = state.cache.entry_count(), "plan cached");
    Ok(result)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<InvalidCoordinate> for AppError {
    fn from(e: InvalidCoordinate) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(msg) => AppError::BadRequest { message: msg },
            PlanError::Cancelled | PlanError::Timeout => AppError::Unavailable {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(status = %status, error = %message, "request failed");
        } else {
            warn!(status = %status, error = %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::domain::{LineId, Stop, TransitCatalog, TransitLine};
    use crate::planner::PlannerConfig;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_catalog() -> TransitCatalog {
        let stops = vec![
            Stop::new("Quay", GeoPoint::new(0.0, 0.0).unwrap()),
            Stop::new("Market", GeoPoint::new(0.0, 0.02).unwrap()),
        ];
        TransitCatalog::new(vec![TransitLine::new(
            LineId::new("7").unwrap(),
            Some("Harbour Loop".to_string()),
            stops,
        )])
        .unwrap()
    }

    fn app_with(config: PlannerConfig) -> (Router, AppState) {
        let state = AppState::new(test_catalog(), config, &CacheConfig::default());
        (create_router(state.clone()), state)
    }

    fn app() -> Router {
        app_with(PlannerConfig::default()).0
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn post_plan(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/itinerary/plan")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_check() {
        let response = app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn lists_lines() {
        let (status, json) = send(app(), get("/catalog/lines")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["id"], "7");
        assert_eq!(json[0]["name"], "Harbour Loop");
        assert_eq!(json[0]["stop_count"], 2);
    }

    #[tokio::test]
    async fn plans_direct_ride() {
        let (status, json) = send(
            app(),
            post_plan(r#"{"origin":{"lat":0.0,"lon":0.0},"destination":{"lat":0.0,"lon":0.02}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let itineraries = json["itineraries"].as_array().unwrap();
        assert_eq!(itineraries.len(), 1);
        assert_eq!(itineraries[0]["segments"][0]["line_id"], "7");
        assert_eq!(itineraries[0]["segments"][0]["boarding"], "Quay");
        assert_eq!(json["stats"]["lines_searched"], 1);
    }

    #[tokio::test]
    async fn plans_from_query_strings() {
        let (status, json) = send(app(), get("/itinerary/plan?from=0.0,0.0&to=0.0,0.02")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["itineraries"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn nothing_found_is_empty_list() {
        let (status, json) = send(
            app(),
            post_plan(r#"{"origin":{"lat":10.0,"lon":10.0},"destination":{"lat":20.0,"lon":20.0}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["itineraries"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_coordinate_is_bad_request() {
        let (status, json) = send(
            app(),
            post_plan(r#"{"origin":{"lat":95.0,"lon":0.0},"destination":{"lat":0.0,"lon":0.0}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("invalid coordinate"));
    }

    #[tokio::test]
    async fn unparsable_query_is_bad_request() {
        let (status, _) = send(app(), get("/itinerary/plan?from=nowhere&to=0,0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_json_is_bad_request() {
        let (status, json) = send(app(), post_plan("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn timeout_is_service_unavailable() {
        let config = PlannerConfig {
            time_budget: Some(Duration::ZERO),
            ..PlannerConfig::default()
        };
        let (app, _) = app_with(config);
        let (status, json) = send(
            app,
            post_plan(r#"{"origin":{"lat":0.0,"lon":0.0},"destination":{"lat":0.0,"lon":0.02}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"], "search timed out");
    }

    #[tokio::test]
    async fn plans_are_cached() {
        let (app, state) = app_with(PlannerConfig::default());
        let body = r#"{"origin":{"lat":0.0,"lon":0.0},"destination":{"lat":0.0,"lon":0.02}}"#;

        let (status, _) = send(app, post_plan(body)).await;
        assert_eq!(status, StatusCode::OK);

        let request = PlanRequest::new(
            GeoPoint::new(0.0, 0.0).unwrap(),
            GeoPoint::new(0.0, 0.02).unwrap(),
        );
        assert!(state.cache.get(&request).await.is_some());
    }
}
