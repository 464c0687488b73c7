//! REST handlers for the readiness dashboard
//!
//! These handlers use the shared DashboardService.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::service::DashboardService;
use crate::models::{
    Category, CategoryCount, CountryCount, Direction, MapPoint, Thresholds, ViewState,
};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct SummaryResponse {
    pub source: String,
    pub total_bases: usize,
    pub thresholds: Thresholds,
    pub category_counts: Vec<CategoryCount>,
    pub top_countries: Vec<CountryCount>,
    pub bottom_countries: Vec<CountryCount>,
}

#[derive(Serialize)]
pub struct BasesResponse {
    pub count: usize,
    pub bases: Vec<MapPoint>,
}

#[derive(Serialize)]
pub struct RankingsResponse {
    pub direction: Direction,
    pub threshold: f64,
    pub countries: Vec<CountryCount>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Deserialize)]
pub struct BasesQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct RankingsQuery {
    pub direction: Option<String>,
    pub limit: Option<usize>,
}

// ============================================================================
// Handlers
// ============================================================================

pub type AppState = DashboardService;

/// GET /api/v1/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /api/v1/summary
pub async fn get_summary(State(service): State<AppState>) -> Json<SummaryResponse> {
    let summary = service.summary();
    Json(SummaryResponse {
        source: service.analyzer().dataset().source().to_string(),
        total_bases: summary.total_bases,
        thresholds: summary.thresholds,
        category_counts: summary.category_counts,
        top_countries: summary.top_countries,
        bottom_countries: summary.bottom_countries,
    })
}

/// GET /api/v1/thresholds
pub async fn get_thresholds(State(service): State<AppState>) -> Json<Thresholds> {
    Json(service.thresholds())
}

/// GET /api/v1/view
pub async fn get_view(State(service): State<AppState>) -> Json<ViewState> {
    Json(service.view_state())
}

/// GET /api/v1/bases?category=Q1&limit=N
pub async fn get_bases(
    State(service): State<AppState>,
    Query(params): Query<BasesQuery>,
) -> Result<Json<BasesResponse>, ApiError> {
    let category = params
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()
        .map_err(bad_request)?;
    let bases = service.bases(category, params.limit.unwrap_or(usize::MAX));
    Ok(Json(BasesResponse {
        count: bases.len(),
        bases,
    }))
}

/// GET /api/v1/rankings?direction=high|low&limit=N
pub async fn get_rankings(
    State(service): State<AppState>,
    Query(params): Query<RankingsQuery>,
) -> Result<Json<RankingsResponse>, ApiError> {
    let direction = params
        .direction
        .as_deref()
        .unwrap_or("high")
        .parse::<Direction>()
        .map_err(bad_request)?;
    let thresholds = service.thresholds();
    let threshold = match direction {
        Direction::High => thresholds.q3,
        Direction::Low => thresholds.q1,
    };
    Ok(Json(RankingsResponse {
        direction,
        threshold,
        countries: service.rankings(direction, params.limit),
    }))
}

pub fn create_router(service: DashboardService) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/summary", get(get_summary))
        .route("/api/v1/thresholds", get(get_thresholds))
        .route("/api/v1/view", get(get_view))
        .route("/api/v1/bases", get(get_bases))
        .route("/api/v1/rankings", get(get_rankings))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ReadinessAnalyzer;
    use crate::config::AnalyzerConfig;
    use crate::loader::Dataset;
    use crate::models::BaseRecord;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        let records = vec![
            BaseRecord::new("Alpha", "A", 50.0, 10.0, 10.0),
            BaseRecord::new("Bravo", "B", 45.0, 20.0, 20.0),
            BaseRecord::new("Charlie", "A", 40.0, 30.0, 30.0),
            BaseRecord::new("Delta", "A", 35.0, 40.0, 40.0),
        ];
        let analyzer =
            ReadinessAnalyzer::new(Dataset::new("test", records), AnalyzerConfig::default())
                .unwrap();
        create_router(DashboardService::new(analyzer))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_summary() {
        let (status, body) = get_json("/api/v1/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_bases"], 4);
        assert_eq!(body["thresholds"]["q1"], 17.5);
        assert_eq!(body["thresholds"]["q3"], 32.5);
        assert_eq!(body["top_countries"][0]["country"], "A");
        assert_eq!(body["bottom_countries"][0]["country"], "A");
    }

    #[tokio::test]
    async fn test_bases_filtered_by_category() {
        let (status, body) = get_json("/api/v1/bases?category=q2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["bases"][0]["base_name"], "Bravo");
        assert_eq!(body["bases"][0]["color"], serde_json::json!([255, 165, 0]));
        assert_eq!(body["bases"][0]["position"], serde_json::json!([20.0, 45.0]));
    }

    #[tokio::test]
    async fn test_bases_unknown_category() {
        let (status, body) = get_json("/api/v1/bases?category=Q9").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Q9"));
    }

    #[tokio::test]
    async fn test_rankings_low() {
        let (status, body) = get_json("/api/v1/rankings?direction=low&limit=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["direction"], "low");
        assert_eq!(body["threshold"], 17.5);
        assert_eq!(body["countries"], serde_json::json!([{"country": "A", "count": 1}]));
    }

    #[tokio::test]
    async fn test_view() {
        let (_, body) = get_json("/api/v1/view").await;
        assert_eq!(body["latitude"], 42.5);
        assert_eq!(body["longitude"], 25.0);
        assert_eq!(body["zoom"], 1.3);
    }
}
