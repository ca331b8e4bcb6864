use crate::export::ranking_to_csv;
use crate::infra::{AppState, HistoryEntry, RankingState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use resume_ranker::error::AppError;
use resume_ranker::screening::{Document, NormalizationOptions, RankedResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct RankingRequest {
    #[serde(default)]
    pub(crate) job_description: String,
    pub(crate) resumes: Vec<Document>,
    #[serde(default)]
    pub(crate) options: Option<NormalizationOptions>,
    #[serde(default)]
    pub(crate) include_text: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankedEntry {
    pub(crate) rank: usize,
    pub(crate) id: String,
    pub(crate) score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) text: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankingResponse {
    pub(crate) ranking_id: u64,
    pub(crate) ranked: Vec<RankedEntry>,
    /// Identifiers of blank resumes that were not ranked.
    pub(crate) excluded: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HistoryResponse {
    pub(crate) rankings: Vec<HistoryEntry>,
}

pub(crate) fn ranking_router(state: RankingState) -> Router {
    Router::new()
        .route("/api/v1/rankings", post(rank_endpoint))
        .route("/api/v1/rankings/export", post(export_endpoint))
        .route("/api/v1/rankings/history", get(history_endpoint))
        .with_state(state)
}

pub(crate) fn with_service_routes(state: RankingState) -> Router {
    ranking_router(state)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn run_ranking(
    state: &RankingState,
    request: &RankingRequest,
) -> Result<Vec<RankedResult>, AppError> {
    if request.resumes.len() > state.max_documents {
        return Err(AppError::Request(format!(
            "{} resumes submitted, at most {} accepted per ranking",
            request.resumes.len(),
            state.max_documents
        )));
    }

    let ranked = match request.options {
        Some(options) => state
            .ranker
            .with_normalization(options)
            .rank(&request.job_description, &request.resumes),
        None => state.ranker.rank(&request.job_description, &request.resumes),
    };
    Ok(ranked)
}

pub(crate) async fn rank_endpoint(
    State(state): State<RankingState>,
    Json(request): Json<RankingRequest>,
) -> Result<Json<RankingResponse>, AppError> {
    let ranked = run_ranking(&state, &request)?;
    let ranking_id = state.history.record(&ranked);
    info!(
        ranking_id,
        submitted = request.resumes.len(),
        ranked = ranked.len(),
        "ranking served"
    );

    let excluded = request
        .resumes
        .iter()
        .filter(|doc| doc.is_blank())
        .map(|doc| doc.id.clone())
        .collect();
    let ranked = ranked
        .into_iter()
        .enumerate()
        .map(|(index, result)| RankedEntry {
            rank: index + 1,
            id: result.id,
            score: result.score,
            text: request.include_text.then_some(result.text),
        })
        .collect();

    Ok(Json(RankingResponse {
        ranking_id,
        ranked,
        excluded,
    }))
}

pub(crate) async fn export_endpoint(
    State(state): State<RankingState>,
    Json(request): Json<RankingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ranked = run_ranking(&state, &request)?;
    let csv = ranking_to_csv(&ranked)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resume_rankings.csv\"",
            ),
        ],
        csv,
    ))
}

pub(crate) async fn history_endpoint(State(state): State<RankingState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        rankings: state.history.entries(),
    })
}
