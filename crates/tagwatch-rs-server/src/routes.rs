//! Route table and handlers.

use crate::{ApiError, AppState};
use axum::extract::{Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use log::info;
use std::time::Instant;
use tagwatch_rs_protocol::{
    QuestionsParams, QuestionsResponse, SaveResponseReply, SaveResponseRequest,
};

/// Build the service router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions))
        .route("/save-response", post(save_response))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Recent questions for a tag, e.g. `/questions?tagged=python&pagesize=3&days=2`.
async fn get_questions(
    State(state): State<AppState>,
    Query(params): Query<QuestionsParams>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let response = state
        .fetcher
        .fetch_params(params, Utc::now().timestamp())
        .await?;
    Ok(Json(response))
}

/// Persist `agent_response` as a new blob and return its name.
async fn save_response(
    State(state): State<AppState>,
    Json(request): Json<SaveResponseRequest>,
) -> Result<Json<SaveResponseReply>, ApiError> {
    let blob_name = state.persister.save(&request.agent_response).await?;
    Ok(Json(SaveResponseReply { blob_name }))
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    info!(
        "{} {} {} ({} ms)",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}
