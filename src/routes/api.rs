//! JSON scoring endpoint for programmatic callers.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::{debug, info_span, warn};
use uuid::Uuid;

use super::AppState;
use crate::error::AppError;
use crate::models::SurveyForm;
use crate::scoring::{self, ScoreSet};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/assessment", post(handler))
}

async fn handler(
    State(state): State<AppState>,
    payload: Result<Json<SurveyForm>, JsonRejection>,
) -> Result<Json<ScoreSet>, AppError> {
    // ---
    let Json(survey) = payload.map_err(|e| {
        warn!("POST /api/assessment - unreadable body: {}", e.body_text());
        AppError::from(e)
    })?;
    let submission_id = Uuid::new_v4();
    let span = info_span!("api_assessment", %submission_id);

    span.in_scope(|| -> Result<Json<ScoreSet>, AppError> {
        let input = survey.validate().map_err(|e| {
            warn!("POST /api/assessment - rejected: {}", e);
            AppError::from(e)
        })?;
        let scores = scoring::evaluate(&input, state.config.current_year());
        debug!("POST /api/assessment - {:?}", scores);

        Ok(Json(scores))
    })
}
