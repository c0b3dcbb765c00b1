//! Survey form and the on-screen score view.

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    routing::{get, post},
    Form, Router,
};
use tracing::{info, info_span, warn};
use uuid::Uuid;

use super::{AppState, PageError};
use crate::error::AppError;
use crate::models::AssessmentForm;
use crate::{scoring, views};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/", get(survey))
        .route("/assessment", post(handler))
}

async fn survey() -> Html<String> {
    Html(views::survey_page())
}

/// Validate once, score, and show the result. Nothing is rendered to PDF
/// here; the page offers the download as a separate request.
async fn handler(
    State(state): State<AppState>,
    payload: Result<Form<AssessmentForm>, FormRejection>,
) -> Result<Html<String>, PageError> {
    // ---
    let Form(form) = payload.map_err(|e| {
        warn!("POST /assessment - unreadable body: {}", e.body_text());
        AppError::from(e)
    })?;
    let submission_id = Uuid::new_v4();
    let span = info_span!("assessment", %submission_id);

    span.in_scope(|| -> Result<Html<String>, PageError> {
        let input = form.survey.validate().map_err(|e| {
            warn!("POST /assessment - rejected: {}", e);
            AppError::from(e)
        })?;

        let scores = scoring::evaluate(&input, state.config.current_year());
        info!(
            "POST /assessment - scored, overall {} for {:?}",
            scores.overall, scores
        );

        Ok(Html(views::score_page(&form.identity, &form.survey, &scores)))
    })
}
