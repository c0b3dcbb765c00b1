//! PDF report download.
//!
//! Shares nothing with the score view except the validator: the report
//! only carries the names and the generation date.

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::post,
    Form, Router,
};
use chrono::Local;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::{AppState, PageError};
use crate::error::{AppError, ReportError};
use crate::models::{AssessmentForm, ReportContext};
use crate::report;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/report", post(handler))
}

async fn handler(
    State(state): State<AppState>,
    payload: Result<Form<AssessmentForm>, FormRejection>,
) -> Result<Response, PageError> {
    // ---
    let Form(form) = payload.map_err(|e| {
        warn!("POST /report - unreadable body: {}", e.body_text());
        AppError::from(e)
    })?;
    let submission_id = Uuid::new_v4();
    let span = info_span!("report", %submission_id);

    async move {
        // No report without a valid survey
        if let Err(e) = form.survey.validate() {
            warn!("POST /report - rejected: {}", e);
            return Err(AppError::from(e).into());
        }

        let ctx = ReportContext::new(&form.identity, Local::now().naive_local());
        let template = state.template.clone();
        let sink = state.sink.clone();

        let rendered = tokio::task::spawn_blocking(move || {
            report::generate(&template, sink.as_ref(), &ctx)
        })
        .await
        .map_err(|e| ReportError::Task(e.to_string()))
        .and_then(|result| result)
        .map_err(|e| {
            error!("POST /report - rendering failed: {}", e);
            AppError::from(e)
        })?;

        info!(
            "POST /report - {} ({} bytes)",
            rendered.file_name,
            rendered.pdf.len()
        );

        let headers = [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/pdf"),
            ),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&rendered.file_name),
            ),
        ];
        Ok::<Response, PageError>((headers, rendered.pdf).into_response())
    }
    .instrument(span)
    .await
}

/// `attachment` disposition with an ASCII fallback name and the exact
/// UTF-8 name in `filename*`.
fn content_disposition(file_name: &str) -> HeaderValue {
    // ---
    let fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .collect();

    let mut encoded = String::new();
    for byte in file_name.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    let value = format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}");
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_content_disposition_ascii() {
        // ---
        let value = content_disposition("Smith_report.pdf");
        assert_eq!(
            value.to_str().unwrap(),
            "attachment; filename=\"Smith_report.pdf\"; filename*=UTF-8''Smith_report.pdf"
        );
    }

    #[test]
    fn test_content_disposition_non_ascii() {
        // ---
        let value = content_disposition("Müller_report.pdf");
        assert_eq!(
            value.to_str().unwrap(),
            "attachment; filename=\"M_ller_report.pdf\"; filename*=UTF-8''M%C3%BCller_report.pdf"
        );
    }
}
