//! Route gateway: merges the per-feature subrouters and owns the shared
//! application state.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Router,
};

use crate::error::AppError;
use crate::report::{PdfSink, ReportTemplate};
use crate::views;
use crate::Config;

mod api;
mod assessment;
mod health;
mod report;

// ---

/// Immutable state shared by every request.
#[derive(Clone)]
pub struct AppState {
    // ---
    pub config: Config,
    pub template: Arc<ReportTemplate>,
    pub sink: Arc<dyn PdfSink>,
}

pub fn router(config: Config, template: ReportTemplate, sink: Arc<dyn PdfSink>) -> Router {
    // ---
    let state = AppState {
        config,
        template: Arc::new(template),
        sink,
    };

    Router::new()
        .merge(assessment::router())
        .merge(report::router())
        .merge(api::router())
        .merge(health::router())
        .with_state(state)
}

/// [`AppError`] rendered as an HTML page for the browser-facing routes.
#[derive(Debug)]
struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        // ---
        let status: StatusCode = self.0.status();
        (status, Html(views::error_page(&self.0.to_string()))).into_response()
    }
}
