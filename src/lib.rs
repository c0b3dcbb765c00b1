//! Home energy-efficiency survey scoring and PDF report service.
//!
//! Module boundaries follow the request flow: `models` holds raw and
//! validated input, `validation` gates it, `scoring` computes the
//! [`ScoreSet`], `views` renders pages, `report` assembles the PDF and
//! `routes` exposes everything over HTTP.

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod routes;
pub mod scoring;
pub mod validation;
pub mod views;

pub use config::Config;
pub use error::{AppError, ReportError, ValidationError};
pub use models::{AssessmentForm, ReportContext, ReportIdentity, SurveyForm, SurveyInput};
pub use report::{PdfSink, ReportTemplate, WkhtmltopdfSink};
pub use scoring::ScoreSet;
