//! PDF report assembly.
//!
//! The template and its stylesheets are read once at startup into a
//! [`ReportTemplate`]. Per request the template is filled with the names
//! and date from a [`ReportContext`] and handed to a [`PdfSink`]. Scores
//! are not part of the report.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    thread,
};

use tracing::{debug, info};

use crate::error::ReportError;
use crate::models::ReportContext;
use crate::views::escape_html;

// ---

const CONSULTANT_PLACEHOLDER: &str = "{{consultant_name}}";
const LAST_NAME_PLACEHOLDER: &str = "{{last_name}}";
const DATE_PLACEHOLDER: &str = "{{date}}";

/// HTML template plus the stylesheets inlined into every report.
#[derive(Debug, Clone)]
pub struct ReportTemplate {
    // ---
    html: String,
    stylesheets: Vec<String>,
}

impl ReportTemplate {
    // ---
    /// Read the template and stylesheets from disk.
    pub fn load(template_path: &Path, stylesheet_paths: &[PathBuf]) -> Result<Self, ReportError> {
        // ---
        let html = read_file(template_path)?;
        let stylesheets = stylesheet_paths
            .iter()
            .map(|path| read_file(path))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Loaded report template {} with {} stylesheet(s)",
            template_path.display(),
            stylesheets.len()
        );
        Ok(Self::from_parts(html, stylesheets))
    }

    pub fn from_parts(html: String, stylesheets: Vec<String>) -> Self {
        ReportTemplate { html, stylesheets }
    }

    /// Fill the placeholders and inline the stylesheets.
    pub fn render(&self, ctx: &ReportContext) -> String {
        // ---
        let body = self
            .html
            .replace(CONSULTANT_PLACEHOLDER, &escape_html(&ctx.consultant_name))
            .replace(LAST_NAME_PLACEHOLDER, &escape_html(&ctx.last_name))
            .replace(DATE_PLACEHOLDER, &ctx.date_stamp());

        let styles: String = self
            .stylesheets
            .iter()
            .map(|css| format!("<style>{css}</style>"))
            .collect();

        // Styles go into <head> when there is one, otherwise in front
        match body.find("</head>") {
            Some(pos) => format!("{}{}{}", &body[..pos], styles, &body[pos..]),
            None => format!("{styles}{body}"),
        }
    }
}

fn read_file(path: &Path) -> Result<String, ReportError> {
    fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

// ---

/// Turns a finished HTML document into PDF bytes.
pub trait PdfSink: Send + Sync {
    fn render(&self, html: &str) -> Result<Vec<u8>, ReportError>;
}

/// Renders through the `wkhtmltopdf` executable, HTML on stdin and PDF on
/// stdout, with local file access enabled so relative asset paths resolve.
#[derive(Debug, Clone)]
pub struct WkhtmltopdfSink {
    // ---
    program: PathBuf,
}

impl WkhtmltopdfSink {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        WkhtmltopdfSink {
            program: program.into(),
        }
    }
}

impl PdfSink for WkhtmltopdfSink {
    fn render(&self, html: &str) -> Result<Vec<u8>, ReportError> {
        // ---
        let spawn_err = |source: std::io::Error| ReportError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(["--quiet", "--enable-local-file-access", "-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        // Feed stdin from a separate thread so a full stdout pipe cannot
        // stall the write.
        let mut stdin = child.stdin.take().ok_or_else(|| {
            spawn_err(std::io::Error::other("renderer stdin unavailable"))
        })?;
        let input = html.as_bytes().to_vec();
        let writer = thread::spawn(move || stdin.write_all(&input));

        let output = child.wait_with_output().map_err(spawn_err)?;
        let written = writer
            .join()
            .map_err(|_| ReportError::Task("stdin writer panicked".to_string()))?;

        // A renderer that exits early breaks the pipe; its status says more
        if !output.status.success() {
            return Err(ReportError::Renderer {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written.map_err(spawn_err)?;
        if output.stdout.is_empty() {
            return Err(ReportError::EmptyOutput);
        }

        debug!("Rendered PDF of {} bytes", output.stdout.len());
        Ok(output.stdout)
    }
}

// ---

/// A finished report ready for download.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    // ---
    pub file_name: String,
    pub pdf: Vec<u8>,
}

/// Fill the template for `ctx` and render it through `sink`.
pub fn generate(
    template: &ReportTemplate,
    sink: &dyn PdfSink,
    ctx: &ReportContext,
) -> Result<RenderedReport, ReportError> {
    // ---
    let html = template.render(ctx);
    let pdf = sink.render(&html)?;

    Ok(RenderedReport {
        file_name: report_file_name(&ctx.last_name),
        pdf,
    })
}

/// `<last_name>_report.pdf`, with characters that would break a path or a
/// `Content-Disposition` header removed.
pub fn report_file_name(last_name: &str) -> String {
    // ---
    let safe: String = last_name
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '/' | '\\' | '"'))
        .collect();
    format!("{}_report.pdf", safe.trim())
}
