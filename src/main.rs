//! Application entry point for the `slr-assessment` service.
//!
//! This binary orchestrates the startup sequence:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Loading the report template and stylesheets once
//! - Mounting all routes via the `routes` gateway
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `APP_PORT` (optional) – listen port (default: 8080)
//! - `REPORT_TEMPLATE`, `REPORT_STYLESHEETS` (optional) – report assets
//! - `WKHTMLTOPDF_BIN` (optional) – PDF renderer executable
//! - `ASSESSMENT_YEAR` (optional) – pin the scoring reference year (1000..=9999)
//! - `AXUM_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `AXUM_SPAN_EVENTS` (optional) – span event mode for tracing
use std::{env, io::IsTerminal, net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use slr_assessment::{config, routes, ReportTemplate, WkhtmltopdfSink};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let template = ReportTemplate::load(&cfg.template_path, &cfg.stylesheet_paths)
        .map_err(|e| anyhow::anyhow!("Failed to load report assets: {}", e))?;
    let sink = Arc::new(WkhtmltopdfSink::new(cfg.wkhtmltopdf_bin.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));

    // Build app from routes gateway
    let app: Router = routes::router(cfg, template, sink);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Compact log lines with target and source location. `AXUM_SPAN_EVENTS`
/// (`full`, `enter_exit`, else close-only) picks the span events,
/// `FORCE_COLOR` overrides TTY colour detection, and the level comes from
/// `RUST_LOG` or `AXUM_LOG_LEVEL` (default `debug`, hyper capped at `info`).
fn init_tracing() {
    // ---
    let span_events = match env::var("AXUM_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("AXUM_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "debug",
        };
        EnvFilter::new(format!("{level},hyper=info"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
