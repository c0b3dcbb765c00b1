//! Configuration loader for the `slr-assessment` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
//!
use std::{env, path::PathBuf};

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local};

/// Parse an optional numeric environment variable with a default value.
macro_rules! parse_env_or {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable with a default value.
macro_rules! env_or {
    ($var_name:expr, $default:expr) => {
        env::var($var_name).unwrap_or_else(|_| $default.to_string())
    };
}

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TEMPLATE: &str = "index.html";
pub const DEFAULT_STYLESHEETS: &str = "css/ee-report.webflow.css,css/normalize.css,css/webflow.css";
pub const DEFAULT_WKHTMLTOPDF: &str = "wkhtmltopdf";
pub const ASSESSMENT_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1000..=9999;

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Port the HTTP server listens on.
    pub port: u16,

    /// HTML template for the PDF report.
    pub template_path: PathBuf,

    /// Stylesheets inlined into every report, in order.
    pub stylesheet_paths: Vec<PathBuf>,

    /// `wkhtmltopdf` executable used to render reports.
    pub wkhtmltopdf_bin: PathBuf,

    /// Reference year for age-based scores. `None` means the current year.
    pub assessment_year: Option<i32>,
}

impl Default for Config {
    fn default() -> Self {
        // ---
        Config {
            port: DEFAULT_PORT,
            template_path: PathBuf::from(DEFAULT_TEMPLATE),
            stylesheet_paths: split_paths(DEFAULT_STYLESHEETS),
            wkhtmltopdf_bin: PathBuf::from(DEFAULT_WKHTMLTOPDF),
            assessment_year: None,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `APP_PORT` – listen port (default: 8080)
/// - `REPORT_TEMPLATE` – report HTML template (default: `index.html`)
/// - `REPORT_STYLESHEETS` – comma-separated stylesheet paths
/// - `WKHTMLTOPDF_BIN` – PDF renderer executable (default: `wkhtmltopdf`)
/// - `ASSESSMENT_YEAR` – pin the scoring reference year, 1000..=9999
///   (default: current year)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let port = parse_env_or!("APP_PORT", u16, DEFAULT_PORT);
    let template_path = PathBuf::from(env_or!("REPORT_TEMPLATE", DEFAULT_TEMPLATE));
    let stylesheet_paths = split_paths(&env_or!("REPORT_STYLESHEETS", DEFAULT_STYLESHEETS));
    let wkhtmltopdf_bin = PathBuf::from(env_or!("WKHTMLTOPDF_BIN", DEFAULT_WKHTMLTOPDF));
    let assessment_year = env::var("ASSESSMENT_YEAR")
        .ok()
        .map(|v| parse_assessment_year(&v))
        .transpose()?;

    Ok(Config {
        port,
        template_path,
        stylesheet_paths,
        wkhtmltopdf_bin,
        assessment_year,
    })
}

/// A four-digit reference year; anything else would make the age
/// arithmetic meaningless or overflow.
fn parse_assessment_year(raw: &str) -> Result<i32> {
    // ---
    let year = raw
        .trim()
        .parse::<i32>()
        .map_err(|e| anyhow!("Invalid ASSESSMENT_YEAR: {}", e))?;
    if !ASSESSMENT_YEAR_RANGE.contains(&year) {
        return Err(anyhow!(
            "Invalid ASSESSMENT_YEAR: {} is outside {}..={}",
            year,
            ASSESSMENT_YEAR_RANGE.start(),
            ASSESSMENT_YEAR_RANGE.end()
        ));
    }
    Ok(year)
}

fn split_paths(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}

impl Config {
    // ---
    /// Year that home and HVAC ages are measured against.
    pub fn current_year(&self) -> i32 {
        self.assessment_year
            .unwrap_or_else(|| Local::now().year())
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        let stylesheets: Vec<String> = self
            .stylesheet_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        let year = match self.assessment_year {
            Some(year) => year.to_string(),
            None => "current".to_string(),
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  APP_PORT           : {}", self.port);
        tracing::info!("  REPORT_TEMPLATE    : {}", self.template_path.display());
        tracing::info!("  REPORT_STYLESHEETS : {}", stylesheets.join(","));
        tracing::info!("  WKHTMLTOPDF_BIN    : {}", self.wkhtmltopdf_bin.display());
        tracing::info!("  ASSESSMENT_YEAR    : {}", year);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_default_stylesheets_match_bundled_assets() {
        // ---
        let cfg = Config::default();
        assert_eq!(
            cfg.stylesheet_paths,
            vec![
                PathBuf::from("css/ee-report.webflow.css"),
                PathBuf::from("css/normalize.css"),
                PathBuf::from("css/webflow.css"),
            ]
        );
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn test_split_paths_ignores_blanks() {
        // ---
        assert_eq!(
            split_paths(" a.css, ,b.css,"),
            vec![PathBuf::from("a.css"), PathBuf::from("b.css")]
        );
    }

    #[test]
    fn test_assessment_year_parsing() {
        // ---
        assert_eq!(parse_assessment_year("2023").unwrap(), 2023);
        assert_eq!(parse_assessment_year(" 1000 ").unwrap(), 1000);
        assert_eq!(parse_assessment_year("9999").unwrap(), 9999);

        assert!(parse_assessment_year("-2147483648").is_err());
        assert!(parse_assessment_year("999").is_err());
        assert!(parse_assessment_year("10000").is_err());
        assert!(parse_assessment_year("next year").is_err());
    }

    #[test]
    fn test_pinned_year_wins() {
        // ---
        let cfg = Config {
            assessment_year: Some(2023),
            ..Config::default()
        };
        assert_eq!(cfg.current_year(), 2023);
    }
}
