//! Data models for the assessment pipeline.
//!
//! A submission arrives as a [`SurveyForm`] whose fields are exactly what
//! the browser (or an API client) sent. Only the validator turns it into a
//! typed [`SurveyInput`]; scoring and rendering never see raw text.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer};

// ---

/// Raw survey answers as submitted.
///
/// Every field defaults to an empty string so that a missing answer is
/// reported by the validator with its own message instead of being
/// rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SurveyForm {
    // ---
    pub home_built: String,
    pub windows: String,
    pub hvac_upgrade: String,
    #[serde(deserialize_with = "deserialize_raw_number")]
    pub insulation: String,
    pub thermostat: String,
    #[serde(deserialize_with = "deserialize_raw_number")]
    pub led: String,
    pub renewable: String,
    #[serde(deserialize_with = "deserialize_raw_number")]
    pub energy_consumption: String,
    pub shading_devices: String,
}

/// Identifiers printed on the PDF report.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportIdentity {
    // ---
    pub consultant_name: String,
    pub last_name: String,
    pub address: String,
}

/// One form post: identifiers plus the nine survey answers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessmentForm {
    // ---
    #[serde(flatten)]
    pub identity: ReportIdentity,
    #[serde(flatten)]
    pub survey: SurveyForm,
}

/// Survey answers that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyInput {
    // ---
    pub home_built: u16,
    pub windows: WindowType,
    pub hvac_upgrade: u16,
    /// Insulation thickness in inches.
    pub insulation: u32,
    pub thermostat: Thermostat,
    /// Share of LED bulbs, in percent.
    pub led: u32,
    pub renewable: Answer,
    /// Average electricity use in kWh per month.
    pub energy_consumption: u32,
    pub shading_devices: Answer,
}

/// Everything the report template needs. Deliberately carries no scores.
#[derive(Debug, Clone)]
pub struct ReportContext {
    // ---
    pub consultant_name: String,
    pub last_name: String,
    pub address: String,
    pub generated_at: NaiveDateTime,
}

impl ReportContext {
    // ---
    pub fn new(identity: &ReportIdentity, generated_at: NaiveDateTime) -> Self {
        // ---
        ReportContext {
            consultant_name: identity.consultant_name.trim().to_string(),
            last_name: identity.last_name.trim().to_string(),
            address: identity.address.trim().to_string(),
            generated_at,
        }
    }

    /// Generation timestamp with second precision, e.g. `2023-05-01 14:03:59`.
    pub fn date_stamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

// ---

/// A closed set of answers offered by a select box.
pub trait Choice: Copy + Sized + 'static {
    // ---
    /// Every option, in the order the form lists them.
    const ALL: &'static [Self];

    /// Label shown to the user and submitted by the form.
    fn label(self) -> &'static str;

    /// Match a submitted value against the labels.
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|choice| choice.label() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    SinglePane,
    DoublePane,
}

impl Choice for WindowType {
    const ALL: &'static [Self] = &[WindowType::SinglePane, WindowType::DoublePane];

    fn label(self) -> &'static str {
        match self {
            WindowType::SinglePane => "Single-pane",
            WindowType::DoublePane => "Double-pane",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thermostat {
    Manual,
    Programmable,
    Smart,
}

impl Choice for Thermostat {
    const ALL: &'static [Self] = &[Thermostat::Manual, Thermostat::Programmable, Thermostat::Smart];

    fn label(self) -> &'static str {
        match self {
            Thermostat::Manual => "Manual",
            Thermostat::Programmable => "Programmable",
            Thermostat::Smart => "Smart",
        }
    }
}

/// Yes/No answer used by the renewable and shading questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Choice for Answer {
    const ALL: &'static [Self] = &[Answer::Yes, Answer::No];

    fn label(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }
}

// ---

/// Accept a numeric answer sent either as text (HTML forms) or as a JSON
/// number, keeping it as text so the validator decides whether it is an
/// integer. Floats keep their fractional part (`6.0` stays `"6.0"`).
fn deserialize_raw_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    // ---
    struct RawNumberVisitor;

    impl<'de> de::Visitor<'de> for RawNumberVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(format!("{v:?}"))
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(RawNumberVisitor)
}
