//! Input gate for survey submissions.
//!
//! Checks run in a fixed order and stop at the first failure, so the user
//! always sees a single message. Year checks are about shape only
//! (`"0000"` passes); the range and choice checks exist because the JSON
//! API does not go through the constrained HTML form.

use crate::error::ValidationError;
use crate::models::{Answer, Choice, SurveyForm, SurveyInput, Thermostat, WindowType};

// ---

const INSULATION_MAX: u32 = 100;
const LED_MAX: u32 = 100;
const ENERGY_CONSUMPTION_MAX: u32 = 10_000;

impl SurveyForm {
    // ---
    /// Validate every answer and produce the typed survey.
    pub fn validate(&self) -> Result<SurveyInput, ValidationError> {
        // ---
        let home_built = parse_year(&self.home_built).ok_or(ValidationError::InvalidYearBuilt)?;
        let hvac_upgrade = parse_year(&self.hvac_upgrade).ok_or(ValidationError::InvalidHvacYear)?;
        let insulation = parse_integer(&self.insulation).ok_or(ValidationError::InvalidInsulation)?;
        let energy_consumption = parse_integer(&self.energy_consumption)
            .ok_or(ValidationError::InvalidEnergyConsumption)?;

        let insulation =
            within(insulation, INSULATION_MAX).ok_or(ValidationError::InvalidInsulation)?;
        let energy_consumption = within(energy_consumption, ENERGY_CONSUMPTION_MAX)
            .ok_or(ValidationError::InvalidEnergyConsumption)?;
        let led = parse_integer(&self.led)
            .and_then(|led| within(led, LED_MAX))
            .ok_or(ValidationError::InvalidLedPercentage)?;

        Ok(SurveyInput {
            home_built,
            windows: choice::<WindowType>("windows", &self.windows)?,
            hvac_upgrade,
            insulation,
            thermostat: choice::<Thermostat>("thermostat", &self.thermostat)?,
            led,
            renewable: choice::<Answer>("renewable", &self.renewable)?,
            energy_consumption,
            shading_devices: choice::<Answer>("shading_devices", &self.shading_devices)?,
        })
    }
}

/// Exactly four ASCII digits.
fn parse_year(raw: &str) -> Option<u16> {
    // ---
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse().ok()
    } else {
        None
    }
}

/// A whole number; fractional or non-numeric text is rejected.
fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn within(value: i64, max: u32) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v <= max)
}

fn choice<C: Choice>(field: &'static str, raw: &str) -> Result<C, ValidationError> {
    // ---
    C::parse(raw).ok_or_else(|| ValidationError::InvalidChoice {
        field,
        value: raw.to_string(),
    })
}
