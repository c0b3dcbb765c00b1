//! Heuristic efficiency scores for a validated survey.
//!
//! Every field scorer is a pure function of one answer; none of them
//! displays anything. The presentation layer renders the resulting
//! [`ScoreSet`].

use serde::Serialize;

use crate::models::{Answer, SurveyInput, Thermostat, WindowType};

// ---

/// Decay scale for home age and HVAC age, in years.
const AGE_SCALE: f64 = 12.0;

/// Decay scale for insulation thickness, in inches.
const INSULATION_SCALE: f64 = 12.0;

/// Decay scale for the share of non-LED bulbs, in percent.
const LED_SCALE: f64 = 100.0;

/// Decay scale for monthly consumption, in kWh.
const CONSUMPTION_SCALE: f64 = 2000.0;

/// Map a distance onto `0..=9`: `exp(-value / scale) * 10`, truncated
/// toward zero and clamped. Larger distances never score higher.
///
/// `scale` must be positive. A negative `value` clamps to 9.
pub fn inverse_log_clamp(value: f64, scale: f64) -> u8 {
    // ---
    let scaled = (-value / scale).exp() * 10.0;
    // `as` truncates toward zero and saturates on overflow
    (scaled as i64).clamp(0, 9) as u8
}

/// Per-field scores plus the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreSet {
    // ---
    pub home_built: u8,
    pub windows: u8,
    pub hvac_upgrade: u8,
    pub insulation: u8,
    pub thermostat: u8,
    pub led: u8,
    pub renewable: u8,
    pub energy_consumption: u8,
    pub shading_devices: u8,
    pub overall: u8,
}

impl ScoreSet {
    // ---
    /// Display label and value of each field score, in survey order.
    pub fn entries(&self) -> [(&'static str, u8); 9] {
        [
            ("Home Built Score", self.home_built),
            ("Windows Score", self.windows),
            ("HVAC Upgrade Score", self.hvac_upgrade),
            ("Insulation Score", self.insulation),
            ("Thermostat Score", self.thermostat),
            ("LED Score", self.led),
            ("Renewable Score", self.renewable),
            ("Energy Consumption Score", self.energy_consumption),
            ("Shading Devices Score", self.shading_devices),
        ]
    }
}

/// Score every answer against `current_year` and aggregate.
pub fn evaluate(input: &SurveyInput, current_year: i32) -> ScoreSet {
    // ---
    let home_built = score_home_age(input.home_built, current_year);
    let windows = score_windows(input.windows);
    let hvac_upgrade = score_hvac_recency(input.hvac_upgrade, current_year);
    let insulation = score_insulation(input.insulation);
    let thermostat = score_thermostat(input.thermostat);
    let led = score_led(input.led);
    let renewable = score_renewable(input.renewable);
    let energy_consumption = score_energy_consumption(input.energy_consumption);
    let shading_devices = score_shading(input.shading_devices);

    let overall = aggregate(&[
        home_built,
        windows,
        hvac_upgrade,
        insulation,
        thermostat,
        led,
        renewable,
        energy_consumption,
        shading_devices,
    ]);

    ScoreSet {
        home_built,
        windows,
        hvac_upgrade,
        insulation,
        thermostat,
        led,
        renewable,
        energy_consumption,
        shading_devices,
        overall,
    }
}

/// Floor of the arithmetic mean of the nine field scores.
pub fn aggregate(scores: &[u8; 9]) -> u8 {
    // ---
    let sum: u32 = scores.iter().map(|s| u32::from(*s)).sum();
    // Scores are non-negative, so integer division is the floor
    (sum / scores.len() as u32) as u8
}

pub fn score_home_age(built_year: u16, current_year: i32) -> u8 {
    inverse_log_clamp(f64::from(current_year - i32::from(built_year)), AGE_SCALE)
}

pub fn score_windows(windows: WindowType) -> u8 {
    match windows {
        WindowType::SinglePane => 1,
        WindowType::DoublePane => 8,
    }
}

pub fn score_hvac_recency(upgrade_year: u16, current_year: i32) -> u8 {
    inverse_log_clamp(f64::from(current_year - i32::from(upgrade_year)), AGE_SCALE)
}

/// Thicker insulation scores lower here, the opposite of what the
/// question suggests. Kept until the intended direction is confirmed.
pub fn score_insulation(thickness_inches: u32) -> u8 {
    inverse_log_clamp(f64::from(thickness_inches), INSULATION_SCALE)
}

pub fn score_thermostat(thermostat: Thermostat) -> u8 {
    match thermostat {
        Thermostat::Manual => 1,
        Thermostat::Programmable => 5,
        Thermostat::Smart => 10,
    }
}

/// Higher LED share means a smaller distance and a higher score.
pub fn score_led(led_percent: u32) -> u8 {
    inverse_log_clamp(100.0 - f64::from(led_percent), LED_SCALE)
}

pub fn score_renewable(renewable: Answer) -> u8 {
    match renewable {
        Answer::Yes => 9,
        Answer::No => 2,
    }
}

pub fn score_energy_consumption(kwh_per_month: u32) -> u8 {
    inverse_log_clamp(f64::from(kwh_per_month), CONSUMPTION_SCALE)
}

pub fn score_shading(shading: Answer) -> u8 {
    match shading {
        Answer::Yes => 10,
        Answer::No => 1,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use proptest::prelude::*;

    /// Direct evaluation of the normalization formula.
    fn formula(value: f64, scale: f64) -> u8 {
        ((-value / scale).exp() * 10.0).trunc().clamp(0.0, 9.0) as u8
    }

    fn sample_input() -> SurveyInput {
        // ---
        SurveyInput {
            home_built: 2020,
            windows: WindowType::DoublePane,
            hvac_upgrade: 2022,
            insulation: 6,
            thermostat: Thermostat::Smart,
            led: 80,
            renewable: Answer::Yes,
            energy_consumption: 500,
            shading_devices: Answer::Yes,
        }
    }

    #[test]
    fn test_zero_distance_clamps_to_nine() {
        // ---
        for scale in [0.5, 1.0, 12.0, 100.0, 2000.0] {
            assert_eq!(inverse_log_clamp(0.0, scale), 9);
        }
    }

    #[test]
    fn test_negative_distance_clamps_to_nine() {
        // ---
        assert_eq!(inverse_log_clamp(-5.0, 12.0), 9);
        assert_eq!(inverse_log_clamp(-1e9, 12.0), 9);
    }

    #[test]
    fn test_known_values() {
        // ---
        // exp(-0.25) = 0.7788
        assert_eq!(inverse_log_clamp(3.0, 12.0), 7);
        // exp(-0.5) = 0.6065
        assert_eq!(inverse_log_clamp(6.0, 12.0), 6);
        // exp(-1) = 0.3679
        assert_eq!(inverse_log_clamp(2000.0, 2000.0), 3);
        // exp(-5) * 10 = 0.067
        assert_eq!(inverse_log_clamp(10_000.0, 2000.0), 0);
    }

    #[test]
    fn test_categorical_scores() {
        // ---
        assert_eq!(score_windows(WindowType::SinglePane), 1);
        assert_eq!(score_windows(WindowType::DoublePane), 8);
        assert_eq!(score_thermostat(Thermostat::Manual), 1);
        assert_eq!(score_thermostat(Thermostat::Programmable), 5);
        assert_eq!(score_thermostat(Thermostat::Smart), 10);
        assert_eq!(score_renewable(Answer::Yes), 9);
        assert_eq!(score_renewable(Answer::No), 2);
        assert_eq!(score_shading(Answer::Yes), 10);
        assert_eq!(score_shading(Answer::No), 1);
    }

    #[test]
    fn test_thicker_insulation_scores_lower() {
        // ---
        assert!(score_insulation(24) < score_insulation(2));
    }

    #[test]
    fn test_full_led_adoption_scores_highest() {
        // ---
        assert_eq!(score_led(100), 9);
        assert_eq!(score_led(0), 3);
    }

    #[test]
    fn test_aggregate_floors_the_mean() {
        // ---
        // 82 / 9 = 9.11
        assert_eq!(aggregate(&[9, 8, 9, 9, 10, 9, 9, 9, 10]), 9);
        // 89 / 9 = 9.89
        assert_eq!(aggregate(&[10, 10, 10, 10, 10, 10, 10, 10, 9]), 9);
        // 90 is the highest reachable sum
        assert_eq!(aggregate(&[10, 10, 10, 10, 10, 10, 10, 10, 10]), 10);
        // 17 / 9 = 1.89
        assert_eq!(aggregate(&[1, 1, 1, 1, 1, 1, 1, 1, 9]), 1);
        assert_eq!(aggregate(&[0; 9]), 0);
    }

    #[test]
    fn test_evaluate_sample_survey() {
        // ---
        let scores = evaluate(&sample_input(), 2023);

        assert_eq!(scores.windows, 8);
        assert_eq!(scores.thermostat, 10);
        assert_eq!(scores.renewable, 9);
        assert_eq!(scores.shading_devices, 10);

        assert_eq!(scores.home_built, formula(3.0, 12.0));
        assert_eq!(scores.hvac_upgrade, formula(1.0, 12.0));
        assert_eq!(scores.insulation, formula(6.0, 12.0));
        assert_eq!(scores.led, formula(20.0, 100.0));
        assert_eq!(scores.energy_consumption, formula(500.0, 2000.0));

        assert_eq!(
            (scores.home_built, scores.hvac_upgrade, scores.insulation),
            (7, 9, 6)
        );
        assert_eq!((scores.led, scores.energy_consumption), (8, 7));
        // 74 / 9 = 8.22
        assert_eq!(scores.overall, 8);
    }

    #[test]
    fn test_evaluate_uses_reference_year() {
        // ---
        let input = sample_input();
        let now = evaluate(&input, 2020);
        let later = evaluate(&input, 2060);

        assert_eq!(now.home_built, 9);
        assert!(later.home_built < now.home_built);
        assert!(later.hvac_upgrade < now.hvac_upgrade);
    }

    #[test]
    fn test_entries_follow_survey_order() {
        // ---
        let scores = evaluate(&sample_input(), 2023);
        let entries = scores.entries();

        assert_eq!(entries[0], ("Home Built Score", scores.home_built));
        assert_eq!(entries[8], ("Shading Devices Score", scores.shading_devices));
    }

    proptest! {
        #[test]
        fn prop_result_is_bounded(value in 0.0..1e7f64, scale in 0.001..1e5f64) {
            let score = inverse_log_clamp(value, scale);
            prop_assert!(score <= 9);
        }

        #[test]
        fn prop_non_increasing_in_value(
            a in 0.0..1e5f64,
            b in 0.0..1e5f64,
            scale in 0.001..1e4f64
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(inverse_log_clamp(hi, scale) <= inverse_log_clamp(lo, scale));
        }

        #[test]
        fn prop_matches_formula(value in 0.0..1e5f64, scale in 0.001..1e4f64) {
            prop_assert_eq!(inverse_log_clamp(value, scale), formula(value, scale));
        }
    }
}
