//! HTML pages for the survey form, the score view and validation errors.
//!
//! Rendering lives here so scoring stays free of output. User-supplied
//! text is always passed through [`escape_html`].

use crate::models::{Answer, Choice, ReportIdentity, SurveyForm, Thermostat, WindowType};
use crate::scoring::ScoreSet;

// ---

const TITLE: &str = "Dynamic SLR Energy Efficiency Report ☀️";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    // ---
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The survey form: identifiers followed by the nine questions.
pub fn survey_page() -> String {
    // ---
    let body = format!(
        r#"<form method="post" action="/assessment">
{identity}
<hr>
{q1}
{q2}
{q3}
{q4}
{q5}
{q6}
{q7}
{q8}
{q9}
<button type="submit">Submit</button>
</form>"#,
        identity = [
            text_input("consultant_name", "Consultant's Name"),
            text_input("last_name", "Homeowner's Last Name"),
            text_input("address", "Home Address"),
        ]
        .join("\n"),
        q1 = year_input("home_built", "When was your home built? (YYYY)"),
        q2 = select::<WindowType>("windows", "What type of windows do you have?"),
        q3 = year_input("hvac_upgrade", "When was the last HVAC upgrade made? (YYYY)"),
        q4 = number_input(
            "insulation",
            "How thick is the insulation? (thickness of insulation in inches)",
            100
        ),
        q5 = select::<Thermostat>("thermostat", "Which type of thermostat do you have?"),
        q6 = number_input(
            "led",
            "What percentage of the light bulbs in the house are LED?",
            100
        ),
        q7 = select::<Answer>("renewable", "Any renewable energy systems installed?"),
        q8 = number_input(
            "energy_consumption",
            "Average energy consumption of home in terms of electricity? (kwH/month)",
            10_000
        ),
        q9 = select::<Answer>(
            "shading_devices",
            "Are there any shading devices, such as awnings or window films, installed to reduce solar heat gain?"
        ),
    );
    page(&body)
}

/// Scores for one submission, with a hidden copy of the answers that
/// posts to `/report` for the PDF download.
pub fn score_page(identity: &ReportIdentity, survey: &SurveyForm, scores: &ScoreSet) -> String {
    // ---
    let rows: String = scores
        .entries()
        .iter()
        .map(|(label, score)| format!("<tr><td>{label}</td><td>{score}</td></tr>\n"))
        .collect();

    let hidden: String = [
        ("consultant_name", &identity.consultant_name),
        ("last_name", &identity.last_name),
        ("address", &identity.address),
        ("home_built", &survey.home_built),
        ("windows", &survey.windows),
        ("hvac_upgrade", &survey.hvac_upgrade),
        ("insulation", &survey.insulation),
        ("thermostat", &survey.thermostat),
        ("led", &survey.led),
        ("renewable", &survey.renewable),
        ("energy_consumption", &survey.energy_consumption),
        ("shading_devices", &survey.shading_devices),
    ]
    .iter()
    .map(|(name, value)| {
        format!(
            r#"<input type="hidden" name="{name}" value="{}">"#,
            escape_html(value)
        ) + "\n"
    })
    .collect();

    let body = format!(
        r#"<p>Report for The {last_name} Household at</p>
<p>{address}</p>
<p>by {consultant}</p>
<table class="scores">
{rows}<tr class="overall"><td>Overall Score</td><td>{overall}</td></tr>
</table>
<form method="post" action="/report">
{hidden}<button type="submit">Download Report</button>
</form>"#,
        last_name = escape_html(&identity.last_name),
        address = escape_html(&identity.address),
        consultant = escape_html(&identity.consultant_name),
        overall = scores.overall,
    );
    page(&body)
}

/// A rejected submission. `message` is shown as-is after escaping.
pub fn error_page(message: &str) -> String {
    // ---
    let body = format!(
        r#"<p class="error">{}</p>
<p><a href="/">Back to the survey</a></p>"#,
        escape_html(message)
    );
    page(&body)
}

fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{TITLE}</title></head>
<body>
<h1>{TITLE}</h1>
<hr>
{body}
</body>
</html>
"#
    )
}

fn text_input(name: &str, label: &str) -> String {
    format!(r#"<label>{label}<br><input type="text" name="{name}"></label><br>"#)
}

fn year_input(name: &str, label: &str) -> String {
    format!(
        r#"<label>{label}<br><input type="text" name="{name}" maxlength="4" placeholder="YYYY"></label><br>"#
    )
}

fn number_input(name: &str, label: &str, max: u32) -> String {
    format!(
        r#"<label>{label}<br><input type="number" name="{name}" min="0" max="{max}" step="1" value="0"></label><br>"#,
        label = escape_html(label)
    )
}

fn select<C: Choice>(name: &str, label: &str) -> String {
    // ---
    let options: String = C::ALL
        .iter()
        .map(|choice| format!(r#"<option value="{0}">{0}</option>"#, choice.label()))
        .collect();
    format!(r#"<label>{label}<br><select name="{name}">{options}</select></label><br>"#)
}
