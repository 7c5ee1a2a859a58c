//! HTML fragments for the country report page

use crate::api::models::{Country, RiskAssessment};
use crate::display::score::{RiskScore, format_risk_score, risk_level_class};
use crate::utils::text::humanize_identifier;
use std::fmt::Write as _;

pub const COUNTRY_ELEMENT_ID: &str = "country-detail";
pub const ASSESSMENT_ELEMENT_ID: &str = "risk-assessment";

/// Escape text for use inside element content or a quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// A score badge: `<span class="risk-high">7.5</span>`
pub fn score_badge(score: &RiskScore) -> String {
    format!(
        r#"<span class="{}">{}</span>"#,
        risk_level_class(score).css_class(),
        escape_html(&format_risk_score(score))
    )
}

pub fn country_markup(country: &Country) -> String {
    format!(
        r#"<h1>{}</h1><p class="country-codes">{} / {}</p>"#,
        escape_html(&country.name),
        escape_html(&country.alpha2),
        escape_html(&country.alpha3)
    )
}

pub fn assessment_markup(assessment: &RiskAssessment) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<p class="overall-risk">Overall risk: {}</p>"#,
        score_badge(&assessment.overall_risk)
    );

    if assessment.risk_scores.is_empty() {
        html.push_str(r#"<p class="no-data">No risk data available for this country</p>"#);
        return html;
    }

    html.push_str("<table><tr><th>Category</th><th>Score</th></tr>");
    for (category, score) in &assessment.risk_scores {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(&humanize_identifier(category)),
            score_badge(score)
        );
    }
    html.push_str("</table>");
    html
}
