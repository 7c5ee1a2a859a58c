use crate::api::models::{Country, RiskAssessment, RiskCategory, StatsResponse};
use crate::display::score::{RiskLevel, RiskScore, format_risk_score, risk_level_class};
use crate::utils::text::{humanize_identifier, truncate_text_unicode};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use crossterm::terminal;

const NAME_WIDTH: usize = 40;
const DESCRIPTION_WIDTH: usize = 50;

/// Formatter for country and risk tables
pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Detect terminal width, clamped to 40..=200
    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _rows)) => Some((cols as usize).clamp(40, 200)),
            Err(_) => Some(80),
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn new_table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_width(self.max_width.map(|w| w.saturating_sub(6).max(40)).unwrap_or(80) as u16);

        let header: Vec<Cell> = headers
            .iter()
            .map(|h| {
                let cell = Cell::new(h).add_attribute(Attribute::Bold);
                if self.use_colors {
                    cell.fg(Color::Cyan)
                } else {
                    cell
                }
            })
            .collect();
        table.set_header(header);
        table
    }

    fn level_color(level: RiskLevel) -> Color {
        match level {
            RiskLevel::High => Color::Red,
            RiskLevel::Medium => Color::Yellow,
            RiskLevel::Low => Color::Green,
            RiskLevel::NotAssessed => Color::DarkGrey,
        }
    }

    fn score_cell(&self, score: &RiskScore) -> Cell {
        let cell = Cell::new(format_risk_score(score));
        if self.use_colors {
            cell.fg(Self::level_color(risk_level_class(score)))
        } else {
            cell
        }
    }

    fn level_cell(&self, score: &RiskScore) -> Cell {
        let level = risk_level_class(score);
        let cell = Cell::new(level.label());
        if self.use_colors {
            cell.fg(Self::level_color(level))
        } else {
            cell
        }
    }

    /// Country list, optionally cut at `limit` rows
    pub fn render_country_list(&self, countries: &[Country], limit: Option<usize>) -> String {
        if countries.is_empty() {
            return "No countries found.".to_string();
        }

        let mut table = self.new_table(&["Alpha-2", "Alpha-3", "Name"]);
        let shown = limit.unwrap_or(countries.len()).min(countries.len());

        for country in &countries[..shown] {
            table.add_row(vec![
                Cell::new(&country.alpha2),
                Cell::new(&country.alpha3),
                Cell::new(truncate_text_unicode(&country.name, NAME_WIDTH)),
            ]);
        }

        let mut output = table.to_string();
        if shown < countries.len() {
            output.push_str(&format!(
                "\nShowing {} of {} countries",
                shown,
                countries.len()
            ));
        }
        output
    }

    /// Overall and per-category scores of one assessment
    pub fn render_assessment(&self, assessment: &RiskAssessment) -> String {
        let mut table = self.new_table(&["Category", "Score", "Level"]);

        table.add_row(vec![
            Cell::new("Overall").add_attribute(Attribute::Bold),
            self.score_cell(&assessment.overall_risk),
            self.level_cell(&assessment.overall_risk),
        ]);

        for (category, score) in &assessment.risk_scores {
            table.add_row(vec![
                Cell::new(humanize_identifier(category)),
                self.score_cell(score),
                self.level_cell(score),
            ]);
        }

        table.to_string()
    }

    pub fn render_country_detail(&self, country: &Country, assessment: &RiskAssessment) -> String {
        let mut output = format!("{} ({} / {})\n", country.name, country.alpha2, country.alpha3);
        if assessment.is_empty() {
            output.push_str("No risk assessment recorded.");
        } else {
            output.push_str(&self.render_assessment(assessment));
        }
        output
    }

    pub fn render_categories(&self, categories: &[RiskCategory]) -> String {
        if categories.is_empty() {
            return "No risk categories defined.".to_string();
        }

        let mut table = self.new_table(&["ID", "Name", "Description", "Data Sources"]);
        for category in categories {
            table.add_row(vec![
                Cell::new(&category.id),
                Cell::new(&category.name),
                Cell::new(truncate_text_unicode(
                    &category.description,
                    DESCRIPTION_WIDTH,
                )),
                Cell::new(category.data_sources.join(", ")),
            ]);
        }
        table.to_string()
    }

    pub fn render_stats(&self, stats: &StatsResponse) -> String {
        let mut table = self.new_table(&["Metric", "Value"]);
        table.add_row(vec![
            Cell::new("Total countries"),
            Cell::new(stats.total_countries),
        ]);
        table.add_row(vec![
            Cell::new("Assessed"),
            Cell::new(stats.assessed_countries),
        ]);
        table.add_row(vec![
            Cell::new("Not assessed"),
            Cell::new(stats.unassessed_countries),
        ]);
        table.to_string()
    }
}
