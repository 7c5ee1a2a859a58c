use crate::api::client::{DEFAULT_TIMEOUT_SECS, RiskClient};
use crate::cli::main_types::{Commands, ConfigCommands, ScoreCommands};
use crate::display::page::{HtmlPage, show_error, show_loading};
use crate::display::report::{
    ASSESSMENT_ELEMENT_ID, COUNTRY_ELEMENT_ID, assessment_markup, country_markup,
};
use crate::display::score::{RiskScore, format_risk_score, risk_level_class};
use crate::display::table::TableDisplay;
use crate::display::{Document, Element};
use crate::error::{AppError, CliError, ConfigError, DisplayError, StorageError};
use crate::storage::config::Config;
use crate::utils::validation::{normalize_country_code, validate_api_base, validate_endpoint};
use std::path::PathBuf;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    api_base: String,
    timeout_secs: u64,
}

impl Dispatcher {
    /// `api_base` is resolved once here and used for every request
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        api_base_override: Option<&str>,
        host: &str,
        timeout_override: Option<u64>,
    ) -> Self {
        let api_base = config.resolve_api_base(api_base_override, host);
        let timeout_secs = timeout_override
            .or(config.timeout_seconds)
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        log::debug!("Using API base '{}' (host: {})", api_base, host);

        Self {
            config,
            config_path,
            api_base,
            timeout_secs,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn client(&self) -> Result<RiskClient, AppError> {
        if self.api_base.is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_base".to_string(),
                hint: "Same-origin requests need a page; pass --api-base or set RISK_API_BASE"
                    .to_string(),
            }
            .into());
        }
        validate_api_base(&self.api_base)?;

        Ok(RiskClient::with_timeout(
            self.api_base.clone(),
            self.timeout_secs,
        )?)
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        let output = self.run(command).await?;
        if !output.is_empty() {
            println!("{}", output);
        }
        Ok(())
    }

    /// Execute a command and return what it would print
    pub async fn run(&self, command: Commands) -> Result<String, AppError> {
        match command {
            Commands::Countries { limit } => {
                let response = self.client()?.list_countries().await?;
                Ok(TableDisplay::new().render_country_list(&response.countries, limit))
            }
            Commands::Country { code } => {
                let code = normalize_country_code(&code)?;
                let response = self.client()?.get_country(&code).await?;
                Ok(TableDisplay::new()
                    .render_country_detail(&response.country, &response.risk_assessment))
            }
            Commands::Risk { code } => {
                let code = normalize_country_code(&code)?;
                let response = self.client()?.get_country_risk(&code).await?;
                let mut output = format!("Risk assessment for {}\n", response.country_code);
                output.push_str(&TableDisplay::new().render_assessment(&response.assessment()));
                if let Some(message) = response.message {
                    output.push('\n');
                    output.push_str(&message);
                }
                Ok(output)
            }
            Commands::Categories => {
                let response = self.client()?.list_risk_categories().await?;
                Ok(TableDisplay::new().render_categories(&response.categories))
            }
            Commands::Search { query } => {
                if query.trim().is_empty() {
                    return Err(
                        CliError::InvalidArguments("Search query required".to_string()).into(),
                    );
                }
                let response = self.client()?.search_countries(&query).await?;
                Ok(TableDisplay::new().render_country_list(&response.results, None))
            }
            Commands::Stats => {
                let stats = self.client()?.get_stats().await?;
                Ok(TableDisplay::new().render_stats(&stats))
            }
            Commands::Fetch { endpoint } => {
                validate_endpoint(&endpoint)?;
                let value = self.client()?.fetch_api(&endpoint).await?;
                serde_json::to_string_pretty(&value)
                    .map_err(|e| DisplayError::TerminalOutput(e.to_string()).into())
            }
            Commands::Score { command } => Ok(Self::handle_score_command(command)),
            Commands::Report { code, output } => self.handle_report(&code, output).await,
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    /// Finite numbers become numeric scores; `inf`, `nan` and anything
    /// else stay text, as a form field value would.
    fn parse_score(value: String, as_text: bool) -> RiskScore {
        if as_text {
            return RiskScore::Text(value);
        }
        match value.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => RiskScore::Numeric(number),
            _ => RiskScore::Text(value),
        }
    }

    fn handle_score_command(command: ScoreCommands) -> String {
        match command {
            ScoreCommands::Format { value, text } => {
                format_risk_score(&Self::parse_score(value, text))
            }
            ScoreCommands::Level { value, text } => risk_level_class(&Self::parse_score(value, text))
                .css_class()
                .to_string(),
        }
    }

    /// Build the report page for a country.
    ///
    /// Both sections start in the loading state; each is then filled or
    /// replaced with the error that prevented loading it.
    pub async fn build_report(&self, code: &str) -> Result<HtmlPage, AppError> {
        let code = normalize_country_code(code)?;
        let mut page = HtmlPage::new(format!("Country Risk: {}", code))
            .with_element(COUNTRY_ELEMENT_ID)
            .with_element(ASSESSMENT_ELEMENT_ID);

        show_loading(&mut page, COUNTRY_ELEMENT_ID);
        show_loading(&mut page, ASSESSMENT_ELEMENT_ID);

        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                let message = e.display_friendly();
                show_error(&mut page, COUNTRY_ELEMENT_ID, &message);
                show_error(&mut page, ASSESSMENT_ELEMENT_ID, &message);
                return Ok(page);
            }
        };

        let (country, risk) = futures::future::join(
            client.get_country(&code),
            client.get_country_risk(&code),
        )
        .await;

        match country {
            Ok(response) => Self::fill(
                &mut page,
                COUNTRY_ELEMENT_ID,
                country_markup(&response.country),
            ),
            Err(e) => show_error(&mut page, COUNTRY_ELEMENT_ID, &e.to_string()),
        }

        match risk {
            Ok(response) => Self::fill(
                &mut page,
                ASSESSMENT_ELEMENT_ID,
                assessment_markup(&response.assessment()),
            ),
            Err(e) => show_error(&mut page, ASSESSMENT_ELEMENT_ID, &e.to_string()),
        }

        Ok(page)
    }

    fn fill(page: &mut HtmlPage, element_id: &str, html: String) {
        if let Some(element) = page.get_element_by_id(element_id) {
            element.set_inner_html(html);
        }
    }

    async fn handle_report(&self, code: &str, output: Option<String>) -> Result<String, AppError> {
        let html = self.build_report(code).await?.render();

        match output {
            Some(path) => {
                std::fs::write(&path, &html).map_err(|source| StorageError::FileIo {
                    path: path.clone(),
                    source,
                })?;
                log::info!("Report written to {}", path);
                Ok(format!(
                    "Report written to {} ({})",
                    path,
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
                ))
            }
            None => Ok(html),
        }
    }

    fn handle_config_command(&self, command: ConfigCommands) -> Result<String, AppError> {
        match command {
            ConfigCommands::Show => {
                let mut output = String::new();
                output.push_str(&format!(
                    "api_base: {}\n",
                    self.config.api_base.as_deref().unwrap_or("(not set)")
                ));
                output.push_str(&format!(
                    "timeout_seconds: {}\n",
                    self.config
                        .timeout_seconds
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "(not set)".to_string())
                ));
                output.push_str(&format!("effective api_base: {}\n", self.api_base));
                output.push_str(&format!("effective timeout: {}s", self.timeout_secs));
                Ok(output)
            }
            ConfigCommands::Set { key, value } => {
                let mut config = self.config.clone();
                match key.as_str() {
                    "api_base" => {
                        validate_api_base(&value)?;
                        config.api_base = Some(value.trim_end_matches('/').to_string());
                    }
                    "timeout_seconds" => {
                        let seconds = value.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                            field: key.clone(),
                            value: value.clone(),
                            reason: e.to_string(),
                        })?;
                        if seconds == 0 {
                            return Err(ConfigError::InvalidValue {
                                field: key.clone(),
                                value: value.clone(),
                                reason: "timeout must be at least 1 second".to_string(),
                            }
                            .into());
                        }
                        config.timeout_seconds = Some(seconds);
                    }
                    _ => {
                        return Err(CliError::InvalidArguments(format!(
                            "Unknown configuration key '{}' (expected api_base or timeout_seconds)",
                            key
                        ))
                        .into());
                    }
                }
                config.save(self.config_path.clone())?;
                Ok(format!("Set {} = {}", key, value))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_test_dispatcher(api_base: Option<&str>, host: &str) -> Dispatcher {
        Dispatcher::new(Config::default(), None, api_base, host, None)
    }

    #[test]
    fn test_dispatcher_resolves_api_base_once() {
        let d = create_test_dispatcher(None, "localhost");
        assert_eq!(d.api_base(), "http://localhost:5000");
        assert_eq!(d.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let d = create_test_dispatcher(None, "risk.example.com");
        assert_eq!(d.api_base(), "");

        let d = create_test_dispatcher(Some("http://override.test/"), "localhost");
        assert_eq!(d.api_base(), "http://override.test");
    }

    #[test]
    fn test_timeout_precedence() {
        let config = Config {
            api_base: None,
            timeout_seconds: Some(12),
        };
        let d = Dispatcher::new(config.clone(), None, None, "localhost", None);
        assert_eq!(d.timeout_secs, 12);
        let d = Dispatcher::new(config, None, None, "localhost", Some(3));
        assert_eq!(d.timeout_secs, 3);
    }

    #[tokio::test]
    async fn test_same_origin_base_requires_configuration() {
        let d = create_test_dispatcher(None, "risk.example.com");
        let result = d.run(Commands::Stats).await;
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::MissingField { .. }))
        ));
    }

    #[test]
    fn test_score_commands() {
        let format = |value: &str, text| {
            Dispatcher::handle_score_command(ScoreCommands::Format {
                value: value.to_string(),
                text,
            })
        };
        let level = |value: &str, text| {
            Dispatcher::handle_score_command(ScoreCommands::Level {
                value: value.to_string(),
                text,
            })
        };

        assert_eq!(format("6.94", false), "6.9");
        assert_eq!(format("6.94", true), "6.94");
        assert_eq!(format("0", false), "N/A");
        assert_eq!(format("N/A", false), "N/A");
        assert_eq!(level("abc", false), "risk-low");
        assert_eq!(level("8", true), "risk-high");
        assert_eq!(level("0", false), "risk-not-assessed");
        assert_eq!(level("0", true), "risk-low");
    }

    #[test]
    fn test_score_commands_keep_non_finite_words_as_text() {
        let parse = |value: &str| Dispatcher::parse_score(value.to_string(), false);

        assert_eq!(parse("nan"), RiskScore::Text("nan".to_string()));
        assert_eq!(parse("inf"), RiskScore::Text("inf".to_string()));
        assert_eq!(format_risk_score(&parse("nan")), "nan");
        assert_eq!(risk_level_class(&parse("inf")).css_class(), "risk-low");
        assert_eq!(risk_level_class(&parse("infinity")).css_class(), "risk-low");
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let config = Config {
            api_base: None,
            timeout_seconds: Some(0),
        };
        let d = Dispatcher::new(config, None, None, "localhost", None);
        assert_eq!(d.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[tokio::test]
    async fn test_invalid_country_code() {
        let d = create_test_dispatcher(None, "localhost");
        let result = d
            .run(Commands::Country {
                code: "12".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Utils(_))));
    }

    #[tokio::test]
    async fn test_empty_search_is_rejected() {
        let d = create_test_dispatcher(None, "localhost");
        let result = d
            .run(Commands::Search {
                query: "  ".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Cli(_))));
    }

    #[tokio::test]
    async fn test_report_without_api_base_shows_errors() {
        let d = create_test_dispatcher(None, "risk.example.com");
        let page = d.build_report("de").await.expect("report is always built");
        let detail = page
            .element(COUNTRY_ELEMENT_ID)
            .map(|e| e.inner_html().to_string())
            .unwrap_or_default();
        assert!(detail.starts_with(r#"<div class="error-message">"#));
        assert!(detail.contains("api_base"));
    }

    #[test]
    fn test_config_set_and_show() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        let d = Dispatcher::new(
            Config::default(),
            Some(config_path.clone()),
            None,
            "localhost",
            None,
        );

        let result = d.handle_config_command(ConfigCommands::Set {
            key: "api_base".to_string(),
            value: "https://risk.example.com/".to_string(),
        });
        assert!(result.is_ok());

        let saved = Config::load(Some(config_path)).expect("Failed to load config");
        assert_eq!(saved.api_base.as_deref(), Some("https://risk.example.com"));

        let shown = d
            .handle_config_command(ConfigCommands::Show)
            .expect("show succeeds");
        assert!(shown.contains("effective api_base: http://localhost:5000"));
    }

    #[test]
    fn test_config_set_rejects_bad_values() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let d = Dispatcher::new(
            Config::default(),
            Some(temp_dir.path().join("config.toml")),
            None,
            "localhost",
            None,
        );

        let result = d.handle_config_command(ConfigCommands::Set {
            key: "timeout_seconds".to_string(),
            value: "soon".to_string(),
        });
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::InvalidValue { .. }))
        ));

        let result = d.handle_config_command(ConfigCommands::Set {
            key: "timeout_seconds".to_string(),
            value: "0".to_string(),
        });
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::InvalidValue { .. }))
        ));

        let result = d.handle_config_command(ConfigCommands::Set {
            key: "api_base".to_string(),
            value: "localhost:5000".to_string(),
        });
        assert!(matches!(result, Err(AppError::Utils(_))));

        let result = d.handle_config_command(ConfigCommands::Set {
            key: "colour".to_string(),
            value: "red".to_string(),
        });
        assert!(matches!(result, Err(AppError::Cli(_))));
    }
}
