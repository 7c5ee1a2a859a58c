use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "risk-cli")]
#[command(about = "Command line client for the Country Risk Model API")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// API base URL; overrides the config file and host default
    #[arg(long, global = true, env = "RISK_API_BASE")]
    pub api_base: Option<String>,

    /// Host the front end is served from; selects the default API base
    #[arg(long, global = true, default_value = "localhost")]
    pub host: String,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all countries
    Countries {
        /// Limit the number of rows shown
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show a country and its stored assessment
    Country {
        /// Alpha-2 or alpha-3 country code
        code: String,
    },
    /// Show the risk assessment of a country
    Risk {
        /// Alpha-2 or alpha-3 country code
        code: String,
    },
    /// List risk factor categories
    Categories,
    /// Search countries by name or code
    Search { query: String },
    /// Show assessment coverage statistics
    Stats,
    /// GET an arbitrary endpoint and print the JSON body
    Fetch {
        /// Endpoint path, e.g. /api/stats
        endpoint: String,
    },
    /// Format or classify a score locally
    Score {
        #[command(subcommand)]
        command: ScoreCommands,
    },
    /// Render an HTML report for a country
    Report {
        /// Alpha-2 or alpha-3 country code
        code: String,
        /// Write the page to this file instead of stdout
        #[arg(long, short)]
        output: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ScoreCommands {
    /// Print the display form of a score
    Format {
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Treat the value as text even if it looks numeric
        #[arg(long)]
        text: bool,
    },
    /// Print the CSS risk level class of a score
    Level {
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Treat the value as text even if it looks numeric
        #[arg(long)]
        text: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (api_base, timeout_seconds)
        key: String,
        /// Configuration value
        value: String,
    },
}
