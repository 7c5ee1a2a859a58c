//! # country-risk
//!
//! Client helpers for the Country Risk Model API: a JSON fetch helper, risk
//! score formatting and classification, and loading/error placeholders for
//! page elements.
//!
//! ```rust,ignore
//! use country_risk::prelude::*;
//!
//! let client = RiskClient::new(api_base_for_host("localhost"))?;
//! let stats: serde_json::Value = client.fetch_api("/api/stats").await?;
//! assert_eq!(risk_level_class(&RiskScore::from(7.0)).css_class(), "risk-high");
//! ```

pub use error::AppError;

/// Named exports used by front-end code
pub mod prelude {
    pub use crate::api::client::RiskClient;
    pub use crate::display::page::{Document, Element, HtmlPage, show_error, show_loading};
    pub use crate::display::score::{RiskLevel, RiskScore, format_risk_score, risk_level_class};
    pub use crate::error::{ApiError, AppError};
    pub use crate::storage::config::{Config, LOCAL_DEV_API_BASE, api_base_for_host};
}

pub mod cli; // Command-line interface
pub mod storage; // Configuration persistence

pub mod api; // Risk API client
pub mod display; // Output formatting
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;
