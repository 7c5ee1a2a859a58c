pub mod page;
pub mod report;
pub mod score;
pub mod table;

pub use page::{Document, Element, HtmlPage, show_error, show_loading};
pub use score::{RiskLevel, RiskScore, format_risk_score, risk_level_class};
pub use table::TableDisplay;
