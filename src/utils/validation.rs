//! Input validation for user-supplied values
//!
//! Country codes and API base URLs are checked here before they reach the
//! client, so typos fail fast with a readable message.

use crate::error::UtilsError;

/// Validate that an API base URL is usable.
///
/// An empty base is accepted: it selects same-origin requests.
pub fn validate_api_base(url: &str) -> Result<(), UtilsError> {
    if url.is_empty() {
        return Ok(());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(UtilsError::Validation {
            message: format!(
                "Invalid API base '{}': URL must start with http:// or https://",
                url
            ),
        });
    }

    Ok(())
}

/// Check an ISO 3166 alpha-2 or alpha-3 code and return it upper-cased
pub fn normalize_country_code(code: &str) -> Result<String, UtilsError> {
    let code = code.trim();

    if code.is_empty() {
        return Err(UtilsError::Validation {
            message: "Country code cannot be empty".to_string(),
        });
    }

    if !(2..=3).contains(&code.len()) || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(UtilsError::Validation {
            message: format!(
                "Invalid country code '{}': expected 2 or 3 letters (e.g. DE or DEU)",
                code
            ),
        });
    }

    Ok(code.to_ascii_uppercase())
}

/// Validate an endpoint path passed straight to the fetch helper
pub fn validate_endpoint(endpoint: &str) -> Result<(), UtilsError> {
    if !endpoint.starts_with('/') {
        return Err(UtilsError::Validation {
            message: format!("Invalid endpoint '{}': must start with '/'", endpoint),
        });
    }

    Ok(())
}
