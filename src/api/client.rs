use crate::api::models::{
    CountriesResponse, CountryDetailResponse, CountryRiskResponse, ErrorBody, RiskAssessment,
    RiskCategoriesResponse, SearchResponse, StatsResponse, UpdateRiskResponse,
};
use crate::error::ApiError;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("risk-cli/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Country Risk API.
///
/// The base URL is fixed when the client is built. An empty base URL means
/// endpoints are requested as given, which only works for absolute endpoints.
#[derive(Debug, Clone)]
pub struct RiskClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl RiskClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Request {
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(RiskClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        self.client.request(method, url)
    }

    /// GET `endpoint` and parse the body as JSON.
    ///
    /// Every failure is logged before it is returned.
    pub async fn fetch_json<T>(&self, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request = self.build_request(Method::GET, endpoint);
        self.execute(request, endpoint).await
    }

    /// Untyped variant of [`fetch_json`](Self::fetch_json)
    pub async fn fetch_api(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.fetch_json(endpoint).await
    }

    async fn execute<T>(&self, request: RequestBuilder, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let result = async {
            let response = request
                .send()
                .await
                .map_err(|e| self.convert_request_error(e, endpoint))?;
            self.handle_response(response, endpoint).await
        }
        .await;

        result.inspect_err(|e| log::error!("API fetch error: {}", e))
    }

    pub async fn handle_response<T>(&self, response: Response, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_default();

            return Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.convert_request_error(e, endpoint))?;

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }

    fn convert_request_error(&self, error: reqwest::Error, endpoint: &str) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout {
                timeout_secs: self.timeout_secs,
                endpoint: endpoint.to_string(),
            }
        } else {
            ApiError::Request {
                endpoint: endpoint.to_string(),
                message: error.to_string(),
            }
        }
    }

    /// List every known country
    pub async fn list_countries(&self) -> Result<CountriesResponse, ApiError> {
        self.fetch_json("/api/countries").await
    }

    /// Country details by alpha-2 or alpha-3 code
    pub async fn get_country(&self, code: &str) -> Result<CountryDetailResponse, ApiError> {
        self.fetch_json(&format!("/api/countries/{}", code.trim().to_uppercase()))
            .await
    }

    pub async fn get_country_risk(&self, code: &str) -> Result<CountryRiskResponse, ApiError> {
        self.fetch_json(&format!(
            "/api/countries/{}/risk",
            code.trim().to_uppercase()
        ))
        .await
    }

    pub async fn list_risk_categories(&self) -> Result<RiskCategoriesResponse, ApiError> {
        self.fetch_json("/api/risk-categories").await
    }

    /// Search countries by name or code
    pub async fn search_countries(&self, query: &str) -> Result<SearchResponse, ApiError> {
        let endpoint = "/api/search";
        let request = self
            .build_request(Method::GET, endpoint)
            .query(&[("q", query)]);
        self.execute(request, endpoint).await
    }

    pub async fn get_stats(&self) -> Result<StatsResponse, ApiError> {
        self.fetch_json("/api/stats").await
    }

    /// Replace the stored assessment of a country
    pub async fn update_country_risk(
        &self,
        code: &str,
        assessment: &RiskAssessment,
    ) -> Result<UpdateRiskResponse, ApiError> {
        let endpoint = format!("/api/countries/{}/risk", code.trim().to_uppercase());
        let request = self.build_request(Method::POST, &endpoint).json(assessment);
        self.execute(request, &endpoint).await
    }
}
