//! Trait abstraction for the quote API to enable mocking in tests

use super::error::ApiError;
use crate::state::Application;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body of `GET /api/{resume}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    pub application: Application,
}

/// Body of `POST /api/save`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub application: Application,
    /// Opaque token for fetching this application later
    pub resume: String,
}

/// Body of `POST /api/submit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub application: Application,
    /// Quoted price, shown as sent (number or string)
    pub price: serde_json::Value,
}

impl SubmitResponse {
    /// The price as it should read in a sentence
    pub fn price_text(&self) -> String {
        match &self.price {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Remote quote API operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteApi: Send + Sync {
    /// Fetch a previously saved application by its resume token
    async fn fetch_application(&self, resume: &str) -> Result<Application, ApiError>;

    /// Persist a partial application
    async fn save(&self, application: &Application) -> Result<SaveResponse, ApiError>;

    /// Finalize an application and get a quote
    async fn submit(&self, application: &Application) -> Result<SubmitResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_text() {
        let numeric = SubmitResponse {
            application: Application::default(),
            price: json!(123.45),
        };
        assert_eq!(numeric.price_text(), "123.45");

        let text = SubmitResponse {
            application: Application::default(),
            price: json!("99"),
        };
        assert_eq!(text.price_text(), "99");
    }

    #[test]
    fn test_save_response_decodes() {
        let response: SaveResponse = serde_json::from_value(json!({
            "application": { "id": "app-1", "insurer": null },
            "resume": "tok-1"
        }))
        .unwrap();
        assert_eq!(response.resume, "tok-1");
        assert_eq!(response.application.id.as_deref(), Some("app-1"));
        assert!(response.application.insurer.is_none());
    }
}
