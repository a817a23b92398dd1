use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::{EndpointPaths, HarnessConfig};
use crate::errors::HarnessError;
use crate::models::{
    ExtractionRequest, HumanReviewSubmission, ReviewGenerationRequest, TaskSubmissionResult,
};
use crate::validation::BaseUrl;

/// Response body as received: parsed JSON when possible, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn expect_status(&self, expected: StatusCode) -> Result<(), HarnessError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(HarnessError::UnexpectedStatus {
                expected,
                actual: self.status,
            })
        }
    }

    pub fn task_submission(&self) -> TaskSubmissionResult {
        self.body
            .as_json()
            .map(TaskSubmissionResult::from_json)
            .unwrap_or_default()
    }

    pub fn task_id(&self) -> Option<String> {
        self.task_submission().task_id
    }
}

/// Thin wrapper over the backend endpoints. Every call returns whatever
/// the backend answered; judging the status is left to the caller.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: BaseUrl,
    endpoints: EndpointPaths,
}

impl BackendClient {
    pub fn new(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let base_url = config.validate()?;
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(HarnessError::ClientBuild)?;

        Ok(Self {
            http,
            base_url,
            endpoints: config.endpoints.clone(),
        })
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn endpoints(&self) -> &EndpointPaths {
        &self.endpoints
    }

    pub async fn extract_product_metadata(
        &self,
        request: &ExtractionRequest,
    ) -> Result<ApiResponse, HarnessError> {
        self.post_json(&self.endpoints.extract_product_metadata, request).await
    }

    pub async fn get_all_products(&self) -> Result<ApiResponse, HarnessError> {
        self.get(&self.endpoints.get_all_products).await
    }

    pub async fn add_human_review(
        &self,
        review: &HumanReviewSubmission,
    ) -> Result<ApiResponse, HarnessError> {
        self.post_json(&self.endpoints.add_human_review, review).await
    }

    pub async fn generate_reviews_async(
        &self,
        request: &ReviewGenerationRequest,
    ) -> Result<ApiResponse, HarnessError> {
        self.post_json(&self.endpoints.generate_reviews_async, request).await
    }

    #[instrument(skip_all, fields(path = %path))]
    async fn get(&self, path: &str) -> Result<ApiResponse, HarnessError> {
        let url = self.base_url.join(path);
        debug!(%url, "Sending GET request");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| HarnessError::from_request(&url, err))?;

        Self::read_response(&url, response).await
    }

    #[instrument(skip_all, fields(path = %path))]
    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<ApiResponse, HarnessError> {
        let url = self.base_url.join(path);
        debug!(%url, "Sending POST request");

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|err| HarnessError::from_request(&url, err))?;

        Self::read_response(&url, response).await
    }

    async fn read_response(
        url: &str,
        response: reqwest::Response,
    ) -> Result<ApiResponse, HarnessError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| HarnessError::from_request(url, err))?;

        let body = ResponseBody::parse(text);
        debug!(
            status = status.as_u16(),
            is_json = body.as_json().is_some(),
            "Received response"
        );

        Ok(ApiResponse { status, body })
    }
}
