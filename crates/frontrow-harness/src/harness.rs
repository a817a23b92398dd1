use std::io::{self, Write};

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::client::{BackendClient, ResponseBody};
use crate::config::HarnessConfig;
use crate::console::Console;
use crate::errors::HarnessError;
use crate::models::{
    ExtractionRequest, HumanReviewSubmission, ReviewGenerationOptions, ReviewGenerationRequest,
};

/// Drives the backend one step at a time and reports each step on the console.
///
/// Steps never fail the run: transport errors, unexpected status codes and
/// unparseable bodies are printed and turned into `false` / `None`.
pub struct Harness<W = io::Stdout> {
    pub(crate) config: HarnessConfig,
    pub(crate) client: BackendClient,
    pub(crate) console: Console<W>,
}

impl Harness<io::Stdout> {
    pub fn stdout(config: HarnessConfig) -> Result<Self, HarnessError> {
        Self::new(config, io::stdout())
    }
}

impl<W: Write> Harness<W> {
    pub fn new(config: HarnessConfig, out: W) -> Result<Self, HarnessError> {
        let client = BackendClient::new(&config)?;
        Ok(Self {
            config,
            client,
            console: Console::new(out),
        })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn into_output(self) -> W {
        self.console.into_inner()
    }

    /// Queues an extraction task. Succeeds on `202 Accepted` with a `task_id`.
    #[instrument(skip(self))]
    pub async fn submit_extraction(&mut self, product_url: &str) -> bool {
        let path = self.client.endpoints().extract_product_metadata.clone();
        self.console.heading("POST", &path);

        match self.try_submit_extraction(product_url).await {
            Ok(task_id) => {
                info!(task_id = task_id.as_deref().unwrap_or("null"), "Extraction task queued");
                self.console.success("Task was submitted to the queue.");
                true
            }
            Err(err) => {
                warn!(error = %err, "Extraction submission failed");
                self.console.error(
                    &err,
                    "Task submission failed or response format was unexpected.",
                );
                false
            }
        }
    }

    /// Only the presence of `task_id` is checked; its value may be null.
    async fn try_submit_extraction(
        &mut self,
        product_url: &str,
    ) -> Result<Option<String>, HarnessError> {
        let request = ExtractionRequest::new(product_url);
        let response = self.client.extract_product_metadata(&request).await?;
        self.console.response("Task submission response:", &response);

        response.expect_status(StatusCode::ACCEPTED)?;
        let submission = response.task_submission();
        if !submission.has_task_id {
            return Err(HarnessError::MissingTaskId);
        }
        Ok(submission.task_id)
    }

    /// Lists every product the backend knows about. Purely observational.
    #[instrument(skip(self))]
    pub async fn fetch_all_products(&mut self) {
        let path = self.client.endpoints().get_all_products.clone();
        self.console.heading("GET", &path);

        let result = async {
            let response = self.client.get_all_products().await?;
            self.console.response("Get all products response:", &response);
            response.expect_status(StatusCode::OK)?;
            Ok::<_, HarnessError>(response.body)
        }
        .await;

        match result {
            Ok(body) => {
                match product_count(&body) {
                    Some(count) => info!(count, "Retrieved products list"),
                    None => info!("Retrieved products list"),
                }
                self.console.success("Successfully retrieved products list.");
            }
            Err(err) => {
                warn!(error = %err, "Fetching products failed");
                self.console.error(&err, "Could not retrieve products.");
            }
        }
    }

    /// Records a reviewer's accuracy judgement for a product.
    #[instrument(skip(self, context))]
    pub async fn submit_human_review(
        &mut self,
        product_id: &str,
        is_accurate: bool,
        context: Option<String>,
    ) -> bool {
        let path = self.client.endpoints().add_human_review.clone();
        self.console.heading("POST", &path);

        let review = HumanReviewSubmission::new(product_id, is_accurate, context);
        let result = async {
            let response = self.client.add_human_review(&review).await?;
            self.console.response("Human review response:", &response);
            response.expect_status(StatusCode::OK)
        }
        .await;

        match result {
            Ok(()) => {
                info!("Human review recorded");
                self.console.success("Human review was submitted.");
                true
            }
            Err(err) => {
                warn!(error = %err, "Human review submission failed");
                self.console.error(&err, "Human review submission failed.");
                false
            }
        }
    }

    /// Starts review generation. Returns the backend's task id when it sent one.
    #[instrument(skip(self, options))]
    pub async fn submit_review_generation(
        &mut self,
        product_id: &str,
        options: ReviewGenerationOptions,
    ) -> Option<String> {
        let path = self.client.endpoints().generate_reviews_async.clone();
        self.console.heading("POST", &path);

        let request = ReviewGenerationRequest::new(product_id, options);
        let result = async {
            let response = self.client.generate_reviews_async(&request).await?;
            self.console.response("Review generation response:", &response);
            response.expect_status(StatusCode::OK)?;
            Ok::<_, HarnessError>(response)
        }
        .await;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "Review generation submission failed");
                self.console.error(&err, "Review generation request failed.");
                return None;
            }
        };

        self.console.success("Review generation request was accepted.");

        match (&response.body, response.task_id()) {
            (ResponseBody::Text(_), _) => {
                warn!("Review generation response was not valid JSON");
                self.console.warning("Could not parse the response body as JSON.");
                None
            }
            (ResponseBody::Json(_), None) => {
                warn!("Review generation response had no task_id");
                self.console.warning("Response did not contain a task_id.");
                None
            }
            (ResponseBody::Json(_), Some(task_id)) => {
                info!(%task_id, "Review generation task queued");
                self.console.line(format_args!("Review generation task ID: {task_id}"));
                Some(task_id)
            }
        }
    }
}

fn product_count(body: &ResponseBody) -> Option<usize> {
    match body.as_json()? {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => map.get("products")?.as_array().map(Vec::len),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_count_shapes() {
        assert_eq!(product_count(&ResponseBody::Json(json!([{}, {}]))), Some(2));
        assert_eq!(
            product_count(&ResponseBody::Json(json!({ "products": [{}] }))),
            Some(1)
        );
        assert_eq!(
            product_count(&ResponseBody::Json(json!({ "items": [] }))),
            None
        );
        assert_eq!(product_count(&ResponseBody::Text("[]x".to_string())), None);
    }
}
