use std::io::Write;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::EndpointProfile;
use crate::harness::Harness;
use crate::models::ReviewGenerationOptions;

pub const INACCURATE_REVIEW_CONTEXT: &str = "The product description is missing key ingredients and the listed price does not match the product page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Submit an extraction task, wait, list products.
    Extraction,
    /// Extraction, then two human reviews and a review generation request.
    ReviewFlow,
}

impl Scenario {
    pub fn for_profile(profile: EndpointProfile) -> Self {
        match profile {
            EndpointProfile::Catalog => Scenario::Extraction,
            EndpointProfile::Review => Scenario::ReviewFlow,
        }
    }
}

/// What happened during a scenario run. Only used to summarize the run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub extraction_submitted: bool,
    pub waited: bool,
    pub human_reviews: Vec<bool>,
    pub review_task_id: Option<String>,
}

impl<W: Write> Harness<W> {
    /// Runs the fixed verification sequence once. Every step executes at
    /// most once and failures never end the run early.
    pub async fn run_scenario(&mut self, scenario: Scenario) -> ScenarioReport {
        let started_at = Utc::now();
        info!(?scenario, base_url = %self.client.base_url(), "Starting scenario");

        self.console.line(format_args!(
            "Starting API tests against {}...",
            self.client.base_url()
        ));

        let product_url = self.config.product_url.clone();
        let extraction_submitted = self.submit_extraction(&product_url).await;

        let waited = if extraction_submitted {
            self.settle().await;
            true
        } else {
            false
        };

        self.fetch_all_products().await;

        let mut human_reviews = Vec::new();
        let mut review_task_id = None;

        if scenario == Scenario::ReviewFlow {
            let product_id = self.config.product_id.clone();

            human_reviews.push(self.submit_human_review(&product_id, true, None).await);
            human_reviews.push(
                self.submit_human_review(
                    &product_id,
                    false,
                    Some(INACCURATE_REVIEW_CONTEXT.to_string()),
                )
                .await,
            );

            review_task_id = self
                .submit_review_generation(&product_id, ReviewGenerationOptions::default())
                .await;
        }

        self.console.line("All tests complete.");

        let finished_at = Utc::now();
        info!(
            elapsed_ms = (finished_at - started_at).num_milliseconds(),
            extraction_submitted,
            "Scenario finished"
        );

        ScenarioReport {
            scenario,
            started_at,
            finished_at,
            extraction_submitted,
            waited,
            human_reviews,
            review_task_id,
        }
    }

    /// Gives the backend time to work through the queued task. This is a
    /// fixed pause, not a completion check.
    async fn settle(&mut self) {
        let delay = self.config.settle_delay;
        self.console.blank();
        self.console.line(format_args!(
            "Waiting {} seconds before checking for products...",
            delay.as_secs()
        ));
        self.console.line(
            "Note: extraction runs in the background and may take a few minutes; \
             this delay does not guarantee it has finished.",
        );
        tokio::time::sleep(delay).await;
    }
}
