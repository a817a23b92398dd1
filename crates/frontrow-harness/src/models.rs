use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_NUMBER_OF_REVIEWS: u32 = 7;
pub const DEFAULT_MIN_WORDS: u32 = 20;
pub const DEFAULT_MAX_WORDS: u32 = 100;
/// Persona keys understood by the review generator.
pub const DEFAULT_REVIEW_TONES: [&str; 4] = [
    "clinical_authority",
    "empathetic_practitioner",
    "scientific_educator",
    "due_diligence_expert",
];
pub const DEFAULT_RESEARCH_LINKS: [&str; 2] = [
    "https://research.example.org/papers/hyaluronic-acid-skin-hydration",
    "https://research.example.org/papers/natural-moisturizing-factors",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionRequest {
    pub product_url: String,
}

impl ExtractionRequest {
    pub fn new(product_url: impl Into<String>) -> Self {
        Self {
            product_url: product_url.into(),
        }
    }
}

/// Body returned when the backend queues a task.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskSubmissionResult {
    /// The body has a `task_id` key, whatever its value
    pub has_task_id: bool,
    pub task_id: Option<String>,
}

impl TaskSubmissionResult {
    /// Reads `task_id` out of a JSON body. Numeric ids are kept as their
    /// decimal text; `null` or any other value leaves `task_id` empty but
    /// still counts as present.
    pub fn from_json(body: &Value) -> Self {
        let field = body.get("task_id");
        let task_id = match field {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        };
        Self {
            has_task_id: field.is_some(),
            task_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HumanReviewSubmission {
    pub product_id: String,
    pub is_accurate: bool,
    pub context: String,
}

impl HumanReviewSubmission {
    pub fn new(product_id: impl Into<String>, is_accurate: bool, context: Option<String>) -> Self {
        Self {
            product_id: product_id.into(),
            is_accurate,
            context: context.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewWordLimits {
    pub min: u32,
    pub max: u32,
}

impl Default for ReviewWordLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_WORDS,
            max: DEFAULT_MAX_WORDS,
        }
    }
}

/// Optional knobs for a review generation run. Unset fields fall back to
/// the documented defaults when the request is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewGenerationOptions {
    pub number_of_reviews: Option<u32>,
    pub review_word_limits: Option<ReviewWordLimits>,
    pub selected_review_tones: Option<Vec<String>>,
    pub supporting_research_links: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewGenerationRequest {
    pub product_id: String,
    pub number_of_reviews: u32,
    pub review_word_limits: ReviewWordLimits,
    pub selected_review_tones: Vec<String>,
    pub supporting_research_links: Vec<String>,
}

impl ReviewGenerationRequest {
    // min <= max is left for the backend to enforce
    pub fn new(product_id: impl Into<String>, options: ReviewGenerationOptions) -> Self {
        Self {
            product_id: product_id.into(),
            number_of_reviews: options
                .number_of_reviews
                .unwrap_or(DEFAULT_NUMBER_OF_REVIEWS),
            review_word_limits: options.review_word_limits.unwrap_or_default(),
            selected_review_tones: options
                .selected_review_tones
                .unwrap_or_else(|| DEFAULT_REVIEW_TONES.iter().map(|t| t.to_string()).collect()),
            supporting_research_links: options.supporting_research_links.unwrap_or_else(|| {
                DEFAULT_RESEARCH_LINKS
                    .iter()
                    .map(|l| l.to_string())
                    .collect()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_review_generation_defaults() {
        let request = ReviewGenerationRequest::new("p1", ReviewGenerationOptions::default());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "product_id": "p1",
                "number_of_reviews": 7,
                "review_word_limits": { "min": 20, "max": 100 },
                "selected_review_tones": [
                    "clinical_authority",
                    "empathetic_practitioner",
                    "scientific_educator",
                    "due_diligence_expert"
                ],
                "supporting_research_links": [
                    "https://research.example.org/papers/hyaluronic-acid-skin-hydration",
                    "https://research.example.org/papers/natural-moisturizing-factors"
                ]
            })
        );
    }

    #[test]
    fn test_review_generation_overrides_keep_order() {
        let options = ReviewGenerationOptions {
            number_of_reviews: Some(3),
            review_word_limits: Some(ReviewWordLimits { min: 50, max: 10 }),
            selected_review_tones: Some(vec!["casual".to_string(), "formal".to_string()]),
            supporting_research_links: Some(vec![]),
        };
        let request = ReviewGenerationRequest::new("p2", options);

        assert_eq!(request.number_of_reviews, 3);
        // inverted limits are passed through untouched
        assert_eq!(request.review_word_limits, ReviewWordLimits { min: 50, max: 10 });
        assert_eq!(request.selected_review_tones, vec!["casual", "formal"]);
        assert!(request.supporting_research_links.is_empty());
    }

    #[test]
    fn test_human_review_empty_context() {
        let review = HumanReviewSubmission::new("p1", true, None);
        assert_eq!(
            serde_json::to_value(&review).unwrap(),
            json!({ "product_id": "p1", "is_accurate": true, "context": "" })
        );
    }

    #[test]
    fn test_task_id_extraction() {
        assert_eq!(
            TaskSubmissionResult::from_json(&json!({ "task_id": "abc123" })).task_id,
            Some("abc123".to_string())
        );
        assert_eq!(
            TaskSubmissionResult::from_json(&json!({ "task_id": 42 })).task_id,
            Some("42".to_string())
        );
        assert_eq!(
            TaskSubmissionResult::from_json(&json!({ "task_id": null })),
            TaskSubmissionResult {
                has_task_id: true,
                task_id: None,
            }
        );
        assert_eq!(
            TaskSubmissionResult::from_json(&json!({ "status": "queued" })),
            TaskSubmissionResult::default()
        );
        assert_eq!(
            TaskSubmissionResult::from_json(&json!([1, 2])),
            TaskSubmissionResult::default()
        );
    }
}
