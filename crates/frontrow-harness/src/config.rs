use std::time::Duration;

use crate::validation::{BaseUrl, ValidationError, validate_endpoint_path};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Product page used for extraction runs. The Ordinary's NMF + HA moisturizer.
pub const DEFAULT_PRODUCT_URL: &str =
    "https://www.theordinary.com/en-us/natural-moisturizing-factors-ha-100ml-moisturizer-100435.html";

pub const DEFAULT_PRODUCT_ID: &str = "1";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause between submitting an extraction task and listing products.
/// Extraction runs in the background and can take minutes, so the product
/// list may still be stale after this delay.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(15);

/// Deployments expose the same operations under different paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointProfile {
    /// Everything under `/frontrowmd`, products listed at `/frontrowmd/products`.
    #[default]
    Catalog,
    /// Root-mounted routes, products listed at `/get_all_products`.
    Review,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPaths {
    pub extract_product_metadata: String,
    pub get_all_products: String,
    pub add_human_review: String,
    pub generate_reviews_async: String,
}

impl EndpointPaths {
    pub fn for_profile(profile: EndpointProfile) -> Self {
        let (prefix, products) = match profile {
            EndpointProfile::Catalog => ("/frontrowmd", "/products"),
            EndpointProfile::Review => ("", "/get_all_products"),
        };

        Self {
            extract_product_metadata: format!("{prefix}/extract_product_metadata"),
            get_all_products: format!("{prefix}{products}"),
            add_human_review: format!("{prefix}/add_human_review"),
            generate_reviews_async: format!("{prefix}/generate_reviews_async"),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_endpoint_path(&self.extract_product_metadata)?;
        validate_endpoint_path(&self.get_all_products)?;
        validate_endpoint_path(&self.add_human_review)?;
        validate_endpoint_path(&self.generate_reviews_async)?;
        Ok(())
    }
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self::for_profile(EndpointProfile::default())
    }
}

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub base_url: String,
    pub endpoints: EndpointPaths,
    pub request_timeout: Duration,
    pub settle_delay: Duration,
    /// Product page submitted for extraction by the scenarios
    pub product_url: String,
    /// Product targeted by the human review and review generation steps
    pub product_id: String,
}

impl HarnessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_profile(mut self, profile: EndpointProfile) -> Self {
        self.endpoints = EndpointPaths::for_profile(profile);
        self
    }

    /// Checks the base URL and endpoint paths before any request is sent.
    pub fn validate(&self) -> Result<BaseUrl, ValidationError> {
        let base_url = BaseUrl::parse(&self.base_url)?;
        self.endpoints.validate()?;
        Ok(base_url)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: EndpointPaths::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
            product_url: DEFAULT_PRODUCT_URL.to_string(),
            product_id: DEFAULT_PRODUCT_ID.to_string(),
        }
    }
}
