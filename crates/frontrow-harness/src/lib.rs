pub mod client;
pub mod config;
pub mod console;
pub mod errors;
pub mod harness;
pub mod models;
pub mod scenario;
pub mod validation;

pub use config::{EndpointPaths, EndpointProfile, HarnessConfig};
pub use errors::HarnessError;
pub use harness::Harness;
pub use models::{ReviewGenerationOptions, ReviewWordLimits};
pub use scenario::{Scenario, ScenarioReport};
