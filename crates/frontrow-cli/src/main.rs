use std::error::Error;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use frontrow_harness::{
    EndpointProfile, Harness, HarnessConfig, ReviewGenerationOptions, ReviewWordLimits, Scenario,
    config,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "frontrow")]
#[command(about = "Manual verification runs against the FrontRow product API")]
struct Cli {
    /// Base URL of the backend under test
    #[arg(long, default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Which deployment's endpoint layout to use
    #[arg(long, value_enum, default_value_t = Profile::Catalog)]
    profile: Profile,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = config::DEFAULT_REQUEST_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Pause after a successful extraction submission, in seconds
    #[arg(long, default_value_t = config::DEFAULT_SETTLE_DELAY.as_secs())]
    settle_secs: u64,

    /// Product page submitted for extraction during scenario runs
    #[arg(long, default_value = config::DEFAULT_PRODUCT_URL)]
    product_url: String,

    /// Product targeted by the review steps during scenario runs
    #[arg(long, default_value = config::DEFAULT_PRODUCT_ID)]
    product_id: String,

    /// Override the extraction endpoint path
    #[arg(long)]
    extract_path: Option<String>,

    /// Override the product listing endpoint path
    #[arg(long)]
    products_path: Option<String>,

    /// Override the human review endpoint path
    #[arg(long)]
    human_review_path: Option<String>,

    /// Override the review generation endpoint path
    #[arg(long)]
    generate_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Profile {
    /// Routes under /frontrowmd, products at /frontrowmd/products
    Catalog,
    /// Root routes, products at /get_all_products
    Review,
}

impl From<Profile> for EndpointProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Catalog => EndpointProfile::Catalog,
            Profile::Review => EndpointProfile::Review,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ScenarioArg {
    /// Extraction, wait, product list
    Extraction,
    /// Extraction flow plus human reviews and review generation
    ReviewFlow,
}

impl From<ScenarioArg> for Scenario {
    fn from(scenario: ScenarioArg) -> Self {
        match scenario {
            ScenarioArg::Extraction => Scenario::Extraction,
            ScenarioArg::ReviewFlow => Scenario::ReviewFlow,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full verification sequence (the default)
    Run {
        /// Scenario to run; defaults to the one matching --profile
        #[arg(long, value_enum)]
        scenario: Option<ScenarioArg>,
    },
    /// Submit a product page for metadata extraction
    Extract {
        /// Product page URL; defaults to --product-url
        url: Option<String>,
    },
    /// List every processed product
    Products,
    /// Submit a human accuracy review for a product
    HumanReview {
        product_id: String,
        /// Mark the product data as inaccurate
        #[arg(long)]
        inaccurate: bool,
        /// Free-text explanation
        #[arg(short, long)]
        context: Option<String>,
    },
    /// Request asynchronous review generation for a product
    GenerateReviews {
        product_id: String,
        #[arg(long)]
        count: Option<u32>,
        #[arg(long, requires = "max_words")]
        min_words: Option<u32>,
        #[arg(long, requires = "min_words")]
        max_words: Option<u32>,
        /// Review tone, repeat for several
        #[arg(long = "tone")]
        tones: Vec<String>,
        /// Supporting research URL, repeat for several
        #[arg(long = "research-link")]
        research_links: Vec<String>,
    },
}

impl Cli {
    fn harness_config(&self) -> HarnessConfig {
        let mut config = HarnessConfig::new(&self.base_url).with_profile(self.profile.into());
        config.request_timeout = Duration::from_secs(self.timeout_secs);
        config.settle_delay = Duration::from_secs(self.settle_secs);
        config.product_url = self.product_url.clone();
        config.product_id = self.product_id.clone();

        let endpoints = &mut config.endpoints;
        if let Some(path) = &self.extract_path {
            endpoints.extract_product_metadata = path.clone();
        }
        if let Some(path) = &self.products_path {
            endpoints.get_all_products = path.clone();
        }
        if let Some(path) = &self.human_review_path {
            endpoints.add_human_review = path.clone();
        }
        if let Some(path) = &self.generate_path {
            endpoints.generate_reviews_async = path.clone();
        }

        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("frontrow_harness=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut harness = Harness::stdout(cli.harness_config())?;

    match cli.command {
        None => {
            let scenario = Scenario::for_profile(cli.profile.into());
            harness.run_scenario(scenario).await;
        }
        Some(Commands::Run { scenario }) => {
            let scenario = scenario
                .map(Scenario::from)
                .unwrap_or_else(|| Scenario::for_profile(cli.profile.into()));
            harness.run_scenario(scenario).await;
        }
        Some(Commands::Extract { url }) => {
            let url = url.unwrap_or(cli.product_url);
            harness.submit_extraction(&url).await;
        }
        Some(Commands::Products) => {
            harness.fetch_all_products().await;
        }
        Some(Commands::HumanReview {
            product_id,
            inaccurate,
            context,
        }) => {
            harness
                .submit_human_review(&product_id, !inaccurate, context)
                .await;
        }
        Some(Commands::GenerateReviews {
            product_id,
            count,
            min_words,
            max_words,
            tones,
            research_links,
        }) => {
            let review_word_limits = min_words
                .zip(max_words)
                .map(|(min, max)| ReviewWordLimits { min, max });
            let options = ReviewGenerationOptions {
                number_of_reviews: count,
                review_word_limits,
                selected_review_tones: (!tones.is_empty()).then_some(tones),
                supporting_research_links: (!research_links.is_empty()).then_some(research_links),
            };

            if let Some(task_id) = harness.submit_review_generation(&product_id, options).await {
                info!(%task_id, "Review generation queued");
            }
        }
    }

    Ok(())
}
