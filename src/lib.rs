pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::pipelines::product_pipeline::ProductPipeline;
pub use config::{cli::LocalStorage, CliConfig, ScraperSettings};
pub use crate::core::fetcher::{fetch_products, FetchOptions, ProductFetcher};
pub use crate::core::normalize::normalize;
pub use crate::core::{etl::EtlEngine, stats::ScrapeStatistics};
pub use domain::model::{CleanRecord, RawRating, RawRecord, RunSummary};
pub use utils::error::{FetchError, Result, ScraperError};
