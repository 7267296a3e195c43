use crate::core::csv_export::to_csv_bytes;
use crate::core::fetcher::{FetchOptions, ProductFetcher};
use crate::core::normalize::normalize;
use crate::core::{ConfigProvider, Pipeline, RawRecord, Storage, TransformResult};
use crate::utils::error::Result;
use crate::utils::progress::ProgressTracker;

pub struct ProductPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    fetcher: ProductFetcher,
    show_progress: bool,
}

impl<S: Storage, C: ConfigProvider> ProductPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let options = FetchOptions {
            timeout: config.request_timeout(),
            max_attempts: config.retry_attempts(),
            delay: config.retry_delay(),
        };
        let fetcher = ProductFetcher::new(config.api_endpoint(), options)?;

        Ok(Self {
            storage,
            config,
            fetcher,
            show_progress: true,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ProductPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawRecord>> {
        tracing::debug!("Making API request to: {}", self.fetcher.url());
        Ok(self.fetcher.fetch().await?)
    }

    async fn transform(&self, data: Vec<RawRecord>) -> Result<TransformResult> {
        let records: Vec<_> = data.iter().map(normalize).collect();

        let progress = if self.show_progress {
            ProgressTracker::new(records.len() as u64)
        } else {
            ProgressTracker::hidden()
        };
        let csv_output = to_csv_bytes(&records, &progress)?;

        Ok(TransformResult {
            records,
            csv_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        tracing::debug!(
            "Writing CSV ({} bytes, {} rows) to storage",
            result.csv_output.len(),
            result.records.len()
        );
        self.storage
            .write_file(self.config.output_path(), &result.csv_output)
            .await
    }
}
