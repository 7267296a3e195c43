use crate::core::stats::ScrapeStatistics;
use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs fetch → validate → write once. Any error aborts the run.
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        tracing::info!("Starting scrape...");

        // Extract
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", raw_data.len());

        // Transform
        let transformed = self.pipeline.transform(raw_data).await?;
        tracing::debug!("Normalized {} records", transformed.records.len());
        let records = transformed.records.clone();

        // Load
        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("💾 Saved {} products to {}", records.len(), output_path);

        let statistics = ScrapeStatistics::from_records(&records);

        Ok(RunSummary {
            output_path,
            records,
            statistics,
            elapsed: started.elapsed(),
        })
    }
}
