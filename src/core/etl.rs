use crate::core::{Pipeline, RunReport};
use crate::utils::error::Result;
use chrono::Utc;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Summarizes whatever was fetched, whether the listing was exhausted or
    /// cut short. Only export failures surface as `Err`.
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting ETL process...");

        let outcome = self.pipeline.extract().await?;
        if !outcome.termination.is_complete() {
            tracing::warn!(
                "⚠️ Fetch ended early ({:?}), summarizing {} partial records",
                outcome.termination,
                outcome.records.len()
            );
        }

        let summary = self.pipeline.transform(&outcome.records).await?;

        let mut report = RunReport {
            category: self.pipeline.category().to_string(),
            summary,
            termination: outcome.termination,
            stats: outcome.stats,
            generated_at: Utc::now(),
            records: outcome.records,
            output_path: None,
        };

        report.output_path = self.pipeline.load(&report).await?;

        tracing::info!(
            "✅ ETL finished: total={} missing={} valid={} average={:?}",
            report.summary.total,
            report.summary.missing,
            report.summary.valid,
            report.summary.average_weight
        );
        Ok(report)
    }
}
