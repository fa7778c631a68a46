use crate::core::aggregator::summarize;
use crate::core::fetcher::{FetchSettings, Fetcher};
use crate::core::report::{records_csv, summary_json, RECORDS_FILENAME, SUMMARY_FILENAME};
use crate::core::{ConfigProvider, FetchOutcome, Pipeline, Record, RunReport, Storage, Summary};
use crate::utils::error::Result;
use std::time::Duration;

pub struct CubicWeightPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    fetcher: Fetcher,
}

impl<S: Storage, C: ConfigProvider> CubicWeightPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let fetcher = Fetcher::new(FetchSettings {
            base_url: config.base_url().to_string(),
            category: config.category().to_string(),
            conversion_factor: config.conversion_factor(),
            timeout: config.timeout_seconds().map(Duration::from_secs),
            max_pages: config.max_pages(),
            headers: config.headers(),
        })?;

        Ok(Self {
            storage,
            config,
            fetcher,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CubicWeightPipeline<S, C> {
    async fn extract(&self) -> Result<FetchOutcome> {
        Ok(self.fetcher.fetch_all(&self.config.start_url()).await)
    }

    async fn transform(&self, records: &[Record]) -> Result<Summary> {
        tracing::info!("🔧 Summarizing {} records", records.len());
        let summary = summarize(records);
        tracing::debug!("Summary: {:?}", summary);
        Ok(summary)
    }

    async fn load(&self, report: &RunReport) -> Result<Option<String>> {
        let Some(output_path) = self.config.output_path() else {
            return Ok(None);
        };

        for format in self.config.output_formats() {
            match format.as_str() {
                "csv" => {
                    let data = records_csv(&report.records)?;
                    tracing::debug!("Writing {} ({} bytes)", RECORDS_FILENAME, data.len());
                    self.storage.write_file(RECORDS_FILENAME, &data).await?;
                }
                "json" => {
                    let data = summary_json(report)?;
                    tracing::debug!("Writing {} ({} bytes)", SUMMARY_FILENAME, data.len());
                    self.storage.write_file(SUMMARY_FILENAME, &data).await?;
                }
                other => tracing::warn!("Skipping unsupported output format: {}", other),
            }
        }

        tracing::info!("💾 Output saved to: {}", output_path);
        Ok(Some(output_path.to_string()))
    }

    fn category(&self) -> &str {
        self.config.category()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FetchStats, Termination, DEFAULT_CONVERSION_FACTOR};
    use crate::utils::error::EtlError;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        output_path: Option<String>,
        output_formats: Vec<String>,
    }

    impl ConfigProvider for TestConfig {
        fn base_url(&self) -> &str {
            "http://localhost"
        }

        fn start_path(&self) -> &str {
            "/api/products/1"
        }

        fn category(&self) -> &str {
            "Air Conditioners"
        }

        fn conversion_factor(&self) -> f64 {
            DEFAULT_CONVERSION_FACTOR
        }

        fn timeout_seconds(&self) -> Option<u64> {
            None
        }

        fn max_pages(&self) -> Option<usize> {
            None
        }

        fn headers(&self) -> HashMap<String, String> {
            HashMap::new()
        }

        fn output_path(&self) -> Option<&str> {
            self.output_path.as_deref()
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }
    }

    fn report() -> RunReport {
        RunReport {
            category: "Air Conditioners".to_string(),
            summary: summarize(&[]),
            termination: Termination::Exhausted,
            stats: FetchStats::default(),
            generated_at: Utc::now(),
            records: Vec::new(),
            output_path: None,
        }
    }

    #[tokio::test]
    async fn test_load_without_output_path_writes_nothing() {
        let storage = MockStorage::new();
        let config = TestConfig {
            output_path: None,
            output_formats: vec!["csv".to_string()],
        };
        let pipeline = CubicWeightPipeline::new(storage.clone(), config).unwrap();

        let saved = pipeline.load(&report()).await.unwrap();

        assert!(saved.is_none());
        assert!(storage.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_writes_requested_formats() {
        let storage = MockStorage::new();
        let config = TestConfig {
            output_path: Some("./out".to_string()),
            output_formats: vec!["csv".to_string(), "json".to_string()],
        };
        let pipeline = CubicWeightPipeline::new(storage.clone(), config).unwrap();

        let saved = pipeline.load(&report()).await.unwrap();

        assert_eq!(saved.as_deref(), Some("./out"));
        assert!(storage.read_file(RECORDS_FILENAME).await.is_ok());
        let json = storage.read_file(SUMMARY_FILENAME).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["summary"]["total"], 0);
        assert!(value["summary"]["average_weight"].is_null());
    }
}
