use crate::domain::model::{FetchOutcome, Record, RunReport, Summary};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Host prefix that relative `next` paths are appended to.
    fn base_url(&self) -> &str;
    fn start_path(&self) -> &str;
    fn category(&self) -> &str;
    fn conversion_factor(&self) -> f64;
    fn timeout_seconds(&self) -> Option<u64>;
    fn max_pages(&self) -> Option<usize>;
    fn headers(&self) -> HashMap<String, String>;
    fn output_path(&self) -> Option<&str>;
    fn output_formats(&self) -> &[String];

    fn start_url(&self) -> String {
        format!("{}{}", self.base_url(), self.start_path())
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<FetchOutcome>;
    async fn transform(&self, records: &[Record]) -> Result<Summary>;
    /// Persists the report when an output path is configured.
    async fn load(&self, report: &RunReport) -> Result<Option<String>>;
    fn category(&self) -> &str;
}
