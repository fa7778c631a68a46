pub mod aggregator;
pub mod etl;
pub mod fetcher;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{FetchOutcome, Record, RunReport, Summary};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
