pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::fetcher::{DEFAULT_BASE_URL, DEFAULT_CATEGORY, DEFAULT_START_PATH};
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{EtlError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::collections::HashMap;

pub const OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "cubic-weight")]
#[command(about = "Average cubic weight of one product category from a paginated API")]
pub struct CliConfig {
    /// Load settings from a TOML file instead of the flags below
    #[arg(short, long)]
    pub config: Option<String>,

    /// Host prefix that relative `next` paths are appended to
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = DEFAULT_START_PATH)]
    pub start_path: String,

    #[arg(long, default_value = DEFAULT_CATEGORY)]
    pub category: String,

    /// Kilograms per cubic meter
    #[arg(long, default_value_t = crate::domain::model::DEFAULT_CONVERSION_FACTOR)]
    pub conversion_factor: f64,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Stop after this many pages even if the API reports more
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Extra request header, repeatable
    #[arg(long = "header", value_name = "NAME=VALUE")]
    pub headers: Vec<String>,

    /// Directory for exported files; nothing is written when omitted
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = ["csv".to_string(), "json".to_string()]
    )]
    pub output_formats: Vec<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[cfg(feature = "cli")]
impl CliConfig {
    fn parse_header(raw: &str) -> Result<(String, String)> {
        match raw.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(EtlError::InvalidConfigValueError {
                field: "header".to_string(),
                value: raw.to_string(),
                reason: "Expected NAME=VALUE".to_string(),
            }),
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn start_path(&self) -> &str {
        &self.start_path
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn conversion_factor(&self) -> f64 {
        self.conversion_factor
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn max_pages(&self) -> Option<usize> {
        self.max_pages
    }

    fn headers(&self) -> HashMap<String, String> {
        self.headers
            .iter()
            .filter_map(|raw| Self::parse_header(raw).ok())
            .collect()
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base-url", &self.base_url)?;
        validation::validate_relative_path("start-path", &self.start_path)?;
        validation::validate_url("start-path", &self.start_url())?;
        validation::validate_non_empty_string("category", &self.category)?;
        validation::validate_positive_factor("conversion-factor", self.conversion_factor)?;

        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout-seconds", timeout, 1)?;
        }
        if let Some(max_pages) = self.max_pages {
            validation::validate_positive_number("max-pages", max_pages, 1)?;
        }
        for raw in &self.headers {
            Self::parse_header(raw)?;
        }
        if let Some(path) = &self.output_path {
            validation::validate_path("output-path", path)?;
        }
        validation::validate_output_formats("output-formats", &self.output_formats, &OUTPUT_FORMATS)
    }
}
