use crate::config::OUTPUT_FORMATS;
use crate::core::fetcher::{DEFAULT_BASE_URL, DEFAULT_CATEGORY, DEFAULT_START_PATH};
use crate::core::ConfigProvider;
use crate::domain::model::DEFAULT_CONVERSION_FACTOR;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    pub load: Option<LoadConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_start_path")]
    pub start_path: String,
    pub timeout_seconds: Option<u64>,
    pub max_pages: Option<usize>,
    pub headers: Option<HashMap<String, String>>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            start_path: default_start_path(),
            timeout_seconds: None,
            max_pages: None,
            headers: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    pub conversion_factor: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_start_path() -> String {
    DEFAULT_START_PATH.to_string()
}

fn default_output_formats() -> Vec<String> {
    OUTPUT_FORMATS.iter().map(|f| f.to_string()).collect()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn start_path(&self) -> &str {
        &self.source.start_path
    }

    fn category(&self) -> &str {
        self.extract.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    fn conversion_factor(&self) -> f64 {
        self.transform
            .conversion_factor
            .unwrap_or(DEFAULT_CONVERSION_FACTOR)
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.source.timeout_seconds
    }

    fn max_pages(&self) -> Option<usize> {
        self.source.max_pages
    }

    fn headers(&self) -> HashMap<String, String> {
        self.source.headers.clone().unwrap_or_default()
    }

    fn output_path(&self) -> Option<&str> {
        self.load.as_ref().map(|load| load.output_path.as_str())
    }

    fn output_formats(&self) -> &[String] {
        self.load
            .as_ref()
            .map(|load| load.output_formats.as_slice())
            .unwrap_or(&[])
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.source.base_url)?;
        validation::validate_relative_path("source.start_path", &self.source.start_path)?;
        validation::validate_url("source.start_path", &self.start_url())?;
        validation::validate_non_empty_string("extract.category", self.category())?;
        validation::validate_positive_factor(
            "transform.conversion_factor",
            self.conversion_factor(),
        )?;

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }
        if let Some(max_pages) = self.source.max_pages {
            validation::validate_positive_number("source.max_pages", max_pages, 1)?;
        }
        if let Some(load) = &self.load {
            validation::validate_path("load.output_path", &load.output_path)?;
            validation::validate_output_formats(
                "load.output_formats",
                &load.output_formats,
                &OUTPUT_FORMATS,
            )?;
        }

        Ok(())
    }
}
