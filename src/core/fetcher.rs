use crate::domain::model::{FetchOutcome, FetchStats, Page, RawSize, Record, Termination};
use crate::utils::error::{EtlError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://wp8m3he1wt.s3-website-ap-southeast-2.amazonaws.com";
pub const DEFAULT_START_PATH: &str = "/api/products/1";
pub const DEFAULT_CATEGORY: &str = "Air Conditioners";

const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub category: String,
    pub conversion_factor: f64,
    pub timeout: Option<Duration>,
    pub max_pages: Option<usize>,
    pub headers: HashMap<String, String>,
}

/// Walks a paginated product listing one page at a time.
pub struct Fetcher {
    client: Client,
    settings: FetchSettings,
    headers: HeaderMap,
}

impl Fetcher {
    pub fn new(settings: FetchSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        for (key, value) in &settings.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                EtlError::InvalidConfigValueError {
                    field: "source.headers".to_string(),
                    value: key.clone(),
                    reason: e.to_string(),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                EtlError::InvalidConfigValueError {
                    field: "source.headers".to_string(),
                    value: key.clone(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(name, value);
        }

        Ok(Self {
            client,
            settings,
            headers,
        })
    }

    /// Follows `next` pointers from `start_url` until the listing is exhausted,
    /// a request fails, or the page cap is hit. Records from pages that were
    /// fetched successfully are always returned.
    pub async fn fetch_all(&self, start_url: &str) -> FetchOutcome {
        let mut records = Vec::new();
        let mut stats = FetchStats::default();
        let mut url = start_url.to_string();

        tracing::info!("🚀 Starting paginated fetch from: {}", url);

        let termination = loop {
            let page_number = stats.pages_fetched + 1;

            let page = match self.fetch_page(&url).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(
                        "❌ Request for page {} failed ({}): {}",
                        page_number,
                        url,
                        e
                    );
                    break Termination::RequestFailed {
                        page: page_number,
                        url,
                        reason: e.to_string(),
                    };
                }
            };

            stats.pages_fetched = page_number;
            let kept = self.collect_records(&page.items, &mut records, &mut stats);
            tracing::debug!(
                "Page {}: {} items, {} kept, {} records so far",
                page_number,
                page.items.len(),
                kept,
                records.len()
            );

            let Some(next) = page.next else {
                break Termination::Exhausted;
            };

            if let Some(limit) = self.settings.max_pages {
                if stats.pages_fetched >= limit {
                    tracing::warn!("⏹️ Page limit {} reached, next page was {}", limit, next);
                    break Termination::PageLimitReached { limit };
                }
            }

            url = format!("{}{}", self.settings.base_url, next);
        };

        tracing::info!(
            "📊 Fetched {} pages, kept {} of {} items ({} uncategorized)",
            stats.pages_fetched,
            stats.items_kept,
            stats.items_seen,
            stats.items_uncategorized
        );

        FetchOutcome {
            records,
            termination,
            stats,
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<Page> {
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        Ok(Page::from_json(body))
    }

    fn collect_records(
        &self,
        items: &[Value],
        records: &mut Vec<Record>,
        stats: &mut FetchStats,
    ) -> usize {
        let mut kept = 0;

        for item in items {
            stats.items_seen += 1;

            let Some(category) = item.get("category").and_then(Value::as_str) else {
                tracing::debug!("Dropping item without a string category");
                stats.items_uncategorized += 1;
                continue;
            };
            if category != self.settings.category {
                continue;
            }

            let record =
                Record::from_raw_size(RawSize::from_item(item), self.settings.conversion_factor);
            if record.incomplete {
                tracing::debug!("Item with missing dimensions: {:?}", item.get("size"));
            }
            records.push(record);
            kept += 1;
        }

        stats.items_kept += kept;
        kept
    }
}
