use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kilograms per cubic meter used for the cubic weight.
pub const DEFAULT_CONVERSION_FACTOR: f64 = 250.0;

/// Millimeters to meters, rounded half away from zero to 5 decimals.
fn millimeters_to_meters(raw: f64) -> f64 {
    (raw * 100.0).round() / 100_000.0
}

/// Numbers, or strings holding a finite number.
fn dimension_value(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        other => other.as_f64(),
    }
}

/// Millimeter values as found in an item's `size` object.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawSize {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

impl RawSize {
    /// Missing or non-numeric fields read as `0.0`. Numeric strings count.
    pub fn from_item(item: &Value) -> Self {
        let size = item.get("size");
        let field = |name: &str| {
            size.and_then(|s| s.get(name))
                .and_then(dimension_value)
                .unwrap_or(0.0)
        };

        Self {
            width: field("width"),
            length: field("length"),
            height: field("height"),
        }
    }
}

/// One product of the target category, dimensions in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub derived_weight: f64,
    pub incomplete: bool,
}

impl Record {
    pub fn from_raw_size(raw: RawSize, conversion_factor: f64) -> Self {
        let width = millimeters_to_meters(raw.width);
        let length = millimeters_to_meters(raw.length);
        let height = millimeters_to_meters(raw.height);

        let incomplete = width == 0.0 || length == 0.0 || height == 0.0;
        let derived_weight =
            (conversion_factor * 1000.0 * width * length * height).round() / 1000.0;

        Self {
            width,
            length,
            height,
            derived_weight,
            incomplete,
        }
    }
}

/// One decoded API response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    pub next: Option<String>,
}

impl Page {
    /// Absent or mistyped `objects`/`next` fields mean "empty" and "last page".
    pub fn from_json(mut body: Value) -> Self {
        let items = match body.get_mut("objects").map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        let next = body
            .get("next")
            .and_then(Value::as_str)
            .filter(|next| !next.is_empty())
            .map(str::to_string);

        Self { items, next }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    Exhausted,
    RequestFailed {
        page: usize,
        url: String,
        reason: String,
    },
    PageLimitReached {
        limit: usize,
    },
}

impl Termination {
    pub fn is_complete(&self) -> bool {
        matches!(self, Termination::Exhausted)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchStats {
    pub pages_fetched: usize,
    pub items_seen: usize,
    pub items_kept: usize,
    pub items_uncategorized: usize,
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub records: Vec<Record>,
    pub termination: Termination,
    pub stats: FetchStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub missing: usize,
    pub valid: usize,
    /// `None` when no record has complete dimensions.
    pub average_weight: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub category: String,
    pub summary: Summary,
    pub termination: Termination,
    pub stats: FetchStats,
    pub generated_at: DateTime<Utc>,
    #[serde(skip)]
    pub records: Vec<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.termination.is_complete()
    }
}
