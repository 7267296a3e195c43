use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::core::stats::ScrapeStatistics;

/// 從 API 取得的原始商品資料，所有欄位皆可能缺少。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub image: Option<Value>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: Option<RawRating>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRating {
    #[serde(default)]
    pub rate: Option<Value>,
    #[serde(default)]
    pub count: Option<Value>,
}

impl RawRecord {
    /// Non-object items become an empty record instead of failing the batch.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => RawRecord::default(),
        }
    }
}

fn lenient_rating<'de, D>(deserializer: D) -> std::result::Result<Option<RawRating>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(v @ Value::Object(_)) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

/// 清理後、欄位固定的商品資料
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanRecord {
    pub title: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub image: String,
    pub rating: f64,
    pub rating_count: u64,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<CleanRecord>,
    pub csv_output: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub records: Vec<CleanRecord>,
    pub statistics: Option<ScrapeStatistics>,
    pub elapsed: Duration,
}
