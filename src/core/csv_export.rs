use crate::domain::model::CleanRecord;
use crate::utils::error::{Result, ScraperError};
use crate::utils::progress::ProgressTracker;
use serde::Serialize;

pub const CSV_HEADERS: [&str; 7] = [
    "Title",
    "Price",
    "Category",
    "Description",
    "Image URL",
    "Rating",
    "Rating Count",
];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Image URL")]
    image: &'a str,
    #[serde(rename = "Rating")]
    rating: String,
    #[serde(rename = "Rating Count")]
    rating_count: u64,
}

impl<'a> From<&'a CleanRecord> for CsvRow<'a> {
    fn from(record: &'a CleanRecord) -> Self {
        Self {
            title: &record.title,
            price: format_price(record.price),
            category: &record.category,
            description: &record.description,
            image: &record.image,
            rating: record.rating.to_string(),
            rating_count: record.rating_count,
        }
    }
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// 將清理後的記錄轉成 CSV，每寫一列就推進一次進度條
pub fn to_csv_bytes(records: &[CleanRecord], progress: &ProgressTracker) -> Result<Vec<u8>> {
    if records.is_empty() {
        return Err(ScraperError::EmptyDataset);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(CsvRow::from(record))?;
        progress.inc();
    }
    progress.finish();

    writer.into_inner().map_err(|e| {
        ScraperError::IoError(std::io::Error::new(
            e.error().kind(),
            format!("Failed to flush CSV writer: {}", e.error()),
        ))
    })
}
