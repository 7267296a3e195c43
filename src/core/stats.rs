use crate::domain::model::CleanRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeStatistics {
    pub total: usize,
    pub min_price: f64,
    pub max_price: f64,
    pub average_price: f64,
    /// Category counts in the order each category was first seen.
    pub categories: Vec<(String, usize)>,
}

impl ScrapeStatistics {
    pub fn from_records(records: &[CleanRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut min_price = f64::INFINITY;
        let mut max_price = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut categories: Vec<(String, usize)> = Vec::new();

        for record in records {
            min_price = min_price.min(record.price);
            max_price = max_price.max(record.price);
            sum += record.price;

            match categories.iter_mut().find(|(name, _)| *name == record.category) {
                Some((_, count)) => *count += 1,
                None => categories.push((record.category.clone(), 1)),
            }
        }

        Some(Self {
            total: records.len(),
            min_price,
            max_price,
            average_price: sum / records.len() as f64,
            categories,
        })
    }
}

/// 四捨五入到小數點後兩位 (half away from zero).
///
/// Operates on the binary value: `1.005` is stored as `1.00499...` and
/// rounds to `1.00`, while exact ties such as `15.375` round up.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
