pub mod csv_export;
pub mod etl;
pub mod fetcher;
pub mod normalize;
pub mod stats;

pub use crate::domain::model::{CleanRecord, RawRecord, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
