pub mod error;
pub mod logger;
pub mod progress;
pub mod report;
pub mod validation;
