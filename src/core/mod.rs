// Core algorithm exports
pub mod report;
pub mod scorer;
pub mod scoring;

pub use report::{ProfileProvider, ReportError, ReportRepository, ReportStore, StorageError};
pub use scorer::Scorer;
pub use scoring::calculate_compatibility;
