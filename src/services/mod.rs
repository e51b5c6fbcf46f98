// Service exports
pub mod appwrite;
pub mod cache;
pub mod memory;
pub mod postgres;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use cache::{CacheError, CacheKey, ReportCache};
pub use memory::{InMemoryProfileProvider, InMemoryReportRepository};
pub use postgres::{PostgresClient, PostgresError};
