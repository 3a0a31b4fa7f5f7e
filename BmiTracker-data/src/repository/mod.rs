// Repository module structure
pub mod errors;
mod bmi_record;
mod in_memory;
mod storage;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use bmi_record::{BmiRecordRepository, BmiRecordRepositoryTrait};

// Re-export mocks for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use bmi_record::mock;
