// Domain entities and value objects
pub mod bmi;
pub mod conversions;

// Re-export common types for easier imports
pub use bmi::{BmiAssessment, BmiCategory, BmiRecord, CalculateBmiRequest, CreateBmiRecordRequest};
