pub mod engine;
pub mod bmi_record;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use bmi_record::{BmiRecordService, BmiRecordServiceTrait, BmiServiceError, create_bmi_record_service};
pub use engine::InvalidMeasurement;
