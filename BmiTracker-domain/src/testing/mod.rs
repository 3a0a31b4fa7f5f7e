// Testing utilities for the domain layer
// This module is only available when the "mock" feature is enabled

use std::sync::Arc;

// Re-export test mocks from the data layer
pub use bmi_tracker_data::repository::mock::MockBmiRecordRepository;

use crate::services::bmi_record::{BmiRecordService, BmiRecordServiceTrait};

/// Shared service handle as the API layer holds it
pub type SharedBmiRecordService = Arc<dyn BmiRecordServiceTrait + Send + Sync>;

/// Service over an empty, working mock repository
pub fn create_mock_bmi_record_service() -> SharedBmiRecordService {
    Arc::new(BmiRecordService::new(MockBmiRecordRepository::new()))
}

/// Service whose repository fails every call
pub fn create_failing_bmi_record_service() -> SharedBmiRecordService {
    Arc::new(BmiRecordService::new(MockBmiRecordRepository::failing()))
}
