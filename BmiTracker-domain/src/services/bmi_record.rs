use thiserror::Error;
use tracing::{debug, error, info};
use chrono::Utc;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};
use async_trait::async_trait;

use crate::entities::bmi::{BmiAssessment, BmiRecord, CalculateBmiRequest, CreateBmiRecordRequest};
use crate::entities::conversions;
use crate::services::engine::{self, InvalidMeasurement};
use bmi_tracker_data::repository::{BmiRecordRepository, BmiRecordRepositoryTrait, RepositoryError};

/// BMI record service errors
#[derive(Debug, Error)]
pub enum BmiServiceError {
    /// Client-supplied measurements failed validation
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    /// Referenced record does not exist
    #[error("BMI record not found: {0}")]
    NotFound(String),

    /// Underlying persistence failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<InvalidMeasurement> for BmiServiceError {
    fn from(err: InvalidMeasurement) -> Self {
        BmiServiceError::InvalidMeasurement(err.0)
    }
}

impl From<RepositoryError> for BmiServiceError {
    fn from(err: RepositoryError) -> Self {
        error!("BMI record store failure: {}", err);
        BmiServiceError::StoreUnavailable(err.to_string())
    }
}

/// Trait for BMI record service operations
#[async_trait]
pub trait BmiRecordServiceTrait {
    /// Validate a create request: finite positive values, then plausible ranges
    fn validate_create_request(&self, request: &CreateBmiRecordRequest) -> Result<(), BmiServiceError>;

    /// Evaluate measurements without persisting anything
    fn calculate(&self, request: &CalculateBmiRequest) -> Result<BmiAssessment, BmiServiceError>;

    /// Validate, compute BMI, assign id and timestamp, and persist
    async fn create_record(&self, request: CreateBmiRecordRequest) -> Result<BmiRecord, BmiServiceError>;

    /// List all records, newest first
    async fn list_records(&self) -> Result<Vec<BmiRecord>, BmiServiceError>;

    /// Delete a single record
    async fn delete_record(&self, id: &str) -> Result<(), BmiServiceError>;

    /// Delete every record, returning how many were removed
    async fn delete_all_records(&self) -> Result<usize, BmiServiceError>;
}

/// BMI record service for domain logic
pub struct BmiRecordService<R: BmiRecordRepositoryTrait> {
    repository: R,
}

impl<R: BmiRecordRepositoryTrait> BmiRecordService<R> {
    /// Create a new BMI record service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

/// Flatten validator output into one message
fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let error_msgs: Vec<String> = errors
                .iter()
                .map(|err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid {}", field),
                })
                .collect();
            format!("{}: {}", field, error_msgs.join(", "))
        })
        .collect();
    // field_errors is a HashMap; keep the message stable
    messages.sort();
    messages.join("; ")
}

fn validate_measurements<T: Validate>(height: f64, weight: f64, request: &T) -> Result<(), BmiServiceError> {
    engine::check_measurement("height", height)?;
    engine::check_measurement("weight", weight)?;

    request
        .validate()
        .map_err(|errors| BmiServiceError::InvalidMeasurement(describe_validation_errors(&errors)))
}

#[async_trait]
impl<R: BmiRecordRepositoryTrait + Send + Sync> BmiRecordServiceTrait for BmiRecordService<R> {
    fn validate_create_request(&self, request: &CreateBmiRecordRequest) -> Result<(), BmiServiceError> {
        validate_measurements(request.height, request.weight, request)
    }

    fn calculate(&self, request: &CalculateBmiRequest) -> Result<BmiAssessment, BmiServiceError> {
        validate_measurements(request.height, request.weight, request)?;
        Ok(engine::assess(request.height, request.weight)?)
    }

    async fn create_record(&self, request: CreateBmiRecordRequest) -> Result<BmiRecord, BmiServiceError> {
        self.validate_create_request(&request)?;

        let record = BmiRecord {
            id: Uuid::new_v4().to_string(),
            height: request.height,
            weight: request.weight,
            age: request.age,
            bmi: engine::compute(request.height, request.weight)?,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(conversions::convert_to_data_record(&record)).await?;
        info!("BMI record created with ID: {}", stored.id);

        Ok(conversions::convert_to_domain_record(stored))
    }

    async fn list_records(&self) -> Result<Vec<BmiRecord>, BmiServiceError> {
        let records = self.repository.get_all().await?;
        debug!("Listing {} BMI records", records.len());

        Ok(records.into_iter().map(conversions::convert_to_domain_record).collect())
    }

    async fn delete_record(&self, id: &str) -> Result<(), BmiServiceError> {
        if self.repository.delete_by_id(id).await? {
            info!("BMI record deleted: {}", id);
            Ok(())
        } else {
            Err(BmiServiceError::NotFound(format!("BMI record with ID {} not found", id)))
        }
    }

    async fn delete_all_records(&self) -> Result<usize, BmiServiceError> {
        let count = self.repository.delete_all().await?;
        info!("Deleted {} BMI records", count);
        Ok(count)
    }
}

/// Create a BMI record service over the given repository
pub fn create_bmi_record_service(repository: BmiRecordRepository) -> impl BmiRecordServiceTrait + Send + Sync {
    BmiRecordService::new(repository)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmi_tracker_data::repository::mock::MockBmiRecordRepository;

    fn service() -> BmiRecordService<MockBmiRecordRepository> {
        BmiRecordService::new(MockBmiRecordRepository::new())
    }

    fn request(height: f64, weight: f64, age: Option<u16>) -> CreateBmiRecordRequest {
        CreateBmiRecordRequest { height, weight, age }
    }

    #[test]
    fn test_validate_create_request_valid() {
        assert!(service().validate_create_request(&request(175.0, 70.0, Some(30))).is_ok());
        assert!(service().validate_create_request(&request(175.0, 70.0, None)).is_ok());
        assert!(service().validate_create_request(&request(50.0, 10.0, Some(1))).is_ok());
        assert!(service().validate_create_request(&request(300.0, 500.0, Some(120))).is_ok());
    }

    #[test]
    fn test_validate_create_request_rejects_non_positive() {
        let err = service().validate_create_request(&request(0.0, 70.0, None)).unwrap_err();
        assert!(matches!(err, BmiServiceError::InvalidMeasurement(_)));
        assert!(err.to_string().contains("height"));

        let err = service().validate_create_request(&request(175.0, -3.0, None)).unwrap_err();
        assert!(matches!(err, BmiServiceError::InvalidMeasurement(_)));
    }

    #[test]
    fn test_validate_create_request_rejects_nan() {
        let err = service().validate_create_request(&request(f64::NAN, 70.0, None)).unwrap_err();
        assert!(matches!(err, BmiServiceError::InvalidMeasurement(_)));
    }

    #[test]
    fn test_validate_create_request_rejects_implausible_ranges() {
        let err = service().validate_create_request(&request(49.9, 70.0, None)).unwrap_err();
        assert!(err.to_string().contains("Height must be between 50 and 300 cm"));

        let err = service().validate_create_request(&request(175.0, 501.0, None)).unwrap_err();
        assert!(err.to_string().contains("Weight must be between 10 and 500 kg"));

        let err = service().validate_create_request(&request(175.0, 70.0, Some(0))).unwrap_err();
        assert!(err.to_string().contains("Age must be between 1 and 120 years"));

        let err = service().validate_create_request(&request(175.0, 70.0, Some(121))).unwrap_err();
        assert!(matches!(err, BmiServiceError::InvalidMeasurement(_)));
    }

    #[test]
    fn test_calculate() {
        let assessment = service()
            .calculate(&CalculateBmiRequest { height: 175.0, weight: 70.0 })
            .unwrap();
        assert_eq!(assessment.bmi, 22.86);
        assert_eq!(assessment.category, crate::entities::BmiCategory::Normal);

        let err = service()
            .calculate(&CalculateBmiRequest { height: 175.0, weight: 5.0 })
            .unwrap_err();
        assert!(matches!(err, BmiServiceError::InvalidMeasurement(_)));
    }

    #[tokio::test]
    async fn test_create_then_list_contains_record_once() {
        let service = service();

        let created = service.create_record(request(175.0, 70.0, Some(30))).await.unwrap();
        assert_eq!(created.bmi, engine::compute(175.0, 70.0).unwrap());
        assert!(Uuid::parse_str(&created.id).is_ok());

        let records = service.list_records().await.unwrap();
        assert_eq!(records.iter().filter(|r| r.id == created.id).count(), 1);
        assert_eq!(records[0], created);
    }

    #[tokio::test]
    async fn test_invalid_create_does_not_persist() {
        let service = service();

        assert!(service.create_record(request(-1.0, 70.0, None)).await.is_err());
        assert!(service.list_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let service = service();

        let a = service.create_record(request(175.0, 70.0, None)).await.unwrap();
        let b = service.create_record(request(175.0, 70.0, None)).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_list_returns_n_records_newest_first() {
        let service = service();

        let mut created_ids = Vec::new();
        for i in 0..5 {
            let record = service
                .create_record(request(160.0 + i as f64, 60.0, None))
                .await
                .unwrap();
            created_ids.push(record.id);
        }

        let records = service.list_records().await.unwrap();
        assert_eq!(records.len(), 5);
        for pair in records.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }

        let listed_ids: Vec<String> = records.into_iter().map(|r| r.id).collect();
        created_ids.reverse();
        assert_eq!(listed_ids, created_ids);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let service = service();
        service.create_record(request(175.0, 70.0, None)).await.unwrap();
        let before = service.list_records().await.unwrap();

        let err = service.delete_record("does-not-exist").await.unwrap_err();
        assert!(matches!(err, BmiServiceError::NotFound(_)));

        assert_eq!(service.list_records().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_record() {
        let service = service();
        let keep = service.create_record(request(175.0, 70.0, None)).await.unwrap();
        let drop = service.create_record(request(180.0, 90.0, None)).await.unwrap();

        service.delete_record(&drop.id).await.unwrap();

        let records = service.list_records().await.unwrap();
        assert_eq!(records, vec![keep]);
    }

    #[tokio::test]
    async fn test_delete_all_on_empty_store() {
        assert_eq!(service().delete_all_records().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_all_counts_records() {
        let service = service();
        for _ in 0..3 {
            service.create_record(request(175.0, 70.0, None)).await.unwrap();
        }

        assert_eq!(service.delete_all_records().await.unwrap(), 3);
        assert!(service.list_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_store_unavailable() {
        let service = BmiRecordService::new(MockBmiRecordRepository::failing());

        let err = service.create_record(request(175.0, 70.0, None)).await.unwrap_err();
        assert!(matches!(err, BmiServiceError::StoreUnavailable(_)));

        let err = service.list_records().await.unwrap_err();
        assert!(matches!(err, BmiServiceError::StoreUnavailable(_)));

        let err = service.delete_record("x").await.unwrap_err();
        assert!(matches!(err, BmiServiceError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_validation_runs_before_store_access() {
        let service = BmiRecordService::new(MockBmiRecordRepository::failing());

        let err = service.create_record(request(0.0, 70.0, None)).await.unwrap_err();
        assert!(matches!(err, BmiServiceError::InvalidMeasurement(_)));
    }
}
