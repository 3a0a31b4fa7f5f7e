use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use utoipa::ToSchema;

use bmi_tracker_domain::entities::bmi::{BmiAssessment, BmiRecord as DomainBmiRecord};
use bmi_tracker_domain::services::engine;

/// Public representation of a stored BMI record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BmiRecord {
    /// Unique identifier for the record
    pub id: String,

    /// Height in centimeters
    #[schema(example = 175.0)]
    pub height: f64,

    /// Weight in kilograms
    #[schema(example = 70.0)]
    pub weight: f64,

    /// Age in years, when it was provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u16>,

    /// Body mass index computed by the server
    #[schema(example = 22.86)]
    pub bmi: f64,

    /// Weight category of the BMI value
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Normal")]
    pub category: Option<String>,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl From<DomainBmiRecord> for BmiRecord {
    fn from(record: DomainBmiRecord) -> Self {
        Self {
            category: engine::categorize(record.bmi).ok().map(|c| c.to_string()),
            id: record.id,
            height: record.height,
            weight: record.weight,
            age: record.age,
            bmi: record.bmi,
            created_at: record.created_at,
        }
    }
}

/// Request payload for creating a BMI record.
///
/// Any other fields in the body, such as a client-computed `bmi`, are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBmiRecordRequest {
    /// Height in centimeters (50 to 300)
    #[schema(example = 175.0)]
    pub height: Option<f64>,

    /// Weight in kilograms (10 to 500)
    #[schema(example = 70.0)]
    pub weight: Option<f64>,

    /// Optional age in years (1 to 120)
    #[schema(example = 30)]
    pub age: Option<u16>,
}

/// Request payload for a BMI calculation that is not stored
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculateBmiRequest {
    /// Height in centimeters (50 to 300)
    #[schema(example = 175.0)]
    pub height: Option<f64>,

    /// Weight in kilograms (10 to 500)
    #[schema(example = 70.0)]
    pub weight: Option<f64>,
}

/// Result of a BMI calculation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BmiAssessmentResponse {
    /// Body mass index rounded to two decimals
    #[schema(example = 22.86)]
    pub bmi: f64,

    /// Weight category
    #[schema(example = "Normal")]
    pub category: String,

    /// Recommendation for the category
    pub advice: String,
}

impl From<BmiAssessment> for BmiAssessmentResponse {
    fn from(assessment: BmiAssessment) -> Self {
        Self {
            bmi: assessment.bmi,
            category: assessment.category.to_string(),
            advice: assessment.advice,
        }
    }
}

/// Response for a single deleted record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteBmiRecordResponse {
    pub message: String,
}

/// Response for clearing all records
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteAllBmiRecordsResponse {
    pub message: String,

    /// Number of records removed
    pub deleted_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_record_carries_category() {
        let record = BmiRecord::from(DomainBmiRecord {
            id: "abc".to_string(),
            height: 175.0,
            weight: 70.0,
            age: None,
            bmi: 22.86,
            created_at: Utc::now(),
        });

        assert_eq!(record.category.as_deref(), Some("Normal"));

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("age").is_none());
        assert_eq!(json["bmi"], 22.86);
    }

    #[test]
    fn test_create_request_ignores_client_bmi() {
        let request: CreateBmiRecordRequest = serde_json::from_str(
            r#"{"height": 180, "weight": 81, "bmi": 99.9, "id": "client-id"}"#,
        )
        .unwrap();

        assert_eq!(request.height, Some(180.0));
        assert_eq!(request.weight, Some(81.0));
        assert_eq!(request.age, None);
    }
}
