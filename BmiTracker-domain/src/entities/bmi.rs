use std::fmt;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use validator::Validate;

/// Domain model for a stored BMI record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiRecord {
    /// Unique identifier for the record
    pub id: String,

    /// Height in centimeters
    pub height: f64,

    /// Weight in kilograms
    pub weight: f64,

    /// Optional age in years
    pub age: Option<u16>,

    /// Body mass index, always computed server-side
    pub bmi: f64,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a new BMI record
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBmiRecordRequest {
    /// Height in centimeters
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    pub height: f64,

    /// Weight in kilograms
    #[validate(range(min = 10.0, max = 500.0, message = "Weight must be between 10 and 500 kg"))]
    pub weight: f64,

    /// Optional age in years
    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120 years"))]
    pub age: Option<u16>,
}

/// Request payload for a calculation that is not persisted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct CalculateBmiRequest {
    /// Height in centimeters
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    pub height: f64,

    /// Weight in kilograms
    #[validate(range(min = 10.0, max = 500.0, message = "Weight must be between 10 and 500 kg"))]
    pub weight: f64,
}

/// Weight category derived from a BMI value.
///
/// Variants are ordered from lowest to highest BMI band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,

    /// BMI from 18.5 up to (not including) 25.0
    Normal,

    /// BMI from 25.0 up to (not including) 30.0
    Overweight,

    /// BMI of 30.0 or more
    Obese,
}

impl BmiCategory {
    /// Stable label used in JSON and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of evaluating a pair of measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiAssessment {
    /// Computed BMI, rounded to two decimals
    pub bmi: f64,

    /// Category of the BMI value
    pub category: BmiCategory,

    /// Recommendation text for the category
    pub advice: String,
}
