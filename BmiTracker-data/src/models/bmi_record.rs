use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Storage model for a row of the `bmi_records` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiRecord {
    /// Unique identifier for the record (UUID text)
    pub id: String,

    /// Height in centimeters
    pub height: f64,

    /// Weight in kilograms
    pub weight: f64,

    /// Optional age in years
    pub age: Option<u16>,

    /// Body mass index derived from height and weight
    pub bmi: f64,

    /// When the record was inserted
    pub created_at: DateTime<Utc>,
}
