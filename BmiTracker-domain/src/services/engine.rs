//! BMI engine: pure functions from measurements to a BMI value and category.
//!
//! Units are fixed: height in centimeters, weight in kilograms. Every BMI value
//! is rounded to [`BMI_DECIMAL_PLACES`] decimals, half away from zero.

use thiserror::Error;

use crate::entities::bmi::{BmiAssessment, BmiCategory};

/// Number of decimals kept in a computed BMI
pub const BMI_DECIMAL_PLACES: i32 = 2;

/// Lowest BMI that is not underweight
pub const NORMAL_LOWER_BOUND: f64 = 18.5;

/// Lowest BMI that is overweight
pub const OVERWEIGHT_LOWER_BOUND: f64 = 25.0;

/// Lowest BMI that is obese
pub const OBESE_LOWER_BOUND: f64 = 30.0;

/// A measurement or BMI value that cannot be used
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid measurement: {0}")]
pub struct InvalidMeasurement(pub String);

/// Reject values that are not finite and strictly positive
pub fn check_measurement(name: &str, value: f64) -> Result<(), InvalidMeasurement> {
    if !value.is_finite() {
        return Err(InvalidMeasurement(format!("{} must be a finite number", name)));
    }
    if value <= 0.0 {
        return Err(InvalidMeasurement(format!("{} must be greater than zero", name)));
    }
    Ok(())
}

/// Compute BMI from height in centimeters and weight in kilograms
pub fn compute(height_cm: f64, weight_kg: f64) -> Result<f64, InvalidMeasurement> {
    check_measurement("height", height_cm)?;
    check_measurement("weight", weight_kg)?;

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);

    // Extreme inputs can still overflow the division
    if !bmi.is_finite() {
        return Err(InvalidMeasurement(
            "height and weight do not produce a finite BMI".to_string(),
        ));
    }

    Ok(round_bmi(bmi))
}

fn round_bmi(value: f64) -> f64 {
    let factor = 10f64.powi(BMI_DECIMAL_PLACES);
    (value * factor).round() / factor
}

/// Categorize a BMI value into one of four half-open bands
pub fn categorize(bmi: f64) -> Result<BmiCategory, InvalidMeasurement> {
    if !bmi.is_finite() {
        return Err(InvalidMeasurement("BMI must be a finite number".to_string()));
    }

    let category = if bmi < NORMAL_LOWER_BOUND {
        BmiCategory::Underweight
    } else if bmi < OVERWEIGHT_LOWER_BOUND {
        BmiCategory::Normal
    } else if bmi < OBESE_LOWER_BOUND {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    };

    Ok(category)
}

/// Static recommendation for a category
pub fn advise(category: BmiCategory) -> &'static str {
    match category {
        BmiCategory::Underweight => {
            "You are underweight. Consider a balanced diet and consult a healthcare professional."
        }
        BmiCategory::Normal => "You have a healthy weight. Keep up the good lifestyle!",
        BmiCategory::Overweight => {
            "You are overweight. Consider healthy eating and regular exercise."
        }
        BmiCategory::Obese => {
            "Please consult with a healthcare provider about weight management strategies."
        }
    }
}

/// Compute, categorize and advise in one step
pub fn assess(height_cm: f64, weight_kg: f64) -> Result<BmiAssessment, InvalidMeasurement> {
    let bmi = compute(height_cm, weight_kg)?;
    let category = categorize(bmi)?;

    Ok(BmiAssessment {
        bmi,
        category,
        advice: advise(category).to_string(),
    })
}
