// Public entities for the BMI Tracker API
// This module contains data structures that are shared across the application boundary

// BMI records and calculations
pub mod bmi;

// Common entities for error handling
pub mod common;
