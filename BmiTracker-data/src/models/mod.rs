// Storage models
pub mod bmi_record;

pub use bmi_record::BmiRecord;
