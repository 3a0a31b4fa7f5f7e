pub mod bmi;
pub mod error;
pub mod health;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use bmi::{
    calculate_bmi, create_bmi_record, delete_all_bmi_records, delete_bmi_record, list_bmi_records,
};
pub use error::endpoint_not_found;
pub use health::{health_check, service_info};
