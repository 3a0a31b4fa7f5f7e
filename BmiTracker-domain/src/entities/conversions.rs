use crate::entities::bmi::BmiRecord;

// Conversion functions between domain entities and data models.
// Named convert_to_[target_layer]_[model_name].

/// Convert from data model to domain entity for a BMI record
pub fn convert_to_domain_record(data_record: bmi_tracker_data::models::BmiRecord) -> BmiRecord {
    BmiRecord {
        id: data_record.id,
        height: data_record.height,
        weight: data_record.weight,
        age: data_record.age,
        bmi: data_record.bmi,
        created_at: data_record.created_at,
    }
}

/// Convert from domain entity to data model for a BMI record
pub fn convert_to_data_record(domain_record: &BmiRecord) -> bmi_tracker_data::models::BmiRecord {
    bmi_tracker_data::models::BmiRecord {
        id: domain_record.id.clone(),
        height: domain_record.height,
        weight: domain_record.weight,
        age: domain_record.age,
        bmi: domain_record.bmi,
        created_at: domain_record.created_at,
    }
}
