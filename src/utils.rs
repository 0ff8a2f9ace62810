use crate::errors::StatError;

/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    let mut s = String::new();
    for i in items {
        s.push_str(i);
        s.push_str(&String::from(", "));
    }
    s
}

// Validation
pub fn validate_positive_float_parameter(value: f64, parameter: &str) -> Result<(), StatError> {
    validate_float_parameter(value, 0.0, f64::INFINITY, parameter)
}

pub fn validate_float_parameter(value: f64, min: f64, max: f64, parameter: &str) -> Result<(), StatError> {
    if value.is_nan() || value.is_infinite() || value < min || max < value {
        let ex_msg = format!("finite real value within range {} and {}", min, max);
        Err(StatError::InvalidParameter(
            parameter.to_string(),
            ex_msg,
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Check that an observed cell frequency is finite and non-negative.
pub fn validate_frequency(value: f64, cell: &str) -> Result<(), StatError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(StatError::InvalidFrequency(cell.to_string(), value))
    }
}

/// Divide, failing when the denominator is zero instead of producing a non-finite value.
pub fn checked_ratio(numerator: f64, denominator: f64, measure: &str) -> Result<f64, StatError> {
    if denominator == 0.0 {
        Err(StatError::ZeroDenominator(measure.to_string()))
    } else {
        Ok(numerator / denominator)
    }
}
