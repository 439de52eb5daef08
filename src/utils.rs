use crate::error::ValidationError;

pub fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new(format!("{} must be greater than 0", field)))
    }
}

pub fn require_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new(format!("{} must be 0 or greater", field)))
    }
}

pub fn require_percentage(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(format!("{} must be between 0 and 100", field)))
    }
}

pub fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(format!("{} is required", field)))
    } else {
        Ok(())
    }
}

pub fn require_coordinates(lat: f64, lon: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        Err(ValidationError::new("coordinates out of range"))
    }
}

/// Trim, drop blanks and drop repeats, keeping first-seen order.
pub fn normalize_certifications(certifications: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(certifications.len());
    for cert in certifications {
        let cert = cert.trim();
        if !cert.is_empty() && !out.iter().any(|c| c == cert) {
            out.push(cert.to_string());
        }
    }
    out
}
