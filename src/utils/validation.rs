use crate::core::clock::TimeZonePolicy;
use crate::utils::error::{MoonError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_timezone(field_name: &str, value: &str) -> Result<()> {
    value
        .parse::<TimeZonePolicy>()
        .map(|_| ())
        .map_err(|e| MoonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MoonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(MoonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}
