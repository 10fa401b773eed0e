use crate::utils::error::{Result, SankeyError};
use regex::Regex;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(#[0-9a-fA-F]{3}|#[0-9a-fA-F]{6}|[a-zA-Z]+)$").expect("valid color regex")
    })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SankeyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SankeyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SankeyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Accepts `#rgb`, `#rrggbb` or a bare CSS color name.
pub fn validate_color(field_name: &str, color: &str) -> Result<()> {
    if !color_pattern().is_match(color) {
        return Err(SankeyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: color.to_string(),
            reason: "Expected #rgb, #rrggbb or a color name".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_color() {
        assert!(validate_color("nodes.Coal", "#fff").is_ok());
        assert!(validate_color("nodes.Coal", "#A1b2C3").is_ok());
        assert!(validate_color("nodes.Coal", "steelblue").is_ok());
        assert!(validate_color("nodes.Coal", "").is_err());
        assert!(validate_color("nodes.Coal", "#12345").is_err());
        assert!(validate_color("nodes.Coal", "#ff0000; drop").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("csv_path", "flows.csv").is_ok());
        assert!(validate_path("csv_path", "").is_err());
        assert!(validate_path("csv_path", "a\0b").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("source_col", "Engine").is_ok());
        assert!(validate_non_empty_string("source_col", "   ").is_err());
    }
}
