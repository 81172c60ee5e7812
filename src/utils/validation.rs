use crate::utils::error::{AppError, Result};
use chrono::NaiveDate;
use std::net::SocketAddr;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AppError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_socket_addr(field_name: &str, value: &str) -> Result<SocketAddr> {
    value
        .parse::<SocketAddr>()
        .map_err(|e| AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Rejects dates after `today`.
pub fn validate_past_or_present(field_name: &str, value: NaiveDate, today: NaiveDate) -> Result<()> {
    if value > today {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Date must be in the past or present".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("github.base_url", "https://api.github.com").is_ok());
        assert!(validate_url("github.base_url", "http://127.0.0.1:9000").is_ok());
        assert!(validate_url("github.base_url", "").is_err());
        assert!(validate_url("github.base_url", "invalid-url").is_err());
        assert!(validate_url("github.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        assert!(validate_socket_addr("server.bind", "0.0.0.0:8080").is_ok());
        assert!(validate_socket_addr("server.bind", "localhost").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("pageNumber", 1, 1, 10).is_ok());
        assert!(validate_range("pageNumber", 10, 1, 10).is_ok());
        assert!(validate_range("pageNumber", 0, 1, 10).is_err());
        assert!(validate_range("pageNumber", 11, 1, 10).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("language", "rust").is_ok());
        assert!(validate_non_empty_string("language", "   ").is_err());
    }

    #[test]
    fn test_validate_past_or_present() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(validate_past_or_present("earliestDate", today, today).is_ok());
        assert!(validate_past_or_present(
            "earliestDate",
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            today
        )
        .is_ok());
        assert!(validate_past_or_present(
            "earliestDate",
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            today
        )
        .is_err());
    }
}
