use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ContactError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ContactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ContactError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ContactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// 必填的憑證類欄位：不可為空，也不可是未替換的 `${VAR}`
pub fn validate_credential(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ContactError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    if value.starts_with("${") && value.ends_with('}') {
        return Err(ContactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Environment variable is not set".to_string(),
        });
    }

    Ok(())
}

/// 檢查郵件服務設定是否完整可用
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("gateway.endpoint", config.endpoint())?;
    validate_credential("gateway.service_id", config.service_id())?;
    validate_credential("gateway.template_id", config.template_id())?;
    validate_credential("gateway.public_key", config.public_key())?;

    if let Some(private_key) = config.private_key() {
        validate_credential("gateway.private_key", private_key)?;
    }

    if let Some(timeout) = config.timeout_seconds() {
        validate_range("gateway.timeout_seconds", timeout, 1, 300)?;
    }

    validate_non_empty_string("contact.recipient_name", config.recipient_name())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ContactError::InvalidConfigValueError {
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
        return Err(ContactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
