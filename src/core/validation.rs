use crate::domain::model::{ContactField, ContactMessage, FieldError};
use regex::Regex;
use std::sync::LazyLock;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MESSAGE_REQUIRED: &str = "Message is required";

// local-part "@" domain，domain 至少需要一個點
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// 驗證單一欄位
pub fn validate_field(field: ContactField, value: &str) -> Option<FieldError> {
    match field {
        ContactField::Name if value.trim().is_empty() => {
            Some(FieldError::new(field, NAME_REQUIRED))
        }
        ContactField::Email if !is_valid_email(value) => {
            Some(FieldError::new(field, EMAIL_INVALID))
        }
        ContactField::Message if value.trim().is_empty() => {
            Some(FieldError::new(field, MESSAGE_REQUIRED))
        }
        _ => None,
    }
}

/// 回傳草稿中所有不合格的欄位，順序固定為 name、email、message
pub fn validate(draft: &ContactMessage) -> Vec<FieldError> {
    ContactField::ALL
        .iter()
        .filter_map(|&field| validate_field(field, draft.get(field)))
        .collect()
}
