use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 預設收件人名稱，對應信件範本的 `to_name`
pub const DEFAULT_RECIPIENT_NAME: &str = "Ashwin Nethan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [ContactField::Name, ContactField::Email, ContactField::Message];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }

    /// 表單上顯示的標籤
    pub fn label(&self) -> &'static str {
        match self {
            ContactField::Name => "Identity",
            ContactField::Email => "Return Address",
            ContactField::Message => "Transmission",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(ContactField::Name),
            "email" => Ok(ContactField::Email),
            "message" => Ok(ContactField::Message),
            other => Err(format!("unknown contact field: {}", other)),
        }
    }
}

/// 訪客填寫中的聯絡表單草稿，不做持久化
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: ContactField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: ContactField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// 只有 Submitting 會擋下新的送出
    pub fn accepts_submit(&self) -> bool {
        !matches!(self, SubmissionState::Submitting)
    }
}

/// 郵件範本變數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_name: String,
}

impl TemplateParams {
    pub fn from_draft(draft: &ContactMessage, to_name: &str) -> Self {
        Self {
            from_name: draft.name.clone(),
            from_email: draft.email.trim().to_string(),
            message: draft.message.clone(),
            to_name: to_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessages {
    pub success_title: String,
    pub success_description: String,
    pub failure_title: String,
    pub failure_description: String,
}

impl Default for NotificationMessages {
    fn default() -> Self {
        Self {
            success_title: "Message sent".to_string(),
            success_description: "Thanks for reaching out. I'll get back to you soon.".to_string(),
            failure_title: "Message not sent".to_string(),
            failure_description:
                "Something went wrong while sending your message. Please try again.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered,
    /// 已有送出進行中，這次呼叫被忽略
    Ignored,
}
