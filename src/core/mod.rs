pub mod controller;
pub mod validation;

pub use crate::domain::model::{
    ContactField, ContactMessage, FieldError, NotificationKind, SubmissionState, SubmitOutcome,
    TemplateParams,
};
pub use crate::domain::ports::{ConfigProvider, EmailGateway, Notifier};
pub use crate::utils::error::Result;
