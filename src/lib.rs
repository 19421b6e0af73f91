pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{ConsoleNotifier, EmailJsGateway};
pub use app::ContactSession;
pub use crate::core::controller::ContactFormController;
pub use domain::model::{ContactField, ContactMessage, SubmissionState, SubmitOutcome};
pub use utils::error::{ContactError, Result};
