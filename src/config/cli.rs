use crate::adapters::emailjs::DEFAULT_ENDPOINT;
use crate::core::{ConfigProvider, ContactMessage};
use crate::domain::model::DEFAULT_RECIPIENT_NAME;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Parser)]
#[command(name = "portfolio-contact")]
#[command(about = "Send a portfolio contact message through EmailJS")]
pub struct CliConfig {
    #[arg(long, env = "EMAILJS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, env = "EMAILJS_SERVICE_ID", default_value = "")]
    pub service_id: String,

    #[arg(long, env = "EMAILJS_TEMPLATE_ID", default_value = "")]
    pub template_id: String,

    #[arg(long, env = "EMAILJS_PUBLIC_KEY", default_value = "", hide_env_values = true)]
    pub public_key: String,

    #[arg(long, env = "EMAILJS_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    #[arg(long, default_value = DEFAULT_RECIPIENT_NAME)]
    pub recipient_name: String,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Sender name; prompted for when omitted
    #[arg(long)]
    pub name: Option<String>,

    /// Sender email; prompted for when omitted
    #[arg(long)]
    pub email: Option<String>,

    /// Message body; prompted for when omitted
    #[arg(long)]
    pub message: Option<String>,

    #[arg(long, help = "Fail instead of prompting for missing or invalid fields")]
    pub no_prompt: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 命令列上已提供的欄位
    pub fn initial_draft(&self) -> ContactMessage {
        ContactMessage {
            name: self.name.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            message: self.message.clone().unwrap_or_default(),
        }
    }
}

// 不輸出金鑰
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("endpoint", &self.endpoint)
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("recipient_name", &self.recipient_name)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("no_prompt", &self.no_prompt)
            .field("verbose", &self.verbose)
            .field("json_logs", &self.json_logs)
            .finish_non_exhaustive()
    }
}

impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn service_id(&self) -> &str {
        &self.service_id
    }

    fn template_id(&self) -> &str {
        &self.template_id
    }

    fn public_key(&self) -> &str {
        &self.public_key
    }

    fn private_key(&self) -> Option<&str> {
        self.private_key.as_deref().filter(|key| !key.is_empty())
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn recipient_name(&self) -> &str {
        &self.recipient_name
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = CliConfig::parse_from([
            "portfolio-contact",
            "--service-id",
            "service_1",
            "--template-id",
            "template_1",
            "--public-key",
            "public_1",
            "--name",
            "Jane Doe",
            "--timeout-seconds",
            "15",
        ]);

        assert_eq!(config.service_id(), "service_1");
        assert_eq!(config.timeout_seconds(), Some(15));
        assert_eq!(config.recipient_name(), DEFAULT_RECIPIENT_NAME);
        assert!(config.validate().is_ok());

        let draft = config.initial_draft();
        assert_eq!(draft.name, "Jane Doe");
        assert!(draft.email.is_empty());
    }

    #[test]
    fn test_missing_credentials_fail_validation() {
        let config = CliConfig::parse_from([
            "portfolio-contact",
            "--service-id",
            "service_1",
            "--template-id",
            "template_1",
            "--public-key",
            "",
        ]);
        assert!(config.validate().is_err());
    }
}
