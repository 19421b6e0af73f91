use crate::adapters::emailjs::DEFAULT_ENDPOINT;
use crate::core::ConfigProvider;
use crate::domain::model::{NotificationMessages, DEFAULT_RECIPIENT_NAME};
use crate::utils::error::{ContactError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub gateway: GatewayConfig,
    pub contact: Option<ContactConfig>,
    pub notifications: Option<NotificationsConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

// 金鑰不進日誌
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("endpoint", &self.endpoint)
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    pub recipient_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    pub success_title: Option<String>,
    pub success_description: Option<String>,
    pub failure_title: Option<String>,
    pub failure_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ContactError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ContactError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EMAILJS_PUBLIC_KEY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn notification_messages(&self) -> NotificationMessages {
        let defaults = NotificationMessages::default();
        let Some(overrides) = &self.notifications else {
            return defaults;
        };

        NotificationMessages {
            success_title: overrides
                .success_title
                .clone()
                .unwrap_or(defaults.success_title),
            success_description: overrides
                .success_description
                .clone()
                .unwrap_or(defaults.success_description),
            failure_title: overrides
                .failure_title
                .clone()
                .unwrap_or(defaults.failure_title),
            failure_description: overrides
                .failure_description
                .clone()
                .unwrap_or(defaults.failure_description),
        }
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        &self.gateway.endpoint
    }

    fn service_id(&self) -> &str {
        &self.gateway.service_id
    }

    fn template_id(&self) -> &str {
        &self.gateway.template_id
    }

    fn public_key(&self) -> &str {
        &self.gateway.public_key
    }

    fn private_key(&self) -> Option<&str> {
        self.gateway
            .private_key
            .as_deref()
            .filter(|key| !key.is_empty())
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.gateway.timeout_seconds
    }

    fn recipient_name(&self) -> &str {
        self.contact
            .as_ref()
            .and_then(|c| c.recipient_name.as_deref())
            .unwrap_or(DEFAULT_RECIPIENT_NAME)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_provider(self)?;

        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(ContactError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }
}
