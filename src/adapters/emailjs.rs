use crate::core::{ConfigProvider, EmailGateway, TemplateParams};
use crate::utils::error::{ContactError, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

/// EmailJS REST API 的郵件投遞實作
#[derive(Clone)]
pub struct EmailJsGateway {
    client: Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
    private_key: Option<String>,
    timeout: Option<Duration>,
}

impl EmailJsGateway {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint().to_string(),
            service_id: config.service_id().to_string(),
            template_id: config.template_id().to_string(),
            public_key: config.public_key().to_string(),
            private_key: config.private_key().map(str::to_string),
            timeout: config.timeout_seconds().map(Duration::from_secs),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl EmailGateway for EmailJsGateway {
    async fn send(&self, params: &TemplateParams) -> Result<()> {
        let body = SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: params,
            access_token: self.private_key.as_deref(),
        };

        let mut request = self.client.post(&self.endpoint).json(&body);

        // 設定超時
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!(
            "Posting to email gateway: {} (service: {}, template: {})",
            self.endpoint,
            self.service_id,
            self.template_id
        );

        let response = request.send().await.map_err(ContactError::from_transport)?;
        let status = response.status();
        tracing::debug!("Email gateway response status: {}", status);

        if status.is_success() {
            return Ok(());
        }

        // EmailJS 失敗時回傳純文字說明
        let detail = response.text().await.unwrap_or_default();
        let detail = detail.trim();
        Err(ContactError::DeliveryError {
            message: if detail.is_empty() {
                format!("email gateway responded with {}", status)
            } else {
                format!("email gateway responded with {}: {}", status, detail)
            },
            status: Some(status.as_u16()),
        })
    }
}
