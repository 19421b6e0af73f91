use crate::domain::model::{NotificationKind, TemplateParams};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 外部郵件投遞服務
#[async_trait]
pub trait EmailGateway: Send + Sync {
    async fn send(&self, params: &TemplateParams) -> Result<()>;
}

/// 顯示成功/失敗通知，呼叫後不等待結果
///
/// 呼叫時控制器不持有鎖，實作可以讀取控制器狀態。
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, title: &str, description: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn service_id(&self) -> &str;
    fn template_id(&self) -> &str;
    fn public_key(&self) -> &str;
    fn private_key(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> Option<u64>;
    fn recipient_name(&self) -> &str;
}
