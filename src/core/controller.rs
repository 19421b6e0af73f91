use crate::core::validation;
use crate::domain::model::{
    ContactField, ContactMessage, FieldError, NotificationKind, NotificationMessages,
    SubmissionState, SubmitOutcome, TemplateParams, DEFAULT_RECIPIENT_NAME,
};
use crate::domain::ports::{EmailGateway, Notifier};
use crate::utils::error::{ContactError, Result, ValidationErrors};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct FormState {
    draft: ContactMessage,
    state: SubmissionState,
    field_errors: Vec<FieldError>,
}

/// 聯絡表單控制器
///
/// 擁有草稿與送出狀態，`submit` 是唯一會呼叫郵件服務的入口。
/// 送出進行中再次呼叫 `submit` 會回傳 [`SubmitOutcome::Ignored`]。
pub struct ContactFormController<G: EmailGateway, N: Notifier> {
    gateway: G,
    notifier: N,
    recipient_name: String,
    messages: NotificationMessages,
    form: Mutex<FormState>,
}

impl<G: EmailGateway, N: Notifier> ContactFormController<G, N> {
    pub fn new(gateway: G, notifier: N) -> Self {
        Self {
            gateway,
            notifier,
            recipient_name: DEFAULT_RECIPIENT_NAME.to_string(),
            messages: NotificationMessages::default(),
            form: Mutex::new(FormState::default()),
        }
    }

    pub fn with_recipient_name(mut self, recipient_name: impl Into<String>) -> Self {
        self.recipient_name = recipient_name.into();
        self
    }

    pub fn with_messages(mut self, messages: NotificationMessages) -> Self {
        self.messages = messages;
        self
    }

    // 鎖內不會 panic，中毒時直接取回內容
    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state
    }

    pub fn draft(&self) -> ContactMessage {
        self.lock().draft.clone()
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        self.lock().field_errors.clone()
    }

    pub fn field_error(&self, field: ContactField) -> Option<FieldError> {
        self.lock()
            .field_errors
            .iter()
            .find(|e| e.field == field)
            .cloned()
    }

    pub fn update_field(&self, field: ContactField, value: impl Into<String>) {
        let mut form = self.lock();
        form.draft.set(field, value);
        form.field_errors.retain(|e| e.field != field);
    }

    fn transition(form: &mut FormState, next: SubmissionState) {
        tracing::debug!("Submission state: {:?} -> {:?}", form.state, next);
        form.state = next;
    }

    /// 檢查、驗證並進入 Submitting；呼叫端必須持有鎖
    fn begin(&self, form: &mut FormState) -> Result<Option<TemplateParams>> {
        if !form.state.accepts_submit() {
            tracing::debug!("Submit ignored, a submission is already in flight");
            return Ok(None);
        }

        let errors = validation::validate(&form.draft);
        if !errors.is_empty() {
            tracing::info!("📝 Contact form has {} invalid field(s)", errors.len());
            form.field_errors = errors.clone();
            return Err(ContactError::ValidationError(ValidationErrors(errors)));
        }

        form.field_errors.clear();
        Self::transition(form, SubmissionState::Submitting);
        Ok(Some(TemplateParams::from_draft(&form.draft, &self.recipient_name)))
    }

    pub async fn submit(&self) -> Result<SubmitOutcome> {
        let params = self.begin(&mut self.lock())?;
        match params {
            Some(params) => self.deliver(params).await,
            None => Ok(SubmitOutcome::Ignored),
        }
    }

    /// 以整份草稿取代目前內容後送出
    pub async fn submit_draft(&self, draft: ContactMessage) -> Result<SubmitOutcome> {
        let params = {
            let mut form = self.lock();
            if !form.state.accepts_submit() {
                return Ok(SubmitOutcome::Ignored);
            }
            form.draft = draft;
            self.begin(&mut form)?
        };

        match params {
            Some(params) => self.deliver(params).await,
            None => Ok(SubmitOutcome::Ignored),
        }
    }

    async fn deliver(&self, params: TemplateParams) -> Result<SubmitOutcome> {
        let mut in_flight = InFlight::new(&self.form);

        tracing::info!("📨 Sending contact message for {}", params.to_name);
        let result = self.gateway.send(&params).await;

        let (kind, title, description) = {
            let mut form = self.lock();
            in_flight.disarm();
            match &result {
                Ok(()) => {
                    Self::transition(&mut form, SubmissionState::Succeeded);
                    tracing::info!("✅ Contact message delivered");
                    form.draft.clear();
                    (
                        NotificationKind::Success,
                        &self.messages.success_title,
                        &self.messages.success_description,
                    )
                }
                Err(e) => {
                    Self::transition(&mut form, SubmissionState::Failed);
                    tracing::warn!("❌ Contact message delivery failed: {}", e);
                    (
                        NotificationKind::Failure,
                        &self.messages.failure_title,
                        &self.messages.failure_description,
                    )
                }
            }
        };

        // 通知時不持有鎖，Notifier 可以讀取控制器狀態
        self.notifier.notify(kind, title, description);

        {
            let mut form = self.lock();
            // 通知期間可能已有新的送出開始
            if matches!(
                form.state,
                SubmissionState::Succeeded | SubmissionState::Failed
            ) {
                Self::transition(&mut form, SubmissionState::Idle);
            }
        }

        result.map(|()| SubmitOutcome::Delivered)
    }
}

/// 送出期間的守衛：future 在等待郵件服務時被丟棄，狀態回到 Idle，草稿保留
struct InFlight<'a> {
    form: &'a Mutex<FormState>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(form: &'a Mutex<FormState>) -> Self {
        Self { form, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut form = self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if form.state == SubmissionState::Submitting {
            tracing::warn!("Submission abandoned before the gateway answered");
            form.state = SubmissionState::Idle;
        }
    }
}
