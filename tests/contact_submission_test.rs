use anyhow::Result;
use async_trait::async_trait;
use httpmock::prelude::*;
use portfolio_contact::core::{EmailGateway, NotificationKind, Notifier, TemplateParams};
use portfolio_contact::{
    ContactError, ContactField, ContactFormController, ContactMessage, EmailJsGateway,
    SubmissionState, SubmitOutcome, TomlConfig,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

#[derive(Clone, Default)]
struct RecordingNotifier {
    seen: Arc<Mutex<Vec<(NotificationKind, String, String)>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, title: &str, description: &str) {
        self.seen
            .lock()
            .unwrap()
            .push((kind, title.to_string(), description.to_string()));
    }
}

impl RecordingNotifier {
    fn kinds(&self) -> Vec<NotificationKind> {
        self.seen.lock().unwrap().iter().map(|(k, _, _)| *k).collect()
    }
}

/// 送出後停住，直到測試放行
#[derive(Clone, Default)]
struct GatedGateway {
    calls: Arc<Mutex<Vec<TemplateParams>>>,
    started: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl EmailGateway for GatedGateway {
    async fn send(&self, params: &TemplateParams) -> portfolio_contact::Result<()> {
        self.calls.lock().unwrap().push(params.clone());
        self.started.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

fn emailjs_config(server: &MockServer) -> TomlConfig {
    let toml_content = format!(
        r#"
[gateway]
endpoint = "{}"
service_id = "service_portfolio"
template_id = "template_contact"
public_key = "public_abc"
timeout_seconds = 5

[contact]
recipient_name = "Ashwin Nethan"
"#,
        server.url("/api/v1.0/email/send")
    );
    TomlConfig::from_toml_str(&toml_content).unwrap()
}

fn fill_valid(controller: &ContactFormController<impl EmailGateway, impl Notifier>) {
    controller.update_field(ContactField::Name, "Jane Doe");
    controller.update_field(ContactField::Email, "jane@example.com");
    controller.update_field(ContactField::Message, "Hello");
}

#[tokio::test]
async fn test_valid_draft_is_delivered_and_cleared() -> Result<()> {
    let server = MockServer::start();
    let send_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1.0/email/send")
            .json_body_partial(
                r#"{
                    "template_params": {
                        "from_name": "Jane Doe",
                        "from_email": "jane@example.com",
                        "message": "Hello",
                        "to_name": "Ashwin Nethan"
                    }
                }"#,
            );
        then.status(200).body("OK");
    });

    let notifier = RecordingNotifier::default();
    let gateway = EmailJsGateway::new(&emailjs_config(&server));
    let controller = ContactFormController::new(gateway, notifier.clone());
    fill_valid(&controller);

    let outcome = controller.submit().await?;

    send_mock.assert();
    assert_eq!(outcome, SubmitOutcome::Delivered);
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.draft(), ContactMessage::default());
    assert_eq!(notifier.kinds(), vec![NotificationKind::Success]);
    Ok(())
}

#[tokio::test]
async fn test_gateway_failure_keeps_draft_for_retry() -> Result<()> {
    let server = MockServer::start();
    let mut failing = server.mock(|when, then| {
        when.method(POST).path("/api/v1.0/email/send");
        then.status(500).body("Internal error");
    });

    let notifier = RecordingNotifier::default();
    let gateway = EmailJsGateway::new(&emailjs_config(&server));
    let controller = ContactFormController::new(gateway, notifier.clone());
    fill_valid(&controller);
    let before = controller.draft();

    let err = controller.submit().await.unwrap_err();

    failing.assert();
    assert!(matches!(err, ContactError::DeliveryError { status: Some(500), .. }));
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.draft(), before);
    assert_eq!(notifier.kinds(), vec![NotificationKind::Failure]);

    // 同一份草稿重送即可成功
    failing.delete();
    let ok = server.mock(|when, then| {
        when.method(POST).path("/api/v1.0/email/send");
        then.status(200).body("OK");
    });

    assert_eq!(controller.submit().await?, SubmitOutcome::Delivered);
    ok.assert();
    assert!(controller.draft().is_empty());
    assert_eq!(
        notifier.kinds(),
        vec![NotificationKind::Failure, NotificationKind::Success]
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_fields_never_hit_the_network() {
    let server = MockServer::start();
    let send_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1.0/email/send");
        then.status(200).body("OK");
    });

    let notifier = RecordingNotifier::default();
    let gateway = EmailJsGateway::new(&emailjs_config(&server));
    let controller = ContactFormController::new(gateway, notifier.clone());

    let drafts = [
        ContactMessage::new("", "jane@example.com", "Hello"),
        ContactMessage::new("Jane", "jane@example.com", "   "),
        ContactMessage::new("Jane", "jane.example.com", "Hello"),
        ContactMessage::new("Jane", "jane@example", "Hello"),
    ];

    for draft in drafts {
        let err = controller.submit_draft(draft).await.unwrap_err();
        assert!(matches!(err, ContactError::ValidationError(_)));
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    send_mock.assert_hits(0);
    assert!(notifier.kinds().is_empty());
}

#[tokio::test]
async fn test_submit_while_in_flight_is_ignored() {
    let gateway = GatedGateway::default();
    let controller = ContactFormController::new(gateway.clone(), RecordingNotifier::default());
    fill_valid(&controller);

    let (first, second) = tokio::join!(controller.submit(), async {
        gateway.started.notified().await;
        assert_eq!(controller.state(), SubmissionState::Submitting);

        let second = controller.submit().await;
        gateway.release.notify_one();
        second
    });

    assert_eq!(first.unwrap(), SubmitOutcome::Delivered);
    assert_eq!(second.unwrap(), SubmitOutcome::Ignored);
    assert_eq!(gateway.calls.lock().unwrap().len(), 1);
    assert_eq!(controller.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_slow_gateway_blocks_duplicate_send() {
    let server = MockServer::start();
    let send_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1.0/email/send");
        then.status(200).body("OK").delay(Duration::from_millis(500));
    });

    let gateway = EmailJsGateway::new(&emailjs_config(&server));
    let controller = ContactFormController::new(gateway, RecordingNotifier::default());
    fill_valid(&controller);

    let (first, second) = tokio::join!(controller.submit(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.submit().await
    });

    assert_eq!(first.unwrap(), SubmitOutcome::Delivered);
    assert_eq!(second.unwrap(), SubmitOutcome::Ignored);
    send_mock.assert_hits(1);
}

#[tokio::test]
async fn test_identical_drafts_in_sequence_are_sent_twice() -> Result<()> {
    let server = MockServer::start();
    let send_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1.0/email/send");
        then.status(200).body("OK");
    });

    let gateway = EmailJsGateway::new(&emailjs_config(&server));
    let controller = ContactFormController::new(gateway, RecordingNotifier::default());
    let draft = ContactMessage::new("Jane Doe", "jane@example.com", "Hello");

    assert_eq!(controller.submit_draft(draft.clone()).await?, SubmitOutcome::Delivered);
    assert_eq!(controller.submit_draft(draft).await?, SubmitOutcome::Delivered);

    send_mock.assert_hits(2);
    Ok(())
}
