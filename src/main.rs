use clap::Parser;
use portfolio_contact::utils::error::ErrorSeverity;
use portfolio_contact::utils::{logger, validation::Validate};
use portfolio_contact::{
    CliConfig, ConsoleNotifier, ContactField, ContactFormController, ContactSession,
    EmailJsGateway,
};

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 4,      // 欄位驗證失敗
        ErrorSeverity::Medium => 2,   // 投遞失敗，可重試
        ErrorSeverity::High => 1,     // 設定錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, None, config.json_logs);

    tracing::info!("Starting portfolio-contact");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(e.severity()));
    }

    let gateway = EmailJsGateway::new(&config);
    let controller = ContactFormController::new(gateway, ConsoleNotifier::new())
        .with_recipient_name(config.recipient_name.clone());

    // 命令列已提供的欄位先填入草稿
    let draft = config.initial_draft();
    for field in ContactField::ALL {
        controller.update_field(field, draft.get(field));
    }

    let stdin = std::io::stdin();
    let mut session = ContactSession::new(&controller, stdin.lock(), std::io::stdout())
        .interactive(!config.no_prompt);

    if let Err(e) = session.run().await {
        tracing::error!(
            "❌ Contact submission failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(exit_code(e.severity()));
    }

    Ok(())
}
