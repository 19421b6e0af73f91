use clap::Parser;
use portfolio_contact::core::validation;
use portfolio_contact::core::{ConfigProvider, TemplateParams};
use portfolio_contact::utils::error::ErrorSeverity;
use portfolio_contact::utils::{logger, validation::Validate};
use portfolio_contact::{
    ConsoleNotifier, ContactField, ContactFormController, ContactMessage, ContactSession,
    EmailJsGateway, TomlConfig,
};

#[derive(Parser)]
#[command(name = "toml-contact")]
#[command(about = "Portfolio contact sender with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "contact.toml")]
    config: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    message: Option<String>,

    /// Fail instead of prompting for missing or invalid fields
    #[arg(long)]
    no_prompt: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Validate the draft and show the request without sending it
    #[arg(long)]
    dry_run: bool,
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(args.verbose, config.log_level(), config.json_logs());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(e.severity()));
    }

    display_config_summary(&config, &args);

    let draft = ContactMessage {
        name: args.name.clone().unwrap_or_default(),
        email: args.email.clone().unwrap_or_default(),
        message: args.message.clone().unwrap_or_default(),
    };

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be sent");
        let ok = perform_dry_run(&config, &draft);
        std::process::exit(if ok { 0 } else { exit_code(ErrorSeverity::Low) });
    }

    let gateway = EmailJsGateway::new(&config);
    let controller = ContactFormController::new(gateway, ConsoleNotifier::new())
        .with_recipient_name(config.recipient_name())
        .with_messages(config.notification_messages());

    for field in ContactField::ALL {
        controller.update_field(field, draft.get(field));
    }

    let stdin = std::io::stdin();
    let mut session = ContactSession::new(&controller, stdin.lock(), std::io::stdout())
        .interactive(!args.no_prompt);

    if let Err(e) = session.run().await {
        tracing::error!(
            "❌ Contact submission failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(e.severity()));
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Endpoint: {}", config.endpoint());
    println!("  Service: {}", config.service_id());
    println!("  Template: {}", config.template_id());
    println!("  Recipient: {}", config.recipient_name());
    println!(
        "  Private key: {}",
        if config.private_key().is_some() { "set" } else { "not set" }
    );

    if let Some(timeout) = config.timeout_seconds() {
        println!("  Timeout: {}s", timeout);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

/// 回傳草稿是否可送出
fn perform_dry_run(config: &TomlConfig, draft: &ContactMessage) -> bool {
    println!("🔍 Dry Run Analysis:");

    let errors = validation::validate(draft);
    if !errors.is_empty() {
        println!("⚠️  Draft would be rejected:");
        for error in &errors {
            println!("  {}", error);
        }
        return false;
    }

    let params = TemplateParams::from_draft(draft, config.recipient_name());
    println!("📨 Template parameters:");
    println!("  from_name: {}", params.from_name);
    println!("  from_email: {}", params.from_email);
    println!("  to_name: {}", params.to_name);
    println!("  message: {} characters", params.message.chars().count());
    println!();
    println!("✅ Dry run complete. Re-run without --dry-run to send.");

    true
}
