// Adapters layer: concrete implementations for external systems (email gateway, notifications).

pub mod emailjs;
pub mod notifier;

pub use emailjs::EmailJsGateway;
pub use notifier::ConsoleNotifier;
