pub mod session;

pub use session::ContactSession;
