//! Authentication session facade

mod session;

pub use session::AuthSession;
