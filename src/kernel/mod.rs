//! Headless project core (session + services).

pub mod services;
pub mod session;

pub use session::ProjectSession;
