//! Service ports: data contracts shared by the kernel and adapters.

pub mod config;
pub mod settings;

pub use config::{PreviewConfig, SessionConfig};
pub use settings::Settings;
