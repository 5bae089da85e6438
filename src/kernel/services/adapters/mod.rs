//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod file_loader;
pub mod file_watcher;
pub mod paths;
pub mod preview_worker;
pub mod session_store;
pub mod settings;

pub use file_loader::{load_tree, load_tree_skipping, should_ignore};
pub use file_watcher::ProjectWatcher;
pub use paths::{ensure_log_dir, get_log_dir, get_settings_path};
pub use preview_worker::PreviewWorker;
pub use session_store::{
    load_session, load_session_if_exists, save_session, Session, SessionError, SESSION_VERSION,
};
pub use settings::{ensure_settings_file, load_settings, load_settings_from, SettingsError};
