// pstree library - public API

// Re-export error types
pub mod error;
pub use error::{PstreeError, Result};

// Module declarations
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use cli::{Invocation, Options};
pub use self::core::{build_process_tree, ProcessInfo, SiblingOrder, TreeNode};

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}
