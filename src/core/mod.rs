// Core business logic module

pub mod process;
pub mod process_tree;
pub mod procfs;

// Re-export commonly used items
pub use process::ProcessInfo;
pub use process_tree::{build_process_tree, SiblingOrder, TreeNode, ROOT_PID};
pub use procfs::{ProcessSource, ProcfsSource, SourceConfig};
