// UI and formatting module

pub mod tree_formatter;

// Re-export commonly used items for cleaner imports
pub use tree_formatter::{
    format_label, format_tree_indent, walk_tree, write_tree, RenderOptions, TreeLine,
};
