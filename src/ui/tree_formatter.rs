//! Text rendering of a process tree.
//!
//! The synthetic root is not printed: each of its children starts a
//! top-level line and deeper levels are drawn with box-drawing branches.

use std::io::Write;

use crate::core::process_tree::TreeNode;
use crate::error::{PstreeError, Result};

/// Display options for rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_pids: bool,
}

/// One node as it is reached during the walk, with indentation information
#[derive(Debug, Clone, Copy)]
pub struct TreeLine<'a> {
    pub node: &'a TreeNode,
    pub depth: usize,
    pub is_last: bool,
    pub parent_chain: &'a [bool], // For drawing tree lines
}

/// Visit every node below `root` in pre-order, skipping `root` itself.
///
/// The walk keeps one frame per open level and a single shared chain of
/// "ancestor was last" flags, so memory stays proportional to the depth.
pub fn walk_tree<F>(root: &TreeNode, mut visit: F) -> Result<()>
where
    F: FnMut(&TreeLine<'_>) -> Result<()>,
{
    let mut chain: Vec<bool> = Vec::new();
    let mut stack: Vec<(&TreeNode, usize)> = vec![(root, 0)];

    while let Some(frame) = stack.last_mut() {
        let (parent, index) = *frame;
        if index == parent.children.len() {
            stack.pop();
            // Frames below depth 1 never pushed a chain entry
            if stack.len() >= 2 {
                chain.pop();
            }
            continue;
        }
        frame.1 += 1;

        let child = &parent.children[index];
        let depth = stack.len() - 1;
        let is_last = index + 1 == parent.children.len();
        visit(&TreeLine {
            node: child,
            depth,
            is_last,
            parent_chain: &chain,
        })?;

        if !child.children.is_empty() {
            // The top level draws no connector, so it adds nothing to the chain
            if depth > 0 {
                chain.push(is_last);
            }
            stack.push((child, 0));
        }
    }

    Ok(())
}

/// Generate tree indentation string
pub fn format_tree_indent(line: &TreeLine<'_>) -> String {
    let mut indent = String::new();

    for &is_parent_last in line.parent_chain {
        if is_parent_last {
            indent.push_str("  ");
        } else {
            indent.push_str("│ ");
        }
    }

    if line.depth > 0 {
        if line.is_last {
            indent.push_str("└─");
        } else {
            indent.push_str("├─");
        }
    }

    indent
}

/// Label for one node, e.g. `bash` or `bash (1234)`
pub fn format_label(node: &TreeNode, options: &RenderOptions) -> String {
    let name = if node.process.name.is_empty() {
        "?"
    } else {
        node.process.name.as_str()
    };

    if options.show_pids {
        format!("{} ({})", name, node.process.pid)
    } else {
        name.to_string()
    }
}

/// Write the rendered tree to `out`, one node per line, as the walk proceeds
pub fn write_tree<W: Write>(
    out: &mut W,
    root: &TreeNode,
    options: &RenderOptions,
) -> Result<()> {
    walk_tree(root, |line| {
        writeln!(
            out,
            "{}{}",
            format_tree_indent(line),
            format_label(line.node, options)
        )
        .map_err(PstreeError::output_write)
    })?;
    out.flush().map_err(PstreeError::output_write)
}
