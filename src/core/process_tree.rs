//! Process tree construction.
//!
//! Builds a single rooted tree from a flat, unvalidated list of processes.
//! The parent links in a snapshot are racy: parents may have exited, a
//! record may name itself as parent, and stale pids can even form cycles.
//! All of those records are re-parented onto a synthetic root so the result
//! is always a tree.

use std::collections::HashMap;

use super::process::ProcessInfo;

/// Pid of the synthetic root node
pub const ROOT_PID: u32 = 0;

/// How the children of one node are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SiblingOrder {
    /// The order the records were produced by the source
    #[default]
    Discovery,
    /// Ascending by pid
    Numeric,
}

/// A node in the process tree
#[derive(Debug)]
pub struct TreeNode {
    pub process: ProcessInfo,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// The synthetic root every tree hangs from
    pub fn root() -> Self {
        Self {
            process: ProcessInfo::new(ROOT_PID, "root", None),
            children: Vec::new(),
        }
    }

    fn leaf(process: ProcessInfo) -> Self {
        Self {
            process,
            children: Vec::new(),
        }
    }

    /// Number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&TreeNode> = vec![self];
        while let Some(node) = stack.pop() {
            count += node.children.len();
            stack.extend(node.children.iter());
        }
        count
    }
}

// Unlinks descendants iteratively; dropping never recurses
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    OnPath,
    Done,
}

/// Build a process tree from a flat list of processes.
///
/// Every record ends up in the tree exactly once. Records whose parent is
/// unknown, missing from the list, themselves, or part of a parent cycle are
/// attached directly under the synthetic root.
pub fn build_process_tree(processes: Vec<ProcessInfo>, order: SiblingOrder) -> TreeNode {
    let parents = resolve_parents(&processes);

    // Group record indices by parent index, in discovery order
    let mut root_children: Vec<usize> = Vec::new();
    let mut children_map: HashMap<usize, Vec<usize>> = HashMap::new();
    for (index, parent) in parents.iter().enumerate() {
        match parent {
            Some(parent) => children_map.entry(*parent).or_default().push(index),
            None => root_children.push(index),
        }
    }

    if order == SiblingOrder::Numeric {
        let by_pid = |list: &mut Vec<usize>| list.sort_by_key(|&i| processes[i].pid);
        by_pid(&mut root_children);
        children_map.values_mut().for_each(by_pid);
    }

    // Post-order walk so that every child is complete before its parent
    let mut post_order = Vec::with_capacity(processes.len());
    let mut stack: Vec<(usize, bool)> =
        root_children.iter().rev().map(|&i| (i, false)).collect();
    while let Some((index, expanded)) = stack.pop() {
        if expanded {
            post_order.push(index);
            continue;
        }
        stack.push((index, true));
        if let Some(children) = children_map.get(&index) {
            stack.extend(children.iter().rev().map(|&c| (c, false)));
        }
    }
    debug_assert_eq!(post_order.len(), processes.len());

    let mut slots: Vec<Option<TreeNode>> = processes
        .into_iter()
        .map(|p| Some(TreeNode::leaf(p)))
        .collect();
    for index in post_order {
        if let Some(children) = children_map.remove(&index) {
            let built: Vec<TreeNode> = children
                .into_iter()
                .filter_map(|c| slots[c].take())
                .collect();
            if let Some(node) = slots[index].as_mut() {
                node.children = built;
            }
        }
    }

    let mut root = TreeNode::root();
    root.children = root_children
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect();
    root
}

/// Map each record to the index of its parent record, or `None` for the root.
fn resolve_parents(processes: &[ProcessInfo]) -> Vec<Option<usize>> {
    // Duplicate pids resolve to the first record seen
    let mut index_by_pid: HashMap<u32, usize> = HashMap::with_capacity(processes.len());
    for (index, process) in processes.iter().enumerate() {
        index_by_pid.entry(process.pid).or_insert(index);
    }

    let mut parents: Vec<Option<usize>> = processes
        .iter()
        .map(|process| match process.parent_pid {
            None => {
                log::debug!("Process {} has no known parent", process.pid);
                None
            }
            Some(ROOT_PID) => None,
            Some(ppid) if ppid == process.pid => {
                log::debug!("Process {} is its own parent", process.pid);
                None
            }
            Some(ppid) => {
                let parent = index_by_pid.get(&ppid).copied();
                if parent.is_none() {
                    log::debug!("Parent {} of process {} is gone", ppid, process.pid);
                }
                parent
            }
        })
        .collect();

    break_cycles(processes, &mut parents);
    parents
}

/// Detach every record that sits on a parent cycle so that it hangs from the root.
fn break_cycles(processes: &[ProcessInfo], parents: &mut [Option<usize>]) {
    let mut state = vec![Visit::Unseen; parents.len()];
    let mut path: Vec<usize> = Vec::new();

    for start in 0..parents.len() {
        if state[start] != Visit::Unseen {
            continue;
        }

        let mut current = Some(start);
        while let Some(index) = current {
            match state[index] {
                Visit::Done => break,
                Visit::OnPath => {
                    // `index` closes a loop: everything on the path from it is a cycle
                    let cycle_start = path.iter().position(|&i| i == index).unwrap_or(0);
                    for &member in &path[cycle_start..] {
                        log::debug!(
                            "Process {} is part of a parent cycle",
                            processes[member].pid
                        );
                        parents[member] = None;
                    }
                    break;
                }
                Visit::Unseen => {
                    state[index] = Visit::OnPath;
                    path.push(index);
                    current = parents[index];
                }
            }
        }

        for index in path.drain(..) {
            state[index] = Visit::Done;
        }
    }
}
