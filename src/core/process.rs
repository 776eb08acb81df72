/// One process as seen by a single enumeration pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    /// `None` when the parent could not be determined
    pub parent_pid: Option<u32>,
}

impl ProcessInfo {
    pub fn new<S: Into<String>>(pid: u32, name: S, parent_pid: Option<u32>) -> Self {
        Self {
            pid,
            name: name.into(),
            parent_pid,
        }
    }
}

/// Truncate `name` to at most `max_len` bytes without splitting a character
pub fn truncate_name(name: &str, max_len: usize) -> &str {
    if name.len() <= max_len {
        return name;
    }

    let mut end = max_len;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}
