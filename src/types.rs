use crate::content::FileContent;
use chrono::{DateTime, Local};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    /// `None` when the metadata could not be read.
    pub size: Option<u64>,
    pub modified: Option<DateTime<Local>>,
    pub is_text: bool,
    pub content: Option<FileContent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryKind {
    Plain,
    /// Listed, never descended.
    Symlink,
}

#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: DirectoryKind,
}

/// One listed child, in rendering order.
#[derive(Debug, Clone)]
pub enum Entry {
    Directory(DirectoryEntry),
    File(PathBuf, String),
}

/// Branch glyph state for one tree level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    pub prefix: String,
}

impl RenderContext {
    #[must_use]
    pub fn branch(is_last: bool) -> &'static str {
        if is_last { "└── " } else { "├── " }
    }

    /// Prefix for whatever sits below an entry: its children or its content block.
    #[must_use]
    pub fn child(&self, is_last: bool) -> RenderContext {
        let continuation = if is_last { "    " } else { "│   " };
        RenderContext {
            prefix: format!("{}{}", self.prefix, continuation),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkStats {
    pub directories: usize,
    pub files: usize,
    pub text_files: usize,
    pub binary_files: usize,
    pub truncated_files: usize,
    pub errors: usize,
    pub total_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_context_nesting() {
        let root = RenderContext::default();
        assert_eq!(RenderContext::branch(false), "├── ");
        assert_eq!(RenderContext::branch(true), "└── ");

        let mid = root.child(false);
        assert_eq!(mid.prefix, "│   ");
        let last = mid.child(true);
        assert_eq!(last.prefix, "│       ");
    }
}
