use std::path::PathBuf;

use crate::rel_path::RelPath;

/// One entry surfaced by a traversal. Nodes are built on demand from a fresh
/// filesystem stat and discarded after use — a view, not state.
/// 遍歷時即時建立的節點；屬於檢視結果而非狀態，用後即棄。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusedNode {
    /// Display label, the last path segment.
    pub label: String,
    /// Absolute path a host can open or reveal.
    pub absolute_path: PathBuf,
    /// Whether the entry was a directory at traversal time.
    pub is_directory: bool,
    /// Workspace-relative path, usable for further `list_children` calls.
    pub relative_path: RelPath,
}
