use crate::rel_path::RelPath;

/// Result of a [`FocusedPathSet::remove`] call.
/// [`FocusedPathSet::remove`] 的結果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The path was a focused root and has been un-pinned.
    Unfocused,
    /// The path was covered by a focused root and is now hidden.
    Excluded,
}

/// The two-set model behind the Focused Explorer: pinned roots plus hidden
/// descendants. Pure data structure, no IO or notification.
/// 聚焦檔案總管背後的雙集合模型：釘選的根路徑與隱藏的子孫路徑。
/// 純資料結構，不含 IO 與通知。
///
/// `focused` is kept as a minimal antichain: no entry is ever an ancestor of
/// another after `add` returns. Insertion order is preserved for listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusedPathSet {
    focused: Vec<RelPath>,
    excluded: Vec<RelPath>,
}

impl FocusedPathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the model from persisted entries, dropping duplicates.
    /// 從持久化條目重建模型，並去除重複項。
    pub fn from_parts(focused: Vec<RelPath>, excluded: Vec<RelPath>) -> Self {
        let mut set = Self::new();
        for path in focused {
            if !set.focused.contains(&path) {
                set.focused.push(path);
            }
        }
        for path in excluded {
            if !set.excluded.contains(&path) {
                set.excluded.push(path);
            }
        }
        set
    }

    /// Pins a path. Returns `true` when the model changed.
    /// 釘選一個路徑；若模型有變動則回傳 `true`。
    ///
    /// A path already covered by a focused root is ignored; a path that
    /// covers existing roots subsumes them; a previously hidden path is
    /// re-included.
    pub fn add(&mut self, path: RelPath) -> bool {
        let covered = self
            .focused
            .iter()
            .any(|existing| path == *existing || path.is_strict_descendant_of(existing));
        if covered {
            return false;
        }

        self.focused
            .retain(|existing| !existing.is_strict_descendant_of(&path));
        self.excluded.retain(|existing| *existing != path);
        self.focused.push(path);
        true
    }

    /// Un-pins a focused root, or hides a covered descendant.
    /// 取消釘選聚焦根路徑，或隱藏受涵蓋的子孫路徑。
    ///
    /// Removing a focused root does not exclude its descendants; they simply
    /// stop being listed.
    pub fn remove(&mut self, path: &RelPath) -> RemoveOutcome {
        if self.focused.contains(path) {
            self.focused.retain(|existing| existing != path);
            RemoveOutcome::Unfocused
        } else {
            if !self.excluded.contains(path) {
                self.excluded.push(path.clone());
            }
            RemoveOutcome::Excluded
        }
    }

    /// Minimal top-level paths, in insertion order.
    /// 最小化的頂層路徑集合，依插入順序排列。
    ///
    /// Recomputed defensively: a member is dropped when any other member is a
    /// strict ancestor of it, even though `add` keeps the invariant.
    pub fn root_paths(&self) -> Vec<&RelPath> {
        self.focused
            .iter()
            .filter(|candidate| {
                !self
                    .focused
                    .iter()
                    .any(|other| other.is_strict_ancestor_of(candidate))
            })
            .collect()
    }

    /// True when the path is hidden, directly or via an excluded ancestor.
    /// 判斷路徑是否被隱藏（直接或因祖先被排除）。
    pub fn is_excluded(&self, path: &RelPath) -> bool {
        self.excluded
            .iter()
            .any(|excluded| path == excluded || path.is_strict_descendant_of(excluded))
    }

    pub fn focused(&self) -> &[RelPath] {
        &self.focused
    }

    pub fn excluded(&self) -> &[RelPath] {
        &self.excluded
    }
}
