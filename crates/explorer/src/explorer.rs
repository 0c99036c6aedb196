use std::path::{Path, PathBuf};

use crate::fs::FileAccess;
use crate::node::FocusedNode;
use crate::path_set::FocusedPathSet;
use crate::rel_path::RelPath;
use crate::store::{FocusStateStore, FocusStoreError, PersistedFocus};

/// Host callback fired synchronously after every successful mutation.
/// 每次變更成功後同步觸發的宿主回呼。
pub type ChangeCallback = Box<dyn Fn() + Send + Sync>;

/// The Focused Explorer model for one workspace root: the path sets plus the
/// store, filesystem and notification collaborators.
/// 單一工作區根目錄的聚焦檔案總管模型：路徑集合加上儲存、
/// 檔案系統與通知等協作者。
///
/// All mutations are synchronous and atomic with respect to each other.
/// Traversal degrades on filesystem errors instead of raising; only
/// persistence can fail.
pub struct FocusedExplorer {
    workspace_root: PathBuf,
    paths: FocusedPathSet,
    store: Box<dyn FocusStateStore>,
    file_access: Box<dyn FileAccess>,
    subscribers: Vec<ChangeCallback>,
}

impl FocusedExplorer {
    /// Opens the model for a workspace, loading persisted state once.
    /// 開啟工作區模型，並載入先前儲存的狀態。
    ///
    /// Persisted entries that no longer parse are dropped rather than
    /// failing construction; an absent state file yields empty sets.
    pub fn open(
        workspace_root: impl AsRef<Path>,
        store: Box<dyn FocusStateStore>,
        file_access: Box<dyn FileAccess>,
    ) -> Result<Self, FocusStoreError> {
        let workspace_root = workspace_root.as_ref().to_path_buf();
        let paths = match store.load(&workspace_root)? {
            Some(state) => FocusedPathSet::from_parts(
                parse_entries(&state.focused),
                parse_entries(&state.excluded),
            ),
            None => FocusedPathSet::new(),
        };
        Ok(Self {
            workspace_root,
            paths,
            store,
            file_access,
            subscribers: Vec::new(),
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn path_set(&self) -> &FocusedPathSet {
        &self.paths
    }

    /// Registers a change callback. All callbacks fire after every mutation,
    /// with no payload and no batching.
    /// 註冊變更回呼；每次變更後全部觸發，不帶資料也不合併。
    pub fn subscribe(&mut self, callback: impl Fn() + Send + Sync + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Pins an absolute path. Paths outside the workspace root are ignored.
    /// 釘選一個絕對路徑；不在工作區根目錄下的路徑會被忽略。
    pub fn add(&mut self, absolute: &Path) -> Result<(), FocusStoreError> {
        let Some(rel) = RelPath::between(&self.workspace_root, absolute) else {
            return Ok(());
        };
        if self.paths.add(rel) {
            self.persist_and_notify()?;
        }
        Ok(())
    }

    /// Removes a previously listed path: un-pins a focused root, or hides a
    /// covered descendant. Paths outside the workspace root are ignored.
    /// 移除先前列出的路徑：取消釘選聚焦根路徑，或隱藏受涵蓋的子孫。
    /// 不在工作區根目錄下的路徑會被忽略。
    pub fn remove(&mut self, absolute: &Path) -> Result<(), FocusStoreError> {
        let Some(rel) = RelPath::between(&self.workspace_root, absolute) else {
            return Ok(());
        };
        self.paths.remove(&rel);
        self.persist_and_notify()
    }

    /// Lists children lazily: the minimal focused roots for `None`, otherwise
    /// the non-excluded entries of a focused directory.
    /// 延遲列出子節點：`None` 時回傳最小聚焦根路徑，
    /// 否則回傳目錄中未被排除的項目。
    ///
    /// Never fails: a stat error defaults the node to "not a directory" and
    /// an unreadable directory yields an empty list for that subtree only.
    pub fn list_children(&self, parent: Option<&RelPath>) -> Vec<FocusedNode> {
        let Some(parent) = parent else {
            return self
                .paths
                .root_paths()
                .into_iter()
                .map(|rel| self.make_node(rel.clone()))
                .collect();
        };

        let absolute = parent.to_absolute(&self.workspace_root);
        match self.file_access.is_directory(&absolute) {
            Ok(true) => {}
            _ => return Vec::new(),
        }

        let Ok(names) = self.file_access.read_dir_names(&absolute) else {
            return Vec::new();
        };

        names
            .into_iter()
            .map(|name| parent.join(&name))
            .filter(|child| !self.paths.is_excluded(child))
            .map(|child| self.make_node(child))
            .collect()
    }

    /// Convenience membership test against the exclusion set.
    pub fn is_excluded(&self, rel: &RelPath) -> bool {
        self.paths.is_excluded(rel)
    }

    /// Minimal focused roots, in insertion order.
    pub fn root_paths(&self) -> Vec<&RelPath> {
        self.paths.root_paths()
    }

    fn make_node(&self, rel: RelPath) -> FocusedNode {
        let absolute_path = rel.to_absolute(&self.workspace_root);
        // A failing stat means the entry may have been deleted; show it as a
        // plain file instead of aborting the traversal.
        let is_directory = self
            .file_access
            .is_directory(&absolute_path)
            .unwrap_or(false);
        FocusedNode {
            label: rel.file_name().to_string(),
            absolute_path,
            is_directory,
            relative_path: rel,
        }
    }

    fn persist_and_notify(&self) -> Result<(), FocusStoreError> {
        let state = PersistedFocus {
            focused: self.paths.focused().iter().map(RelPath::to_string).collect(),
            excluded: self
                .paths
                .excluded()
                .iter()
                .map(RelPath::to_string)
                .collect(),
        };
        self.store.save(&self.workspace_root, &state)?;
        for subscriber in &self.subscribers {
            subscriber();
        }
        Ok(())
    }
}

fn parse_entries(entries: &[String]) -> Vec<RelPath> {
    entries
        .iter()
        .filter_map(|entry| RelPath::new(entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::OsFileAccess;
    use crate::store::MemoryFocusStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn open_in_memory(root: &Path) -> FocusedExplorer {
        FocusedExplorer::open(
            root,
            Box::new(MemoryFocusStore::new()),
            Box::new(OsFileAccess),
        )
        .unwrap()
    }

    #[test]
    fn out_of_scope_paths_are_ignored_silently() {
        let tmp = tempdir().unwrap();
        let mut explorer = open_in_memory(tmp.path());
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        explorer.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        explorer.add(Path::new("/definitely/elsewhere")).unwrap();
        explorer.remove(Path::new("/definitely/elsewhere")).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(explorer.path_set().focused().is_empty());
        assert!(explorer.path_set().excluded().is_empty());
    }

    #[test]
    fn notification_follows_every_successful_mutation() {
        let tmp = tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("src")).unwrap();
        let mut explorer = open_in_memory(tmp.path());
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        explorer.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        explorer.add(&tmp.path().join("src")).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // Covered path: no change, no notification.
        explorer.add(&tmp.path().join("src/lib.rs")).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // Removal persists and notifies whichever branch it takes.
        explorer.remove(&tmp.path().join("src/lib.rs")).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 2);
        explorer.remove(&tmp.path().join("src")).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn state_survives_reopening_through_the_store() {
        let tmp = tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("docs")).unwrap();
        let store = Arc::new(MemoryFocusStore::new());

        struct SharedStore(Arc<MemoryFocusStore>);
        impl FocusStateStore for SharedStore {
            fn load(&self, root: &Path) -> Result<Option<PersistedFocus>, FocusStoreError> {
                self.0.load(root)
            }
            fn save(&self, root: &Path, state: &PersistedFocus) -> Result<(), FocusStoreError> {
                self.0.save(root, state)
            }
        }

        {
            let mut explorer = FocusedExplorer::open(
                tmp.path(),
                Box::new(SharedStore(store.clone())),
                Box::new(OsFileAccess),
            )
            .unwrap();
            explorer.add(&tmp.path().join("docs")).unwrap();
            explorer.remove(&tmp.path().join("docs/drafts")).unwrap();
        }

        let explorer = FocusedExplorer::open(
            tmp.path(),
            Box::new(SharedStore(store)),
            Box::new(OsFileAccess),
        )
        .unwrap();
        let focused: Vec<String> = explorer
            .path_set()
            .focused()
            .iter()
            .map(RelPath::to_string)
            .collect();
        assert_eq!(focused, vec!["docs"]);
        assert!(explorer.is_excluded(&RelPath::new("docs/drafts").unwrap()));
    }

    #[test]
    fn malformed_persisted_entries_are_dropped() {
        let tmp = tempdir().unwrap();
        let store = MemoryFocusStore::new();
        store
            .save(
                tmp.path(),
                &PersistedFocus {
                    focused: vec!["src".to_string(), "../escape".to_string(), String::new()],
                    excluded: vec!["src/..".to_string(), "src/hidden".to_string()],
                },
            )
            .unwrap();

        let explorer =
            FocusedExplorer::open(tmp.path(), Box::new(store), Box::new(OsFileAccess)).unwrap();
        assert_eq!(explorer.path_set().focused().len(), 1);
        assert_eq!(explorer.path_set().excluded().len(), 1);
    }
}
