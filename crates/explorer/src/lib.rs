//! Focused Explorer core: a user-curated secondary file tree model.
//! 管理「聚焦檔案總管」的核心模組：使用者釘選與隱藏路徑的資料模型。

pub mod explorer;
pub mod fs;
pub mod node;
pub mod path_set;
pub mod rel_path;
pub mod store;

pub use explorer::{ChangeCallback, FocusedExplorer};
pub use fs::{FileAccess, OsFileAccess};
pub use node::FocusedNode;
pub use path_set::{FocusedPathSet, RemoveOutcome};
pub use rel_path::RelPath;
pub use store::{
    FileFocusStore, FocusStateStore, FocusStoreError, MemoryFocusStore, PersistedFocus,
};
