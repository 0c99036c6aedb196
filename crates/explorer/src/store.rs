use std::collections::HashMap;
use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The durable shape of one workspace's focus state: two order-independent,
/// duplicate-free string arrays.
/// 單一工作區聚焦狀態的持久化格式：兩個字串陣列。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedFocus {
    #[serde(default)]
    pub focused: Vec<String>,
    #[serde(default)]
    pub excluded: Vec<String>,
}

/// Errors raised by focus-state persistence.
/// 聚焦狀態儲存相關的錯誤。
#[derive(Debug, Error)]
pub enum FocusStoreError {
    #[error("focus state IO error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid focus state payload: {0}")]
    Invalid(String),
}

/// Durable key-value store scoped per workspace root identity.
/// 以工作區根目錄為鍵的持久化儲存。
///
/// State is read once at model construction and overwritten wholesale on
/// every mutation.
pub trait FocusStateStore {
    /// Loads the state for a workspace, `Ok(None)` when nothing was saved.
    fn load(&self, workspace_root: &Path) -> Result<Option<PersistedFocus>, FocusStoreError>;

    /// Overwrites the state for a workspace.
    fn save(&self, workspace_root: &Path, state: &PersistedFocus) -> Result<(), FocusStoreError>;
}

/// File-backed store: one JSON document per workspace under a base directory,
/// named after the workspace root so distinct workspaces never collide.
/// 檔案後端儲存：每個工作區一份 JSON 文件，檔名由根目錄路徑導出，
/// 確保不同工作區不會互相覆蓋。
#[derive(Debug)]
pub struct FileFocusStore {
    base: PathBuf,
}

impl FileFocusStore {
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    /// Returns the state file used for the given workspace root.
    /// 取得指定工作區根目錄對應的狀態檔案路徑。
    pub fn state_path(&self, workspace_root: &Path) -> PathBuf {
        let encoded = URL_SAFE_NO_PAD.encode(path_to_bytes(workspace_root));
        self.base.join(format!("focus_{encoded}.json"))
    }
}

impl FocusStateStore for FileFocusStore {
    fn load(&self, workspace_root: &Path) -> Result<Option<PersistedFocus>, FocusStoreError> {
        match fs::read_to_string(self.state_path(workspace_root)) {
            Ok(contents) => serde_json::from_str(&contents)
                .map(Some)
                .map_err(|err| FocusStoreError::Invalid(err.to_string())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(FocusStoreError::Io(err)),
        }
    }

    fn save(&self, workspace_root: &Path, state: &PersistedFocus) -> Result<(), FocusStoreError> {
        let payload = serde_json::to_vec_pretty(state)
            .map_err(|err| FocusStoreError::Invalid(err.to_string()))?;
        write_atomic(&self.state_path(workspace_root), &payload).map_err(FocusStoreError::Io)
    }
}

/// In-memory store for tests and embedded hosts.
/// 供測試與內嵌宿主使用的記憶體儲存。
#[derive(Debug, Default)]
pub struct MemoryFocusStore {
    entries: Mutex<HashMap<PathBuf, PersistedFocus>>,
}

impl MemoryFocusStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FocusStateStore for MemoryFocusStore {
    fn load(&self, workspace_root: &Path) -> Result<Option<PersistedFocus>, FocusStoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| FocusStoreError::Invalid("store mutex poisoned".to_string()))?;
        Ok(entries.get(workspace_root).cloned())
    }

    fn save(&self, workspace_root: &Path, state: &PersistedFocus) -> Result<(), FocusStoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| FocusStoreError::Invalid("store mutex poisoned".to_string()))?;
        entries.insert(workspace_root.to_path_buf(), state.clone());
        Ok(())
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, data)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn path_to_bytes(path: &Path) -> Vec<u8> {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    }

    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStrExt;
        path.as_os_str()
            .encode_wide()
            .flat_map(|unit| unit.to_le_bytes())
            .collect()
    }
}
