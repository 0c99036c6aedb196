use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{Error as DeError, Visitor};
use serde::{Deserializer, Serializer};

/// Workspace-relative path stored as an ordered list of segments.
/// 以路徑片段序列表示的工作區相對路徑。
///
/// Ancestor/descendant checks compare whole segments, so `src2` is never
/// mistaken for a descendant of `src`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelPath {
    segments: Vec<String>,
}

impl RelPath {
    /// Parses a textual relative path, accepting both `/` and `\` separators.
    /// 解析文字形式的相對路徑，同時接受 `/` 與 `\` 分隔符。
    ///
    /// Returns `None` for inputs that normalise to nothing (empty, `.`) or
    /// that try to escape upward (`..`).
    pub fn new(text: &str) -> Option<Self> {
        let mut segments = Vec::new();
        for segment in text.split(['/', '\\']) {
            match segment {
                "" | "." => continue,
                ".." => return None,
                other => segments.push(other.to_string()),
            }
        }
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    /// Relativises `absolute` against `root`, returning `None` when the path
    /// does not live under the workspace root.
    /// 將絕對路徑相對化至工作區根目錄；若不在根目錄下則回傳 `None`。
    pub fn between(root: &Path, absolute: &Path) -> Option<Self> {
        let stripped = absolute.strip_prefix(root).ok()?;
        let mut segments = Vec::new();
        for component in stripped.components() {
            match component {
                std::path::Component::Normal(os) => {
                    segments.push(os.to_string_lossy().into_owned());
                }
                std::path::Component::CurDir => continue,
                _ => return None,
            }
        }
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    /// Appends one directory-entry name, producing the child path.
    /// 附加一個目錄項目名稱，產生子路徑。
    pub fn join(&self, name: &OsStr) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string_lossy().into_owned());
        Self { segments }
    }

    /// Last segment, used as the display label.
    /// 最後一個片段，作為顯示名稱。
    pub fn file_name(&self) -> &str {
        // Construction guarantees at least one segment.
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True when `self` is strictly below `other` in the tree.
    /// 判斷 `self` 是否為 `other` 的嚴格子孫。
    pub fn is_strict_descendant_of(&self, other: &RelPath) -> bool {
        self.segments.len() > other.segments.len()
            && self.segments[..other.segments.len()] == other.segments[..]
    }

    /// True when `self` is strictly above `other` in the tree.
    /// 判斷 `self` 是否為 `other` 的嚴格祖先。
    pub fn is_strict_ancestor_of(&self, other: &RelPath) -> bool {
        other.is_strict_descendant_of(self)
    }

    /// Resolves back to an absolute path under the given workspace root.
    /// 還原為工作區根目錄下的絕對路徑。
    pub fn to_absolute(&self, root: &Path) -> PathBuf {
        let mut absolute = root.to_path_buf();
        for segment in &self.segments {
            absolute.push(segment);
        }
        absolute
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Serialised as the `/`-joined string regardless of platform.
/// 無論平台皆序列化為以 `/` 連接的字串。
impl serde::Serialize for RelPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for RelPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RelPathVisitor;

        impl<'de> Visitor<'de> for RelPathVisitor {
            type Value = RelPath;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-empty workspace-relative path string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                RelPath::new(v)
                    .ok_or_else(|| E::custom(format!("invalid relative path: {v:?}")))
            }
        }

        deserializer.deserialize_str(RelPathVisitor)
    }
}
