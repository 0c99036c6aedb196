use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

/// Filesystem operations the explorer needs, owned by the host.
/// 檔案總管所需的檔案系統操作，由宿主提供。
///
/// Calls may block; the model is single-threaded and cooperative, so every
/// failure is handled per call site rather than aborting a traversal.
pub trait FileAccess {
    /// Stats the path, reporting whether it is a directory.
    fn is_directory(&self, path: &Path) -> io::Result<bool>;

    /// Lists the immediate entry names of a directory.
    fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>>;
}

/// Default accessor backed by `std::fs`.
/// 以 `std::fs` 為後端的預設存取器。
#[derive(Debug, Default)]
pub struct OsFileAccess;

impl FileAccess for OsFileAccess {
    fn is_directory(&self, path: &Path) -> io::Result<bool> {
        fs::metadata(path).map(|metadata| metadata.is_dir())
    }

    fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            names.push(entry?.file_name());
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn os_access_reports_directories_and_entries() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("file.txt"), b"x").unwrap();

        let access = OsFileAccess;
        assert!(access.is_directory(tmp.path()).unwrap());
        assert!(!access.is_directory(&tmp.path().join("file.txt")).unwrap());
        assert!(access.is_directory(&tmp.path().join("absent")).is_err());

        let mut names = access.read_dir_names(tmp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec![OsString::from("file.txt"), OsString::from("sub")]);
    }
}
