use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use log::debug;
use super::content_manager::ContentManager;

/// Serves content from a directory on the local file system.
///
/// Names are appended to the root as plain strings. Nothing is normalized:
/// `..` segments are followed and symlinks are not checked, so a request
/// can reach files outside the root. This is a known limitation of the
/// server and is pinned by tests.
pub struct FileSystemAdapter {
    root: PathBuf
}

impl FileSystemAdapter {
    pub fn new(root: &Path) -> FileSystemAdapter {
        FileSystemAdapter {
            root: root.to_path_buf()
        }
    }

    /// Returns the path a request file name maps to.
    pub fn resolve(&self, name: &str) -> PathBuf {
        let mut path = OsString::from(self.root.as_os_str());
        path.push(MAIN_SEPARATOR.to_string());
        path.push(name);
        PathBuf::from(path)
    }
}

impl ContentManager for FileSystemAdapter {
    fn find_content(&self, name: &str) -> io::Result<Vec<u8>> {
        let file_path = self.resolve(name);
        debug!("file_path={}", file_path.display());
        fs::read(file_path)
    }
}

/// Turns a raw request target into a file name by dropping one leading `/`.
pub fn request_file_name(target: &str) -> &str {
    if target.starts_with('/') {
        &target[1..]
    } else {
        target
    }
}
