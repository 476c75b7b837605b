use derive_new::new;
use filetime::FileTime;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

/// Force a file's mtime to a distinct value
///
/// Filesystem mtimes have second granularity, so a rewrite within the same
/// second is invisible to stat-based checks unless the clock is moved by hand.
pub fn bump_mtime(path: &Path, unix_seconds: i64) {
    filetime::set_file_mtime(path, FileTime::from_unix_time(unix_seconds, 0))
        .unwrap_or_else(|e| panic!("Failed to set mtime on {:?}: {}", path, e));
}

/// Count the object files stored under `.tgit/objects`
pub fn count_stored_objects(repository_dir: &Path) -> usize {
    fn walk(dir: &Path, count: &mut usize) {
        for entry in std::fs::read_dir(dir).expect("Failed to read objects directory") {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();
            if path.is_dir() {
                walk(&path, count);
            } else {
                *count += 1;
            }
        }
    }

    let mut count = 0;
    walk(&repository_dir.join(".tgit").join("objects"), &mut count);
    count
}
