use crate::naming::FileSpec;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary repository; objects live directly under the root.
pub(crate) struct TestRepository {
    pub(crate) root: TempDir,
    pub(crate) repo_dir: PathBuf,
}

pub(crate) fn create_test_repository() -> TestRepository {
    let root = TempDir::new().unwrap();
    let repo_dir = root.path().to_path_buf();
    TestRepository { root, repo_dir }
}

/// Create empty files for the given versions of `spec`.
pub(crate) fn touch_versions(repo_dir: &Path, spec: &FileSpec, versions: &[u32]) {
    for &version in versions {
        touch(&spec.versioned_path(repo_dir, version));
    }
}

/// Create an empty file, including missing parent directories.
pub(crate) fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap();
}

pub(crate) fn model_spec(id: &str) -> FileSpec {
    FileSpec::new(id, "model", 1, "cif")
}
