//! Shared test utilities for the fiew-bot test suite.

use tempfile::TempDir;

/// Create a temp posts directory pre-populated with `(name, content)` files.
pub fn posts_dir_with(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, content) in files {
        std::fs::write(tmp.path().join(name), content).unwrap();
    }
    tmp
}
