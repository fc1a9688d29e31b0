//! Posts queue scanning and archiving.
//!
//! The posts directory is a flat queue of markdown files. Each run consumes
//! at most one: the first file in case-insensitive filename order. Consumed
//! files are renamed into `<posts_dir>/archive/` with a timestamp suffix so
//! they are never reprocessed.

use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PostsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A queued post pulled from the posts directory.
#[derive(Debug)]
pub struct QueuedPost {
    /// The markdown file the content came from.
    pub source: PathBuf,
    /// Raw markdown content.
    pub content: String,
}

/// Find the next queued markdown post, if any.
///
/// A missing posts directory is created (first run on a fresh checkout) and
/// reported as empty. Files are ordered by lowercased filename so the queue
/// drains deterministically regardless of filesystem order.
pub fn next_post(posts_dir: &Path) -> Result<Option<QueuedPost>, PostsError> {
    if !posts_dir.exists() {
        fs::create_dir_all(posts_dir)?;
        info!(dir = %posts_dir.display(), "created posts directory");
        return Ok(None);
    }

    let mut md_files: Vec<PathBuf> = fs::read_dir(posts_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();

    if md_files.is_empty() {
        return Ok(None);
    }

    md_files.sort_by_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });

    let source = md_files.swap_remove(0);
    let content = fs::read_to_string(&source)?;
    Ok(Some(QueuedPost { source, content }))
}

/// Move a consumed post into `<posts_dir>/archive/`.
///
/// The archived name is `<stem>_<YYYYMMDD_HHMMSS><ext>`; the timestamp keeps
/// re-queued files with the same name from colliding. Returns the archived
/// path.
pub fn archive_post(posts_dir: &Path, source: &Path) -> Result<PathBuf, PostsError> {
    let archive_dir = posts_dir.join("archive");
    fs::create_dir_all(&archive_dir)?;

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    let target = archive_dir.join(format!("{stem}_{timestamp}{ext}"));
    fs::rename(source, &target)?;
    Ok(target)
}
