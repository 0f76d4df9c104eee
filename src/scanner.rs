use crate::classifier::is_text_file;
use crate::config::ReportConfig;
use crate::content::read_file_content;
use crate::types::{DirectoryEntry, DirectoryKind, Entry, FileEntry};
use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Lists the direct children of `dir`: sub-directories first, then files,
/// each group sorted by name. Skip-listed directories and entries that are
/// neither files nor directories are left out.
///
/// Only a failure to read `dir` itself is returned as an error; a child that
/// cannot be inspected is logged and dropped.
pub fn list_directory(dir: &Path, config: &ReportConfig) -> io::Result<Vec<Entry>> {
    // walkdir yields nothing below a plain file
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("Not a directory: '{}'", dir.display()),
        ));
    }

    let mut dirs = Vec::new();
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 || e.path() == Some(dir) => {
                let message = e.to_string();
                return Err(e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other(message)));
            }
            Err(e) => {
                log::warn!("skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().to_string();
        let path = entry.path().to_path_buf();
        let file_type = entry.file_type();

        let (is_dir, is_file, kind) = if file_type.is_symlink() {
            // Classify by target, but never descend through a link
            match fs::metadata(&path) {
                Ok(target) => (target.is_dir(), target.is_file(), DirectoryKind::Symlink),
                Err(e) => {
                    log::debug!("dangling symlink {}: {e}", path.display());
                    continue;
                }
            }
        } else {
            (file_type.is_dir(), file_type.is_file(), DirectoryKind::Plain)
        };

        if is_dir {
            if config.should_skip(&name) {
                log::debug!("skipping directory {}", path.display());
                continue;
            }
            dirs.push(Entry::Directory(DirectoryEntry { path, name, kind }));
        } else if is_file {
            files.push(Entry::File(path, name));
        }
    }

    dirs.extend(files);
    Ok(dirs)
}

/// Collects metadata, classification and, when enabled, content of one file.
#[must_use]
pub fn inspect_file(path: &Path, name: &str, config: &ReportConfig) -> FileEntry {
    let (size, modified) = match fs::metadata(path) {
        Ok(m) => {
            let modified: Option<DateTime<Local>> = m.modified().ok().map(Into::into);
            (Some(m.len()), modified)
        }
        Err(e) => {
            log::warn!("cannot stat {}: {e}", path.display());
            (None, None)
        }
    };

    let is_text = config.include_content && is_text_file(path, config.sample_bytes);
    let content = is_text.then(|| read_file_content(path, config.max_content_chars));

    FileEntry {
        path: path.to_path_buf(),
        name: name.to_string(),
        size,
        modified,
        is_text,
        content,
    }
}
