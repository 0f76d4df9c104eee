use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "py", "js", "ts", "tsx", "jsx", "json", "yaml", "yml", "xml", "html", "htm",
    "css", "scss", "sass", "less", "sql", "sh", "bat", "ps1", "php", "rb", "java", "c", "cpp",
    "h", "hpp", "cs", "go", "rs", "swift", "kt", "scala", "clj", "hs", "ml", "r", "m",
    "dockerfile", "gitignore", "env", "config", "conf", "ini", "cfg", "toml", "lock", "log",
    "csv", "tsv", "vue", "svelte", "astro",
];

const TEXT_FILENAMES: &[&str] = &[
    "dockerfile",
    "makefile",
    "rakefile",
    "license",
    "readme",
    "changelog",
    "authors",
];

/// First match wins: extension, conventional filename, then a byte sample.
/// Unreadable files are binary.
#[must_use]
pub fn is_text_file(path: &Path, sample_bytes: usize) -> bool {
    if has_text_extension(path) || has_text_filename(path) {
        return true;
    }

    match sample_is_text(path, sample_bytes) {
        Ok(is_text) => is_text,
        Err(e) => {
            log::debug!("cannot sample {}: {e}, treating as binary", path.display());
            false
        }
    }
}

fn has_text_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TEXT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn has_text_filename(path: &Path) -> bool {
    let matches = |name: Option<&str>| {
        name.is_some_and(|n| TEXT_FILENAMES.iter().any(|known| n.eq_ignore_ascii_case(known)))
    };

    // `LICENSE` as well as `LICENSE.mit`
    matches(path.file_name().and_then(|n| n.to_str()))
        || matches(path.file_stem().and_then(|n| n.to_str()))
}

fn sample_is_text(path: &Path, sample_bytes: usize) -> io::Result<bool> {
    let mut sample = Vec::with_capacity(sample_bytes);
    File::open(path)?
        .take(sample_bytes as u64)
        .read_to_end(&mut sample)?;

    if sample.contains(&0) {
        return Ok(false);
    }

    Ok(std::str::from_utf8(&sample).is_ok())
}
