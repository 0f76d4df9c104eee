use std::fs;
use std::path::Path;

/// Text of a file as it should appear in a content block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub text: String,
    pub truncated: bool,
}

/// Reads `path` for display. Never fails: read errors become an inline marker.
#[must_use]
pub fn read_file_content(path: &Path, max_chars: usize) -> FileContent {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("cannot read {}: {e}", path.display());
            return FileContent {
                text: format!("[ERREUR: {e}]"),
                truncated: false,
            };
        }
    };

    let (decoded, fallback) = match String::from_utf8(bytes) {
        Ok(s) => (s, false),
        Err(e) => {
            log::debug!("{} is not UTF-8, decoding as latin-1", path.display());
            (e.into_bytes().iter().map(|&b| char::from(b)).collect(), true)
        }
    };

    let text = normalize_newlines(&decoded);
    let total = text.chars().count();
    if total <= max_chars {
        return FileContent {
            text,
            truncated: false,
        };
    }

    let mut kept: String = text.chars().take(max_chars).collect();
    if fallback {
        kept.push_str(&format!(
            "\n\n... [FICHIER TRONQUÉ - Encodage latin-1 - Taille totale: {total} caractères] ..."
        ));
    } else {
        kept.push_str(&format!(
            "\n\n... [FICHIER TRONQUÉ - Taille totale: {total} caractères] ..."
        ));
    }

    FileContent {
        text: kept,
        truncated: true,
    }
}

fn normalize_newlines(text: &str) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_string()
    }
}
