use chrono::{DateTime, Local};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// `512B`, `1.5KB`, `3.0MB`, `1.2GB`. No space, one decimal above bytes.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{bytes}B")
    } else if bytes < MB {
        format!("{:.1}KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1}GB", bytes as f64 / GB as f64)
    }
}

#[must_use]
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Bracketed suffix of a file line.
#[must_use]
pub fn file_info(size: Option<u64>, modified: Option<&DateTime<Local>>) -> String {
    match (size, modified) {
        (Some(size), Some(modified)) => {
            format!("[{} - {}]", format_size(size), format_timestamp(modified))
        }
        _ => "[info non disponible]".to_string(),
    }
}
