use crate::error::{ReportError, Result};
use chrono::{DateTime, Local};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = ".tree_report";
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 50_000;
pub const DEFAULT_SAMPLE_BYTES: usize = 1024;

/// Version control, build output and dependency caches.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    "__pycache__",
    ".pytest_cache",
    "venv",
    "env",
    ".venv",
    ".env",
    "dist",
    "build",
    ".next",
    ".nuxt",
    "coverage",
    ".coverage",
    ".nyc_output",
    "logs",
    "tmp",
    "temp",
    ".DS_Store",
    "Thumbs.db",
    ".idea",
    ".vscode",
    ".vs",
];

/// Everything one run needs. Threaded through the walk instead of living in globals.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub include_content: bool,
    pub skip_dirs: BTreeSet<String>,
    pub max_content_chars: usize,
    pub sample_bytes: usize,
    pub generated_at: DateTime<Local>,
    pub generator: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            include_content: true,
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| (*s).to_string()).collect(),
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
            sample_bytes: DEFAULT_SAMPLE_BYTES,
            generated_at: Local::now(),
            generator: format!(
                "{} {} (analyse d'arborescence)",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

impl ReportConfig {
    #[must_use]
    pub fn should_skip(&self, dir_name: &str) -> bool {
        self.skip_dirs.contains(dir_name)
    }

    /// Applies `KEY=VALUE` overrides from `path`.
    ///
    /// With `required == false` a missing file is not an error, so the implicit
    /// `.tree_report` lookup can stay silent.
    pub fn load_overrides(&mut self, path: &Path, required: bool) -> Result<()> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if !required && e.kind() == ErrorKind::NotFound => {
                log::debug!("no config file at {}", path.display());
                return Ok(());
            }
            Err(source) => {
                return Err(ReportError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        log::info!("loading config overrides from {}", path.display());
        self.apply_overrides(&content)
    }

    pub fn apply_overrides(&mut self, content: &str) -> Result<()> {
        let mut map = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((k, v)) = line.split_once('=') {
                let key = k.trim();
                let val = v.trim().trim_matches('"');
                map.insert(key, val);
            }
        }

        if let Some(dirs) = map.get("SKIP_DIRS") {
            self.skip_dirs.extend(
                dirs.split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string),
            );
        }
        if let Some(v) = map.get("MAX_CONTENT_CHARS") {
            self.max_content_chars = parse_positive("MAX_CONTENT_CHARS", v)?;
        }
        if let Some(v) = map.get("SAMPLE_BYTES") {
            self.sample_bytes = parse_positive("SAMPLE_BYTES", v)?;
        }

        Ok(())
    }
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ReportError::ConfigValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
