use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::format::format_timestamp;
use crate::types::WalkStats;
use crate::walker::walk_tree;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

fn rule() -> String {
    "=".repeat(80)
}

fn write_header<W: Write>(out: &mut W, root: &Path, config: &ReportConfig) -> io::Result<()> {
    writeln!(out, "{}", rule())?;
    writeln!(out, "ANALYSE D'ARBORESCENCE DE PROJET")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "Date d'analyse: {}", format_timestamp(&config.generated_at))?;
    writeln!(out, "Dossier analysé: {}", root.display())?;
    writeln!(out, "Générateur: {}", config.generator)?;
    writeln!(out, "{}", rule())?;
    writeln!(out)
}

fn write_footer<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "FIN DE L'ANALYSE")?;
    writeln!(out, "{}", rule())
}

/// Makes `path` absolute and folds `.` and `..` away without touching the
/// filesystem, so `proj/sub/..` reports as `proj`.
pub fn resolve_root(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            // `/..` stays `/`
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    Ok(resolved)
}

/// Name on the root line. Empty for `/`.
fn root_label(root: &Path) -> Cow<'_, str> {
    root.file_name()
        .map_or(Cow::Borrowed(""), |n| n.to_string_lossy())
}

/// Full report for `root` (header, tree, footer) written to any sink.
pub fn render_report<W: Write>(
    root: &Path,
    out: &mut W,
    config: &ReportConfig,
) -> io::Result<WalkStats> {
    write_header(out, root, config)?;

    writeln!(out, "📁 {}/", root_label(root))?;

    let stats = walk_tree(root, out, config)?;
    write_footer(out)?;
    Ok(stats)
}

/// Writes the report for `root` into `output`, replacing any existing file.
///
/// A missing root is checked before `output` is touched.
pub fn write_report(root: &Path, output: &Path, config: &ReportConfig) -> Result<WalkStats> {
    if !root.exists() {
        return Err(ReportError::RootNotFound(root.to_path_buf()));
    }

    let to_output_err = |source: io::Error| ReportError::Output {
        path: output.to_path_buf(),
        source,
    };

    let file = File::create(output).map_err(to_output_err)?;
    let mut out = BufWriter::new(file);
    let stats = render_report(root, &mut out, config).map_err(to_output_err)?;
    out.flush().map_err(to_output_err)?;

    log::info!(
        "report for {} written to {} ({} files, {} directories)",
        root.display(),
        output.display(),
        stats.files,
        stats.directories
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::fs;

    fn pinned_config() -> ReportConfig {
        ReportConfig {
            generated_at: Local.with_ymd_and_hms(2024, 7, 29, 9, 30, 0).unwrap(),
            generator: "tree_report test".to_string(),
            ..ReportConfig::default()
        }
    }

    #[test]
    fn test_report_layout() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("project");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), "hello").unwrap();

        let mut out = Vec::new();
        render_report(&root, &mut out, &pinned_config()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        let rule = "=".repeat(80);
        assert_eq!(lines[0], rule);
        assert_eq!(lines[1], "ANALYSE D'ARBORESCENCE DE PROJET");
        assert_eq!(lines[2], rule);
        assert_eq!(lines[3], "Date d'analyse: 2024-07-29 09:30:00");
        assert_eq!(lines[4], format!("Dossier analysé: {}", root.display()));
        assert_eq!(lines[5], "Générateur: tree_report test");
        assert_eq!(lines[6], rule);
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "📁 project/");
        assert!(lines[9].starts_with("└── 📄 a.txt [5B - "));
        assert!(text.ends_with(&format!(
            "    └─ FIN DU CONTENU\n\n\n{rule}\nFIN DE L'ANALYSE\n{rule}\n"
        )));
    }

    #[test]
    fn test_parent_components_are_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let proj = dir.path().join("proj");
        fs::create_dir_all(proj.join("sub")).unwrap();

        let root = resolve_root(&dir.path().join("proj/sub/..")).unwrap();
        assert_eq!(root, proj);
        assert_eq!(resolve_root(Path::new("/..")).unwrap(), Path::new("/"));
        assert_eq!(
            resolve_root(Path::new("a/./b/..")).unwrap(),
            std::env::current_dir().unwrap().join("a")
        );

        let mut out = Vec::new();
        render_report(&root, &mut out, &pinned_config()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[4], format!("Dossier analysé: {}", proj.display()));
        assert_eq!(lines[8], "📁 proj/");
        assert_eq!(lines[9], "└── 📁 sub/");
    }

    #[test]
    fn test_root_label() {
        assert_eq!(root_label(Path::new("/")), "");
        assert_eq!(root_label(Path::new("/srv/project")), "project");
    }

    #[test]
    fn test_file_root_renders_error_line() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "hello").unwrap();

        let mut out = Vec::new();
        let stats = render_report(&file, &mut out, &pinned_config()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[8], "📁 a.txt/");
        assert!(lines[9].starts_with("└── [ERREUR: "));
        assert!(!text.contains("CONTENU"));
        assert_eq!(stats.errors, 1);
    }

    #[test]
    fn test_output_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/nested")).unwrap();
        fs::write(dir.path().join("src/nested/deep.rs"), "// deep").unwrap();
        fs::write(dir.path().join("src/lib.rs"), "pub fn f() {}").unwrap();
        fs::write(dir.path().join("data.bin"), [0u8, 1, 2]).unwrap();

        // Reports land outside the analysed tree
        let out_dir = tempfile::tempdir().unwrap();
        let first = out_dir.path().join("first.txt");
        let second = out_dir.path().join("second.txt");

        let config = pinned_config();
        write_report(dir.path(), &first, &config).unwrap();
        write_report(dir.path(), &second, &config).unwrap();
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_missing_root_leaves_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("project_structure.txt");

        let err = write_report(&dir.path().join("missing"), &output, &pinned_config()).unwrap_err();
        assert!(matches!(err, ReportError::RootNotFound(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_existing_output_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();
        let output = dir.path().join("report.txt");
        fs::write(&output, "stale ".repeat(10_000)).unwrap();

        let stats = write_report(&root, &output, &pinned_config()).unwrap();
        let text = fs::read_to_string(&output).unwrap();
        assert!(!text.contains("stale"));
        assert!(text.contains("📁 root/\n\n===="));
        assert_eq!(stats, WalkStats::default());
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("no/such/dir/report.txt");
        let err = write_report(dir.path(), &output, &pinned_config()).unwrap_err();
        assert!(matches!(err, ReportError::Output { .. }));
    }
}
