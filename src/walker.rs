//! Depth-first rendering of a directory tree.
//!
//! The walk keeps its own stack of open directories instead of recursing, so
//! the depth of the tree is bounded by memory rather than the call stack. The
//! output is the same pre-order a recursive walk would produce:
//!
//! ```text
//! ├── 📁 src/
//! │   └── 📄 main.rs [1.2KB - 2024-07-29 10:00:00]
//! │       ┌─ CONTENU:
//! │       │  fn main() {}
//! │       └─ FIN DU CONTENU
//! │
//! └── 📄 logo.png [3.4KB - 2024-07-29 10:00:00]
//!     └─ [FICHIER BINAIRE - Contenu non affiché]
//! ```

use crate::config::ReportConfig;
use crate::format::file_info;
use crate::scanner::{inspect_file, list_directory};
use crate::types::{DirectoryEntry, DirectoryKind, Entry, FileEntry, RenderContext, WalkStats};
use std::io::{self, ErrorKind, Write};
use std::path::Path;

/// A directory whose children are still being rendered.
struct Frame {
    entries: Vec<Entry>,
    next: usize,
    ctx: RenderContext,
}

/// Writes the tree body below `root` to `out`.
///
/// Listing errors are rendered inline and counted; only write errors on `out`
/// are returned.
pub fn walk_tree<W: Write>(
    root: &Path,
    out: &mut W,
    config: &ReportConfig,
) -> io::Result<WalkStats> {
    let mut stats = WalkStats::default();
    let root_frame = open_directory(root, RenderContext::default(), out, config, &mut stats)?;
    render_stack(root_frame.into_iter().collect(), out, config, &mut stats)?;
    Ok(stats)
}

/// Drains `stack` in pre-order, pushing each sub-directory as it is reached.
fn render_stack<W: Write>(
    mut stack: Vec<Frame>,
    out: &mut W,
    config: &ReportConfig,
    stats: &mut WalkStats,
) -> io::Result<()> {
    while let Some(frame) = stack.last_mut() {
        if frame.next >= frame.entries.len() {
            stack.pop();
            continue;
        }

        let is_last = frame.next == frame.entries.len() - 1;
        let entry = frame.entries[frame.next].clone();
        frame.next += 1;
        let ctx = frame.ctx.clone();
        let child_ctx = ctx.child(is_last);
        let branch = RenderContext::branch(is_last);

        match entry {
            Entry::Directory(dir) => {
                stats.directories += 1;
                writeln!(out, "{}{}📁 {}/", ctx.prefix, branch, dir.name)?;
                if let Some(child) = enter_directory(&dir, child_ctx, out, config, stats)? {
                    stack.push(child);
                }
            }
            Entry::File(path, name) => {
                let file = inspect_file(&path, &name, config);
                writeln!(
                    out,
                    "{}{}📄 {} {}",
                    ctx.prefix,
                    branch,
                    file.name,
                    file_info(file.size, file.modified.as_ref())
                )?;
                write_file_body(&file, &child_ctx, out, stats)?;
            }
        }
    }

    Ok(())
}

fn enter_directory<W: Write>(
    dir: &DirectoryEntry,
    ctx: RenderContext,
    out: &mut W,
    config: &ReportConfig,
    stats: &mut WalkStats,
) -> io::Result<Option<Frame>> {
    if dir.kind == DirectoryKind::Symlink {
        log::debug!("not following symlinked directory {}", dir.path.display());
        writeln!(out, "{}└── [LIEN SYMBOLIQUE - non parcouru]", ctx.prefix)?;
        return Ok(None);
    }
    open_directory(&dir.path, ctx, out, config, stats)
}

/// Lists `path`, or renders the listing error in place of its children.
fn open_directory<W: Write>(
    path: &Path,
    ctx: RenderContext,
    out: &mut W,
    config: &ReportConfig,
    stats: &mut WalkStats,
) -> io::Result<Option<Frame>> {
    match list_directory(path, config) {
        Ok(entries) => Ok(Some(Frame {
            entries,
            next: 0,
            ctx,
        })),
        Err(e) => {
            log::warn!("cannot list {}: {e}", path.display());
            stats.errors += 1;
            writeln!(out, "{}└── {}", ctx.prefix, listing_error_marker(&e))?;
            Ok(None)
        }
    }
}

fn listing_error_marker(err: &io::Error) -> String {
    if err.kind() == ErrorKind::PermissionDenied {
        "[ERREUR: Permission refusée]".to_string()
    } else {
        format!("[ERREUR: {err}]")
    }
}

fn write_file_body<W: Write>(
    file: &FileEntry,
    ctx: &RenderContext,
    out: &mut W,
    stats: &mut WalkStats,
) -> io::Result<()> {
    stats.files += 1;
    stats.total_bytes += file.size.unwrap_or(0);

    match &file.content {
        Some(content) if file.is_text => {
            stats.text_files += 1;
            if content.truncated {
                log::debug!("{} truncated", file.path.display());
                stats.truncated_files += 1;
            }
            writeln!(out, "{}┌─ CONTENU:", ctx.prefix)?;
            for line in content.text.split('\n') {
                writeln!(out, "{}│  {}", ctx.prefix, line)?;
            }
            writeln!(out, "{}└─ FIN DU CONTENU", ctx.prefix)?;
        }
        _ => {
            stats.binary_files += 1;
            writeln!(out, "{}└─ [FICHIER BINAIRE - Contenu non affiché]", ctx.prefix)?;
        }
    }
    writeln!(out)
}
