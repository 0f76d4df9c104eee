use crate::types::WalkStats;
use comfy_table::{Attribute, Cell, Color, Table};

#[must_use]
pub fn summary_table(stats: &WalkStats) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec![
        "Dossiers", "Fichiers", "Texte", "Binaire", "Tronqués", "Erreurs", "Taille",
    ]);

    table.add_row(vec![
        Cell::new(stats.directories),
        Cell::new(stats.files),
        Cell::new(stats.text_files),
        Cell::new(stats.binary_files),
        Cell::new(stats.truncated_files).fg(if stats.truncated_files > 0 {
            Color::Yellow
        } else {
            Color::White
        }),
        Cell::new(if stats.errors > 0 {
            format!("⚠️ {}", stats.errors)
        } else {
            stats.errors.to_string()
        })
        .fg(if stats.errors > 0 {
            Color::Red
        } else {
            Color::White
        })
        .add_attribute(Attribute::Bold),
        Cell::new(human_bytes::human_bytes(stats.total_bytes as f64)),
    ]);

    table
}

pub fn print_summary(stats: &WalkStats) {
    println!("{}", summary_table(stats));
}
