mod classifier;
mod config;
mod content;
mod error;
mod format;
mod report;
mod scanner;
mod summary;
mod types;
mod walker;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use config::{DEFAULT_CONFIG_FILE, ReportConfig};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Analyse l'arborescence d'un projet", long_about = None)]
struct Args {
    /// Directory to analyse
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Report file, overwritten if it exists
    #[arg(long, short = 'o', default_value = "project_structure.txt")]
    output: PathBuf,

    /// Do not include file contents
    #[arg(long)]
    no_content: bool,

    /// KEY=VALUE overrides (SKIP_DIRS, MAX_CONTENT_CHARS, SAMPLE_BYTES).
    /// Defaults to ./.tree_report when present
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not print the summary table
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("{} {e:#}", "Erreur:".red());
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut config = ReportConfig {
        include_content: !args.no_content,
        ..ReportConfig::default()
    };
    match &args.config {
        Some(path) => config.load_overrides(path, true)?,
        None => config.load_overrides(Path::new(DEFAULT_CONFIG_FILE), false)?,
    }

    let root = report::resolve_root(&args.path)
        .with_context(|| format!("cannot resolve {}", args.path.display()))?;

    if root.exists() {
        println!("Analyse du dossier: {}", root.display());
        println!("Fichier de sortie: {}", args.output.display());
        println!("Analyse en cours...");
    }

    let stats = report::write_report(&root, &args.output, &config)?;

    if !args.quiet {
        summary::print_summary(&stats);
    }
    if stats.errors > 0 {
        println!(
            "{}",
            format!("{} dossier(s) illisible(s), voir le rapport.", stats.errors).yellow()
        );
    }

    let written = std::fs::metadata(&args.output).map_or(0, |m| m.len());
    println!(
        "{} Résultat sauvegardé dans: {} ({})",
        "Analyse terminée!".green(),
        args.output.display(),
        human_bytes::human_bytes(written as f64)
    );
    Ok(())
}
