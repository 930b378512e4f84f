use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use mdwiki_core::convert::{ConvertReport, convert};
use mdwiki_core::filesystem::display_path;
use mdwiki_core::runtime::{ConvertConfig, RuntimeOverrides, resolve_runtime};

#[derive(Debug, Parser)]
#[command(
    name = "mdwiki",
    version,
    about = "Flatten a Markdown documentation tree into wiki pages plus a generated sidebar"
)]
struct Cli {
    #[arg(value_name = "REPO_DIR", help = "Directory containing the Markdown sources")]
    repo_dir: PathBuf,
    #[arg(value_name = "WIKI_DIR", help = "Existing directory that receives the wiki pages")]
    wiki_dir: PathBuf,
    #[arg(long, value_name = "PATH", help = "Sidebar settings file (TOML)")]
    config: Option<PathBuf>,
    #[arg(long, help = "Print resolved runtime diagnostics")]
    diagnostics: bool,
    #[arg(short, long, help = "Do not print a line per copied page")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let config = resolve_runtime(&RuntimeOverrides {
        input_dir: Some(cli.repo_dir),
        output_dir: Some(cli.wiki_dir),
        config: cli.config,
    })?;
    if cli.diagnostics {
        println!("[diagnostics]\n{}\n", config.diagnostics());
    }

    let report = convert(&config, |entry| {
        if !cli.quiet {
            println!("- {}", display_path(&entry.destination));
        }
    })?;

    print_warnings(&report);
    if cli.diagnostics {
        print_summary(&config, &report);
    }
    Ok(())
}

fn print_warnings(report: &ConvertReport) {
    if report.warnings.is_empty() {
        return;
    }
    eprintln!("warnings:");
    for warning in &report.warnings {
        eprintln!("  - {warning}");
    }
}

fn print_summary(config: &ConvertConfig, report: &ConvertReport) {
    eprintln!("convert summary");
    eprintln!("input_dir: {}", display_path(&config.input_dir));
    eprintln!("output_dir: {}", display_path(&config.output_dir));
    eprintln!("pages_copied: {}", report.copied.len());
    eprintln!("sidebar_path: {}", display_path(&report.sidebar_path));
    eprintln!("sidebar_entries: {}", report.sidebar_entries);
    eprintln!("collisions: {}", report.warnings.len());
}
