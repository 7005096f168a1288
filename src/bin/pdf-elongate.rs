//! PDF Elongate CLI tool
//!
//! A command-line tool for adding top and bottom margins to PDF pages.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process;

use pdf_elongate::geometry::Margins;
use pdf_elongate::pdf::add_margins;

/// PDF Elongate - Add top and bottom margins to PDF pages
#[derive(Parser)]
#[command(name = "pdf-elongate")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Add one inch (72 points) of space above and below every page
    pdf-elongate notes.pdf

    # Two inches on top, half an inch below
    pdf-elongate notes.pdf --top 144 --bottom 36")]
struct Cli {
    /// Path to the input PDF file
    input_file: PathBuf,

    /// Top margin in points (72 points = 1 inch)
    #[arg(long, default_value_t = 72)]
    top: i64,

    /// Bottom margin in points (72 points = 1 inch)
    #[arg(long, default_value_t = 72)]
    bottom: i64,
}

fn main() {
    let cli = Cli::parse();

    // Check the input path before any parsing attempt
    if !cli.input_file.is_file() {
        println!("Error: Input file '{}' not found.", cli.input_file.display());
        process::exit(1);
    }

    if let Err(e) = cmd_elongate(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Add margins to the input PDF and report the created file
fn cmd_elongate(cli: &Cli) -> anyhow::Result<()> {
    let margins = Margins::new(cli.top, cli.bottom);

    let output = add_margins(&cli.input_file, &margins)
        .with_context(|| format!("failed to elongate {}", cli.input_file.display()))?;

    println!("Created elongated PDF: {}", output.display());

    Ok(())
}
