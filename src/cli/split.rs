use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::settings::{expand_home, load_settings};
use crate::splitter::split_into_chunks;

pub fn run(
    input: &str,
    output_dir: Option<String>,
    rows_per_file: Option<usize>,
    encoding: Option<String>,
) -> Result<()> {
    let settings = load_settings();
    let output_dir = expand_home(&output_dir.unwrap_or(settings.output_dir));
    let rows_per_file = rows_per_file.unwrap_or(settings.rows_per_file);
    let encoding = encoding.unwrap_or(settings.encoding);

    let report = split_into_chunks(Path::new(input), &output_dir, rows_per_file, &encoding);

    if !report.chunks.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Chunk", "File", "Rows"]);
        for chunk in &report.chunks {
            table.add_row(vec![
                Cell::new(chunk.index),
                Cell::new(chunk.path.display()),
                Cell::new(chunk.rows),
            ]);
        }
        println!("{table}");
    }

    // A failed split is reported, not turned into a non-zero exit.
    if report.is_success() {
        println!(
            "{} rows in {} files \u{2192} {}",
            report.total_rows(),
            report.chunks.len(),
            output_dir.display()
        );
    }
    if let Some(e) = &report.failure {
        eprintln!("{} {e}", "Split failed:".red().bold());
    }
    Ok(())
}
