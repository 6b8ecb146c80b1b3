use std::path::Path;

use colored::Colorize;

use crate::converter::convert_file;
use crate::error::Result;

pub fn run(input: &str, output: &str) -> Result<()> {
    let report = convert_file(Path::new(input), Path::new(output))?;

    let skipped = if report.skipped > 0 {
        format!("{} skipped", report.skipped).yellow().to_string()
    } else {
        "0 skipped".to_string()
    };
    println!(
        "{} converted, {skipped} \u{2192} {output}",
        report.converted.to_string().green()
    );
    Ok(())
}
