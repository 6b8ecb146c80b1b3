use crate::error::{BridgeError, Result};
use crate::settings::{load_settings, save_settings, settings_path};
use crate::splitter::TextEncoding;

pub fn run(
    rows_per_file: Option<usize>,
    encoding: Option<String>,
    output_dir: Option<String>,
) -> Result<()> {
    let mut settings = load_settings();
    let changed = rows_per_file.is_some() || encoding.is_some() || output_dir.is_some();

    if let Some(n) = rows_per_file {
        if n == 0 {
            return Err(BridgeError::InvalidChunkSize);
        }
        settings.rows_per_file = n;
    }
    if let Some(label) = encoding {
        TextEncoding::from_label(&label)?;
        settings.encoding = label;
    }
    if let Some(dir) = output_dir {
        settings.output_dir = dir;
    }

    if changed {
        save_settings(&settings)?;
        println!("Saved {}", settings_path().display());
    }

    println!("Rows per file: {}", settings.rows_per_file);
    println!("Encoding:      {}", settings.encoding);
    println!("Output dir:    {}", settings.output_dir);
    Ok(())
}
