use std::borrow::Cow;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{Encoding, UTF_8};
use tracing::{error, info};

use crate::error::{BridgeError, Result};
use crate::table::memory_writer;

pub const DEFAULT_ROWS_PER_FILE: usize = 110;
pub const DEFAULT_ENCODING: &str = "utf-8";
pub const DEFAULT_OUTPUT_DIR: &str = "./processed";

/// Written for a blank source line, matching `table::LINE_TERMINATOR`.
const BLANK_LINE: &[u8] = b"\r\n";

/// Codec used to read the input and write every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    /// Resolve a label such as `utf-8`, `latin-1` or `cp1252`. Python-style
    /// spellings (`utf_8`, `latin-1`, `u8`) are accepted alongside the WHATWG
    /// labels. Codecs that cannot be written back (UTF-16) are rejected.
    pub fn from_label(label: &str) -> Result<Self> {
        let trimmed = label.trim();
        let spellings = [
            trimmed.to_string(),
            trimmed.replace('_', "-"),
            trimmed.replace(['-', '_'], ""),
        ];
        let encoding = spellings
            .iter()
            .find_map(|s| Encoding::for_label(s.as_bytes()))
            .or_else(|| trimmed.eq_ignore_ascii_case("u8").then_some(UTF_8))
            .ok_or_else(|| BridgeError::UnsupportedEncoding(label.to_string()))?;
        if encoding.output_encoding() != encoding {
            return Err(BridgeError::UnsupportedEncoding(label.to_string()));
        }
        Ok(Self(encoding))
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Strict decode: malformed input is an error, never replaced.
    pub fn decode(&self, bytes: &[u8], path: &Path) -> Result<String> {
        self.0
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(Cow::into_owned)
            .ok_or_else(|| BridgeError::Decode {
                path: path.display().to_string(),
                encoding: self.name().to_string(),
            })
    }

    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        let (bytes, _, unmappable) = self.0.encode(text);
        if unmappable {
            return Err(BridgeError::Encode(self.name().to_string()));
        }
        Ok(bytes.into_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenChunk {
    pub index: usize,
    pub path: PathBuf,
    pub rows: usize,
}

/// Outcome of a split. A failure is reported here instead of being returned
/// as an error; chunks written before it stay on disk.
#[derive(Debug, Default)]
pub struct SplitReport {
    pub chunks: Vec<WrittenChunk>,
    pub failure: Option<BridgeError>,
}

impl SplitReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn total_rows(&self) -> usize {
        self.chunks.iter().map(|c| c.rows).sum()
    }
}

/// 1-based: the first file is `chunk_1.csv`.
pub fn chunk_file_name(index: usize) -> String {
    format!("chunk_{index}.csv")
}

pub fn split_into_chunks(
    input_path: &Path,
    output_dir: &Path,
    rows_per_file: usize,
    encoding: &str,
) -> SplitReport {
    let mut report = SplitReport::default();
    if let Err(e) = write_chunks(input_path, output_dir, rows_per_file, encoding, &mut report.chunks) {
        error!(input = %input_path.display(), error = %e, "split failed");
        report.failure = Some(e);
    }
    report
}

fn write_chunks(
    input_path: &Path,
    output_dir: &Path,
    rows_per_file: usize,
    encoding: &str,
    written: &mut Vec<WrittenChunk>,
) -> Result<()> {
    let encoding = TextEncoding::from_label(encoding)?;
    if rows_per_file == 0 {
        return Err(BridgeError::InvalidChunkSize);
    }
    std::fs::create_dir_all(output_dir)?;

    let (header, rows) = read_table(input_path, encoding)?;

    for (i, window) in rows.chunks(rows_per_file).enumerate() {
        let index = i + 1;
        let path = output_dir.join(chunk_file_name(index));
        let text = render_chunk(&header, window)?;
        std::fs::write(&path, encoding.encode(&text)?)?;
        info!("Wrote {} with {} rows", path.display(), window.len());
        written.push(WrittenChunk {
            index,
            path,
            rows: window.len(),
        });
    }
    Ok(())
}

fn read_table(input_path: &Path, encoding: TextEncoding) -> Result<(StringRecord, Vec<StringRecord>)> {
    let bytes = std::fs::read(input_path)?;
    let text = encoding.decode(&bytes, input_path)?;
    let mut records = physical_records(&text).into_iter().map(parse_record);
    let header = records
        .next()
        .transpose()?
        .ok_or_else(|| BridgeError::EmptyInput(input_path.to_path_buf()))?;
    let rows = records.collect::<Result<Vec<_>>>()?;
    Ok((header, rows))
}

/// Split text into physical CSV records on newlines outside quotes. Unlike
/// `csv::Reader`, a blank line survives as an empty record.
fn physical_records(text: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (i, b) in text.bytes().enumerate() {
        match b {
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => {
                let line = &text[start..i];
                records.push(line.strip_suffix('\r').unwrap_or(line));
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < text.len() {
        records.push(&text[start..]);
    }
    records
}

fn parse_record(line: &str) -> Result<StringRecord> {
    if line.is_empty() {
        return Ok(StringRecord::new());
    }
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let record = rdr.records().next().transpose()?;
    Ok(record.unwrap_or_default())
}

fn render_chunk(header: &StringRecord, rows: &[StringRecord]) -> Result<String> {
    let into_bytes = |w: csv::Writer<Vec<u8>>| {
        w.into_inner()
            .map_err(|e| BridgeError::Io(std::io::Error::new(e.error().kind(), e.error().to_string())))
    };
    let mut bytes = Vec::new();
    let mut wtr = memory_writer();
    for record in std::iter::once(header).chain(rows) {
        if record.is_empty() {
            wtr.flush()?;
            bytes.extend(into_bytes(std::mem::replace(&mut wtr, memory_writer()))?);
            bytes.extend_from_slice(BLANK_LINE);
        } else {
            wtr.write_record(record)?;
        }
    }
    bytes.extend(into_bytes(wtr)?);
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
