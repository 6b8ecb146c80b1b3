use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{Reader, ReaderBuilder, Terminator, Writer, WriterBuilder};

use crate::error::Result;

/// Every CSV we write uses the spreadsheet dialect's CRLF record terminator.
pub const LINE_TERMINATOR: Terminator = Terminator::CRLF;

/// Open a CSV for reading. Rows may be ragged; callers decide what a short
/// row means.
pub fn open_reader(path: &Path, has_headers: bool) -> Result<Reader<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(BufReader::new(file)))
}

/// Create (or truncate) a CSV for writing. Headers are always written
/// explicitly by the caller.
pub fn create_writer(path: &Path) -> Result<Writer<File>> {
    let file = File::create(path)?;
    Ok(writer_builder().from_writer(file))
}

/// Same dialect as `create_writer`, collected in memory.
pub fn memory_writer() -> Writer<Vec<u8>> {
    writer_builder().from_writer(Vec::new())
}

fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .terminator(LINE_TERMINATOR);
    builder
}
