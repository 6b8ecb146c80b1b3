use std::path::Path;

use csv::ByteRecord;
use serde::Serialize;
use tracing::{info, warn};

use crate::amount::{is_income, sign_amount};
use crate::datetime::extract_date_time;
use crate::error::{BridgeError, Result};
use crate::table::{create_writer, memory_writer, open_reader};

// ---------------------------------------------------------------------------
// Schemas
// ---------------------------------------------------------------------------

/// Money Manager export columns, in the order `SourceTransaction` stores them.
pub const SOURCE_COLUMNS: [&str; 6] = [
    "Date",
    "Account",
    "Category",
    "Amount",
    "Income/Expense",
    "Description",
];

/// Beyond Budget import header, written verbatim regardless of input order.
pub const TARGET_HEADER: [&str; 7] = [
    "Date",
    "Payment Mode",
    "Category",
    "Amount",
    "Note",
    "Type",
    "Tag",
];

pub const TAG_MONEY_IN: &str = "Money In";
pub const TAG_MONEY_OUT: &str = "Money Out";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTransaction {
    pub date: String,
    pub account: String,
    pub category: String,
    pub amount: String,
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetTransaction {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Payment Mode")]
    pub payment_mode: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Note")]
    pub note: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Tag")]
    pub tag: String,
}

/// Positions of the source columns within the input header.
#[derive(Debug, Clone, Copy)]
struct SourceColumns([Option<usize>; 6]);

impl SourceColumns {
    fn resolve(header: &ByteRecord) -> Self {
        let names: Vec<&[u8]> = header
            .iter()
            .enumerate()
            .map(|(i, name)| match i {
                0 => name.strip_prefix(UTF8_BOM).unwrap_or(name),
                _ => name,
            })
            .collect();
        let mut positions = [None; 6];
        for (slot, column) in positions.iter_mut().zip(SOURCE_COLUMNS) {
            *slot = names.iter().position(|n| *n == column.as_bytes());
        }
        Self(positions)
    }
}

impl SourceTransaction {
    fn from_record(record: &ByteRecord, columns: &SourceColumns) -> Result<Self> {
        let mut fields = Vec::with_capacity(SOURCE_COLUMNS.len());
        for (position, name) in columns.0.iter().zip(SOURCE_COLUMNS) {
            let raw = position
                .and_then(|i| record.get(i))
                .ok_or_else(|| BridgeError::MissingField(name.to_string()))?;
            let text =
                std::str::from_utf8(raw).map_err(|_| BridgeError::InputType(name.to_string()))?;
            fields.push(text.to_string());
        }
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Ok(Self {
            date: next(),
            account: next(),
            category: next(),
            amount: next(),
            kind: next(),
            description: next(),
        })
    }
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

pub fn convert_row(row: &SourceTransaction) -> Result<TargetTransaction> {
    let (date, time) = extract_date_time(&row.date)?;
    let amount = sign_amount(&row.amount, &row.kind)?;
    // Tag keys off "income" while the sign keys off "expense"; an unknown
    // kind ends up unsigned and tagged Money Out.
    let tag = if is_income(&row.kind) {
        TAG_MONEY_IN
    } else {
        TAG_MONEY_OUT
    };
    Ok(TargetTransaction {
        date,
        payment_mode: row.account.clone(),
        category: row.category.clone(),
        amount,
        note: format!("Time: {time} \u{2014}\u{2014} {}", row.description),
        kind: row.kind.clone(),
        tag: tag.to_string(),
    })
}

// ---------------------------------------------------------------------------
// File conversion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub converted: usize,
    pub skipped: usize,
}

pub fn convert_file(input_path: &Path, output_path: &Path) -> Result<ConversionReport> {
    if !input_path.exists() {
        return Err(BridgeError::InputNotFound(input_path.to_path_buf()));
    }
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut rdr = open_reader(input_path, true)?;
    let columns = SourceColumns::resolve(rdr.byte_headers()?);

    let mut wtr = create_writer(output_path)?;
    wtr.write_record(TARGET_HEADER)?;

    let mut report = ConversionReport::default();
    for (i, result) in rdr.byte_records().enumerate() {
        let record = result?;
        let converted = SourceTransaction::from_record(&record, &columns)
            .and_then(|row| convert_row(&row));
        match converted {
            Ok(target) => {
                wtr.serialize(&target)?;
                report.converted += 1;
            }
            Err(e) if e.is_row_error() => {
                // Header is line 1.
                warn!(line = i + 2, row = %describe(&record), error = %e, "Error processing row, skipped");
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    wtr.flush()?;

    info!(
        input = %input_path.display(),
        output = %output_path.display(),
        converted = report.converted,
        skipped = report.skipped,
        "conversion finished"
    );
    Ok(report)
}

/// The row as a CSV line, quoted the same way it would be written.
fn describe(record: &ByteRecord) -> String {
    let mut wtr = memory_writer();
    if wtr.write_record(record).is_err() {
        return format!("{record:?}");
    }
    match wtr.into_inner() {
        Ok(bytes) => String::from_utf8_lossy(&bytes)
            .trim_end_matches(['\r', '\n'])
            .to_string(),
        Err(_) => format!("{record:?}"),
    }
}
