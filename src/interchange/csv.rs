//! Three-column credential CSV
//!
//! `URL,Username,Password`, comma separated, RFC 4180 quoting. Columns are
//! mapped by position; the header row is required but its text is not
//! checked.

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, Writer};

use crate::error::{VaultError, VaultResult};
use crate::models::CredentialDto;

/// Header row written on export
pub const CSV_HEADER: [&str; 3] = ["URL", "Username", "Password"];

const COLUMNS: usize = 3;

/// Encode credentials as CSV bytes, header first, in input order
pub fn encode(records: &[CredentialDto]) -> VaultResult<Vec<u8>> {
    let mut buffer = Vec::new();
    encode_to(&mut buffer, records)?;
    Ok(buffer)
}

/// Stream credentials as CSV into `writer`
pub fn encode_to<W: Write>(writer: W, records: &[CredentialDto]) -> VaultResult<()> {
    let mut csv_writer = Writer::from_writer(writer);

    csv_writer.write_record(CSV_HEADER).map_err(write_error)?;
    for record in records {
        csv_writer
            .write_record([&record.url, &record.username, &record.password])
            .map_err(write_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| VaultError::Io(format!("Failed to write CSV: {}", e)))
}

/// Decode CSV rows into credentials
///
/// The first row is the header. Every following row must have three
/// columns, optionally followed by empty ones; the first offending row fails
/// the whole decode with its 1-based line number (the header is line 1).
pub fn decode<R: Read>(reader: R) -> VaultResult<Vec<CredentialDto>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();

    for (index, result) in csv_reader.records().enumerate() {
        // Header is line 1, so the first data row is line 2 unless quoted
        // newlines push it further down
        let fallback_line = index as u64 + 2;

        let record = result.map_err(|e| read_error(e, fallback_line))?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(fallback_line);

        records.push(to_dto(&record, line)?);
    }

    Ok(records)
}

fn to_dto(record: &StringRecord, line: u64) -> VaultResult<CredentialDto> {
    // Trailing empty columns (`,,,`) are tolerated; anything else is not
    let extra_has_data = record.iter().skip(COLUMNS).any(|field| !field.is_empty());
    if record.len() < COLUMNS || extra_has_data {
        return Err(VaultError::MalformedRecord {
            row: line,
            reason: format!("expected {} columns, found {}", COLUMNS, record.len()),
        });
    }

    Ok(CredentialDto::new(&record[0], &record[1], &record[2]))
}

fn read_error(error: csv::Error, fallback_line: u64) -> VaultError {
    if let csv::ErrorKind::Io(io) = error.kind() {
        return VaultError::Io(format!("Failed to read CSV: {}", io));
    }

    let row = error.position().map(|p| p.line()).unwrap_or(fallback_line);
    VaultError::MalformedRecord {
        row,
        reason: error.to_string(),
    }
}

fn write_error(error: csv::Error) -> VaultError {
    VaultError::Io(format!("Failed to write CSV: {}", error))
}
