//! Sample Files
//!
//! Input: decimal numbers separated by commas and/or newlines.
//! Output: one line per sample, five tab-separated columns
//! (raw, low-pass, high-pass, band-stop, band-pass).

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use tracing::debug;

use crate::bank::BankRow;
use crate::error::{CoreError, CoreResult};

/// Read every sample from a comma/newline-delimited source
///
/// Blank lines and empty fields (e.g. a trailing comma) are skipped.
pub fn read_samples<R: Read>(reader: R) -> CoreResult<Vec<f64>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        for field in record.iter().filter(|f| !f.is_empty()) {
            let value = field.parse::<f64>().map_err(|_| CoreError::InvalidSample {
                line,
                value: field.to_string(),
            })?;
            samples.push(value);
        }
    }

    Ok(samples)
}

/// Read every sample from the file at `path`
pub fn read_sample_file(path: &Path) -> CoreResult<Vec<f64>> {
    let file = File::open(path)?;
    let samples = read_samples(BufReader::new(file))?;
    debug!("Read {} samples from {:?}", samples.len(), path);
    Ok(samples)
}

/// Write bank rows as tab-separated lines
pub fn write_rows<W: Write>(writer: W, rows: &[BankRow]) -> CoreResult<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);

    for row in rows {
        wtr.write_record(row.columns().iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write bank rows to the file at `path`, replacing any existing file
pub fn write_row_file(path: &Path, rows: &[BankRow]) -> CoreResult<()> {
    let file = File::create(path)?;
    write_rows(file, rows)?;
    debug!("Wrote {} rows to {:?}", rows.len(), path);
    Ok(())
}

/// `dir/name.ext` becomes `dir/name_filtered.ext`
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}_filtered.{}", stem, ext.to_string_lossy()),
        None => format!("{}_filtered", stem),
    };
    input.with_file_name(name)
}
