//! `fix-csv`: rewrite an export whose notes contain unquoted commas.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::load::repair_fields;

/// Outcome of one repair run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairStats {
    /// Data rows written
    pub rows: usize,
    /// Rows whose field count had to change
    pub repaired: usize,
}

/// Repair `input` into `output`. The input file is never modified.
pub fn repair_file(input: &Path, output: &Path) -> Result<RepairStats> {
    let reader = std::fs::File::open(input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let writer = std::fs::File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    let stats = repair(reader, writer)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        rows = stats.rows,
        repaired = stats.repaired,
        "Repaired CSV"
    );
    Ok(stats)
}

/// Every output row gets exactly the header's width: extra trailing fields
/// fold into the last column, short rows are padded with empty fields.
pub fn repair<R: Read, W: Write>(reader: R, writer: W) -> Result<RepairStats> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut wtr = csv::Writer::from_writer(writer);

    let mut rows = rdr.records();
    let header = match rows.next() {
        Some(header) => header.context("failed to read CSV header")?,
        None => {
            wtr.flush()?;
            return Ok(RepairStats {
                rows: 0,
                repaired: 0,
            });
        }
    };
    let width = header.len();
    wtr.write_record(&header)?;

    let mut stats = RepairStats {
        rows: 0,
        repaired: 0,
    };
    for (index, row) in rows.enumerate() {
        let row = row.with_context(|| format!("malformed CSV at data row {}", index + 1))?;
        let mut fields = repair_fields(&row, width);
        if fields.len() < width {
            fields.resize(width, String::new());
        }
        if row.len() != width {
            stats.repaired += 1;
        }
        wtr.write_record(&fields)?;
        stats.rows += 1;
    }

    wtr.flush()?;
    Ok(stats)
}
