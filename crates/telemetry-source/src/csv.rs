//! Header-driven CSV parsing into validated rows

use crate::{SourceError, TelemetryBatch};
use telemetry_validator::{Field, RawTelemetryRow, Validator};
use tracing::{debug, warn};

/// Parse a CSV feed. Rows that fail validation are dropped and counted.
pub fn parse_csv(text: &str, validator: &Validator) -> Result<TelemetryBatch, SourceError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().ok_or(SourceError::EmptyHeader)?;
    let columns: Vec<Option<Field>> = split_line(header).map(Field::from_column).collect();

    let unmapped = columns.iter().filter(|c| c.is_none()).count();
    if unmapped > 0 {
        debug!("Ignoring {} unrecognised feed columns", unmapped);
    }

    let mut rows = Vec::new();
    let mut rejected = 0;

    for (index, line) in lines {
        let cells: Vec<&str> = split_line(line).collect();
        if cells.len() != columns.len() {
            warn!(
                "Line {}: expected {} cells, got {}",
                index + 1,
                columns.len(),
                cells.len()
            );
            rejected += 1;
            continue;
        }

        let mut raw = RawTelemetryRow::new();
        for (column, cell) in columns.iter().zip(cells) {
            if let Some(field) = column {
                raw.set(*field, cell);
            }
        }

        match validator.resolve(&raw) {
            Ok(row) => rows.push(row),
            Err(e) => {
                warn!("Line {}: rejected: {}", index + 1, e);
                rejected += 1;
            }
        }
    }

    debug!("Parsed {} rows ({} rejected)", rows.len(), rejected);
    Ok(TelemetryBatch::new(rows, rejected))
}

/// Split on commas outside double-quoted spans
fn split_line(line: &str) -> impl Iterator<Item = &str> {
    let mut cells = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (i, b) in line.bytes().enumerate() {
        match b {
            b'"' => quoted = !quoted,
            b',' if !quoted => {
                cells.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    cells.push(&line[start..]);
    cells.into_iter().map(|cell| cell.trim().trim_matches('"'))
}
