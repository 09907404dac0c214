//! Loading and writing demand tables
//!
//! Tables are column-per-entity with rows ordered by day. A `date` or `day`
//! column (any case) is treated as a row label and skipped.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use allocation_spi::{AllocationError, DemandTable, Result};
use serde_json::Value;
use tracing::debug;

fn is_label_column(name: &str) -> bool {
    let name = name.trim();
    name.eq_ignore_ascii_case("date") || name.eq_ignore_ascii_case("day")
}

fn csv_error(e: csv::Error) -> AllocationError {
    AllocationError::invalid(format!("failed to read CSV: {}", e))
}

/// Read a CSV table with a header row
pub fn read_csv<R: Read>(reader: R) -> Result<DemandTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();

    let columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !is_label_column(h))
        .map(|(i, h)| (i, h.trim().to_string()))
        .collect();
    if columns.is_empty() {
        return Err(AllocationError::invalid("CSV has no entity columns"));
    }

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        for ((idx, name), series) in columns.iter().zip(values.iter_mut()) {
            let cell = record.get(*idx).unwrap_or("").trim();
            let value = cell.parse::<f64>().map_err(|_| {
                AllocationError::invalid(format!(
                    "row {} column '{}': '{}' is not a number",
                    row + 1,
                    name,
                    cell
                ))
            })?;
            series.push(value);
        }
    }

    DemandTable::from_columns(columns.into_iter().map(|(_, name)| name).zip(values))
}

/// Read a JSON table.
///
/// Accepts either `{"A": [..], "B": [..]}` or an array of row objects
/// `[{"date": "..", "A": 1, "B": 2}, ..]`.
pub fn read_json<R: Read>(reader: R) -> Result<DemandTable> {
    let json: Value = serde_json::from_reader(reader)
        .map_err(|e| AllocationError::invalid(format!("failed to parse JSON: {}", e)))?;

    match json {
        Value::Object(map) => {
            let mut columns = Vec::new();
            for (name, column) in map {
                if is_label_column(&name) {
                    continue;
                }
                let cells = column.as_array().ok_or_else(|| {
                    AllocationError::invalid(format!("column '{}' is not an array", name))
                })?;
                let series = cells
                    .iter()
                    .enumerate()
                    .map(|(day, v)| number(v, &name, day))
                    .collect::<Result<Vec<f64>>>()?;
                columns.push((name, series));
            }
            DemandTable::from_columns(columns)
        }
        Value::Array(rows) => {
            let mut columns: Vec<(String, Vec<f64>)> = Vec::new();
            for (day, row) in rows.iter().enumerate() {
                let row = row.as_object().ok_or_else(|| {
                    AllocationError::invalid(format!("row {} is not an object", day))
                })?;
                for (name, v) in row {
                    if is_label_column(name) {
                        continue;
                    }
                    let value = number(v, name, day)?;
                    match columns.iter_mut().find(|(n, _)| n == name) {
                        Some((_, series)) => series.push(value),
                        None => columns.push((name.clone(), vec![value])),
                    }
                }
            }
            DemandTable::from_columns(columns)
        }
        _ => Err(AllocationError::invalid(
            "JSON table must be an object of columns or an array of rows",
        )),
    }
}

fn number(value: &Value, column: &str, day: usize) -> Result<f64> {
    value.as_f64().ok_or_else(|| {
        AllocationError::invalid(format!(
            "column '{}' day {}: {} is not a number",
            column, day, value
        ))
    })
}

/// Load a table from disk, choosing the format by extension.
///
/// Unknown extensions are tried as CSV first, then JSON. When neither parses,
/// the CSV error is reported.
pub fn load_path(path: &Path) -> Result<DemandTable> {
    let open = || {
        File::open(path).map(BufReader::new).map_err(|e| {
            AllocationError::invalid(format!("failed to open {}: {}", path.display(), e))
        })
    };

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let table = match ext.as_str() {
        "csv" => read_csv(open()?),
        "json" => read_json(open()?),
        _ => match read_csv(open()?) {
            Ok(table) => Ok(table),
            Err(csv_err) => read_json(open()?).map_err(|_| csv_err),
        },
    }?;

    debug!(
        path = %path.display(),
        entities = table.len(),
        days = table.days(),
        "loaded table"
    );
    Ok(table)
}

/// Write a table as CSV with a leading `day` column
pub fn write_csv<W: Write>(table: &DemandTable, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec!["day".to_string()];
    header.extend(table.entities().map(str::to_string));
    writer.write_record(&header).map_err(csv_error)?;

    let columns: Vec<&[f64]> = table.iter().map(|(_, series)| series).collect();
    for day in 0..table.days() {
        let mut record = vec![day.to_string()];
        record.extend(columns.iter().map(|series| series[day].to_string()));
        writer.write_record(&record).map_err(csv_error)?;
    }

    writer
        .flush()
        .map_err(|e| AllocationError::invalid(format!("failed to write CSV: {}", e)))
}
