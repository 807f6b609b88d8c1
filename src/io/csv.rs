//! CSV row decoding. Every column is read as a string (the source data
//! convention); numeric fields are parsed lazily at aggregation time.

use std::io::Cursor;

use anyhow::{anyhow, Context, Result};
use polars::{
    io::SerReader,
    prelude::{CsvReadOptions, CsvReader},
};
use serde_json::{Map, Value};

use crate::feature::Feature;
use crate::io::wkt::parse_wkt;

/// Read CSV bytes into per-row property maps.
pub(crate) fn read_rows(bytes: &[u8]) -> Result<Vec<Map<String, Value>>> {
    let options = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)); // force every column to String

    let df = CsvReader::new(Cursor::new(bytes))
        .with_options(options)
        .finish()
        .context("[io::csv] Failed to read CSV")?;

    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let values = column
            .str()
            .map_err(|e| anyhow!("[io::csv] Column {} is not a string column: {e}", column.name()))?;
        columns.push((column.name().to_string(), values));
    }

    let mut rows = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut properties = Map::new();
        for (name, values) in &columns {
            // Empty CSV cells come back as null and stay absent.
            if let Some(value) = values.get(row) {
                properties.insert(name.clone(), Value::String(value.to_string()));
            }
        }
        rows.push(properties);
    }
    Ok(rows)
}

/// Decode rows into features. The geometry column is parsed as WKT and
/// removed from the output properties. Rows without a geometry value are
/// skipped; rows whose WKT fails to parse are dropped with a warning and
/// counted in the returned drop count. One bad row never aborts the batch.
pub(crate) fn features_from_rows(
    rows: Vec<Map<String, Value>>,
    geometry_column: &str,
) -> (Vec<Feature>, usize) {
    let mut features = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for mut properties in rows {
        let Some(raw) = properties.remove(geometry_column) else { continue };
        let wkt = match &raw {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if wkt.trim().is_empty() {
            continue;
        }
        match parse_wkt(&wkt) {
            Ok(geometry) => features.push(Feature { geometry, properties }),
            Err(err) => {
                dropped += 1;
                eprintln!("[io::csv] Dropping row with unparsable geometry: {err}");
            }
        }
    }

    (features, dropped)
}
