//! CSV-with-WKT to GeoJSON conversion.

use std::path::PathBuf;

use anyhow::{Context, Result};
use geo::{Geometry, SimplifyVwPreserve};

use crate::io;

pub const DEFAULT_GEOMETRY_COLUMN: &str = "geom_wkt";

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Input CSV path; `.gz` inputs are decompressed transparently.
    pub input: PathBuf,
    /// Output GeoJSON path; `.gz` outputs are compressed.
    pub output: PathBuf,
    /// Name of the column holding WKT geometry.
    pub geometry_column: String,
    /// Topology-preserving simplification tolerance; 0 disables.
    pub tolerance: f64,
    /// Gzip the output even without a `.gz` extension.
    pub compress: bool,
}

impl ConvertOptions {
    pub fn new(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output,
            geometry_column: DEFAULT_GEOMETRY_COLUMN.to_string(),
            tolerance: 0.0,
            compress: false,
        }
    }
}

/// Outcome counters for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertReport {
    /// Data rows read from the CSV.
    pub rows: usize,
    /// Features written to the output.
    pub features: usize,
    /// Rows dropped because their WKT failed to parse.
    pub dropped: usize,
}

/// Convert a CSV file with a WKT geometry column into a GeoJSON
/// FeatureCollection. The geometry column is removed from the output
/// properties; rows with unparsable WKT are dropped with a warning, never
/// aborting the batch.
pub fn convert(options: &ConvertOptions) -> Result<ConvertReport> {
    let bytes = io::read_maybe_gzip(&options.input)?;
    let rows = io::csv::read_rows(&bytes)
        .with_context(|| format!("[convert] Failed to parse {}", options.input.display()))?;
    let row_count = rows.len();

    let (mut features, dropped) = io::csv::features_from_rows(rows, &options.geometry_column);

    if options.tolerance > 0.0 {
        for feature in &mut features {
            feature.geometry = simplify(&feature.geometry, options.tolerance);
        }
    }

    let feature_count = features.len();
    let collection = io::geojson::write_feature_collection(
        features.into_iter().map(|f| (f.geometry, f.properties)),
    );

    // Match the source convention: compact when compressed, pretty otherwise.
    let compress = options.compress || io::is_gzip_path(&options.output);
    let json = if compress {
        serde_json::to_vec(&collection)
    } else {
        serde_json::to_vec_pretty(&collection)
    }
    .context("[convert] Failed to serialize GeoJSON")?;
    io::write_maybe_gzip(&options.output, &json, options.compress)?;

    Ok(ConvertReport { rows: row_count, features: feature_count, dropped })
}

/// Topology-preserving simplification for linear and areal geometries;
/// everything else passes through untouched.
fn simplify(geometry: &Geometry<f64>, tolerance: f64) -> Geometry<f64> {
    match geometry {
        Geometry::Polygon(p) => Geometry::Polygon(p.simplify_vw_preserve(&tolerance)),
        Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(mp.simplify_vw_preserve(&tolerance)),
        Geometry::LineString(ls) => Geometry::LineString(ls.simplify_vw_preserve(&tolerance)),
        Geometry::MultiLineString(mls) => {
            Geometry::MultiLineString(mls.simplify_vw_preserve(&tolerance))
        }
        other => other.clone(),
    }
}
