//! File-format boundary: gzip-transparent byte IO plus CSV, WKT, and
//! GeoJSON codecs. Everything beyond this module works on parsed features.

pub(crate) mod csv;
pub(crate) mod geojson;
pub(crate) mod wkt;

use std::{
    fs,
    io::{Read, Write},
    path::Path,
};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::feature::FeatureStore;

/// Load features from a CSV(.gz) with a WKT geometry column, or from a
/// GeoJSON(.gz) FeatureCollection, picking the reader from the file name.
pub fn load_features(path: &Path, geometry_column: &str) -> Result<FeatureStore> {
    let bytes = read_maybe_gzip(path)?;
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let stem = name.strip_suffix(".gz").unwrap_or(name);

    let features = if stem.ends_with(".csv") {
        let rows = csv::read_rows(&bytes)?;
        let (features, _dropped) = csv::features_from_rows(rows, geometry_column);
        features
    } else {
        geojson::read_feature_collection(&bytes)?
    };
    Ok(FeatureStore::new(features))
}

/// Read a file, transparently gunzipping when the name ends in `.gz`.
pub(crate) fn read_maybe_gzip(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path)
        .with_context(|| format!("[io] Failed to read {}", path.display()))?;
    if is_gzip_path(path) {
        let mut decoder = GzDecoder::new(&data[..]);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .with_context(|| format!("[io] Failed to decompress {}", path.display()))?;
        Ok(decompressed)
    } else {
        Ok(data)
    }
}

/// Write a file, gzipping when requested or when the name ends in `.gz`.
pub(crate) fn write_maybe_gzip(path: &Path, bytes: &[u8], compress: bool) -> Result<()> {
    if compress || is_gzip_path(path) {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(bytes)
            .context("[io] Failed to compress output")?;
        let compressed = encoder
            .finish()
            .context("[io] Failed to finish compression")?;
        fs::write(path, compressed)
            .with_context(|| format!("[io] Failed to write {}", path.display()))
    } else {
        fs::write(path, bytes)
            .with_context(|| format!("[io] Failed to write {}", path.display()))
    }
}

pub(crate) fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
