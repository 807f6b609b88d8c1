//! WKT decoding into geo geometries.

use anyhow::{anyhow, Result};
use geo::Geometry;

/// Parse a WKT string into a geo geometry.
pub(crate) fn parse_wkt(input: &str) -> Result<Geometry<f64>> {
    let parsed: wkt::Wkt<f64> = input
        .parse()
        .map_err(|e| anyhow!("[io::wkt] Failed to parse WKT: {e}"))?;
    Geometry::try_from(parsed).map_err(|e| anyhow!("[io::wkt] Unsupported WKT geometry: {e}"))
}
