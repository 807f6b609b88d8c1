//! GeoJSON FeatureCollection encoding and decoding at the geo↔geojson
//! boundary.

use anyhow::{anyhow, bail, Context, Result};
use geo::Geometry;
use geojson::{FeatureCollection, GeoJson};
use serde_json::{Map, Value};

use crate::feature::Feature;

/// Decode a GeoJSON FeatureCollection into features. Features without a
/// geometry are skipped.
pub(crate) fn read_feature_collection(bytes: &[u8]) -> Result<Vec<Feature>> {
    let geojson: GeoJson =
        serde_json::from_slice(bytes).context("[io::geojson] Failed to parse GeoJSON")?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        bail!("[io::geojson] Expected a FeatureCollection");
    };

    let mut features = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let Some(geometry) = feature.geometry else { continue };
        let geometry = Geometry::<f64>::try_from(geometry.value)
            .map_err(|e| anyhow!("[io::geojson] Unsupported geometry: {e}"))?;
        features.push(Feature {
            geometry,
            properties: feature.properties.unwrap_or_default(),
        });
    }
    Ok(features)
}

/// Encode (geometry, properties) pairs as a FeatureCollection.
pub(crate) fn write_feature_collection(
    features: impl Iterator<Item = (Geometry<f64>, Map<String, Value>)>,
) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: features
            .map(|(geometry, properties)| geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(&geometry))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            })
            .collect(),
        foreign_members: None,
    }
}
