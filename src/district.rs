use std::collections::HashMap;

use anyhow::{anyhow, Result};
use geo::{BooleanOps, Centroid, Geometry, GeometryCollection, MultiPolygon, Point};

use crate::feature::FeatureStore;

/// Dissolved outline of a district, or the undissolved fallback when the
/// union primitive rejects one of the member geometries.
#[derive(Debug, Clone)]
pub enum Boundary {
    /// Set-theoretic union of all member geometries.
    Union(MultiPolygon<f64>),
    /// Member geometries, unaltered and in input order.
    Collection(GeometryCollection<f64>),
}

impl Boundary {
    pub fn to_geometry(&self) -> Geometry<f64> {
        match self {
            Boundary::Union(mp) => Geometry::MultiPolygon(mp.clone()),
            Boundary::Collection(gc) => Geometry::GeometryCollection(gc.clone()),
        }
    }

    pub fn is_dissolved(&self) -> bool {
        matches!(self, Boundary::Union(_))
    }
}

/// One district: its member features (as store indices, in input order),
/// dissolved boundary, and centroid label point. The label point is skipped
/// when the boundary is the undissolved fallback.
#[derive(Debug, Clone)]
pub struct District {
    pub name: String,
    pub members: Vec<usize>,
    pub boundary: Boundary,
    pub label_point: Option<Point<f64>>,
}

/// All districts built from one feature load, in first-appearance order of
/// their names.
#[derive(Debug, Default)]
pub struct Districts {
    index: HashMap<String, usize>,
    districts: Vec<District>,
}

impl Districts {
    #[inline] pub fn len(&self) -> usize { self.districts.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.districts.is_empty() }

    pub fn get(&self, name: &str) -> Option<&District> {
        self.index.get(name).map(|&i| &self.districts[i])
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &District> {
        self.districts.iter()
    }
}

/// Group features by `district_name` and dissolve each group into one
/// boundary. Every feature lands in exactly one district; every district
/// name appearing in the input appears exactly once in the output.
///
/// Union failure is contained per district: that district keeps its member
/// geometries as a GeometryCollection and gets no label point.
pub fn aggregate(store: &FeatureStore) -> Districts {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (i, feature) in store.iter().enumerate() {
        let name = feature.district_name();
        let slot = *index.entry(name.clone()).or_insert_with(|| {
            groups.push((name, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(i);
    }

    let districts = groups
        .into_iter()
        .map(|(name, members)| match dissolve(store, &members) {
            Ok(boundary) => {
                let label_point = boundary.centroid();
                District { name, members, boundary: Boundary::Union(boundary), label_point }
            }
            Err(err) => {
                eprintln!("[district] union failed for {name:?}, keeping member geometries: {err}");
                let geometries = members.iter().map(|&i| store.get(i).geometry.clone()).collect();
                District {
                    name,
                    members,
                    boundary: Boundary::Collection(GeometryCollection(geometries)),
                    label_point: None,
                }
            }
        })
        .collect();

    Districts { index, districts }
}

/// Left-to-right union over the group's geometries, in input order. The
/// order only matters for determinism, but determinism matters.
fn dissolve(store: &FeatureStore, members: &[usize]) -> Result<MultiPolygon<f64>> {
    let mut shapes = members.iter().map(|&i| as_multi_polygon(&store.get(i).geometry));
    let first = shapes.next().ok_or_else(|| anyhow!("empty district group"))??;
    shapes.try_fold(first, |acc, shape| Ok(acc.union(&shape?)))
}

fn as_multi_polygon(geometry: &Geometry<f64>) -> Result<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(p) => Ok(MultiPolygon(vec![p.clone()])),
        Geometry::MultiPolygon(mp) => Ok(mp.clone()),
        other => Err(anyhow!("cannot union non-areal geometry ({})", geometry_kind(other))),
    }
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Point};
    use serde_json::{json, Map, Value};

    use crate::feature::Feature;

    use super::*;

    fn square(x: f64, y: f64, district: &str) -> Feature {
        let mut properties = Map::new();
        properties.insert("district_name".to_string(), Value::String(district.to_string()));
        Feature {
            geometry: Geometry::Polygon(polygon![
                (x: x, y: y),
                (x: x + 1.0, y: y),
                (x: x + 1.0, y: y + 1.0),
                (x: x, y: y + 1.0),
            ]),
            properties,
        }
    }

    fn point(district: &str) -> Feature {
        let mut properties = Map::new();
        properties.insert("district_name".to_string(), json!(district));
        Feature { geometry: Geometry::Point(Point::new(0.5, 0.5)), properties }
    }

    #[test]
    fn groups_preserve_first_appearance_order() {
        let store = FeatureStore::new(vec![
            square(0.0, 0.0, "B"),
            square(1.0, 0.0, "A"),
            square(2.0, 0.0, "B"),
        ]);
        let districts = aggregate(&store);
        let names: Vec<&str> = districts.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(districts.get("B").map(|d| d.members.clone()), Some(vec![0, 2]));
        assert_eq!(districts.get("A").map(|d| d.members.clone()), Some(vec![1]));
    }

    #[test]
    fn every_feature_lands_in_exactly_one_district() {
        let store = FeatureStore::new(vec![
            square(0.0, 0.0, "A"),
            square(1.0, 0.0, ""),
            square(2.0, 0.0, "A"),
        ]);
        let districts = aggregate(&store);
        let mut members: Vec<usize> = districts.iter().flat_map(|d| d.members.clone()).collect();
        members.sort_unstable();
        assert_eq!(members, vec![0, 1, 2]);
        // Missing/empty district_name is its own group.
        assert!(districts.get("").is_some());
    }

    #[test]
    fn adjacent_squares_dissolve_into_one_boundary() {
        let store = FeatureStore::new(vec![square(0.0, 0.0, "A"), square(1.0, 0.0, "A")]);
        let districts = aggregate(&store);
        let district = districts.get("A").unwrap();
        assert!(district.boundary.is_dissolved());

        let label = district.label_point.unwrap();
        assert!((label.x() - 1.0).abs() < 1e-9);
        assert!((label.y() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn union_failure_degrades_to_member_collection() {
        let store = FeatureStore::new(vec![square(0.0, 0.0, "A"), point("A")]);
        let districts = aggregate(&store);
        let district = districts.get("A").unwrap();
        match &district.boundary {
            Boundary::Collection(gc) => assert_eq!(gc.0.len(), 2),
            Boundary::Union(_) => panic!("expected fallback collection"),
        }
        assert!(district.label_point.is_none());
    }

    #[test]
    fn aggregation_is_deterministic() {
        let features = vec![square(0.0, 0.0, "A"), square(1.0, 0.0, "A"), square(0.0, 1.0, "A")];
        let store = FeatureStore::new(features.clone());
        let again = FeatureStore::new(features);

        let first = aggregate(&store);
        let second = aggregate(&again);
        let a = first.get("A").unwrap();
        let b = second.get("A").unwrap();
        match (&a.boundary, &b.boundary) {
            (Boundary::Union(x), Boundary::Union(y)) => assert_eq!(x, y),
            _ => panic!("expected dissolved boundaries"),
        }
        assert_eq!(a.label_point, b.label_point);
    }
}
