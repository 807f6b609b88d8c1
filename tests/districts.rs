// District summary and styled precinct exports, run end to end through the
// CLI command over a gzipped CSV input.

use std::fs;
use std::io::Write;

use clap::Parser;
use flate2::write::GzEncoder;
use flate2::Compression;
use geojson::{FeatureCollection, GeoJson};
use serde_json::{Map, Value};

use precinctmap::cli::{Cli, Commands};
use precinctmap::commands::districts;

// North dissolves into one boundary; South contains a point geometry, so
// its union fails and it keeps the undissolved fallback. Year 2025 exists
// in the data but no district records any 2025 ballots.
const CSV: &str = "\
precinct,district_name,redness_2024,ballots_2024,voters_2024,redness_2025,ballots_2025,geom_wkt
P-1,North,0.55,120,200,0.50,0,\"POLYGON ((0 0, 1 0, 1 1, 0 1, 0 0))\"
P-2,North,0.45,80,100,,0,\"POLYGON ((1 0, 2 0, 2 1, 1 1, 1 0))\"
P-3,South,0.70,50,,,,\"POLYGON ((3 0, 4 0, 4 1, 3 1, 3 0))\"
P-4,South,,,,,,POINT (3.5 0.5)
";

fn feature_collection(bytes: &[u8]) -> FeatureCollection {
    let geojson: GeoJson = serde_json::from_slice(bytes).unwrap();
    match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        other => panic!("expected FeatureCollection, got {other:?}"),
    }
}

fn properties_by<'a>(
    collection: &'a FeatureCollection,
    key: &str,
    value: &str,
) -> &'a Map<String, Value> {
    collection
        .features
        .iter()
        .filter_map(|f| f.properties.as_ref())
        .find(|p| p.get(key) == Some(&Value::String(value.to_string())))
        .unwrap_or_else(|| panic!("no feature with {key}={value}"))
}

/// Run the districts command over the fixture and return the boundary and
/// styled collections.
fn export() -> (FeatureCollection, FeatureCollection) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.csv.gz");
    let output = dir.path().join("districts.geojson");
    let styled = dir.path().join("styled.geojson");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(CSV.as_bytes()).unwrap();
    fs::write(&input, encoder.finish().unwrap()).unwrap();

    let cli = Cli::parse_from([
        "precinctmap",
        "districts",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--selection",
        "absolute:2024",
        "--styled",
        styled.to_str().unwrap(),
    ]);
    let Commands::Districts(args) = &cli.command else {
        panic!("expected districts command")
    };
    districts::run(&cli, args).unwrap();

    (
        feature_collection(&fs::read(&output).unwrap()),
        feature_collection(&fs::read(&styled).unwrap()),
    )
}

#[test]
fn summary_carries_aggregates_only_for_present_years() {
    let (boundaries, _) = export();
    assert_eq!(boundaries.features.len(), 2);

    let north = properties_by(&boundaries, "district_name", "North");
    // 2024 is present: (0.55*120 + 0.45*80) / 200 = 0.51, turnout 200/300.
    assert!((north["redness_2024"].as_f64().unwrap() - 0.51).abs() < 1e-12);
    assert!((north["turnout_2024"].as_f64().unwrap() - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(north["ballots_2024"], Value::from(200u64));
    // 2025 had zero ballots everywhere: absent, so the keys are omitted.
    assert!(!north.contains_key("redness_2025"));
    assert!(!north.contains_key("ballots_2025"));

    let stats = north["stats"].as_object().unwrap();
    assert!(stats.contains_key("2024"));
    assert!(!stats.contains_key("2025"));

    let south = properties_by(&boundaries, "district_name", "South");
    assert!((south["redness_2024"].as_f64().unwrap() - 0.70).abs() < 1e-12);
    // No member voters parsed, so turnout is absent too.
    assert!(!south.contains_key("turnout_2024"));
    assert!(!south["stats"].as_object().unwrap().contains_key("2025"));
}

#[test]
fn labels_and_boundaries_reflect_union_outcome() {
    let (boundaries, _) = export();

    let north = properties_by(&boundaries, "district_name", "North");
    // Dissolved: centroid of the 2x1 rectangle.
    assert!((north["label_lon"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert!((north["label_lat"].as_f64().unwrap() - 0.5).abs() < 1e-9);
    assert_eq!(north["fill"], Value::String("#f0f0f0".to_string()));
    assert_eq!(north["bucket"], Value::String("Neutral".to_string()));

    let south = properties_by(&boundaries, "district_name", "South");
    // Fallback district: no label point at all.
    assert!(!south.contains_key("label_lon"));
    assert!(!south.contains_key("label_lat"));

    for feature in &boundaries.features {
        let name = feature.properties.as_ref().unwrap()["district_name"].as_str().unwrap();
        let geometry = feature.geometry.as_ref().unwrap();
        match name {
            "North" => assert!(matches!(geometry.value, geojson::Value::MultiPolygon(_))),
            "South" => match &geometry.value {
                geojson::Value::GeometryCollection(parts) => assert_eq!(parts.len(), 2),
                other => panic!("expected GeometryCollection, got {other:?}"),
            },
            other => panic!("unexpected district {other}"),
        }
    }
}

#[test]
fn styled_precincts_carry_fill_only_when_stylable() {
    let (_, styled) = export();
    assert_eq!(styled.features.len(), 4);

    let p1 = properties_by(&styled, "precinct", "P-1");
    assert_eq!(p1["fill"], Value::String("#ffcccc".to_string())); // 0.55 -> LightRed
    let p2 = properties_by(&styled, "precinct", "P-2");
    assert_eq!(p2["fill"], Value::String("#ccccff".to_string())); // 0.45 -> LightBlue
    let p3 = properties_by(&styled, "precinct", "P-3");
    assert_eq!(p3["bucket"], Value::String("StrongRed".to_string()));

    // P-4 has no redness_2024: unstyled, so neither key is written.
    let p4 = properties_by(&styled, "precinct", "P-4");
    assert!(!p4.contains_key("fill"));
    assert!(!p4.contains_key("bucket"));
}
