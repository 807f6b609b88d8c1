use anyhow::{Context, Result};
use serde_json::{json, Map, Value};

use crate::cli::{Cli, DistrictsArgs};
use crate::district::aggregate;
use crate::io;
use crate::style::{district_style, precinct_style, Selection, Style};

pub fn run(cli: &Cli, args: &DistrictsArgs) -> Result<()> {
    let selection: Selection = args
        .selection
        .parse()
        .with_context(|| format!("[districts] Bad selection {:?}", args.selection))?;

    println!("[districts] loading features from {}", args.input.display());
    let store = io::load_features(&args.input, &args.geometry_column)?;
    println!("[districts] aggregating {} features for {selection}", store.len());

    let districts = aggregate(&store);
    let years = store.years();

    let mut boundary_features = Vec::with_capacity(districts.len());
    for district in districts.iter() {
        if cli.verbose > 0 {
            eprintln!(
                "[districts] {:?}: {} precincts, dissolved={}",
                district.name,
                district.members.len(),
                district.boundary.is_dissolved()
            );
        }

        let mut properties = Map::new();
        properties.insert("district_name".to_string(), Value::String(district.name.clone()));
        if let Some(point) = district.label_point {
            properties.insert("label_lon".to_string(), json!(point.x()));
            properties.insert("label_lat".to_string(), json!(point.y()));
        }

        // Flat per-year properties follow the precinct naming convention;
        // absent aggregates are omitted (both here and in the nested stats
        // object), never written as zero or null.
        let mut stats = Map::new();
        for &year in &years {
            if let Some(stat) = district.year_stats(&store, year) {
                if let Some(redness) = stat.redness {
                    properties.insert(format!("redness_{year}"), json!(redness));
                }
                if let Some(turnout) = stat.turnout {
                    properties.insert(format!("turnout_{year}"), json!(turnout));
                }
                properties.insert(format!("ballots_{year}"), json!(stat.ballots));
                properties.insert(format!("voters_{year}"), json!(stat.voters));
                stats.insert(year.to_string(), serde_json::to_value(stat)?);
            }
        }
        properties.insert("stats".to_string(), Value::Object(stats));

        if let Style::Fill(bucket) = district_style(district, &store, selection) {
            properties.insert("bucket".to_string(), json!(bucket));
            properties.insert("fill".to_string(), Value::String(bucket.color().to_string()));
        }

        boundary_features.push((district.boundary.to_geometry(), properties));
    }

    let collection = io::geojson::write_feature_collection(boundary_features.into_iter());
    let bytes = serde_json::to_vec_pretty(&collection)
        .context("[districts] Failed to serialize boundaries")?;
    io::write_maybe_gzip(&args.output, &bytes, false)?;
    println!(
        "[districts] wrote {} district boundaries to {}",
        districts.len(),
        args.output.display()
    );

    if let Some(styled_path) = &args.styled {
        let styled = store.iter().map(|feature| {
            let mut properties = feature.properties.clone();
            if let Style::Fill(bucket) = precinct_style(feature, selection) {
                properties.insert("bucket".to_string(), json!(bucket));
                properties.insert("fill".to_string(), Value::String(bucket.color().to_string()));
            }
            (feature.geometry.clone(), properties)
        });
        let collection = io::geojson::write_feature_collection(styled);
        let bytes = serde_json::to_vec_pretty(&collection)
            .context("[districts] Failed to serialize styled precincts")?;
        io::write_maybe_gzip(styled_path, &bytes, false)?;
        println!("[districts] wrote {} styled precincts to {}", store.len(), styled_path.display());
    }

    Ok(())
}
