use anyhow::{bail, Result};

use crate::cli::{Cli, ConvertArgs};
use crate::convert::{convert, ConvertOptions};

pub fn run(cli: &Cli, args: &ConvertArgs) -> Result<()> {
    let (Some(input), Some(output)) = (&args.input, &args.output) else {
        eprintln!(
            "Usage: precinctmap convert <input_csv> <output_geojson> \
             [--geometry-column <name>] [--tolerance <t>] [--compress]"
        );
        bail!("convert requires input and output paths");
    };

    println!("[convert] reading {}", input.display());
    if args.tolerance > 0.0 {
        println!("[convert] simplifying geometry with tolerance {} (topological)", args.tolerance);
    }

    let report = convert(&ConvertOptions {
        input: input.clone(),
        output: output.clone(),
        geometry_column: args.geometry_column.clone(),
        tolerance: args.tolerance,
        compress: args.compress,
    })?;

    if cli.verbose > 0 {
        eprintln!(
            "[convert] rows={} features={} dropped={}",
            report.rows, report.features, report.dropped
        );
    }
    println!("[convert] wrote {} features to {}", report.features, output.display());
    Ok(())
}
