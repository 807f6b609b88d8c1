use std::path::PathBuf;

/// Election map CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "precinctmap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Convert a CSV with a WKT column into a GeoJSON FeatureCollection
    Convert(ConvertArgs),

    /// Aggregate precinct features into district boundaries and statistics
    Districts(DistrictsArgs),
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Input CSV file (.csv or .csv.gz)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output GeoJSON file (.geojson or .geojson.gz)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Name of the column containing WKT geometry
    #[arg(short, long, default_value = crate::convert::DEFAULT_GEOMETRY_COLUMN)]
    pub geometry_column: String,

    /// Topology-preserving simplification tolerance (0 disables)
    #[arg(short, long, default_value_t = 0.0)]
    pub tolerance: f64,

    /// Gzip the output even without a .gz extension
    #[arg(long)]
    pub compress: bool,
}

#[derive(clap::Args, Debug)]
pub struct DistrictsArgs {
    /// Input features: CSV with a WKT column, or GeoJSON (.gz accepted)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output district boundary GeoJSON
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// View selection: absolute:<year> or change:<year>-<year>
    #[arg(short, long, default_value = "change:2024-2025")]
    pub selection: String,

    /// Name of the WKT column for CSV input
    #[arg(short, long, default_value = crate::convert::DEFAULT_GEOMETRY_COLUMN)]
    pub geometry_column: String,

    /// Also write precinct features styled for the selection
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub styled: Option<PathBuf>,
}
