#![doc = "Precinctmap public API"]
mod classify;
mod convert;
mod district;
mod feature;
mod io;
mod stats;
mod style;

pub mod cli;
pub mod commands;

#[doc(inline)]
pub use classify::{classify, legend, Bucket, LegendEntry, Mode};

#[doc(inline)]
pub use convert::{convert, ConvertOptions, ConvertReport, DEFAULT_GEOMETRY_COLUMN};

#[doc(inline)]
pub use district::{aggregate, Boundary, District, Districts};

#[doc(inline)]
pub use feature::{Feature, FeatureStore, Year};

#[doc(inline)]
pub use io::load_features;

#[doc(inline)]
pub use stats::YearStat;

#[doc(inline)]
pub use style::{district_style, precinct_style, Selection, Style};
