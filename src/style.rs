use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::classify::{classify, Bucket, Mode};
use crate::district::District;
use crate::feature::{Feature, FeatureStore, Year};

/// What the map is showing: one year's absolute redness, or the change
/// between two years. Owned by the caller and passed explicitly; there is
/// no ambient view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Absolute(Year),
    Change(Year, Year),
}

impl Selection {
    pub fn mode(self) -> Mode {
        match self {
            Selection::Absolute(_) => Mode::Absolute,
            Selection::Change(..) => Mode::Delta,
        }
    }
}

impl FromStr for Selection {
    type Err = anyhow::Error;

    /// Parses the view-selector values `absolute:<year>` and
    /// `change:<year>-<year>`.
    fn from_str(s: &str) -> Result<Self> {
        let (mode, value) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("[style] expected <mode>:<value>, got {s:?}"))?;
        match mode {
            "absolute" => {
                let year = value
                    .parse::<Year>()
                    .with_context(|| format!("[style] invalid year in {s:?}"))?;
                Ok(Selection::Absolute(year))
            }
            "change" => {
                let (start, end) = value
                    .split_once('-')
                    .ok_or_else(|| anyhow!("[style] expected <year>-<year> in {s:?}"))?;
                let start = start
                    .parse::<Year>()
                    .with_context(|| format!("[style] invalid start year in {s:?}"))?;
                let end = end
                    .parse::<Year>()
                    .with_context(|| format!("[style] invalid end year in {s:?}"))?;
                Ok(Selection::Change(start, end))
            }
            other => bail!("[style] unknown selection mode {other:?}"),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Absolute(year) => write!(f, "absolute:{year}"),
            Selection::Change(start, end) => write!(f, "change:{start}-{end}"),
        }
    }
}

/// Style decision for one rendered shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Fill(Bucket),
    /// No fill, no stroke: the value backing the selection was absent.
    NoStyle,
}

impl Style {
    pub fn bucket(self) -> Option<Bucket> {
        match self {
            Style::Fill(bucket) => Some(bucket),
            Style::NoStyle => None,
        }
    }
}

/// Style for a single precinct, read straight off its properties.
pub fn precinct_style(feature: &Feature, selection: Selection) -> Style {
    let value = match selection {
        Selection::Absolute(year) => feature.redness(year),
        Selection::Change(start, end) => match (feature.redness(start), feature.redness(end)) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        },
    };
    style_for(value, selection.mode())
}

/// Style for a district outline, driven by its aggregated statistics.
pub fn district_style(district: &District, store: &FeatureStore, selection: Selection) -> Style {
    let value = match selection {
        Selection::Absolute(year) => district.year_stats(store, year).and_then(|s| s.redness),
        Selection::Change(start, end) => district.redness_delta(store, start, end),
    };
    style_for(value, selection.mode())
}

fn style_for(value: Option<f64>, mode: Mode) -> Style {
    // classify never sees NaN: absent and NaN both suppress styling here.
    match value {
        Some(v) if !v.is_nan() => match classify(v, mode) {
            Ok(bucket) => Style::Fill(bucket),
            Err(_) => Style::NoStyle,
        },
        _ => Style::NoStyle,
    }
}
