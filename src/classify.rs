use anyhow::{bail, Result};
use serde::Serialize;

/// Seven-step blue-to-red choropleth ramp, ordered most Democratic to most
/// Republican.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Bucket {
    ExtremeBlue,
    StrongBlue,
    LightBlue,
    Neutral,
    LightRed,
    StrongRed,
    ExtremeRed,
}

impl Bucket {
    /// Fixed display color for this bucket.
    pub fn color(self) -> &'static str {
        match self {
            Bucket::ExtremeBlue => "#0000ff",
            Bucket::StrongBlue => "#6666ff",
            Bucket::LightBlue => "#ccccff",
            Bucket::Neutral => "#f0f0f0",
            Bucket::LightRed => "#ffcccc",
            Bucket::StrongRed => "#ff6666",
            Bucket::ExtremeRed => "#ff0000",
        }
    }
}

/// Which threshold table applies: absolute redness in 0..1, or a
/// year-over-year delta in −1..1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Absolute,
    Delta,
}

/// Classify a redness value or delta into a display bucket.
///
/// The comparisons mix `<=` and `<` on purpose; the exact boundaries are
/// part of the visual contract. NaN is an error: absent values must be
/// filtered upstream and rendered unstyled, never classified.
pub fn classify(value: f64, mode: Mode) -> Result<Bucket> {
    if value.is_nan() {
        bail!("[classify] cannot classify NaN; filter absent values upstream");
    }
    Ok(match mode {
        Mode::Delta => {
            if value <= -0.25 {
                Bucket::ExtremeBlue
            } else if value <= -0.10 {
                Bucket::StrongBlue
            } else if value < -0.01 {
                Bucket::LightBlue
            } else if value <= 0.01 {
                Bucket::Neutral
            } else if value < 0.10 {
                Bucket::LightRed
            } else if value < 0.25 {
                Bucket::StrongRed
            } else {
                Bucket::ExtremeRed
            }
        }
        Mode::Absolute => {
            if value <= 0.2 {
                Bucket::ExtremeBlue
            } else if value <= 0.4 {
                Bucket::StrongBlue
            } else if value < 0.49 {
                Bucket::LightBlue
            } else if value <= 0.51 {
                Bucket::Neutral
            } else if value < 0.6 {
                Bucket::LightRed
            } else if value < 0.8 {
                Bucket::StrongRed
            } else {
                Bucket::ExtremeRed
            }
        }
    })
}

/// One legend row: a sample value inside the bucket's range plus its caption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendEntry {
    pub sample: f64,
    pub label: &'static str,
}

/// Legend rows for `mode`, one per bucket, blue to red. The sample value is
/// what gets classified to pick the swatch color.
pub fn legend(mode: Mode) -> [LegendEntry; 7] {
    match mode {
        Mode::Delta => [
            LegendEntry { sample: -0.25, label: "More Blue (<-25%)" },
            LegendEntry { sample: -0.10, label: "Blue Shift (-10%)" },
            LegendEntry { sample: -0.05, label: "Slight Blue Shift" },
            LegendEntry { sample: 0.0, label: "No Change (±1%)" },
            LegendEntry { sample: 0.05, label: "Slight Red Shift" },
            LegendEntry { sample: 0.10, label: "Red Shift (+10%)" },
            LegendEntry { sample: 0.25, label: "More Red (>+25%)" },
        ],
        Mode::Absolute => [
            LegendEntry { sample: 0.1, label: "Strongly Blue (<20%)" },
            LegendEntry { sample: 0.3, label: "Lean Blue (20-40%)" },
            LegendEntry { sample: 0.45, label: "Light Blue (40-49%)" },
            LegendEntry { sample: 0.5, label: "Neutral (49-51%)" },
            LegendEntry { sample: 0.55, label: "Light Red (51-60%)" },
            LegendEntry { sample: 0.7, label: "Lean Red (60-80%)" },
            LegendEntry { sample: 0.9, label: "Strongly Red (>80%)" },
        ],
    }
}
