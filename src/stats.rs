use serde::Serialize;

use crate::district::District;
use crate::feature::{FeatureStore, Year};

/// Ballot-weighted aggregate for one district and one year.
///
/// `redness` and `turnout` are individually absent when their denominators
/// are zero; the whole stat is absent (see [`District::year_stats`]) when no
/// member reported any ballots at all. Absent never renders as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearStat {
    pub redness: Option<f64>,
    pub turnout: Option<f64>,
    pub ballots: u64,
    pub voters: u64,
}

impl District {
    /// Aggregate statistics for `year`, or `None` when total parsed ballots
    /// across the member features is zero.
    ///
    /// Redness is the ballot-weighted average over members where both
    /// `redness_<year>` and `ballots_<year>` parse and ballots > 0, so large
    /// precincts dominate the district lean. Turnout sums ballots over
    /// voters with an independent inclusion criterion: any member whose
    /// `voters_<year>` parses contributes, even if its redness is invalid.
    pub fn year_stats(&self, store: &FeatureStore, year: Year) -> Option<YearStat> {
        let mut total_ballots = 0.0;
        let mut weighted_redness = 0.0;
        let mut redness_ballots = 0.0;
        let mut turnout_ballots = 0.0;
        let mut total_voters = 0.0;

        for &member in &self.members {
            let feature = store.get(member);
            let ballots = feature.ballots(year);
            if let Some(b) = ballots {
                total_ballots += b;
            }

            if let (Some(redness), Some(b)) = (feature.redness(year), ballots) {
                if b > 0.0 {
                    weighted_redness += redness * b;
                    redness_ballots += b;
                }
            }

            if let Some(voters) = feature.voters(year) {
                total_voters += voters;
                turnout_ballots += ballots.unwrap_or(0.0);
            }
        }

        if total_ballots <= 0.0 {
            return None;
        }

        Some(YearStat {
            redness: (redness_ballots > 0.0).then(|| weighted_redness / redness_ballots),
            turnout: (total_voters > 0.0).then(|| turnout_ballots / total_voters),
            // Counts are rounded, not truncated: fractional inputs happen
            // when upstream data carries allocated (split) ballots.
            ballots: total_ballots.round().max(0.0) as u64,
            voters: total_voters.round().max(0.0) as u64,
        })
    }

    /// Change in aggregate redness from `year_a` to `year_b`, i.e.
    /// `stats(year_b) − stats(year_a)`. Absent if either operand is absent.
    ///
    /// Each year is aggregated separately and only then subtracted. This is
    /// not algebraically equivalent to a single weighted difference when
    /// ballot totals differ across years, so the two-step order is load
    /// bearing.
    pub fn redness_delta(&self, store: &FeatureStore, year_a: Year, year_b: Year) -> Option<f64> {
        let start = self.year_stats(store, year_a)?.redness?;
        let end = self.year_stats(store, year_b)?.redness?;
        Some(end - start)
    }
}
