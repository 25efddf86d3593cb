use serde::{Deserialize, Serialize};

use crate::error::ParseError;

pub const QUARTILE_PROBABILITIES: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Minimum, quartiles and maximum of one population.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FiveNumberSummary {
    pub minimum: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub maximum: f64,
}

impl FiveNumberSummary {
    /// Returns `None` for an empty population.
    pub fn of(population: &[f64]) -> Option<Self> {
        if population.is_empty() {
            return None;
        }
        let mut sorted = population.to_vec();
        sorted.sort_by(f64::total_cmp);
        let [minimum, lower_quartile, median, upper_quartile, maximum] =
            QUARTILE_PROBABILITIES.map(|p| quantile_sorted(&sorted, p));
        Some(Self {
            minimum,
            lower_quartile,
            median,
            upper_quartile,
            maximum,
        })
    }

    pub fn as_array(&self) -> [f64; 5] {
        [
            self.minimum,
            self.lower_quartile,
            self.median,
            self.upper_quartile,
            self.maximum,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpochSummary {
    pub epoch: usize,
    /// Best fitness reported by the paired `Epoch:` line, if any.
    pub best: Option<i64>,
    #[serde(flatten)]
    pub quartiles: FiveNumberSummary,
    pub average: f64,
}

impl EpochSummary {
    /// `line` is where the population was read, for the empty-population error.
    pub fn compute(
        epoch: usize,
        line: usize,
        best: Option<i64>,
        population: &[f64],
    ) -> Result<Self, ParseError> {
        let quartiles = FiveNumberSummary::of(population)
            .ok_or(ParseError::EmptyPopulation { epoch, line })?;
        let average = mean(population).ok_or(ParseError::EmptyPopulation { epoch, line })?;
        Ok(Self {
            epoch,
            best,
            quartiles,
            average,
        })
    }
}

/// Linear-interpolation quantile over ascending data (Hyndman & Fan type 7).
///
/// `sorted` must be non-empty; `p` is clamped to `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len() - 1;
    let h = last as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(last);
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

pub fn mean(population: &[f64]) -> Option<f64> {
    if population.is_empty() {
        return None;
    }
    Some(population.iter().sum::<f64>() / population.len() as f64)
}
