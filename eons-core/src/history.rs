use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::log::{classify_line, LogLine, SummaryLine};
use crate::stats::{EpochSummary, FiveNumberSummary};

/// A plottable per-epoch series. Declaration order is emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    Max,
    UpperQuartile,
    Median,
    LowerQuartile,
    Min,
    Average,
}

impl Statistic {
    pub const ALL: [Statistic; 6] = [
        Self::Max,
        Self::UpperQuartile,
        Self::Median,
        Self::LowerQuartile,
        Self::Min,
        Self::Average,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Max => "Best",
            Self::UpperQuartile => "Upper Quartile",
            Self::Median => "Median",
            Self::LowerQuartile => "Lower Quartile",
            Self::Min => "Worst",
            Self::Average => "Average",
        }
    }

    pub fn value(self, summary: &EpochSummary) -> f64 {
        let q = &summary.quartiles;
        match self {
            Self::Max => q.maximum,
            Self::UpperQuartile => q.upper_quartile,
            Self::Median => q.median,
            Self::LowerQuartile => q.lower_quartile,
            Self::Min => q.minimum,
            Self::Average => summary.average,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Require every population line to follow its own `Epoch:` line, with
    /// epochs numbered 0, 1, 2, ... in order.
    pub strict_pairing: bool,
}

/// Everything extracted from one log, accumulated in a single pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitnessHistory {
    pub best_fitnesses: Vec<i64>,
    pub populations: Vec<Vec<f64>>,
    pub summaries: Vec<EpochSummary>,
}

impl FitnessHistory {
    pub fn epoch_count(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    pub fn quantiles(&self) -> Vec<FiveNumberSummary> {
        self.summaries.iter().map(|s| s.quartiles).collect()
    }

    pub fn averages(&self) -> Vec<f64> {
        self.summaries.iter().map(|s| s.average).collect()
    }

    pub fn series(&self, statistic: Statistic) -> Vec<f64> {
        self.summaries.iter().map(|s| statistic.value(s)).collect()
    }

    /// Highest best fitness reported by any summary line.
    pub fn peak_best_fitness(&self) -> Option<i64> {
        self.best_fitnesses.iter().copied().max()
    }
}

pub fn parse_str(input: &str, options: ParseOptions) -> Result<FitnessHistory, ParseError> {
    parse_log(input.as_bytes(), options)
}

pub fn parse_log<R: BufRead>(reader: R, options: ParseOptions) -> Result<FitnessHistory, ParseError> {
    let mut history = FitnessHistory::default();
    // Summary line awaiting its population, for strict pairing.
    let mut pending: Option<(usize, SummaryLine)> = None;
    let mut line_no = 0usize;

    for line in reader.lines() {
        line_no += 1;
        let line = line.map_err(|err| ParseError::Read {
            line: line_no,
            message: err.to_string(),
        })?;

        match classify_line(line_no, &line)? {
            LogLine::Summary(summary) => {
                if options.strict_pairing {
                    if let Some((at, unpaired)) = pending {
                        return Err(ParseError::MissingPopulation {
                            line: at,
                            declared: unpaired.epoch,
                        });
                    }
                    let expected = history.populations.len();
                    if summary.epoch != expected as i64 {
                        return Err(ParseError::EpochMismatch {
                            line: line_no,
                            declared: summary.epoch,
                            expected,
                        });
                    }
                    pending = Some((line_no, summary));
                }
                history.best_fitnesses.push(summary.best_fitness);
            }
            LogLine::Population(population) => {
                let epoch = history.populations.len();
                if options.strict_pairing && pending.take().is_none() {
                    return Err(ParseError::OrphanPopulation {
                        line: line_no,
                        epoch,
                    });
                }
                let best = history.best_fitnesses.get(epoch).copied();
                let summary = EpochSummary::compute(epoch, line_no, best, &population)?;
                history.summaries.push(summary);
                history.populations.push(population);
            }
            LogLine::Other => {}
        }
    }

    if let Some((at, unpaired)) = pending {
        return Err(ParseError::MissingPopulation {
            line: at,
            declared: unpaired.epoch,
        });
    }

    Ok(history)
}
