//! Line classification for EONS standard output.
//!
//! The log mixes two line kinds:
//!
//! ```text
//! Epoch:   3     Time:   12.4     Best: 118  ...
//! {"network_info":[{"metadata":{"fitness":97}, ...}, ...]}
//! ```
//!
//! Summary lines are positional: the fields are located by whitespace token
//! index, not by label. Everything else is ignored.

use serde::Deserialize;
use serde_json::error::Category;

use crate::error::{ParseError, SummaryField};

pub const EPOCH_MARKER: &str = "Epoch:";
pub const EPOCH_TOKEN: usize = 1;
pub const BEST_FITNESS_TOKEN: usize = 5;
pub const SUMMARY_MIN_TOKENS: usize = BEST_FITNESS_TOKEN + 1;
pub const POPULATION_PREFIX: char = '{';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SummaryLine {
    pub epoch: i64,
    pub best_fitness: i64,
}

#[derive(Debug, Deserialize)]
struct PopulationDump {
    network_info: Vec<NetworkEntry>,
}

#[derive(Debug, Deserialize)]
struct NetworkEntry {
    metadata: NetworkMetadata,
}

#[derive(Debug, Deserialize)]
struct NetworkMetadata {
    fitness: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LogLine {
    Summary(SummaryLine),
    Population(Vec<f64>),
    Other,
}

/// Classifies one line. `line_no` is only used for diagnostics.
pub fn classify_line(line_no: usize, line: &str) -> Result<LogLine, ParseError> {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Ok(LogLine::Other);
    };

    if first == EPOCH_MARKER {
        return parse_summary(line_no, line).map(LogLine::Summary);
    }
    if line.starts_with(POPULATION_PREFIX) {
        return parse_population(line_no, line).map(LogLine::Population);
    }
    Ok(LogLine::Other)
}

pub fn parse_summary(line_no: usize, line: &str) -> Result<SummaryLine, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.first() != Some(&EPOCH_MARKER) || tokens.len() < SUMMARY_MIN_TOKENS {
        return Err(ParseError::SummaryTooShort {
            line: line_no,
            tokens: tokens.len(),
            min: SUMMARY_MIN_TOKENS,
        });
    }

    Ok(SummaryLine {
        epoch: parse_int(line_no, SummaryField::Epoch, tokens[EPOCH_TOKEN])?,
        best_fitness: parse_int(
            line_no,
            SummaryField::BestFitness,
            tokens[BEST_FITNESS_TOKEN],
        )?,
    })
}

/// Decodes a population dump into its fitness values, in file order.
pub fn parse_population(line_no: usize, line: &str) -> Result<Vec<f64>, ParseError> {
    let dump: PopulationDump = serde_json::from_str(line.trim_end()).map_err(|err| {
        let message = err.to_string();
        match err.classify() {
            Category::Data => ParseError::PopulationShape {
                line: line_no,
                message,
            },
            Category::Syntax | Category::Eof | Category::Io => ParseError::MalformedJson {
                line: line_no,
                message,
            },
        }
    })?;

    Ok(dump
        .network_info
        .into_iter()
        .map(|entry| entry.metadata.fitness)
        .collect())
}

fn parse_int(line_no: usize, field: SummaryField, token: &str) -> Result<i64, ParseError> {
    token.parse::<i64>().map_err(|_| ParseError::SummaryField {
        line: line_no,
        field,
        value: token.to_string(),
    })
}
