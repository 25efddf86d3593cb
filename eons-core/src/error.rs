use core::fmt;

/// Which positional field of an `Epoch:` summary line failed to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryField {
    Epoch,
    BestFitness,
}

impl fmt::Display for SummaryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epoch => write!(f, "epoch"),
            Self::BestFitness => write!(f, "best fitness"),
        }
    }
}

/// Line numbers are 1-based; epochs are the 0-based population ordinal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    Read {
        line: usize,
        message: String,
    },
    SummaryTooShort {
        line: usize,
        tokens: usize,
        min: usize,
    },
    SummaryField {
        line: usize,
        field: SummaryField,
        value: String,
    },
    MalformedJson {
        line: usize,
        message: String,
    },
    PopulationShape {
        line: usize,
        message: String,
    },
    EmptyPopulation {
        epoch: usize,
        line: usize,
    },
    OrphanPopulation {
        line: usize,
        epoch: usize,
    },
    EpochMismatch {
        line: usize,
        declared: i64,
        expected: usize,
    },
    MissingPopulation {
        line: usize,
        declared: i64,
    },
}

impl ParseError {
    /// Line the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            Self::Read { line, .. }
            | Self::SummaryTooShort { line, .. }
            | Self::SummaryField { line, .. }
            | Self::MalformedJson { line, .. }
            | Self::PopulationShape { line, .. }
            | Self::EmptyPopulation { line, .. }
            | Self::OrphanPopulation { line, .. }
            | Self::EpochMismatch { line, .. }
            | Self::MissingPopulation { line, .. } => *line,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { line, message } => {
                write!(f, "read failed at line {line}: {message}")
            }
            Self::SummaryTooShort { line, tokens, min } => write!(
                f,
                "line {line}: epoch summary has {tokens} fields, need at least {min}"
            ),
            Self::SummaryField { line, field, value } => {
                write!(f, "line {line}: {field} is not an integer: {value:?}")
            }
            Self::MalformedJson { line, message } => {
                write!(f, "line {line}: malformed population json: {message}")
            }
            Self::PopulationShape { line, message } => write!(
                f,
                "line {line}: population json lacks network_info[].metadata.fitness: {message}"
            ),
            Self::EmptyPopulation { epoch, line } => {
                write!(f, "line {line}: epoch {epoch} has an empty population")
            }
            Self::OrphanPopulation { line, epoch } => write!(
                f,
                "line {line}: population for epoch {epoch} has no preceding epoch summary"
            ),
            Self::EpochMismatch {
                line,
                declared,
                expected,
            } => write!(
                f,
                "line {line}: epoch summary declares epoch {declared}, expected {expected}"
            ),
            Self::MissingPopulation { line, declared } => write!(
                f,
                "line {line}: epoch {declared} summary is never followed by a population"
            ),
        }
    }
}

impl std::error::Error for ParseError {}
