pub mod error;
pub mod history;
pub mod jgraph;
pub mod log;
pub mod palette;
pub mod stats;

pub use error::{ParseError, SummaryField};
pub use history::{parse_log, parse_str, FitnessHistory, ParseOptions, Statistic};
pub use jgraph::{render, render_with_style, GraphOptions, SeriesSelection};
pub use palette::SeriesStyle;
pub use stats::{EpochSummary, FiveNumberSummary};
