use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use eons_core::jgraph::DEFAULT_AXIS_SIZE;
use eons_core::{GraphOptions, ParseOptions, SeriesSelection, Statistic};

pub const DEFAULT_JGRAPH_PATH: &str = "./jgraph";
pub const JGRAPH_ENV: &str = "EONS_GRAPH_JGRAPH";

#[derive(Parser, Debug, Clone)]
#[command(name = "eons-graph")]
#[command(about = "Creates a postscript graph from the EONS standard output")]
#[command(
    after_help = "The classic single-dash flags take two dashes here: -xs, -min and -bo are spelled --xs, --min and --bo."
)]
pub struct Args {
    /// EONS standard output file
    #[arg(value_name = "FILENAME")]
    pub filename: PathBuf,

    /// jgraph executable path (falls back to $EONS_GRAPH_JGRAPH, then ./jgraph)
    #[arg(short = 'j', long)]
    pub jgraph: Option<PathBuf>,

    /// Size of x axis
    #[arg(long, visible_alias = "xs", default_value_t = DEFAULT_AXIS_SIZE)]
    pub xsize: f64,

    /// Size of y axis
    #[arg(long, visible_alias = "ys", default_value_t = DEFAULT_AXIS_SIZE)]
    pub ysize: f64,

    /// Graph the minimum fitness of each epoch
    #[arg(long, visible_alias = "min")]
    pub graph_min: bool,

    /// Graph a scatter plot of all fitnesses
    #[arg(long, visible_alias = "sc")]
    pub graph_scatter: bool,

    /// Graph a box and whisker plot of fitnesses of each epoch
    #[arg(long, visible_alias = "bo")]
    pub graph_box_and_whiskers: bool,

    /// Graph the lower quartile fitness of each epoch
    #[arg(long, visible_alias = "lq")]
    pub graph_lq: bool,

    /// Graph the median fitness of each epoch
    #[arg(long, visible_alias = "med")]
    pub graph_med: bool,

    /// Graph the upper quartile fitness of each epoch
    #[arg(long, visible_alias = "uq")]
    pub graph_uq: bool,

    /// Graph the maximum fitness of each epoch
    #[arg(long, visible_alias = "max")]
    pub graph_max: bool,

    /// Graph the average fitness of each epoch
    #[arg(long, visible_alias = "avg")]
    pub graph_average: bool,

    /// Reject logs whose epoch summaries and population dumps are not paired 1:1
    #[arg(long)]
    pub strict_pairing: bool,

    /// Print the jgraph script instead of running jgraph
    #[arg(long)]
    pub script_only: bool,

    /// Also write per-epoch statistics as JSON
    #[arg(long)]
    pub summary_json: Option<PathBuf>,
}

impl Args {
    pub fn selection(&self) -> SeriesSelection {
        let requested = [
            (self.graph_max, Statistic::Max),
            (self.graph_uq, Statistic::UpperQuartile),
            (self.graph_med, Statistic::Median),
            (self.graph_lq, Statistic::LowerQuartile),
            (self.graph_min, Statistic::Min),
            (self.graph_average, Statistic::Average),
        ];
        SeriesSelection {
            box_and_whiskers: self.graph_box_and_whiskers,
            scatter: self.graph_scatter,
            statistics: requested
                .into_iter()
                .filter_map(|(on, statistic)| on.then_some(statistic))
                .collect(),
        }
    }

    pub fn graph_options(&self) -> Result<GraphOptions> {
        Ok(GraphOptions {
            x_size: validate_axis_size("xsize", self.xsize)?,
            y_size: validate_axis_size("ysize", self.ysize)?,
            selection: self.selection(),
        })
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict_pairing: self.strict_pairing,
        }
    }

    pub fn jgraph_path(&self) -> PathBuf {
        resolve_jgraph_path(self.jgraph.clone(), env::var_os(JGRAPH_ENV).map(PathBuf::from))
    }
}

/// Flag, then environment, then the default.
pub fn resolve_jgraph_path(flag: Option<PathBuf>, from_env: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| from_env.filter(|path| !path.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_JGRAPH_PATH))
}

fn validate_axis_size(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(anyhow!("--{name} must be a positive number, got {value}"))
    }
}
