pub mod config;
pub mod renderer;

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use eons_core::{parse_log, EpochSummary, FitnessHistory, ParseOptions};
use serde::Serialize;

use crate::config::Args;
use crate::renderer::JgraphRenderer;

#[derive(Clone, Debug, Serialize)]
pub struct SummaryReport {
    pub source: String,
    pub epochs: usize,
    pub peak_best_fitness: Option<i64>,
    pub summaries: Vec<EpochSummary>,
}

impl SummaryReport {
    pub fn new(source: &Path, history: &FitnessHistory) -> Self {
        Self {
            source: source.to_string_lossy().into_owned(),
            epochs: history.epoch_count(),
            peak_best_fitness: history.peak_best_fitness(),
            summaries: history.summaries.clone(),
        }
    }
}

pub fn load_history(path: &Path, options: ParseOptions) -> Result<FitnessHistory> {
    let file =
        File::open(path).with_context(|| format!("failed to read log: {}", path.display()))?;
    let history = parse_log(BufReader::new(file), options)
        .with_context(|| format!("failed to parse log: {}", path.display()))?;

    if history.best_fitnesses.len() != history.epoch_count() {
        tracing::warn!(
            summaries = history.best_fitnesses.len(),
            populations = history.epoch_count(),
            "epoch summary and population counts differ"
        );
    }
    tracing::info!(
        epochs = history.epoch_count(),
        peak_best_fitness = ?history.peak_best_fitness(),
        "parsed {}",
        path.display()
    );
    Ok(history)
}

pub fn write_summary_json(path: &Path, report: &SummaryReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating {}", parent.display()))?;
        }
    }
    let json = serde_json::to_vec_pretty(report).context("failed to serialize summary json")?;
    fs::write(path, json)
        .with_context(|| format!("failed writing summary json: {}", path.display()))?;
    Ok(())
}

/// Parses the log named by `args`, builds the jgraph script and writes either
/// the script or the renderer's output to `out`.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let options = args.graph_options()?;
    let history = load_history(&args.filename, args.parse_options())?;

    if let Some(path) = &args.summary_json {
        write_summary_json(path, &SummaryReport::new(&args.filename, &history))?;
        tracing::info!("wrote summary json to {}", path.display());
    }

    let script = eons_core::render(&history, &options);
    if args.script_only {
        out.write_all(script.as_bytes())?;
        return Ok(());
    }

    let renderer = JgraphRenderer::new(args.jgraph_path());
    let rendered = renderer.render(&script)?;
    out.write_all(&rendered)?;
    out.flush()?;
    Ok(())
}
