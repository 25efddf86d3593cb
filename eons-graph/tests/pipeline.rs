use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use eons_graph::config::Args;
use eons_graph::renderer::{JgraphRenderer, RenderError};
use serde_json::Value;
use tempfile::TempDir;

const LOG: &str = concat!(
    "EONS run start\n",
    "Epoch:   0     Time:    0.2     Best: 5\n",
    r#"{"network_info":[{"metadata":{"fitness":1}},{"metadata":{"fitness":3}},{"metadata":{"fitness":5}}]}"#,
    "\n",
    "Epoch:   1     Time:    0.5     Best: 9\n",
    r#"{"network_info":[{"metadata":{"fitness":3}},{"metadata":{"fitness":6}},{"metadata":{"fitness":9}}]}"#,
    "\n",
);

fn write_log(dir: &TempDir, contents: &str) -> Result<PathBuf> {
    let path = dir.path().join("eons.log");
    fs::write(&path, contents)?;
    Ok(path)
}

fn args(log: &Path, extra: &[&str]) -> Args {
    let mut argv = vec!["eons-graph".to_string()];
    argv.extend(extra.iter().map(|s| s.to_string()));
    argv.push(log.display().to_string());
    Args::try_parse_from(argv).expect("args should parse")
}

fn run_to_string(args: &Args) -> Result<String> {
    let mut out = Vec::new();
    eons_graph::run(args, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn script_only_prints_the_jgraph_script() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let log = write_log(&dir, LOG)?;

    let script = run_to_string(&args(&log, &["--script-only", "--med", "--avg"]))?;
    assert!(script.starts_with("newgraph\n"));
    assert!(script.contains("0 3\n1 6\nlabel : Median\n"));
    assert!(script.contains("0 3\n1 6\nlabel : Average\n"));
    assert!(!script.contains("newline poly"));
    Ok(())
}

#[test]
fn reordered_flags_give_identical_scripts() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let log = write_log(&dir, LOG)?;

    let a = run_to_string(&args(
        &log,
        &["--script-only", "--bo", "--max", "--lq", "--avg", "--sc"],
    ))?;
    let b = run_to_string(&args(
        &log,
        &["--sc", "--avg", "--lq", "--script-only", "--max", "--bo"],
    ))?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn summary_json_lists_every_epoch() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let log = write_log(&dir, LOG)?;
    let summary = dir.path().join("out/summary.json");
    let summary_arg = summary.display().to_string();

    run_to_string(&args(
        &log,
        &["--script-only", "--summary-json", summary_arg.as_str()],
    ))?;

    let report: Value = serde_json::from_slice(&fs::read(&summary)?)?;
    assert_eq!(report["epochs"], 2);
    assert_eq!(report["peak_best_fitness"], 9);
    let epochs = report["summaries"].as_array().expect("summaries array");
    assert_eq!(epochs.len(), 2);
    assert_eq!(epochs[1]["epoch"], 1);
    assert_eq!(epochs[1]["best"], 9);
    assert_eq!(epochs[1]["median"], 6.0);
    assert_eq!(epochs[1]["average"], 6.0);
    Ok(())
}

#[test]
fn summary_json_parent_must_be_a_directory() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let log = write_log(&dir, LOG)?;
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "")?;
    let summary_arg = blocker.join("summary.json").display().to_string();

    let err = run_to_string(&args(
        &log,
        &["--script-only", "--summary-json", summary_arg.as_str()],
    ))
    .unwrap_err();
    assert!(err.to_string().starts_with("failed creating"));
    assert!(err.to_string().contains("blocker"));
    Ok(())
}

#[test]
fn missing_log_is_a_file_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.log");
    let err = run_to_string(&args(&missing, &["--script-only"])).unwrap_err();
    assert!(err.to_string().starts_with("failed to read log"));
}

#[test]
fn parse_errors_carry_the_line() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let log = write_log(&dir, "Epoch: 0 Time: 1 Best: 2\n{\"network_info\":[\n")?;

    let err = run_to_string(&args(&log, &["--script-only"])).unwrap_err();
    let root = err
        .downcast_ref::<eons_core::ParseError>()
        .expect("parse error in chain");
    assert_eq!(root.line(), 2);
    Ok(())
}

#[test]
fn strict_pairing_flag_is_honoured() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let log = write_log(
        &dir,
        "{\"network_info\":[{\"metadata\":{\"fitness\":1}}]}\n",
    )?;

    assert!(run_to_string(&args(&log, &["--script-only"])).is_ok());
    let err = run_to_string(&args(&log, &["--script-only", "--strict-pairing"])).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<eons_core::ParseError>(),
        Some(eons_core::ParseError::OrphanPopulation { line: 1, epoch: 0 })
    ));
    Ok(())
}

#[test]
fn missing_renderer_fails_to_spawn() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let log = write_log(&dir, LOG)?;
    let jgraph = dir.path().join("no-such-jgraph");
    let jgraph_arg = jgraph.display().to_string();

    let err = run_to_string(&args(&log, &["--jgraph", jgraph_arg.as_str(), "--max"])).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RenderError>(),
        Some(RenderError::Spawn { .. })
    ));
    Ok(())
}

#[cfg(unix)]
#[test]
fn renderer_receives_script_on_stdin() -> Result<()> {
    let renderer = JgraphRenderer::new("sh").with_args(["-c", "cat"]);
    let output = renderer.render("newgraph\n")?;
    assert_eq!(output, b"newgraph\n");
    Ok(())
}

#[cfg(unix)]
#[test]
fn renderer_streams_scripts_larger_than_a_pipe_buffer() {
    let script = "    0 1\n".repeat(100_000);
    let expected = script.clone().into_bytes();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let renderer = JgraphRenderer::new("sh").with_args(["-c", "cat"]);
        let _ = tx.send(renderer.render(&script));
    });

    let output = rx
        .recv_timeout(Duration::from_secs(10))
        .expect("renderer should finish")
        .expect("renderer should succeed");
    assert_eq!(output.len(), expected.len());
    assert!(output == expected);
}

#[cfg(unix)]
#[test]
fn renderer_nonzero_exit_is_fatal() {
    let renderer = JgraphRenderer::new("sh").with_args(["-c", "cat >/dev/null; echo 'bad input' >&2; exit 3"]);
    let err = renderer.render("newgraph\n").unwrap_err();
    match &err {
        RenderError::Failed { status, stderr, .. } => {
            assert_eq!(status.code(), Some(3));
            assert_eq!(stderr, "bad input");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(err.to_string().ends_with(": bad input"));
}

#[cfg(unix)]
#[test]
fn renderer_stderr_is_ignored_on_success() -> Result<()> {
    let renderer =
        JgraphRenderer::new("sh").with_args(["-c", "cat >/dev/null; echo noise >&2; printf '%%!PS'"]);
    let output = renderer.render("newgraph\n")?;
    assert_eq!(output, b"%!PS");
    Ok(())
}
