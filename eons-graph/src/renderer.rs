use core::fmt;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

/// Asks jgraph for PostScript on stdout.
pub const DIRECT_OUTPUT_FLAG: &str = "-P";

#[derive(Debug)]
pub enum RenderError {
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },
    Io {
        program: PathBuf,
        source: std::io::Error,
    },
    Failed {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { program, source } => {
                write!(f, "failed to start renderer {}: {source}", program.display())
            }
            Self::Io { program, source } => {
                write!(f, "renderer {} pipe failed: {source}", program.display())
            }
            Self::Failed {
                program,
                status,
                stderr,
            } => {
                write!(f, "renderer {} exited with {status}", program.display())?;
                if !stderr.is_empty() {
                    write!(f, ": {stderr}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } | Self::Io { source, .. } => Some(source),
            Self::Failed { .. } => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct JgraphRenderer {
    program: PathBuf,
    args: Vec<OsString>,
}

impl JgraphRenderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: vec![DIRECT_OUTPUT_FLAG.into()],
        }
    }

    /// Replaces the default `-P` argument list.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Feeds `script` on stdin and returns everything written to stdout.
    /// A nonzero exit is an error; stderr is otherwise dropped.
    pub fn render(&self, script: &str) -> Result<Vec<u8>, RenderError> {
        tracing::info!(
            program = %self.program.display(),
            script_bytes = script.len(),
            "running renderer"
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Feed stdin from its own thread while stdout and stderr drain, so a
        // renderer that writes before reading everything cannot block us.
        let stdin = child.stdin.take();
        let (fed, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(script.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let fed = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (fed, output)
        });

        let output = output.map_err(|source| RenderError::Io {
            program: self.program.clone(),
            source,
        })?;
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(RenderError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr,
            });
        }
        // Exited cleanly without reading the whole script.
        fed.map_err(|source| RenderError::Io {
            program: self.program.clone(),
            source,
        })?;
        if !stderr.is_empty() {
            tracing::debug!(stderr = %stderr, "renderer stderr");
        }

        tracing::info!(output_bytes = output.stdout.len(), "renderer finished");
        Ok(output.stdout)
    }
}
