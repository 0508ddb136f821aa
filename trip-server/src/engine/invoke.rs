//! Running the external trip-planning engine as a subprocess.

use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error, warn};

/// Default engine executable, relative to the working directory.
const DEFAULT_PROGRAM: &str = "./travelPlanner";

/// Default per-call deadline.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from a single engine invocation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The executable could not be started
    #[error("failed to start engine {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or writing the engine's pipes failed
    #[error("engine I/O error: {0}")]
    Io(#[from] io::Error),

    /// The engine ran but reported failure
    #[error("engine exited unsuccessfully ({status})")]
    Exit { status: ExitStatus, stderr: String },

    /// The engine did not finish before the deadline and was killed
    #[error("engine timed out after {after:?}")]
    Timeout { after: Duration },
}

/// Configuration for launching the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Executable to run
    pub program: PathBuf,
    /// Arguments passed to the executable
    pub args: Vec<String>,
    /// Working directory the engine runs in (it reads its data files from here)
    pub working_dir: PathBuf,
    /// How long a single invocation may run before it is killed
    pub timeout: Duration,
}

impl EngineConfig {
    /// Create a config for the given executable with default settings.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            args: Vec::new(),
            working_dir: PathBuf::from("."),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Something that can turn an encoded payload into raw engine output.
///
/// Implemented by [`EngineInvoker`]; tests substitute scripted engines.
pub trait TripEngine: Send + Sync {
    fn run<'a>(&'a self, payload: &'a str) -> BoxFuture<'a, Result<String, EngineError>>;
}

/// Runs one engine subprocess per call.
///
/// Holds no state between calls, so a single invoker can serve any number
/// of concurrent requests.
#[derive(Debug, Clone)]
pub struct EngineInvoker {
    config: EngineConfig,
}

impl EngineInvoker {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the engine with `payload` on stdin and return its stdout.
    ///
    /// Stdin is closed once the payload is written. The process is killed if
    /// it outlives the configured timeout.
    pub async fn invoke(&self, payload: &str) -> Result<String, EngineError> {
        let config = &self.config;
        debug!(
            program = %config.program.display(),
            lines = payload.lines().count(),
            "starting engine"
        );

        let mut child = Command::new(&config.program)
            .args(&config.args)
            .current_dir(&config.working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| {
                error!(program = %config.program.display(), error = %source, "failed to start engine");
                EngineError::Spawn {
                    program: config.program.clone(),
                    source,
                }
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("engine stdin was not captured"))?;

        let write_input = async move {
            let result = stdin.write_all(payload.as_bytes()).await;
            // Dropping stdin closes the pipe and signals end of input.
            drop(stdin);
            match result {
                // The engine may exit without consuming all input; its exit
                // status decides the outcome.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("engine closed stdin before reading the full payload");
                    Ok(())
                }
                other => other,
            }
        };

        // Dropping the child on timeout kills it (kill_on_drop).
        let run = async { tokio::join!(write_input, child.wait_with_output()) };
        let (written, output) = tokio::time::timeout(config.timeout, run)
            .await
            .map_err(|_| {
                warn!(timeout = ?config.timeout, "engine timed out, killing it");
                EngineError::Timeout {
                    after: config.timeout,
                }
            })?;

        let output = output?;
        written?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!(status = %output.status, stderr = %stderr.trim(), "engine failed");
            return Err(EngineError::Exit {
                status: output.status,
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = stdout.len(), "engine finished");
        Ok(stdout)
    }
}

impl TripEngine for EngineInvoker {
    fn run<'a>(&'a self, payload: &'a str) -> BoxFuture<'a, Result<String, EngineError>> {
        self.invoke(payload).boxed()
    }
}
