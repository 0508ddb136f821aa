//! Scripted engine for tests that should not spawn processes.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::sync::Mutex;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::invoke::{EngineError, TripEngine};

type Reply = Box<dyn Fn() -> Result<String, EngineError> + Send + Sync>;

/// Engine that answers every call from a closure and records payloads.
pub struct MockEngine {
    reply: Reply,
    payloads: Mutex<Vec<String>>,
}

impl MockEngine {
    pub fn new(reply: impl Fn() -> Result<String, EngineError> + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(reply),
            payloads: Mutex::new(Vec::new()),
        }
    }

    /// Always print `output` and exit 0.
    pub fn replying(output: &str) -> Self {
        let output = output.to_string();
        Self::new(move || Ok(output.clone()))
    }

    /// Always exit with `code`, writing `stderr`.
    pub fn failing(code: i32, stderr: &str) -> Self {
        let stderr = stderr.to_string();
        Self::new(move || {
            Err(EngineError::Exit {
                status: ExitStatus::from_raw(code << 8),
                stderr: stderr.clone(),
            })
        })
    }

    /// Always report a timeout.
    pub fn timing_out() -> Self {
        Self::new(|| {
            Err(EngineError::Timeout {
                after: Duration::from_secs(30),
            })
        })
    }

    /// Payloads received so far, in call order.
    pub fn payloads(&self) -> Vec<String> {
        self.payloads.lock().unwrap().clone()
    }
}

impl TripEngine for MockEngine {
    fn run<'a>(&'a self, payload: &'a str) -> BoxFuture<'a, Result<String, EngineError>> {
        self.payloads.lock().unwrap().push(payload.to_string());
        let reply = (self.reply)();
        async move { reply }.boxed()
    }
}
