use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::{error, info};

/// Destination the log is parked at between invocations.
pub const IDLE_DESTINATION: &str = "idle";

/// Invocation-scoped log buffer with a retargetable destination.
///
/// Every line is forwarded to `tracing` for live output and also appended
/// to the buffer of the currently active destination, so the escalation
/// path can read the whole session back and ship it to the archive sink.
#[derive(Debug)]
pub struct SessionLog {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    active: String,
    buffers: HashMap<String, String>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                active: IDLE_DESTINATION.to_string(),
                buffers: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Writers only append; a poisoned buffer is still readable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_destination(&self, name: &str) {
        let mut inner = self.lock();
        inner.active = name.to_string();
        inner.buffers.entry(name.to_string()).or_default();
    }

    pub fn destination(&self) -> String {
        self.lock().active.clone()
    }

    pub fn info(&self, msg: &str) {
        info!("{msg}");
        self.append(format!("INFO {msg}\n"));
    }

    pub fn error(&self, msg: &str, with_trace: bool) {
        error!("{msg}");
        let mut line = format!("ERROR {msg}\n");
        if with_trace {
            line.push_str(&format!(
                "TRACE {}\n",
                std::backtrace::Backtrace::force_capture()
            ));
        }
        self.append(line);
    }

    /// Full content of the active destination's buffer.
    pub fn read_current(&self) -> String {
        let inner = self.lock();
        inner
            .buffers
            .get(&inner.active)
            .cloned()
            .unwrap_or_default()
    }

    fn append(&self, line: String) {
        let mut inner = self.lock();
        let active = inner.active.clone();
        inner.buffers.entry(active).or_default().push_str(&line);
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}
