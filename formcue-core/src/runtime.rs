use std::sync::OnceLock;

use log::debug;
use tokio::runtime::Runtime;

use crate::error::{KeyPointsError, Result};

static GLOBAL_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Process-wide runtime for callers that do not bring their own (FFI hosts).
pub fn global_runtime() -> Result<&'static Runtime> {
    if let Some(rt) = GLOBAL_RUNTIME.get() {
        return Ok(rt);
    }
    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2);
    let threads = std::cmp::max(threads, 2);
    debug!("Initializing global runtime with {} threads", threads);
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(threads)
        .thread_name("formcue-worker")
        .enable_all()
        .build()
        .map_err(|e| KeyPointsError::Internal(format!("failed to build tokio runtime: {}", e)))?;
    // A concurrent initializer may have won; its runtime is kept and ours dropped.
    if let Err(rt) = GLOBAL_RUNTIME.set(rt) {
        drop(rt);
    }
    GLOBAL_RUNTIME
        .get()
        .ok_or_else(|| KeyPointsError::Internal("global runtime unavailable".into()))
}
