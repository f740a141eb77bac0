//! ``src/tasks/build_index_task.rs``
//! ============================================================================
//! # Build Index Task: Background Index Build Call
//!
//! Spawns one `POST /build` call against the search service and reports the
//! outcome back over the task channel without blocking the event loop.

use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::api::gateway::SearchGateway;
use crate::controller::event_loop::TaskResult;

/// Errors are stringified here; the channel carries display text, not
/// error values.
pub fn build_index_task(
    task_id: u64,
    corpus_dir: String,
    gateway: SearchGateway,
    task_tx: UnboundedSender<TaskResult>,
) {
    tokio::spawn(async move {
        let start_time = Instant::now();
        info!("task {task_id}: building index for '{corpus_dir}'");

        let result = gateway
            .build_index(&corpus_dir)
            .await
            .map_err(|e| e.to_string());

        let execution_time: Duration = start_time.elapsed();
        match &result {
            Ok(message) => {
                info!("task {task_id}: build finished in {execution_time:?}: {message}");
            }
            Err(e) => warn!("task {task_id}: build failed in {execution_time:?}: {e}"),
        }

        let _ = task_tx.send(TaskResult::BuildFinished {
            task_id,
            corpus_dir,
            result,
            execution_time,
        });
    });
}
