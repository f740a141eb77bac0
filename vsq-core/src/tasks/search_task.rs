//! ``src/tasks/search_task.rs``
//! ============================================================================
//! # Search Task: Background Ranked-Search Call
//!
//! Spawns one `GET /search` call against the search service and reports the
//! ranked result set back over the task channel. The completion carries the
//! query it was issued for so the receiver can drop stale answers.

use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::api::gateway::SearchGateway;
use crate::controller::event_loop::TaskResult;

pub fn search_task(
    task_id: u64,
    query: String,
    gateway: SearchGateway,
    task_tx: UnboundedSender<TaskResult>,
) {
    tokio::spawn(async move {
        let start_time = Instant::now();
        info!("task {task_id}: searching for '{query}'");

        let result = gateway.search(&query).await.map_err(|e| e.to_string());

        let execution_time: Duration = start_time.elapsed();
        match &result {
            Ok(set) => info!(
                "task {task_id}: search finished in {execution_time:?}: {} entries",
                set.len()
            ),
            Err(e) => warn!("task {task_id}: search failed in {execution_time:?}: {e}"),
        }

        let _ = task_tx.send(TaskResult::SearchFinished {
            task_id,
            query,
            result,
            execution_time,
        });
    });
}
