//! Background cache population queue.
//!
//! Request handlers answer first and populate the cache afterwards: they
//! [`CacheQueue::submit`] a [`CacheTask`] and move on, and [`run_cache_worker`]
//! executes it. Failures cannot reach the original caller, so the worker logs
//! them and counts them in `link_cache_tasks_failed_total`.

use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc, mpsc::error::TrySendError};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::application::services::link_cache::LinkCache;
use crate::domain::entities::Link;
use crate::infrastructure::cache::CacheResult;

/// A cache operation to run in the background.
#[derive(Debug, Clone)]
pub enum CacheTask {
    Set(Link),
    SetMany(Vec<Link>),
    Refresh(Link),
    Delete { domain: String, key: String },
}

impl CacheTask {
    fn kind(&self) -> &'static str {
        match self {
            CacheTask::Set(_) => "set",
            CacheTask::SetMany(_) => "set_many",
            CacheTask::Refresh(_) => "refresh",
            CacheTask::Delete { .. } => "delete",
        }
    }
}

/// Sending half of the background cache queue.
///
/// Cheap to clone; the worker stops once every clone is dropped.
#[derive(Clone)]
pub struct CacheQueue {
    sender: mpsc::Sender<CacheTask>,
}

impl CacheQueue {
    /// Creates a bounded queue and the receiver to hand to [`run_cache_worker`].
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<CacheTask>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// Enqueues a task without waiting.
    ///
    /// Returns `false` when the task was dropped because the queue is full or
    /// the worker has stopped.
    pub fn submit(&self, task: CacheTask) -> bool {
        match self.sender.try_send(task) {
            Ok(()) => true,
            Err(TrySendError::Full(task)) => {
                warn!(task = task.kind(), "Cache queue full, dropping task");
                metrics::counter!("link_cache_tasks_dropped_total", "reason" => "full").increment(1);
                false
            }
            Err(TrySendError::Closed(task)) => {
                warn!(task = task.kind(), "Cache queue closed, dropping task");
                metrics::counter!("link_cache_tasks_dropped_total", "reason" => "closed")
                    .increment(1);
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Free slots currently available in the queue.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }
}

/// Drains the queue, running up to `concurrency` tasks at a time.
///
/// Returns after every sender is dropped and in-flight tasks have finished.
pub async fn run_cache_worker(
    mut rx: mpsc::Receiver<CacheTask>,
    cache: Arc<LinkCache>,
    concurrency: usize,
) {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut running = JoinSet::new();

    info!(concurrency, "Cache worker started");

    while let Some(task) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let cache = cache.clone();
        running.spawn(async move {
            let _permit = permit;
            execute(&cache, task).await;
        });

        while let Some(finished) = running.try_join_next() {
            if let Err(e) = finished {
                error!("Cache task panicked: {}", e);
            }
        }
    }

    while let Some(finished) = running.join_next().await {
        if let Err(e) = finished {
            error!("Cache task panicked: {}", e);
        }
    }

    info!("Cache worker stopped");
}

async fn execute(cache: &LinkCache, task: CacheTask) {
    let kind = task.kind();

    let result: CacheResult<()> = match task {
        CacheTask::Set(link) => cache.set(&link).await.map(|_| ()),
        CacheTask::SetMany(links) => cache.set_many(&links).await,
        CacheTask::Refresh(link) => cache.refresh(&link).await.map(|_| ()),
        CacheTask::Delete { domain, key } => cache.delete(&domain, &key).await.map(|_| ()),
    };

    match result {
        Ok(()) => {
            debug!(task = kind, "Cache task completed");
            metrics::counter!("link_cache_tasks_completed_total", "task" => kind).increment(1);
        }
        Err(e) => {
            error!(task = kind, "Background cache task failed: {}", e);
            metrics::counter!("link_cache_tasks_failed_total", "task" => kind).increment(1);
        }
    }
}
