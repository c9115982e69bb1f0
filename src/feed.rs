use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Result;

use crate::graph::{GraphSnapshot, load_snapshot};
use crate::session::Session;

/// Background producer pushing snapshots into a session at a fixed cadence.
/// Dropping the handle stops the worker.
pub struct SnapshotFeed {
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl SnapshotFeed {
    pub fn spawn<F>(session: Arc<Session>, interval: Duration, mut produce: F) -> Self
    where
        F: FnMut() -> Result<GraphSnapshot> + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let worker = thread::spawn(move || {
            let mut failing = false;
            loop {
                match produce() {
                    Ok(snapshot) => {
                        if failing {
                            tracing::info!("snapshot feed recovered");
                            failing = false;
                        }
                        if snapshot.is_empty() {
                            tracing::debug!("snapshot feed produced an empty snapshot");
                        }
                        session.update_snapshot(snapshot);
                    }
                    Err(error) => {
                        if !failing {
                            tracing::warn!(error = %format!("{error:#}"), "snapshot feed failed, keeping previous snapshot");
                            failing = true;
                        }
                    }
                }

                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::debug!("snapshot feed stopped");
        });

        Self {
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        }
    }

    /// Re-reads a snapshot file on every tick.
    pub fn from_file(session: Arc<Session>, path: PathBuf, interval: Duration) -> Self {
        tracing::info!(path = %path.display(), interval_ms = interval.as_millis() as u64, "starting snapshot feed");
        Self::spawn(session, interval, move || load_snapshot(&path))
    }
}

impl Drop for SnapshotFeed {
    fn drop(&mut self) {
        self.stop_tx.take();
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            tracing::error!("snapshot feed worker panicked");
        }
    }
}
