//! TTL Sweeper Task
//!
//! Background task that periodically purges expired records from the TTL
//! store, independent of lookup traffic.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info};

use crate::cache::TtlStore;

// == Sweeper Handle ==
/// Controls a running sweeper task.
///
/// Dropping the handle without calling [`shutdown`](Self::shutdown) also
/// stops the loop: the closed cancellation channel is observed on the next
/// wakeup.
#[derive(Debug)]
pub struct SweeperHandle {
    cancel: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the sweeper to stop and waits for the task to exit.
    ///
    /// The signal is observed while the loop is parked on its timer, so this
    /// returns promptly and no further sweeps run afterwards.
    pub async fn shutdown(self) {
        let _ = self.cancel.send(());
        let _ = self.task.await;
    }
}

// == Spawn Sweeper ==
/// Spawns a background task that sweeps `store` every `interval`.
///
/// The first sweep happens one full interval after spawning. Each sweep
/// takes the store's write lock for a single pass over the records; in-flight
/// lookups are unaffected beyond that lock hold.
pub fn spawn_sweeper<V>(store: Arc<TtlStore<V>>, interval: Duration) -> SweeperHandle
where
    V: Clone + Send + Sync + 'static,
{
    let (cancel_tx, mut cancel_rx) = oneshot::channel();

    let task = tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "starting TTL sweeper");

        let mut ticker = interval_at(Instant::now() + interval, interval);

        loop {
            tokio::select! {
                _ = &mut cancel_rx => {
                    debug!("sweeper received shutdown signal");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = store.sweep().await;
                    if removed > 0 {
                        info!(removed, "sweep removed expired entries");
                    } else {
                        debug!("sweep found no expired entries");
                    }
                }
            }
        }
    });

    SweeperHandle {
        cancel: cancel_tx,
        task,
    }
}
