//! Live catalog subscription.
//!
//! The external database pushes change notifications; this module models
//! that as a background task that periodically fetches the whole collection
//! and publishes each result as a full-replacement snapshot into a
//! `tokio::sync::watch` channel. Consumers react by replacing their view,
//! never by patching - the catalog is small and full replacement is the
//! simplest correct policy.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use patisserie_core::Catalog;

use crate::client::DocStoreClient;

/// A published view of the catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    /// The last known product list; possibly empty if nothing has been
    /// fetched successfully yet.
    pub catalog: Catalog,
    /// True once the first fetch has completed - successfully or not. The
    /// views use this to stop showing a loading state; a failed first fetch
    /// leaves an empty catalog displayed rather than spinning forever.
    pub loaded: bool,
}

/// Handle to the background subscription task.
///
/// Dropping the watcher (or calling [`stop`](Self::stop)) aborts the task,
/// matching the "populated on subscribe, cleared on unmount" lifecycle of
/// the catalog cache.
#[derive(Debug)]
pub struct ProductWatcher {
    handle: JoinHandle<()>,
    receiver: watch::Receiver<CatalogSnapshot>,
}

impl ProductWatcher {
    /// Spawn the subscription task.
    ///
    /// The task fetches immediately, then again every `poll_interval`. Every
    /// successful fetch replaces the snapshot in full. A failed fetch is
    /// logged, keeps the last known snapshot, and still marks the view
    /// loaded - there is no retry beyond the next scheduled poll.
    #[must_use]
    pub fn spawn(client: DocStoreClient, poll_interval: Duration) -> Self {
        let (sender, receiver) = watch::channel(CatalogSnapshot::default());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                match client.list_products().await {
                    Ok(products) => {
                        debug!(count = products.len(), "Publishing catalog snapshot");
                        sender.send_replace(CatalogSnapshot {
                            catalog: Catalog::new(products),
                            loaded: true,
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "Catalog fetch failed; keeping last snapshot");
                        sender.send_modify(|snapshot| snapshot.loaded = true);
                    }
                }
            }
        });

        Self { handle, receiver }
    }

    /// Subscribe to snapshot updates.
    ///
    /// The receiver starts at the current snapshot and observes every
    /// replacement after that.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.receiver.clone()
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.receiver.borrow().clone()
    }

    /// Stop the subscription task.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for ProductWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
