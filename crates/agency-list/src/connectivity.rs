//! Online/offline feed

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Network reachability as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Backend reachable
    #[default]
    Online,
    /// No network; automatic retries are skipped
    Offline,
}

/// Owner side of a connectivity feed
#[derive(Debug)]
pub struct ConnectivityMonitor {
    tx: watch::Sender<Connectivity>,
}

impl ConnectivityMonitor {
    /// Create new monitor, initially online
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Connectivity::Online);
        Self { tx }
    }

    /// Report a reachability change
    pub fn set(&self, connectivity: Connectivity) {
        let previous = self.tx.send_replace(connectivity);
        if previous != connectivity {
            tracing::info!(?connectivity, "connectivity changed");
        }
    }

    /// Last reported connectivity
    #[must_use]
    pub fn current(&self) -> Connectivity {
        *self.tx.borrow()
    }

    /// New receiver for a controller context
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.tx.subscribe()
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}
