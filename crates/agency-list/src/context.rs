//! Viewer role and notification sink handed to a controller

use crate::connectivity::Connectivity;
use agency_backend::ErrorKind;
use agency_model::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;

/// Who is looking at the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerRole {
    /// Site visitor: only published content
    #[default]
    Public,
    /// Content editor: drafts included
    Editor,
    /// Administrator: every record
    Admin,
}

impl ViewerRole {
    /// Whether this viewer sees `record`
    #[must_use]
    pub fn admits<R: Record + ?Sized>(self, record: &R) -> bool {
        match self {
            Self::Public => record.is_public(),
            Self::Editor | Self::Admin => true,
        }
    }

    /// Lowercase name, as accepted by `FromStr`
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Editor => "editor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" | "visitor" => Ok(Self::Public),
            "editor" => Ok(Self::Editor),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role '{other}' (expected public, editor or admin)")),
        }
    }
}

/// User-facing notification raised by a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A fetch has been pending past the slow threshold
    SlowConnection {
        /// Collection being fetched
        resource: String,
    },
    /// A load settled into an error
    LoadFailed {
        /// Collection being fetched
        resource: String,
        /// Failure class
        kind: ErrorKind,
        /// Backend or decode message
        message: String,
    },
    /// A transient failure was not retried because the device is offline
    Offline {
        /// Collection being fetched
        resource: String,
    },
}

impl Notice {
    /// Collection the notice is about
    #[must_use]
    pub fn resource(&self) -> &str {
        match self {
            Self::SlowConnection { resource }
            | Self::LoadFailed { resource, .. }
            | Self::Offline { resource } => resource,
        }
    }
}

/// Sink for [`Notice`]s (toasts in a UI, log lines in the CLI)
pub trait Notifier: Send + Sync {
    /// Deliver one notice
    fn notify(&self, notice: Notice);
}

/// Notifier that writes notices to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::SlowConnection { resource } => {
                tracing::warn!(%resource, "connection is slow, still waiting for data");
            }
            Notice::LoadFailed {
                resource,
                kind,
                message,
            } => {
                tracing::error!(%resource, %kind, %message, "failed to load collection");
            }
            Notice::Offline { resource } => {
                tracing::warn!(%resource, "offline, automatic retry skipped");
            }
        }
    }
}

/// Ambient inputs for a controller
#[derive(Clone)]
pub struct ControllerContext {
    /// Viewer whose visibility rules filter loaded items
    pub role: ViewerRole,
    /// Where slow, failed and offline notices go
    pub notifier: Arc<dyn Notifier>,
    /// Connectivity feed; `None` means always online
    pub connectivity: Option<watch::Receiver<Connectivity>>,
}

impl ControllerContext {
    /// Create new context with a tracing notifier
    #[inline]
    #[must_use]
    pub fn new(role: ViewerRole) -> Self {
        Self {
            role,
            notifier: Arc::new(TracingNotifier),
            connectivity: None,
        }
    }

    /// Public visitor context
    #[inline]
    #[must_use]
    pub fn public() -> Self {
        Self::new(ViewerRole::Public)
    }

    /// Admin panel context
    #[inline]
    #[must_use]
    pub fn admin() -> Self {
        Self::new(ViewerRole::Admin)
    }

    /// With notifier
    #[inline]
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// With connectivity feed
    #[inline]
    #[must_use]
    pub fn with_connectivity(mut self, connectivity: watch::Receiver<Connectivity>) -> Self {
        self.connectivity = Some(connectivity);
        self
    }

    /// Whether the connectivity feed currently reports offline
    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.connectivity
            .as_ref()
            .is_some_and(|rx| *rx.borrow() == Connectivity::Offline)
    }
}

impl Default for ControllerContext {
    fn default() -> Self {
        Self::public()
    }
}

impl fmt::Debug for ControllerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerContext")
            .field("role", &self.role)
            .field("offline", &self.is_offline())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::ConnectivityMonitor;

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!("Admin".parse::<ViewerRole>().unwrap(), ViewerRole::Admin);
        assert_eq!(" editor ".parse::<ViewerRole>().unwrap(), ViewerRole::Editor);
        assert!("owner".parse::<ViewerRole>().is_err());
    }

    #[test]
    fn offline_follows_the_monitor() {
        let monitor = ConnectivityMonitor::new();
        let ctx = ControllerContext::public().with_connectivity(monitor.subscribe());
        assert!(!ctx.is_offline());
        monitor.set(Connectivity::Offline);
        assert!(ctx.is_offline());
        assert!(!ControllerContext::admin().is_offline());
    }

    #[test]
    fn notice_reports_its_resource() {
        let notice = Notice::Offline {
            resource: "jobs".into(),
        };
        assert_eq!(notice.resource(), "jobs");
    }
}
