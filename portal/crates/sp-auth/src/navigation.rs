use std::sync::Mutex;

use log::info;

pub const LOGIN_PATH: &str = "/login";
pub const LOGIN_TENANT_MISMATCH_PATH: &str = "/login?error=tenant-mismatch";
pub const LOGIN_UNAUTHORIZED_PATH: &str = "/login?error=unauthorized";
pub const ROOT_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// Client-side route change; in-memory state survives
    Push,
    /// Full reload; all in-memory state is discarded
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub kind: NavigationKind,
    pub path: String,
}

/// Moves the user to another page.
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);

    fn hard_navigate(&self, path: &str);
}

/// Navigator that records every request instead of acting on it.
///
/// Shells without a browser read the recorded target and act on it themselves.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Navigation> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<Navigation> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    fn record(&self, kind: NavigationKind, path: &str) {
        info!("Navigate ({kind:?}) -> {path}");
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Navigation {
                kind,
                path: path.to_string(),
            });
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        self.record(NavigationKind::Push, path);
    }

    fn hard_navigate(&self, path: &str) {
        self.record(NavigationKind::Hard, path);
    }
}
