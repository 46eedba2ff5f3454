//! Application list backing the icon grid.
//!
//! The catalog is the only writer of the icon count in the scroll record.
//! Anything that lays out icons subscribes to changes instead of being
//! called back directly.

mod desktop;

use std::path::PathBuf;

use tokio::sync::watch;

use crate::log;
use crate::scroll::SharedScrollState;

pub use desktop::scan_applications;

/// One launchable application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    pub name: String,
    pub exec: Option<String>,
    /// Desktop file the entry was read from
    pub source: PathBuf,
}

impl AppEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exec: None,
            source: PathBuf::new(),
        }
    }
}

pub struct AppCatalog {
    apps: Vec<AppEntry>,
    state: SharedScrollState,
    changes: watch::Sender<usize>,
}

impl AppCatalog {
    pub fn new(state: SharedScrollState) -> Self {
        let (changes, _) = watch::channel(0);
        state.set_icon_count(0);
        Self {
            apps: vec![],
            state,
            changes,
        }
    }

    /// Receive the icon count each time the list is replaced.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.changes.subscribe()
    }

    /// Replace the application list and publish the new icon count.
    pub fn set_apps(&mut self, apps: Vec<AppEntry>) {
        let count = apps.len();
        self.apps = apps;
        self.state.set_icon_count(count);
        self.changes.send_replace(count);
        log::log(&format!("new icons arrived! now have {}", count));
    }

    pub fn apps(&self) -> &[AppEntry] {
        &self.apps
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<AppEntry> {
        names.iter().map(|n| AppEntry::new(*n)).collect()
    }

    #[test]
    fn test_set_apps_updates_icon_count() {
        let state = SharedScrollState::new();
        let mut catalog = AppCatalog::new(state.clone());
        assert!(catalog.is_empty());

        catalog.set_apps(entries(&["Files", "Clock", "Maps"]));

        assert_eq!(catalog.len(), 3);
        assert_eq!(state.snapshot().icon_count, 3);
        assert_eq!(catalog.apps()[1].name, "Clock");
    }

    #[test]
    fn test_set_apps_leaves_scroll_alone() {
        let state = SharedScrollState::new();
        state.update(|s| s.scroll_x = -64);
        let mut catalog = AppCatalog::new(state.clone());

        catalog.set_apps(entries(&["Files"]));

        assert_eq!(state.snapshot().scroll_x, -64);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let mut catalog = AppCatalog::new(SharedScrollState::new());
        let mut rx = catalog.subscribe();

        catalog.set_apps(entries(&["Files", "Clock"]));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 2);

        catalog.set_apps(vec![]);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 0);
    }

    #[test]
    fn test_set_apps_without_subscribers() {
        let mut catalog = AppCatalog::new(SharedScrollState::new());
        catalog.set_apps(entries(&["Files"]));
        assert_eq!(*catalog.subscribe().borrow(), 1);
    }
}
