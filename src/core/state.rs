//! # Application State
//!
//! Everything a screen needs to do its job, in one place:
//!
//! ```text
//! App
//! ├── api: Arc<dyn TourismApi>             // REST backend
//! ├── store: Arc<dyn KeyValueStore>        // persisted token
//! ├── location: Arc<dyn LocationProvider>  // device position
//! ├── navigator: Navigator                 // route stack
//! └── alerts: Vec<Alert>                   // pending user-facing messages
//! ```
//!
//! Screen-local state (form fields, fetched lists) lives on the screens
//! themselves; only the token crosses screen boundaries.

use std::fmt;
use std::sync::Arc;

use crate::api::TourismApi;
use crate::core::location::LocationProvider;
use crate::core::navigation::Navigator;
use crate::core::storage::KeyValueStore;

/// A message surfaced to the user, optionally with a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: Option<String>,
    pub message: String,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "[{title}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

pub struct App {
    pub api: Arc<dyn TourismApi>,
    pub store: Arc<dyn KeyValueStore>,
    pub location: Arc<dyn LocationProvider>,
    pub navigator: Navigator,
    pub alerts: Vec<Alert>,
}

impl App {
    pub fn new(
        api: Arc<dyn TourismApi>,
        store: Arc<dyn KeyValueStore>,
        location: Arc<dyn LocationProvider>,
    ) -> Self {
        Self {
            api,
            store,
            location,
            navigator: Navigator::default(),
            alerts: Vec::new(),
        }
    }

    /// Queues a titled alert.
    pub fn alert(&mut self, title: &str, message: &str) {
        self.alerts.push(Alert {
            title: Some(title.to_string()),
            message: message.to_string(),
        });
    }

    /// Queues an untitled alert.
    pub fn notice(&mut self, message: &str) {
        self.alerts.push(Alert {
            title: None,
            message: message.to_string(),
        });
    }

    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }
}
