/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! User-facing error surface
//!
//! Holds the single most recent failure to show to a user. There is no queue:
//! every new failure overwrites the previous one, whichever call finished last.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Snapshot of the error surface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorSurface {
    /// Whether an error should currently be displayed
    pub visible: bool,
    /// Message to display
    pub message: String,
    /// When the message was last written
    pub raised_at: Option<DateTime<Utc>>,
}

/// Error surface shared between the API client and a display collaborator
#[derive(Debug, Default)]
pub struct ErrorState {
    surface: RwLock<ErrorSurface>,
}

impl ErrorState {
    /// Creates a hidden, empty error state
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hidden, empty error state ready to be shared
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Makes `message` the visible error, replacing whatever was there
    pub async fn show(&self, message: impl Into<String>) {
        let mut surface = self.surface.write().await;
        surface.visible = true;
        surface.message = message.into();
        surface.raised_at = Some(Utc::now());
    }

    /// Hides the error after the user acknowledged it
    pub async fn reset(&self) {
        let mut surface = self.surface.write().await;
        *surface = ErrorSurface::default();
    }

    /// Returns a copy of the current surface
    pub async fn snapshot(&self) -> ErrorSurface {
        self.surface.read().await.clone()
    }

    /// Whether an error is currently visible
    pub async fn is_visible(&self) -> bool {
        self.surface.read().await.visible
    }

    /// Current message, empty when nothing was raised since the last reset
    pub async fn message(&self) -> String {
        self.surface.read().await.message.clone()
    }
}
