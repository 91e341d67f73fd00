//! Ship model loading
//!
//! Fetching and parsing the model happens outside the core (the browser
//! loader on web). The core only tracks progress and, on success, fills
//! the write-once vehicle slot. A failed load is logged and the scene
//! carries on without a ship.

use thiserror::Error;

use crate::sim::SceneState;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Failed to fetch asset: {0}")]
    Network(String),
    #[error("Failed to parse asset: {0}")]
    Parse(String),
    #[error("Vehicle already loaded")]
    AlreadyLoaded,
}

impl LoadError {
    /// Classify a loader error message
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("parse") || lower.contains("json") || lower.contains("unexpected token") {
            LoadError::Parse(message.to_string())
        } else {
            LoadError::Network(message.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Pending,
    Loaded,
    Failed(LoadError),
}

/// Tracks one asset load from request to completion
#[derive(Debug, Clone)]
pub struct AssetLoad {
    pub path: String,
    /// Fraction loaded, 0..=1
    pub progress: f32,
    pub status: LoadStatus,
}

impl AssetLoad {
    pub fn new(path: &str) -> Self {
        log::info!("Loading {}", path);
        Self {
            path: path.to_string(),
            progress: 0.0,
            status: LoadStatus::Pending,
        }
    }

    /// Record a progress callback. Totals of zero (unknown length) are
    /// ignored.
    pub fn on_progress(&mut self, loaded: f64, total: f64) {
        if total <= 0.0 {
            return;
        }
        self.progress = (loaded / total).clamp(0.0, 1.0) as f32;
        log::debug!("{}: {:.0}% loaded", self.path, self.progress * 100.0);
    }

    /// Resolve the load. On success the ship is attached to the scene.
    pub fn finish(&mut self, state: &mut SceneState, result: Result<(), LoadError>) -> Result<(), LoadError> {
        match &self.status {
            LoadStatus::Pending => {}
            LoadStatus::Loaded => return Err(LoadError::AlreadyLoaded),
            LoadStatus::Failed(e) => return Err(e.clone()),
        }
        let outcome = result.and_then(|()| {
            if state.attach_vehicle() {
                Ok(())
            } else {
                Err(LoadError::AlreadyLoaded)
            }
        });
        match &outcome {
            Ok(()) => {
                self.progress = 1.0;
                self.status = LoadStatus::Loaded;
                log::info!("Loaded {} (scale {})", self.path, state.vehicle_scale);
            }
            Err(e) => {
                self.status = LoadStatus::Failed(e.clone());
                log::error!("Error loading model {}: {}", self.path, e);
            }
        }
        outcome
    }
}
