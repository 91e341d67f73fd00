//! Scene configuration and variant presets
//!
//! One parameterized core covers every page variant: plain flythrough,
//! flythrough with collectibles, alternate camera start, single canvas.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::{DEFAULT_PALETTE, Rgb};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid scene config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Renderer count must be 1 or 2, got {0}")]
    InvalidRendererCount(u8),
    #[error("Collectible palette is empty")]
    EmptyPalette,
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
}

/// Known page variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SceneVariant {
    /// Flythrough with steerable ship, two canvases
    Classic,
    /// Classic plus levitating collectibles
    #[default]
    Collectibles,
    /// Collectibles with the camera starting further back
    AltCamera,
    /// Collectibles drawn on a single canvas
    SingleRenderer,
}

impl SceneVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneVariant::Classic => "classic",
            SceneVariant::Collectibles => "collectibles",
            SceneVariant::AltCamera => "alt-camera",
            SceneVariant::SingleRenderer => "single-renderer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "plain" => Some(SceneVariant::Classic),
            "collectibles" => Some(SceneVariant::Collectibles),
            "alt-camera" | "alt_camera" => Some(SceneVariant::AltCamera),
            "single-renderer" | "single" => Some(SceneVariant::SingleRenderer),
            _ => None,
        }
    }

    /// Preset configuration for this variant
    pub fn config(&self) -> SceneConfig {
        let base = SceneConfig::default();
        match self {
            SceneVariant::Classic => SceneConfig {
                collectibles_enabled: false,
                ..base
            },
            SceneVariant::Collectibles => base,
            SceneVariant::AltCamera => SceneConfig {
                camera_start: Vec3::new(0.0, 2.0, 30.0),
                ..base
            },
            SceneVariant::SingleRenderer => SceneConfig {
                renderer_count: 1,
                ..base
            },
        }
    }
}

/// Full scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// RNG seed; `None` lets the host pick one (usually the current time)
    pub seed: Option<u64>,

    // === Camera ===
    pub camera_start: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub damping_factor: f32,

    // === Rendering ===
    /// Number of render targets (background + foreground = 2)
    pub renderer_count: u8,

    // === Population ===
    pub star_count: usize,
    pub collectibles_enabled: bool,
    pub collectible_count: usize,
    pub field_extent: f32,
    pub palette: Vec<Rgb>,

    // === Intro ===
    pub intro_duration_ms: f64,
    pub dolly_step: f32,
    pub spin_step: (f32, f32),

    // === Ship ===
    pub vehicle_asset: String,
    pub vehicle_scale: f32,
    pub move_speed: f32,
    pub scroll_step: f32,
    pub collision_radius: f32,

    // === Collectible motion ===
    pub levitation_amplitude: f32,
    pub drift_step: f32,

    // === Page ===
    pub content_region: String,
    pub reveal_class: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,

            camera_start: Vec3::new(4.0, 5.0, 11.0),
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            damping_factor: DAMPING_FACTOR,

            renderer_count: 2,

            star_count: STAR_COUNT,
            collectibles_enabled: true,
            collectible_count: COLLECTIBLE_COUNT,
            field_extent: FIELD_EXTENT,
            palette: DEFAULT_PALETTE.to_vec(),

            intro_duration_ms: INTRO_DURATION_MS,
            dolly_step: DOLLY_STEP,
            spin_step: (SPIN_STEP_X, SPIN_STEP_Y),

            vehicle_asset: VEHICLE_ASSET.to_string(),
            vehicle_scale: VEHICLE_SCALE,
            move_speed: MOVE_SPEED,
            scroll_step: SCROLL_STEP,
            collision_radius: COLLISION_RADIUS,

            levitation_amplitude: LEVITATION_AMPLITUDE,
            drift_step: DRIFT_STEP,

            content_region: CONTENT_REGION.to_string(),
            reveal_class: REVEAL_CLASS.to_string(),
        }
    }
}

impl SceneConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=2).contains(&self.renderer_count) {
            return Err(ConfigError::InvalidRendererCount(self.renderer_count));
        }
        if self.collectibles_enabled && self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        let positive = [
            ("intro_duration_ms", self.intro_duration_ms as f32),
            ("field_extent", self.field_extent),
            ("fov_degrees", self.fov_degrees),
            ("near", self.near),
            ("far", self.far),
            ("vehicle_scale", self.vehicle_scale),
            ("move_speed", self.move_speed),
            ("collision_radius", self.collision_radius),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        Ok(())
    }

    /// Number of collectibles to spawn (0 when the feature is off)
    pub fn effective_collectible_count(&self) -> usize {
        if self.collectibles_enabled {
            self.collectible_count
        } else {
            0
        }
    }
}
