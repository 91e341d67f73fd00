//! Viewport tracking and resize handling

use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::mover::Bounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Zero-sized dimensions are bumped to 1 so the aspect stays finite
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Ship movement limits for this viewport
    pub fn bounds(&self) -> Bounds {
        Bounds::from_viewport(self.width, self.height)
    }
}

/// Applies resize events to the camera and records the render-target size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportAdapter {
    pub viewport: Viewport,
}

impl ViewportAdapter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
        }
    }

    /// Recompute the projection for a new size. Returns the viewport the
    /// render targets should be resized to. Repeating a resize with the
    /// same size leaves everything unchanged.
    pub fn resize(&mut self, width: u32, height: u32, camera: &mut Camera) -> Viewport {
        self.viewport = Viewport::new(width, height);
        camera.set_aspect(self.viewport.aspect());
        log::debug!("Viewport resized to {}x{}", self.viewport.width, self.viewport.height);
        self.viewport
    }

    pub fn bounds(&self) -> Bounds {
        self.viewport.bounds()
    }
}
