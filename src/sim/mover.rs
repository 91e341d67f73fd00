//! Keyboard steering of the ship inside the viewport
//!
//! Bounds are half the viewport size in each axis. Holding DOWN while the
//! ship already sits on the lower bound hands control to the page: scroll
//! is enabled and the page moves down a fixed step every such tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::input::InputState;
use super::vehicle::VehicleSlot;
use crate::consts::{MOVE_SPEED, SCROLL_STEP};

/// Half-viewport clamp limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Bounds for a viewport of the given pixel size
    pub fn from_viewport(width: u32, height: u32) -> Self {
        Self {
            width: width as f32 / 2.0,
            height: height as f32 / 2.0,
        }
    }

    /// Pull `pos` back inside the limits (x and y only)
    pub fn confine(&self, pos: &mut Vec3) {
        pos.x = pos.x.clamp(-self.width, self.width);
        pos.y = pos.y.clamp(-self.height, self.height);
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mover {
    pub speed: f32,
    pub scroll_step: f32,
}

impl Default for Mover {
    fn default() -> Self {
        Self {
            speed: MOVE_SPEED,
            scroll_step: SCROLL_STEP,
        }
    }
}

impl Mover {
    pub fn new(speed: f32, scroll_step: f32) -> Self {
        Self { speed, scroll_step }
    }

    /// Move the ship one tick. Returns the page scroll to apply when the
    /// ship pushes past the lower bound.
    pub fn tick(&self, slot: &mut VehicleSlot, input: &InputState, bounds: Bounds) -> Option<f32> {
        let vehicle = slot.get_mut()?;
        let pos = &mut vehicle.pos;
        let mut scroll = None;

        if input.up() && pos.y < bounds.height {
            pos.y = (pos.y + self.speed).min(bounds.height);
        }
        if input.down() {
            if pos.y > -bounds.height {
                pos.y = (pos.y - self.speed).max(-bounds.height);
            } else {
                scroll = Some(self.scroll_step);
            }
        }
        if input.left() && pos.x > -bounds.width {
            pos.x = (pos.x - self.speed).max(-bounds.width);
        }
        if input.right() && pos.x < bounds.width {
            pos.x = (pos.x + self.speed).min(bounds.width);
        }

        scroll
    }
}
