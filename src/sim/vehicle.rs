//! The steerable ship
//!
//! The model arrives asynchronously, so the scene holds it in a write-once
//! slot. Consumers match on `Absent`/`Present` instead of checking for null.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub pos: Vec3,
    pub scale: f32,
}

impl Vehicle {
    /// Place at origin with uniform scale
    pub fn new(scale: f32) -> Self {
        Self {
            pos: Vec3::ZERO,
            scale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum VehicleSlot {
    /// Not loaded yet, or loading failed
    #[default]
    Absent,
    Present(Vehicle),
}

impl VehicleSlot {
    /// Fill the slot. Returns false (and leaves the slot untouched) if a
    /// vehicle is already present.
    pub fn install(&mut self, vehicle: Vehicle) -> bool {
        match self {
            VehicleSlot::Absent => {
                *self = VehicleSlot::Present(vehicle);
                true
            }
            VehicleSlot::Present(_) => false,
        }
    }

    pub fn get(&self) -> Option<&Vehicle> {
        match self {
            VehicleSlot::Present(v) => Some(v),
            VehicleSlot::Absent => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut Vehicle> {
        match self {
            VehicleSlot::Present(v) => Some(v),
            VehicleSlot::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, VehicleSlot::Present(_))
    }
}
