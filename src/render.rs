//! Frame hand-off to external renderers
//!
//! The scene never draws anything itself. Static content (stars, lights)
//! goes to each render target once through `SceneSetup`; after every tick
//! each target receives the same `FrameSnapshot`.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::Rgb;
use crate::consts::{COLLECTIBLE_RADIUS, STAR_RADIUS, STAR_SEGMENTS};
use crate::sim::{SceneEvent, SceneState, StarBody, Vehicle, Viewport};

/// Light sources in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Light {
    Ambient {
        color: Rgb,
        intensity: f32,
    },
    Point {
        color: Rgb,
        intensity: f32,
        pos: Vec3,
    },
    Spot {
        color: Rgb,
        intensity: f32,
        distance: f32,
        /// Cone half-angle (radians)
        angle: f32,
        penumbra: f32,
        pos: Vec3,
        cast_shadow: bool,
        shadow_map_size: u32,
        shadow_near: f32,
        shadow_far: f32,
    },
}

/// Lighting used by every variant
pub fn default_lights() -> Vec<Light> {
    vec![
        Light::Point {
            color: 0xffffff,
            intensity: 1.0,
            pos: Vec3::new(5.0, 5.0, 5.0),
        },
        Light::Ambient {
            color: 0xffffff,
            intensity: 0.5,
        },
        Light::Spot {
            color: 0x2d3c54,
            intensity: 3.0,
            distance: 100.0,
            angle: std::f32::consts::FRAC_PI_6,
            penumbra: 0.3,
            pos: Vec3::new(0.0, 25.0, 0.0),
            cast_shadow: true,
            shadow_map_size: 1024,
            shadow_near: 0.1,
            shadow_far: 50.0,
        },
    ]
}

/// Sphere mesh parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereStyle {
    pub radius: f32,
    pub segments: u32,
    pub color: Rgb,
}

/// Which canvas a render target draws to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetRole {
    /// Star backdrop, transparent
    Background,
    /// Ship canvas, transparent and antialiased
    Foreground,
}

impl TargetRole {
    pub fn canvas_id(&self) -> &'static str {
        match self {
            TargetRole::Background => "canvas",
            TargetRole::Foreground => "modelCanvas",
        }
    }

    pub fn antialias(&self) -> bool {
        matches!(self, TargetRole::Foreground)
    }

    /// Roles for a given renderer count (1 or 2)
    pub fn for_count(count: u8) -> &'static [TargetRole] {
        match count {
            1 => &[TargetRole::Foreground],
            _ => &[TargetRole::Foreground, TargetRole::Background],
        }
    }
}

/// Static scene content, sent once per target before the first frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSetup {
    pub viewport: Viewport,
    pub lights: Vec<Light>,
    pub star_style: SphereStyle,
    pub stars: Vec<StarBody>,
    pub collectible_radius: f32,
    pub vehicle_asset: String,
}

impl SceneSetup {
    pub fn from_state(state: &SceneState, vehicle_asset: &str) -> Self {
        Self {
            viewport: state.viewport.viewport,
            lights: default_lights(),
            star_style: SphereStyle {
                radius: STAR_RADIUS,
                segments: STAR_SEGMENTS,
                color: 0xffffff,
            },
            stars: state.stars.stars.clone(),
            collectible_radius: COLLECTIBLE_RADIUS,
            vehicle_asset: vehicle_asset.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub pos: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub view: Mat4,
    pub projection: Mat4,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectibleView {
    pub id: u32,
    pub pos: Vec3,
    pub color: Rgb,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub elapsed_ms: f64,
    pub camera: CameraView,
    pub scene_rotation: Vec3,
    pub vehicle: Option<Vehicle>,
    pub collectibles: Vec<CollectibleView>,
    /// Scene-graph changes since the previous frame
    pub events: Vec<SceneEvent>,
}

impl FrameSnapshot {
    pub fn capture(state: &SceneState, events: Vec<SceneEvent>) -> Self {
        let camera = &state.camera;
        Self {
            frame: state.frame,
            elapsed_ms: state.clock.elapsed_ms(),
            camera: CameraView {
                pos: camera.pos,
                target: camera.target,
                fov_degrees: camera.fov_y.to_degrees(),
                aspect: camera.aspect,
                near: camera.near,
                far: camera.far,
                view: camera.view,
                projection: camera.projection,
            },
            scene_rotation: state.scene_rotation,
            vehicle: state.vehicle.get().copied(),
            collectibles: state
                .collectibles
                .iter_live()
                .map(|c| CollectibleView {
                    id: c.id,
                    pos: c.pos,
                    color: c.color,
                })
                .collect(),
            events,
        }
    }
}

/// A drawable surface fed by the frame driver
pub trait RenderTarget {
    fn role(&self) -> TargetRole;
    /// Receive static content before the first frame
    fn setup(&mut self, setup: &SceneSetup);
    fn resize(&mut self, viewport: Viewport);
    fn render(&mut self, frame: &FrameSnapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SceneConfig;

    #[test]
    fn test_capture_reflects_state() {
        let mut state = SceneState::new(&SceneConfig::default(), 8, 0.0, Viewport::new(800, 600));
        state.attach_vehicle();
        state.collectibles.remove(0);

        let snapshot = FrameSnapshot::capture(&state, state.events.clone());
        assert_eq!(snapshot.collectibles.len(), 99);
        assert!(snapshot.collectibles.iter().all(|c| c.id != 0));
        assert_eq!(snapshot.vehicle.map(|v| v.scale), Some(3.0));
        assert!((snapshot.camera.fov_degrees - 75.0).abs() < 1e-3);
        assert_eq!(snapshot.events, vec![SceneEvent::VehicleAttached]);
    }

    #[test]
    fn test_snapshot_serializes_for_js() {
        let state = SceneState::new(&SceneConfig::default(), 8, 0.0, Viewport::new(800, 600));
        let json = serde_json::to_string(&FrameSnapshot::capture(&state, Vec::new())).unwrap();
        assert!(json.contains("\"scene_rotation\""));
        assert!(json.contains("\"vehicle\":null"));

        let setup = serde_json::to_value(SceneSetup::from_state(&state, "ship.gltf")).unwrap();
        assert_eq!(setup["stars"].as_array().map(|s| s.len()), Some(600));
        assert_eq!(setup["lights"][2]["kind"], "spot");
    }

    #[test]
    fn test_roles_for_count() {
        assert_eq!(TargetRole::for_count(1), &[TargetRole::Foreground]);
        assert_eq!(TargetRole::for_count(2).len(), 2);
        assert!(TargetRole::Foreground.antialias());
        assert!(!TargetRole::Background.antialias());
    }
}
