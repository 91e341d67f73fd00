//! Scene state and core simulation types
//!
//! Everything the frame tick reads or writes lives in one `SceneState`,
//! constructed once and passed by mutable reference each tick.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::{Camera, OrbitControls};
use super::clock::Clock;
use super::collectibles::CollectibleField;
use super::input::InputState;
use super::intro::IntroSequencer;
use super::mover::Mover;
use super::starfield::StarField;
use super::vehicle::{Vehicle, VehicleSlot};
use super::viewport::{Viewport, ViewportAdapter};
use crate::settings::SceneConfig;

/// Scene-graph changes renderers must mirror
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// Ship model attached to the scene
    VehicleAttached,
    /// Collectible detached from the scene
    CollectibleRemoved { id: u32 },
    /// Render targets must be resized
    Resized(Viewport),
}

/// Effects on the surrounding page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PageSignal {
    EnableScroll,
    ScrollBy(f32),
    /// Mark the named content region visible
    RevealContent { region: String, class: String },
}

/// Page scroll as driven by the scene
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScrollState {
    pub enabled: bool,
    /// Total distance scrolled by the ship escape
    pub offset: f32,
}

/// Complete scene state
#[derive(Debug, Clone)]
pub struct SceneState {
    pub seed: u64,
    pub clock: Clock,
    pub input: InputState,
    pub stars: StarField,
    pub collectibles: CollectibleField,
    pub collectibles_enabled: bool,
    pub vehicle: VehicleSlot,
    pub vehicle_scale: f32,
    pub mover: Mover,
    pub collision_radius: f32,
    pub intro: IntroSequencer,
    pub camera: Camera,
    pub controls: OrbitControls,
    /// Euler rotation of the whole scene graph
    pub scene_rotation: Vec3,
    pub viewport: ViewportAdapter,
    pub scroll: ScrollState,
    pub content_region: String,
    pub reveal_class: String,
    /// Ticks run so far
    pub frame: u64,
    /// Pending scene-graph events (drained by the frame driver)
    pub events: Vec<SceneEvent>,
    /// Pending page effects (drained by the frame driver)
    pub signals: Vec<PageSignal>,
}

impl SceneState {
    /// Build the scene: populate stars and collectibles from `seed` and
    /// start the clock at `now_ms`
    pub fn new(config: &SceneConfig, seed: u64, now_ms: f64, viewport: Viewport) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut stars = StarField::new();
        stars.populate(config.star_count, config.field_extent, &mut rng);

        let mut collectibles = CollectibleField::new(config.levitation_amplitude, config.drift_step);
        collectibles.populate(
            config.effective_collectible_count(),
            config.field_extent,
            &config.palette,
            &mut rng,
        );

        let camera = Camera::new(
            config.camera_start,
            config.fov_degrees,
            viewport.aspect(),
            config.near,
            config.far,
        );

        Self {
            seed,
            clock: Clock::start(now_ms),
            input: InputState::new(),
            stars,
            collectibles,
            collectibles_enabled: config.collectibles_enabled,
            vehicle: VehicleSlot::Absent,
            vehicle_scale: config.vehicle_scale,
            mover: Mover::new(config.move_speed, config.scroll_step),
            collision_radius: config.collision_radius,
            intro: IntroSequencer::new(
                config.intro_duration_ms,
                config.dolly_step,
                Vec2::new(config.spin_step.0, config.spin_step.1),
            ),
            camera,
            controls: OrbitControls::new(config.damping_factor),
            scene_rotation: Vec3::ZERO,
            viewport: ViewportAdapter::new(viewport.width, viewport.height),
            scroll: ScrollState::default(),
            content_region: config.content_region.clone(),
            reveal_class: config.reveal_class.clone(),
            frame: 0,
            events: Vec::new(),
            signals: Vec::new(),
        }
    }

    /// Place the ship at origin. Returns false if one is already present.
    pub fn attach_vehicle(&mut self) -> bool {
        let attached = self.vehicle.install(Vehicle::new(self.vehicle_scale));
        if attached {
            self.events.push(SceneEvent::VehicleAttached);
        }
        attached
    }

    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_signals(&mut self) -> Vec<PageSignal> {
        std::mem::take(&mut self.signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SceneVariant;

    #[test]
    fn test_new_scene_populated() {
        let state = SceneState::new(&SceneConfig::default(), 42, 0.0, Viewport::new(1280, 720));
        assert_eq!(state.stars.stars.len(), 600);
        assert_eq!(state.collectibles.live_count(), 100);
        assert!(!state.vehicle.is_present());
        assert_eq!(state.camera.pos, Vec3::new(4.0, 5.0, 11.0));
        assert_eq!(state.viewport.bounds().height, 360.0);
    }

    #[test]
    fn test_classic_variant_has_no_collectibles() {
        let config = SceneVariant::Classic.config();
        let state = SceneState::new(&config, 42, 0.0, Viewport::new(800, 600));
        assert_eq!(state.collectibles.live_count(), 0);
        assert_eq!(state.stars.stars.len(), 600);
    }

    #[test]
    fn test_same_seed_same_field() {
        let config = SceneConfig::default();
        let a = SceneState::new(&config, 99, 0.0, Viewport::new(800, 600));
        let b = SceneState::new(&config, 99, 0.0, Viewport::new(800, 600));
        assert_eq!(a.stars.stars, b.stars.stars);
        assert!(a.collectibles.iter_live().eq(b.collectibles.iter_live()));
    }

    #[test]
    fn test_attach_vehicle_once() {
        let mut state = SceneState::new(&SceneConfig::default(), 1, 0.0, Viewport::new(800, 600));
        assert!(state.attach_vehicle());
        assert!(!state.attach_vehicle());
        assert_eq!(state.take_events(), vec![SceneEvent::VehicleAttached]);
        assert_eq!(state.vehicle.get().map(|v| v.scale), Some(3.0));
    }
}
