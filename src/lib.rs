//! Warp Landing - scene choreography for an animated 3D landing page
//!
//! Core modules:
//! - `sim`: Per-frame scene simulation (intro flight, ship movement, collectibles)
//! - `scheduler`: Frame driver that feeds events in and pushes frames out
//! - `render`: Frame snapshots handed to external renderers
//! - `host`: Page effects (reveal content, scroll)
//! - `assets`: Ship model loading seam
//! - `settings`: Scene configuration and variant presets

pub mod assets;
pub mod host;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use assets::LoadError;
pub use scheduler::FrameScheduler;
pub use settings::{ConfigError, SceneConfig, SceneVariant};

/// Scene tuning constants
pub mod consts {
    /// Background stars spawned at startup
    pub const STAR_COUNT: usize = 600;
    /// Collectibles spawned at startup
    pub const COLLECTIBLE_COUNT: usize = 100;
    /// Side of the cube stars and collectibles are scattered in
    pub const FIELD_EXTENT: f32 = 200.0;

    /// Star sphere radius
    pub const STAR_RADIUS: f32 = 0.2;
    /// Star sphere width/height segments
    pub const STAR_SEGMENTS: u32 = 24;
    /// Collectible sphere radius
    pub const COLLECTIBLE_RADIUS: f32 = 0.5;

    /// Vertical levitation amplitude of collectibles
    pub const LEVITATION_AMPLITUDE: f32 = 2.0;
    /// Horizontal drift per tick of collectibles
    pub const DRIFT_STEP: f32 = 0.02;

    /// Ship movement per tick
    pub const MOVE_SPEED: f32 = 0.5;
    /// Page scroll per tick once the ship sinks past the lower bound
    pub const SCROLL_STEP: f32 = 10.0;
    /// Ship-to-collectible pickup distance
    pub const COLLISION_RADIUS: f32 = 1.0;

    /// Intro flight length (ms, wall clock)
    pub const INTRO_DURATION_MS: f64 = 6000.0;
    /// Camera forward dolly per tick during the intro
    pub const DOLLY_STEP: f32 = 0.5;
    /// Scene spin per tick during the intro (radians)
    pub const SPIN_STEP_X: f32 = 0.0005;
    pub const SPIN_STEP_Y: f32 = 0.001;

    /// Camera lens
    pub const CAMERA_FOV_DEGREES: f32 = 75.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 1000.0;
    /// Orbit controls damping factor
    pub const DAMPING_FACTOR: f32 = 0.05;

    /// Ship model
    pub const VEHICLE_ASSET: &str = "./millennium_falcon/scene.gltf";
    pub const VEHICLE_SCALE: f32 = 3.0;

    /// Page region revealed when the intro settles
    pub const CONTENT_REGION: &str = "content";
    pub const REVEAL_CLASS: &str = "visible";
}

/// Packed 0xRRGGBB color
pub type Rgb = u32;

/// Default collectible palette
pub const DEFAULT_PALETTE: [Rgb; 6] = [0xff6f61, 0xffd166, 0x06d6a0, 0x118ab2, 0xef476f, 0x9b5de5];
