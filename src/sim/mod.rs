//! Scene simulation module
//!
//! All per-frame scene logic lives here. This module stays platform-free:
//! - Host time comes in as timestamps, never read from the system
//! - Seeded RNG only
//! - Host events arrive through a mailbox, drained at tick start
//! - No rendering or DOM dependencies

pub mod camera;
pub mod clock;
pub mod collectibles;
pub mod collision;
pub mod input;
pub mod intro;
pub mod mover;
pub mod starfield;
pub mod state;
pub mod tick;
pub mod vehicle;
pub mod viewport;

pub use camera::{Camera, OrbitControls};
pub use clock::Clock;
pub use collectibles::{Collectible, CollectibleField};
pub use input::{HostEvent, InputState, Mailbox};
pub use intro::{IntroPhase, IntroSequencer, IntroStep};
pub use mover::{Bounds, Mover};
pub use starfield::{StarBody, StarField};
pub use state::{PageSignal, SceneEvent, SceneState, ScrollState};
pub use tick::{apply_event, tick};
pub use vehicle::{Vehicle, VehicleSlot};
pub use viewport::{Viewport, ViewportAdapter};
