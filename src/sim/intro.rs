//! Intro flight
//!
//! While flying, the camera dollies forward and the whole scene spins
//! slowly. Once the wall clock passes the intro duration the sequencer
//! settles for good and reports the transition exactly once.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::{DOLLY_STEP, INTRO_DURATION_MS, SPIN_STEP_X, SPIN_STEP_Y};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntroPhase {
    /// Camera flight in progress
    Flying,
    /// Flight over, page content revealed (terminal)
    Settled,
}

/// What a single intro tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroStep {
    /// Advanced the flight
    Flew,
    /// Just switched to `Settled`; fire the reveal
    Settled,
    /// Already settled, nothing to do
    Idle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroSequencer {
    pub phase: IntroPhase,
    pub duration_ms: f64,
    pub dolly_step: f32,
    /// Per-tick scene rotation around x and y
    pub spin_step: Vec2,
}

impl Default for IntroSequencer {
    fn default() -> Self {
        Self::new(INTRO_DURATION_MS, DOLLY_STEP, Vec2::new(SPIN_STEP_X, SPIN_STEP_Y))
    }
}

impl IntroSequencer {
    pub fn new(duration_ms: f64, dolly_step: f32, spin_step: Vec2) -> Self {
        Self {
            phase: IntroPhase::Flying,
            duration_ms,
            dolly_step,
            spin_step,
        }
    }

    /// Run one tick against the wall-clock elapsed time
    pub fn tick(&mut self, elapsed_ms: f64, camera_pos: &mut Vec3, scene_rotation: &mut Vec3) -> IntroStep {
        match self.phase {
            IntroPhase::Settled => IntroStep::Idle,
            IntroPhase::Flying if elapsed_ms < self.duration_ms => {
                camera_pos.z -= self.dolly_step;
                scene_rotation.x += self.spin_step.x;
                scene_rotation.y += self.spin_step.y;
                IntroStep::Flew
            }
            IntroPhase::Flying => {
                self.phase = IntroPhase::Settled;
                log::info!("Intro settled after {:.0} ms", elapsed_ms);
                IntroStep::Settled
            }
        }
    }

    pub fn is_settled(&self) -> bool {
        self.phase == IntroPhase::Settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_then_settle_once() {
        let mut intro = IntroSequencer::default();
        let mut camera = Vec3::new(4.0, 5.0, 11.0);
        let mut rotation = Vec3::ZERO;

        let mut ticks = 0;
        let mut elapsed = 0.0;
        while elapsed < 6000.0 {
            let z_before = camera.z;
            assert_eq!(intro.tick(elapsed, &mut camera, &mut rotation), IntroStep::Flew);
            assert!((z_before - camera.z - 0.5).abs() < 1e-4);
            ticks += 1;
            elapsed += 100.0;
        }
        assert_eq!(intro.phase, IntroPhase::Flying);
        assert!((rotation.x - 0.0005 * ticks as f32).abs() < 1e-5);
        assert!((rotation.y - 0.001 * ticks as f32).abs() < 1e-5);

        let (camera_at_settle, rotation_at_settle) = (camera, rotation);
        assert_eq!(intro.tick(6000.0, &mut camera, &mut rotation), IntroStep::Settled);
        assert!(intro.is_settled());
        assert_eq!(intro.tick(7000.0, &mut camera, &mut rotation), IntroStep::Idle);
        assert_eq!(camera, camera_at_settle);
        assert_eq!(rotation, rotation_at_settle);
    }

    #[test]
    fn test_never_settles_early() {
        let mut intro = IntroSequencer::default();
        let (mut camera, mut rotation) = (Vec3::ZERO, Vec3::ZERO);
        assert_eq!(intro.tick(5999.0, &mut camera, &mut rotation), IntroStep::Flew);
        assert_eq!(intro.phase, IntroPhase::Flying);
    }

    #[test]
    fn test_late_first_tick_settles_immediately() {
        // A stalled tab may deliver its first frame well after the intro
        let mut intro = IntroSequencer::default();
        let (mut camera, mut rotation) = (Vec3::ZERO, Vec3::ZERO);
        assert_eq!(intro.tick(9000.0, &mut camera, &mut rotation), IntroStep::Settled);
        assert_eq!(camera, Vec3::ZERO);
    }
}
