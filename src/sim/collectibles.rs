//! Levitating collectibles
//!
//! Each collectible bobs around the height it was spawned at and drifts
//! slowly in the horizontal plane. Collectibles are stored in id-indexed
//! slots; removal flips the alive flag so ids stay stable and removal is
//! O(1) without reshuffling the live set mid-iteration.

use glam::Vec3;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::starfield::spread_point;
use crate::Rgb;
use crate::consts::{DRIFT_STEP, LEVITATION_AMPLITUDE};

/// Color used if a palette turns out empty
const FALLBACK_COLOR: Rgb = 0xffffff;

/// A levitating sphere the ship can pick up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec3,
    /// Spawn height, center of the vertical oscillation
    pub original_y: f32,
    pub color: Rgb,
    pub alive: bool,
}

impl Collectible {
    /// Advance one tick of motion. Height first, then drift using the new
    /// height.
    fn animate(&mut self, t: f32, amplitude: f32, drift: f32) {
        self.pos.y = self.original_y + (t + self.pos.x).sin() * amplitude;
        let phase = t * 2.0 + self.pos.y;
        self.pos.x += phase.sin() * drift;
        self.pos.z += phase.cos() * drift;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectibleField {
    slots: Vec<Collectible>,
    live: usize,
    pub amplitude: f32,
    pub drift: f32,
}

impl Default for CollectibleField {
    fn default() -> Self {
        Self::new(LEVITATION_AMPLITUDE, DRIFT_STEP)
    }
}

impl CollectibleField {
    pub fn new(amplitude: f32, drift: f32) -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            amplitude,
            drift,
        }
    }

    /// Spawn `count` collectibles scattered like stars, colored from `palette`
    pub fn populate<R: Rng>(&mut self, count: usize, extent: f32, palette: &[Rgb], rng: &mut R) {
        if palette.is_empty() && count > 0 {
            log::warn!("Empty collectible palette, using white");
        }
        self.slots.reserve(count);
        for _ in 0..count {
            let color = palette.choose(rng).copied().unwrap_or(FALLBACK_COLOR);
            let pos = spread_point(rng, extent);
            self.slots.push(Collectible {
                id: self.slots.len() as u32,
                pos,
                original_y: pos.y,
                color,
                alive: true,
            });
            self.live += 1;
        }
        log::info!("Collectibles populated: {} live", self.live);
    }

    /// Animate every live collectible for elapsed time `t` (seconds)
    pub fn update(&mut self, t: f32) {
        let (amplitude, drift) = (self.amplitude, self.drift);
        for c in self.slots.iter_mut().filter(|c| c.alive) {
            c.animate(t, amplitude, drift);
        }
    }

    /// Mark a collectible dead. Returns false if it was unknown or already
    /// removed.
    pub fn remove(&mut self, id: u32) -> bool {
        match self.slots.get_mut(id as usize) {
            Some(c) if c.alive => {
                c.alive = false;
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: u32) -> Option<&Collectible> {
        self.slots.get(id as usize)
    }

    /// Live collectibles in id order
    pub fn iter_live(&self) -> impl Iterator<Item = &Collectible> {
        self.slots.iter().filter(|c| c.alive)
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Total spawned, dead included
    #[cfg(test)]
    pub(crate) fn spawned(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub(crate) fn push_at(&mut self, pos: Vec3) -> u32 {
        let id = self.slots.len() as u32;
        self.slots.push(Collectible {
            id,
            pos,
            original_y: pos.y,
            color: FALLBACK_COLOR,
            alive: true,
        });
        self.live += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_PALETTE;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn seeded_field(seed: u64, count: usize) -> CollectibleField {
        let mut field = CollectibleField::default();
        field.populate(count, 200.0, &DEFAULT_PALETTE, &mut Pcg32::seed_from_u64(seed));
        field
    }

    #[test]
    fn test_populate_hundred() {
        let field = seeded_field(2024, 100);
        assert_eq!(field.live_count(), 100);
        for c in field.iter_live() {
            assert!(c.pos.abs().max_element() <= 100.0);
            assert_eq!(c.original_y, c.pos.y);
            assert!(DEFAULT_PALETTE.contains(&c.color));
        }
    }

    #[test]
    fn test_height_follows_levitation_curve() {
        let mut field = seeded_field(7, 20);
        for step in 0..120 {
            let t = step as f32 / 60.0;
            let before: Vec<(f32, f32)> = field.iter_live().map(|c| (c.pos.x, c.original_y)).collect();
            field.update(t);
            for (c, (x, original_y)) in field.iter_live().zip(before) {
                let expected = original_y + LEVITATION_AMPLITUDE * (t + x).sin();
                assert!((c.pos.y - expected).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_drift_uses_updated_height() {
        let mut field = CollectibleField::default();
        let id = field.push_at(Vec3::new(1.0, 3.0, -2.0));
        let t = 0.75;
        field.update(t);

        let y = 3.0 + (t + 1.0).sin() * LEVITATION_AMPLITUDE;
        let c = field.get(id).unwrap();
        assert!((c.pos.y - y).abs() < 1e-6);
        assert!((c.pos.x - (1.0 + (t * 2.0 + y).sin() * DRIFT_STEP)).abs() < 1e-6);
        assert!((c.pos.z - (-2.0 + (t * 2.0 + y).cos() * DRIFT_STEP)).abs() < 1e-6);
    }

    #[test]
    fn test_removed_collectible_frozen() {
        let mut field = seeded_field(3, 5);
        assert!(field.remove(2));
        let frozen = field.get(2).unwrap().pos;

        field.update(1.5);
        assert_eq!(field.get(2).unwrap().pos, frozen);
        assert_eq!(field.live_count(), 4);
        assert!(field.iter_live().all(|c| c.id != 2));

        // Second removal is a no-op
        assert!(!field.remove(2));
        assert!(!field.remove(99));
        assert_eq!(field.live_count(), 4);
    }

    #[test]
    fn test_removing_adjacent_does_not_skip() {
        let mut field = seeded_field(11, 6);
        assert!(field.remove(1));
        assert!(field.remove(2));
        let ids: Vec<u32> = field.iter_live().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 3, 4, 5]);
    }

    proptest! {
        #[test]
        fn prop_spawn_inside_field(seed in any::<u64>()) {
            let field = seeded_field(seed, 100);
            prop_assert_eq!(field.spawned(), 100);
            for c in field.iter_live() {
                prop_assert!(c.pos.abs().max_element() <= 100.0);
                prop_assert_eq!(c.original_y, c.pos.y);
            }
        }
    }
}
