//! Ship-versus-collectible pickup
//!
//! Plain Euclidean proximity: anything live closer than the pickup radius
//! to the ship is removed. Dead collectibles are never re-tested.

use super::collectibles::CollectibleField;
use super::vehicle::VehicleSlot;

/// Remove every live collectible within `radius` of the ship.
/// Returns the ids removed this call, in id order.
pub fn resolve(slot: &VehicleSlot, field: &mut CollectibleField, radius: f32) -> Vec<u32> {
    let Some(vehicle) = slot.get() else {
        return Vec::new();
    };

    let hits: Vec<u32> = field
        .iter_live()
        .filter(|c| c.pos.distance(vehicle.pos) < radius)
        .map(|c| c.id)
        .collect();

    for &id in &hits {
        field.remove(id);
    }
    if !hits.is_empty() {
        log::debug!("Collected {:?}, {} left", hits, field.live_count());
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::COLLISION_RADIUS;
    use crate::sim::vehicle::Vehicle;
    use glam::Vec3;

    fn ship_at(pos: Vec3) -> VehicleSlot {
        VehicleSlot::Present(Vehicle { pos, scale: 3.0 })
    }

    #[test]
    fn test_threshold_edges() {
        let mut field = CollectibleField::default();
        let near = field.push_at(Vec3::new(0.99, 0.0, 0.0));
        let far = field.push_at(Vec3::new(0.0, 0.0, 1.01));

        let removed = resolve(&ship_at(Vec3::ZERO), &mut field, COLLISION_RADIUS);
        assert_eq!(removed, vec![near]);
        assert!(!field.get(near).unwrap().alive);
        assert!(field.get(far).unwrap().alive);
    }

    #[test]
    fn test_absent_vehicle_noop() {
        let mut field = CollectibleField::default();
        field.push_at(Vec3::ZERO);
        assert!(resolve(&VehicleSlot::Absent, &mut field, COLLISION_RADIUS).is_empty());
        assert_eq!(field.live_count(), 1);
    }

    #[test]
    fn test_simultaneous_hits_removed_once() {
        let mut field = CollectibleField::default();
        field.push_at(Vec3::new(0.1, 0.0, 0.0));
        field.push_at(Vec3::new(0.0, -0.2, 0.0));
        field.push_at(Vec3::new(0.0, 0.0, 0.3));
        let ship = ship_at(Vec3::ZERO);

        assert_eq!(resolve(&ship, &mut field, COLLISION_RADIUS).len(), 3);
        assert!(resolve(&ship, &mut field, COLLISION_RADIUS).is_empty());
        assert_eq!(field.live_count(), 0);
    }

    #[test]
    fn test_sweep_clears_field() {
        use rand::SeedableRng;
        use rand_pcg::Pcg32;

        let mut field = CollectibleField::default();
        field.populate(100, 200.0, &crate::DEFAULT_PALETTE, &mut Pcg32::seed_from_u64(5));

        // Visit every collectible's position in turn
        let targets: Vec<Vec3> = field.iter_live().map(|c| c.pos).collect();
        for target in targets {
            resolve(&ship_at(target), &mut field, COLLISION_RADIUS);
        }
        assert_eq!(field.live_count(), 0);
        assert_eq!(field.iter_live().count(), 0);
    }
}
