//! Collision avoidance blend.
//!
//! Inside the avoidance threshold the desired velocity is mixed with a
//! sideways dodge around the nearest obstacle. The dodge side is set by the
//! pilot's preferred angle so neighbouring ships do not all swerve the same
//! way. The mix grows linearly as clearance shrinks.

use glam::{DQuat, DVec3};

use flightdeck_core::components::ShipSnapshot;
use flightdeck_core::config::PilotConfig;
use flightdeck_core::constants::AVOIDANCE_LATERAL_GAIN;
use flightdeck_core::world::WorldView;

use crate::acquisition::nearest_ship;

/// Adjust `desired_velocity` away from the nearest obstacle, if one is close.
pub fn avoid(
    world: &dyn WorldView,
    ship: &ShipSnapshot,
    config: &PilotConfig,
    desired_velocity: DVec3,
    preferred_angle: f64,
) -> DVec3 {
    match nearest_ship(world, ship, true) {
        Some(obstacle) => blend(ship, obstacle, config, desired_velocity, preferred_angle),
        None => desired_velocity,
    }
}

/// Blend against a known obstacle.
pub fn blend(
    ship: &ShipSnapshot,
    obstacle: &ShipSnapshot,
    config: &PilotConfig,
    desired_velocity: DVec3,
    preferred_angle: f64,
) -> DVec3 {
    let delta = obstacle.position - ship.position;
    let clearance =
        (delta.length() - obstacle.radius * config.obstacle_radius_factor).max(0.0);

    if clearance >= config.avoidance_threshold {
        return desired_velocity;
    }

    let line_of_sight = delta.normalize_or_zero();
    let avoid_direction = lateral_direction(ship, obstacle, line_of_sight, preferred_angle);

    let alpha = 1.0 - clearance / config.avoidance_threshold;
    let escape = (AVOIDANCE_LATERAL_GAIN * (1.0 - alpha) * avoid_direction - line_of_sight)
        .normalize_or_zero();

    desired_velocity * (1.0 - alpha) + alpha * escape * ship.propulsion.max_linear_speed
}

/// Ship "up", scaled by the obstacle size, rolled about the line of sight.
fn lateral_direction(
    ship: &ShipSnapshot,
    obstacle: &ShipSnapshot,
    line_of_sight: DVec3,
    preferred_angle: f64,
) -> DVec3 {
    let top = ship.up() * obstacle.radius;
    if line_of_sight == DVec3::ZERO {
        return top.normalize_or_zero();
    }
    let roll = DQuat::from_axis_angle(line_of_sight, preferred_angle.to_radians());
    (roll * top).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightdeck_core::types::{CompanyId, EntityId};
    use flightdeck_core::world::{RelationTable, WorldSnapshot};

    fn pair(distance: f64) -> (ShipSnapshot, ShipSnapshot) {
        let ship = ShipSnapshot::new(EntityId(1), CompanyId(0));
        let mut obstacle = ShipSnapshot::new(EntityId(2), CompanyId(0));
        obstacle.radius = 5.0;
        obstacle.position = DVec3::new(distance, 0.0, 0.0);
        (ship, obstacle)
    }

    #[test]
    fn test_far_obstacle_leaves_velocity_unchanged() {
        let (ship, obstacle) = pair(500.0);
        let desired = DVec3::new(50.0, 0.0, 0.0);
        let out = blend(&ship, &obstacle, &PilotConfig::default(), desired, 30.0);
        assert_eq!(out, desired);
    }

    #[test]
    fn test_touching_obstacle_retreats_at_max_speed() {
        // Clearance clamps to zero inside four radii.
        let (ship, obstacle) = pair(15.0);
        let desired = DVec3::new(50.0, 0.0, 0.0);
        let out = blend(&ship, &obstacle, &PilotConfig::default(), desired, 30.0);
        let expected = DVec3::new(-ship.propulsion.max_linear_speed, 0.0, 0.0);
        assert!((out - expected).length() < 1e-9, "got {out:?}");
    }

    #[test]
    fn test_dodge_side_follows_preferred_angle() {
        let (ship, obstacle) = pair(20.0 + 60.0);
        let config = PilotConfig::default();
        let up = blend(&ship, &obstacle, &config, DVec3::ZERO, 0.0);
        let down = blend(&ship, &obstacle, &config, DVec3::ZERO, 180.0);
        assert!(up.z > 0.0, "got {up:?}");
        assert!(down.z < 0.0, "got {down:?}");
        assert!(up.x < 0.0 && down.x < 0.0);
    }

    #[test]
    fn test_avoid_uses_nearest_non_docking_entity() {
        let (ship, obstacle) = pair(15.0);
        let world = WorldSnapshot::new(vec![ship.clone(), obstacle], RelationTable::new());
        let desired = DVec3::new(10.0, 0.0, 0.0);
        let out = avoid(&world, &ship, &PilotConfig::default(), desired, 0.0);
        assert!(out.x < 0.0);

        let alone = WorldSnapshot::new(vec![ship.clone()], RelationTable::new());
        assert_eq!(avoid(&alone, &ship, &PilotConfig::default(), desired, 0.0), desired);
    }
}
