//! Ballistic lead and line-of-sight kinematics.
//!
//! Provides the closed-form projectile intercept, the launch direction of a
//! projectile fired from a moving ship, and the angular rate of a line of
//! sight. Projectiles inherit the shooter's velocity.

use glam::DVec3;

use flightdeck_core::components::ShipSnapshot;
use flightdeck_core::constants::MIN_DISTANCE;

/// Predicted projectile meeting point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intercept {
    /// Projectile flight time (seconds, > 0).
    pub time: f64,
    /// Target position at impact, world frame.
    pub location: DVec3,
}

/// Solve for the earliest projectile intercept after both bodies have been
/// extrapolated `delay` seconds along their current velocities.
///
/// Returns `None` when the projectile can never catch the target.
pub fn intercept(
    shooter_position: DVec3,
    shooter_velocity: DVec3,
    target_position: DVec3,
    target_velocity: DVec3,
    projectile_speed: f64,
    delay: f64,
) -> Option<Intercept> {
    if projectile_speed <= 0.0 {
        return None;
    }

    let shooter = shooter_position + shooter_velocity * delay;
    let target = target_position + target_velocity * delay;
    let d = target - shooter;
    let v = target_velocity - shooter_velocity;

    // |d + v t| = s t
    let a = v.length_squared() - projectile_speed * projectile_speed;
    let b = 2.0 * d.dot(v);
    let c = d.length_squared();

    let time = if a.abs() < 1e-9 {
        if b.abs() < 1e-12 {
            return None;
        }
        -c / b
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let t1 = (-b - sqrt_disc) / (2.0 * a);
        let t2 = (-b + sqrt_disc) / (2.0 * a);
        match (t1 > 0.0, t2 > 0.0) {
            (true, true) => t1.min(t2),
            (true, false) => t1,
            (false, true) => t2,
            (false, false) => return None,
        }
    };

    if !(time > 0.0) || !time.is_finite() {
        return None;
    }

    Some(Intercept {
        time,
        location: target + target_velocity * time,
    })
}

/// Direction, in the ship's local frame, a projectile actually travels when
/// fired along the nose: ship velocity plus muzzle velocity.
pub fn launch_direction(ship: &ShipSnapshot, projectile_speed: f64) -> DVec3 {
    let world_velocity = ship.velocity + ship.forward() * projectile_speed;
    let local = ship.orientation.inverse() * world_velocity;
    let direction = local.normalize_or_zero();
    if direction == DVec3::ZERO {
        DVec3::X
    } else {
        direction
    }
}

/// Angular velocity (deg/s) of a line of sight along unit `axis` at
/// `distance`, given the target's velocity relative to the observer.
pub fn los_angular_velocity(relative_velocity: DVec3, axis: DVec3, distance: f64) -> DVec3 {
    if distance < MIN_DISTANCE {
        return DVec3::ZERO;
    }
    -(180.0 / (std::f64::consts::PI * distance)) * relative_velocity.cross(axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightdeck_core::types::{CompanyId, EntityId};
    use glam::DQuat;

    #[test]
    fn test_stationary_target_time_is_range_over_speed() {
        let hit = intercept(
            DVec3::ZERO,
            DVec3::ZERO,
            DVec3::new(500.0, 0.0, 0.0),
            DVec3::ZERO,
            250.0,
            0.0,
        )
        .unwrap();
        assert!((hit.time - 2.0).abs() < 1e-9);
        assert!((hit.location - DVec3::new(500.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_crossing_target_is_led() {
        let target_velocity = DVec3::new(0.0, 50.0, 0.0);
        let hit = intercept(
            DVec3::ZERO,
            DVec3::ZERO,
            DVec3::new(400.0, 0.0, 0.0),
            target_velocity,
            200.0,
            0.0,
        )
        .unwrap();
        assert!(hit.location.y > 0.0, "intercept should lead the target");
        // Projectile covers exactly speed * time.
        assert!((hit.location.length() - 200.0 * hit.time).abs() < 1e-6);
    }

    #[test]
    fn test_delay_extrapolates_both_bodies() {
        let hit = intercept(
            DVec3::ZERO,
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(100.0, 0.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
            100.0,
            0.5,
        )
        .unwrap();
        // Same velocity: separation stays 100 m, relative speed is the muzzle speed.
        assert!((hit.time - 1.0).abs() < 1e-9);
        assert!((hit.location.x - 115.0).abs() < 1e-9);
    }

    #[test]
    fn test_fleeing_faster_than_projectile_has_no_solution() {
        let hit = intercept(
            DVec3::ZERO,
            DVec3::ZERO,
            DVec3::new(100.0, 0.0, 0.0),
            DVec3::new(300.0, 0.0, 0.0),
            200.0,
            0.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_launch_direction_composes_ship_velocity() {
        let mut ship = ShipSnapshot::new(EntityId(1), CompanyId(0));
        assert_eq!(launch_direction(&ship, 100.0), DVec3::X);

        ship.velocity = DVec3::new(0.0, 100.0, 0.0);
        let dir = launch_direction(&ship, 100.0);
        let expected = DVec3::new(1.0, 1.0, 0.0).normalize();
        assert!((dir - expected).length() < 1e-9);

        // Rotated ship: local frame result is unchanged when velocity rotates with it.
        ship.orientation = DQuat::from_rotation_z(std::f64::consts::FRAC_PI_2);
        ship.velocity = DVec3::new(-100.0, 0.0, 0.0);
        let dir = launch_direction(&ship, 100.0);
        assert!((dir - expected).length() < 1e-9, "got {dir:?}");
    }

    #[test]
    fn test_los_rate_for_crossing_target() {
        // Target 100 m ahead on +X moving +Y at 10 m/s: LOS turns about +Z.
        let rate = los_angular_velocity(DVec3::new(0.0, 10.0, 0.0), DVec3::X, 100.0);
        let expected = (10.0_f64 / 100.0).to_degrees();
        assert!((rate.z - expected).abs() < 1e-9, "got {rate:?}");
        assert_eq!(los_angular_velocity(DVec3::Y, DVec3::X, 0.0), DVec3::ZERO);
    }
}
