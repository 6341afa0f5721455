//! Axis alignment solver.
//!
//! Computes the angular velocity that turns a ship-fixed axis onto a world
//! axis while converging on a target spin. The command decelerates as the
//! remaining error shrinks so the axis coasts into alignment instead of
//! overshooting. All angles in degrees, rates in deg/s.

use glam::DVec3;

use flightdeck_core::components::ShipSnapshot;
use flightdeck_core::constants::{ANGULAR_ACCEL_EPSILON, ANGULAR_MATCH_EPSILON};

const PARALLEL_EPSILON: f64 = 1e-12;

/// Inputs that do not come from the ship itself.
#[derive(Debug, Clone, Copy)]
pub struct AlignRequest {
    /// Axis in the ship's local frame (nose is +X).
    pub local_axis: DVec3,
    /// Desired direction of that axis, world frame.
    pub target_axis: DVec3,
    /// Spin to match once aligned (deg/s, world frame).
    pub target_angular_velocity: DVec3,
}

/// Angular velocity command for `ship` (deg/s, world frame).
///
/// `reaction_time` is the pilot's decision interval; it bounds the braking
/// horizon and sets how quickly the remaining error is closed.
/// `brake_factor` is the fraction of the reaction time over which the
/// remaining error is closed.
pub fn align_axis(
    ship: &ShipSnapshot,
    request: &AlignRequest,
    reaction_time: f64,
    brake_factor: f64,
) -> DVec3 {
    let world_axis = (ship.orientation * request.local_axis).normalize_or_zero();
    let target_axis = request.target_axis.normalize_or_zero();

    let rotation_direction = rotation_axis(ship, world_axis, target_axis);
    let angle = world_axis.dot(target_axis).clamp(-1.0, 1.0).acos().to_degrees();

    let delta_velocity = request.target_angular_velocity - ship.angular_velocity;
    let time_to_final_velocity = time_to_match(ship, delta_velocity, rotation_direction);

    let angle_to_stop = (delta_velocity.length() / 2.0) * time_to_final_velocity.max(reaction_time);

    if angle_to_stop > angle {
        request.target_angular_velocity
    } else {
        let horizon = (reaction_time * brake_factor).max(f64::EPSILON);
        let max_precise_speed =
            ((angle - angle_to_stop) / horizon).min(ship.propulsion.max_angular_speed);
        rotation_direction * max_precise_speed
    }
}

/// Unit axis turning `world_axis` onto `target_axis`. When the two are
/// opposite any perpendicular works; the ship's top axis is tried first.
fn rotation_axis(ship: &ShipSnapshot, world_axis: DVec3, target_axis: DVec3) -> DVec3 {
    let cross = world_axis.cross(target_axis);
    if cross.length_squared() > PARALLEL_EPSILON || world_axis.dot(target_axis) >= 0.0 {
        return cross.normalize_or_zero();
    }

    let up = ship.up();
    if up.dot(world_axis).abs() < PARALLEL_EPSILON {
        up.normalize_or_zero()
    } else {
        world_axis.any_orthonormal_vector()
    }
}

/// Seconds needed to absorb `delta_velocity` with the torque available along
/// the rotation direction. Zero when already matched or when no acceleration
/// projects onto the rotation direction.
fn time_to_match(ship: &ShipSnapshot, delta_velocity: DVec3, rotation_direction: DVec3) -> f64 {
    if delta_velocity.length_squared() < ANGULAR_MATCH_EPSILON {
        return 0.0;
    }

    let delta_axis = delta_velocity.normalize();
    let damage_ratio = ship.propulsion.damage_ratio(delta_axis);
    let acceleration = delta_axis * ship.propulsion.angular_acceleration * damage_ratio;
    let acceleration_in_angle_axis = acceleration.dot(rotation_direction).abs();

    if acceleration_in_angle_axis < ANGULAR_ACCEL_EPSILON {
        return 0.0;
    }
    delta_velocity.length() / acceleration_in_angle_axis
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightdeck_core::types::{CompanyId, EntityId};
    use glam::DQuat;

    fn ship() -> ShipSnapshot {
        ShipSnapshot::new(EntityId(1), CompanyId(0))
    }

    fn nose_request(target_axis: DVec3) -> AlignRequest {
        AlignRequest {
            local_axis: DVec3::X,
            target_axis,
            target_angular_velocity: DVec3::ZERO,
        }
    }

    #[test]
    fn test_aligned_and_still_commands_nothing() {
        let cmd = align_axis(&ship(), &nose_request(DVec3::X), 0.25, 0.75);
        assert!(cmd.length() < 1e-9, "got {cmd:?}");
    }

    #[test]
    fn test_large_error_saturates_at_max_angular_speed() {
        let ship = ship();
        let cmd = align_axis(&ship, &nose_request(DVec3::Y), 0.25, 0.75);
        // Nose +X onto +Y is a positive rotation about +Z.
        assert!(cmd.z > 0.0);
        assert!((cmd.length() - ship.propulsion.max_angular_speed).abs() < 1e-9);
    }

    #[test]
    fn test_small_error_commands_proportional_rate() {
        let ship = ship();
        let target = DQuat::from_rotation_z(2.0_f64.to_radians()) * DVec3::X;
        let cmd = align_axis(&ship, &nose_request(target), 0.25, 0.75);
        // 2 degrees over 0.75 * 0.25 s.
        let expected = 2.0 / (0.25 * 0.75);
        assert!((cmd.z - expected).abs() < 1e-6, "got {cmd:?}");
    }

    #[test]
    fn test_coasting_into_alignment_matches_target_spin() {
        let mut ship = ship();
        // Turning fast toward a target only 1 degree away: braking angle exceeds error.
        ship.angular_velocity = DVec3::new(0.0, 0.0, 50.0);
        let target = DQuat::from_rotation_z(1.0_f64.to_radians()) * DVec3::X;
        let spin = DVec3::new(0.0, 0.0, 3.0);
        let request = AlignRequest {
            local_axis: DVec3::X,
            target_axis: target,
            target_angular_velocity: spin,
        };
        assert_eq!(align_axis(&ship, &request, 0.25, 0.75), spin);
    }

    #[test]
    fn test_damaged_torque_lengthens_braking() {
        let mut healthy = ship();
        healthy.angular_velocity = DVec3::new(0.0, 0.0, 40.0);
        let target = DQuat::from_rotation_z(30.0_f64.to_radians()) * DVec3::X;
        let healthy_cmd = align_axis(&healthy, &nose_request(target), 0.25, 0.75);

        let mut damaged = healthy.clone();
        damaged.propulsion.available_torque = DVec3::splat(0.25);
        let damaged_cmd = align_axis(&damaged, &nose_request(target), 0.25, 0.75);

        assert!(damaged_cmd.length() < healthy_cmd.length());
    }

    #[test]
    fn test_zero_torque_does_not_divide_by_zero() {
        let mut ship = ship();
        ship.angular_velocity = DVec3::new(0.0, 0.0, 10.0);
        ship.propulsion.available_torque = DVec3::ZERO;
        let cmd = align_axis(&ship, &nose_request(DVec3::Y), 0.25, 0.75);
        assert!(cmd.is_finite());
    }

    #[test]
    fn test_degenerate_axes_are_finite() {
        let cmd = align_axis(&ship(), &nose_request(DVec3::ZERO), 0.25, 0.75);
        assert!(cmd.is_finite());
    }

    #[test]
    fn test_opposite_target_turns_about_top_axis() {
        let ship = ship();
        let cmd = align_axis(&ship, &nose_request(-DVec3::X), 0.25, 0.75);
        assert!((cmd.length() - ship.propulsion.max_angular_speed).abs() < 1e-9, "got {cmd:?}");
        assert!(cmd.dot(DVec3::X).abs() < 1e-9);
        assert!((cmd.normalize() - DVec3::Z).length() < 1e-9);
    }

    #[test]
    fn test_opposite_target_converges() {
        let mut ship = ship();
        // Rolled so the top axis is not perpendicular to the requested local axis.
        ship.orientation = DQuat::from_rotation_y(90.0_f64.to_radians());
        let request = AlignRequest {
            local_axis: DVec3::Z,
            target_axis: -(ship.orientation * DVec3::Z),
            target_angular_velocity: DVec3::ZERO,
        };

        let dt = 0.1;
        let mut error = 180.0;
        for _ in 0..200 {
            let cmd = align_axis(&ship, &request, 0.25, 0.75);
            ship.angular_velocity = cmd;
            let turn = DQuat::from_scaled_axis(cmd * (std::f64::consts::PI / 180.0) * dt);
            ship.orientation = (turn * ship.orientation).normalize();

            let axis = ship.orientation * request.local_axis;
            let next = axis.dot(request.target_axis).clamp(-1.0, 1.0).acos().to_degrees();
            assert!(next <= error + 1e-6, "error grew from {error} to {next}");
            error = next;
        }
        assert!(error < 0.5, "error stuck at {error}");
    }
}
