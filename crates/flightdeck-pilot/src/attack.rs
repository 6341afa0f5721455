//! Attack phase finite state machine.
//!
//! Pure function computing the phase transition and steering for one combat
//! decision. Phases are evaluated in order Approach, Engage, Withdraw, and a
//! transition falls through to the next phase within the same decision.
//! No world dependency, operates on plain data.

use glam::{DQuat, DVec3};

use flightdeck_core::enums::AttackPhase;

/// Input to the attack FSM for a single decision.
#[derive(Debug, Clone, Copy)]
pub struct AttackContext {
    pub phase: AttackPhase,
    /// Distance to the target at the previous decision (meters).
    pub last_target_distance: f64,
    /// Target position minus ship position (meters).
    pub delta: DVec3,
    /// Target velocity minus ship velocity (m/s).
    pub relative_velocity: DVec3,
    pub target_velocity: DVec3,
    /// Unit axis toward the predicted projectile intercept.
    pub predicted_fire_axis: DVec3,
    /// Ship top direction, world frame.
    pub ship_up: DVec3,
    pub max_speed: f64,
    /// Degrees.
    pub attack_angle: f64,
    pub attack_distance: f64,
    pub security_distance: f64,
    pub dangerous: bool,
}

impl AttackContext {
    pub fn distance(&self) -> f64 {
        self.delta.length()
    }

    /// The target gets closer along the line of sight.
    pub fn is_closing(&self) -> bool {
        self.delta.dot(self.relative_velocity) < 0.0
    }
}

/// Output from the attack FSM.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackUpdate {
    pub phase: AttackPhase,
    pub last_target_distance: f64,
    pub linear_velocity: DVec3,
    pub use_boost: bool,
    /// Every `(from, to)` transition taken this decision, in order.
    pub transitions: Vec<(AttackPhase, AttackPhase)>,
}

impl AttackUpdate {
    fn enter(&mut self, phase: AttackPhase) {
        if self.phase != phase {
            self.transitions.push((self.phase, phase));
            self.phase = phase;
        }
    }
}

/// Evaluate the FSM for one decision.
pub fn evaluate(ctx: &AttackContext) -> AttackUpdate {
    let distance = ctx.distance();
    let mut update = AttackUpdate {
        phase: ctx.phase,
        last_target_distance: ctx.last_target_distance,
        linear_velocity: DVec3::ZERO,
        use_boost: false,
        transitions: Vec::new(),
    };

    if update.phase == AttackPhase::Approach {
        if ctx.is_closing() {
            update.enter(AttackPhase::Engage);
            update.last_target_distance = distance;
        } else {
            update.linear_velocity = ctx.predicted_fire_axis * ctx.max_speed;
        }

        if distance < ctx.security_distance {
            update.enter(AttackPhase::Engage);
            update.last_target_distance = distance;
        }
    }

    if update.phase == AttackPhase::Engage {
        if update.last_target_distance < distance {
            // Target has been passed
            update.enter(AttackPhase::Withdraw);
        } else {
            update.linear_velocity = compute_strafe_velocity(ctx, distance);
            update.use_boost = true;
        }
        update.last_target_distance = distance;
    }

    if update.phase == AttackPhase::Withdraw {
        if distance > ctx.security_distance {
            update.enter(AttackPhase::Approach);
        } else {
            let away = -ctx.delta.normalize_or_zero();
            if ctx.dangerous {
                update.linear_velocity = away * ctx.max_speed;
                update.use_boost = true;
            } else {
                update.linear_velocity = ctx.target_velocity + away * ctx.max_speed / 4.0;
            }
        }
    }

    update
}

/// Pass beside the target, offset by the standoff rolled about the line of sight.
fn compute_strafe_velocity(ctx: &AttackContext, distance: f64) -> DVec3 {
    let heading = (attack_margin(ctx) + ctx.delta).normalize_or_zero();
    if distance > ctx.security_distance || ctx.dangerous {
        heading * ctx.max_speed
    } else {
        // Weak target up close: match it and creep in
        ctx.target_velocity + heading * ctx.max_speed / 4.0
    }
}

fn attack_margin(ctx: &AttackContext) -> DVec3 {
    let top = ctx.ship_up * ctx.attack_distance;
    let axis = ctx.delta.normalize_or_zero();
    if axis == DVec3::ZERO {
        return top;
    }
    DQuat::from_axis_angle(axis, ctx.attack_angle.to_radians()) * top
}
