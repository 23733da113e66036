use crate::prelude::*;
use crate::tuning::{
    ARRIVAL_RADIUS, CRUISE_BURN, DEADBAND, DRIFT_BRAKE_CAP, DRIFT_BRAKE_ESCALATED_CAP,
    HEADING_TOLERANCE, TRIM_BURN, TURNING_LIMIT, TURN_BURN,
};

/// What an autopilot did during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutopilotStep {
    /// No goals: braking to a standstill.
    Holding,
    /// The current goal was reached and removed.
    Arrived(Goal),
    /// Flying toward the current goal.
    Navigating { distance: f32 },
}

/// Goal-driven flight for every entity with an autonomous controller.
pub fn autonomous_flight(
    mut query: Query<(
        &mut Controller,
        &Body,
        &Propulsion,
        &mut ThrusterBurnSet,
        Option<&Tag>,
    )>,
) {
    for (mut controller, body, propulsion, mut burns, tag) in query.iter_mut() {
        let Controller::Autonomous(pilot) = &mut *controller else {
            continue;
        };

        let name = tag.map_or("ship", |tag| tag.label.as_str());
        match fly_autonomous(pilot, body, propulsion, &mut burns) {
            AutopilotStep::Arrived(goal) if pilot.is_idle() => {
                log::debug!("{} reached its last goal {:?}", name, goal.position());
            }
            AutopilotStep::Arrived(goal) => {
                log::debug!(
                    "{} reached goal {:?}, {} remaining",
                    name,
                    goal.position(),
                    pilot.len()
                );
            }
            AutopilotStep::Navigating { distance } => log::trace!(
                "{} {:.2} from goal: {:?}",
                name,
                distance,
                burns.active().collect::<Vec<_>>()
            ),
            AutopilotStep::Holding => {
                log::trace!("{} holding: {:?}", name, burns.active().collect::<Vec<_>>())
            }
        }
    }
}

/// Run one tick of autonomous control, rewriting `burns`.
pub fn fly_autonomous(
    pilot: &mut Autopilot,
    body: &Body,
    propulsion: &PropulsionClass,
    burns: &mut ThrusterBurnSet,
) -> AutopilotStep {
    burns.reset();
    let view = BodyView::of(body);

    let Some(goal) = pilot.current_goal().copied() else {
        hold_position(&view, body, propulsion, burns);
        return AutopilotStep::Holding;
    };

    let to_goal = goal.position() - body.position();
    let distance = to_goal.norm();
    if distance < ARRIVAL_RADIUS {
        pilot.arrive();
        return AutopilotStep::Arrived(goal);
    }

    let heading = to_goal / distance;
    approach(&view, body, propulsion, &heading, distance, burns);
    turn_toward(&view, body, propulsion, &heading, burns);
    damp_rotation(RotationAxis::Roll, view.turn_rates.roll, propulsion, burns);

    AutopilotStep::Navigating { distance }
}

/// Brake to a standstill and stop every rotation.
fn hold_position(
    view: &BodyView,
    body: &Body,
    propulsion: &PropulsionClass,
    burns: &mut ThrusterBurnSet,
) {
    if view.speed > 0.0 {
        let brake = linear_burn(view.speed, propulsion, body.mass);
        burns.brake_along(&view.local_velocity_direction, brake);
    }

    for axis in [RotationAxis::Yaw, RotationAxis::Pitch, RotationAxis::Roll] {
        damp_rotation(axis, axis.rate(&view.turn_rates), propulsion, burns);
    }
}

/// Longitudinal policy: pick exactly one of receding, drifting or closing.
fn approach(
    view: &BodyView,
    body: &Body,
    propulsion: &PropulsionClass,
    heading: &Vector3<f32>,
    distance: f32,
    burns: &mut ThrusterBurnSet,
) {
    let acceleration = propulsion.acceleration(body.mass);
    let speed = view.speed;
    let closing_speed = body.velocity.dot(heading);
    let brake_direction = &view.local_velocity_direction;

    if closing_speed < 0.0 {
        burns.brake_along(brake_direction, linear_burn(speed, propulsion, body.mass));
    } else if speed - closing_speed > DEADBAND {
        let drift_brake = linear_burn(speed - closing_speed, propulsion, body.mass);
        let can_stop = 2.0 * distance * acceleration > closing_speed * closing_speed;
        let heading_error = view.direction.angle(heading);

        if can_stop && heading_error < HEADING_TOLERANCE {
            burns.brake_along(brake_direction, drift_brake.min(DRIFT_BRAKE_CAP));
            burns.add(ThrusterChannel::Forward, TRIM_BURN);
        } else {
            burns.brake_along(brake_direction, drift_brake.min(DRIFT_BRAKE_ESCALATED_CAP));
        }
    } else if speed * speed > 2.0 * distance * acceleration {
        burns.brake_along(brake_direction, linear_burn(speed, propulsion, body.mass));
    } else {
        burns.add(ThrusterChannel::Forward, CRUISE_BURN);
    }
}

/// Yaw and pitch toward the goal, accelerating a rotation only while it can
/// still be stopped before the heading is reached.
fn turn_toward(
    view: &BodyView,
    body: &Body,
    propulsion: &PropulsionClass,
    heading: &Vector3<f32>,
    burns: &mut ThrusterBurnSet,
) {
    let local_heading = body.to_local_vector(heading);
    let errors = [
        (RotationAxis::Yaw, yaw_angle(&local_heading)),
        (RotationAxis::Pitch, pitch_angle(&local_heading)),
    ];
    let angular_acceleration = propulsion.angular_acceleration();

    for (axis, error) in errors {
        let rate = axis.rate(&view.turn_rates);
        let can_stop = rate * rate < 2.0 * error.abs() * angular_acceleration;

        if error.abs() > DEADBAND && rate.abs() < TURNING_LIMIT && can_stop {
            let channel = if error > 0.0 {
                axis.positive()
            } else {
                axis.negative()
            };
            burns.set(channel, TURN_BURN);
        } else {
            damp_rotation(axis, rate, propulsion, burns);
        }
    }
}
