use crate::prelude::*;
use crate::tuning::{DEADBAND, MANUAL_BURN, TURNING_LIMIT};

/// Keyboard flight for every entity with a manual controller.
pub fn manual_flight(
    input: Res<InputState>,
    config: Res<ControlConfig>,
    mut query: Query<(
        &mut Controller,
        &Body,
        &Propulsion,
        &mut ThrusterBurnSet,
        Option<&mut WeaponTrigger>,
        Option<&Tag>,
    )>,
) {
    for (mut controller, body, propulsion, mut burns, trigger, tag) in query.iter_mut() {
        let Controller::Manual(pilot) = &mut *controller else {
            continue;
        };

        let fire = fly_manual(pilot, body, propulsion, &input, &config.flight, &mut burns);

        if let Some(mut trigger) = trigger {
            trigger.fire_requested = fire;
        }

        log::trace!(
            "{} ({:?}, intended speed {:.3}): {:?}",
            tag.map_or("ship", |tag| tag.label.as_str()),
            pilot.mode,
            pilot.intended_speed,
            burns.active().collect::<Vec<_>>()
        );
    }
}

/// Run one tick of manual control, rewriting `burns`.
///
/// Returns whether the fire key is held.
pub fn fly_manual(
    pilot: &mut ManualPilot,
    body: &Body,
    propulsion: &PropulsionClass,
    input: &InputState,
    keys: &FlightKeys,
    burns: &mut ThrusterBurnSet,
) -> bool {
    burns.reset();
    let view = BodyView::of(body);

    let forward = input.is_key_pressed(keys.forward);
    let backward = input.is_key_pressed(keys.backward);

    match pilot.mode {
        FlightMode::Inertial => {
            if forward {
                burns.set(ThrusterChannel::Forward, MANUAL_BURN);
            }
            if backward {
                burns.set(ThrusterChannel::Reverse, MANUAL_BURN);
            }
        }
        FlightMode::Compensated => {
            let step = propulsion.acceleration(body.mass);
            if forward {
                pilot.intended_speed += step;
            }
            if backward {
                pilot.intended_speed = (pilot.intended_speed - step).max(0.0);
            }
            if input.is_key_pressed(keys.reset_speed) {
                pilot.intended_speed = 0.0;
            }

            compensate_drift(pilot.intended_speed, &view, propulsion, body.mass, burns);
        }
    }

    let held = |key| input.is_key_pressed(key);
    steer(
        RotationAxis::Yaw,
        held(keys.yaw_left),
        held(keys.yaw_right),
        view.turn_rates.yaw,
        propulsion,
        burns,
    );
    steer(
        RotationAxis::Pitch,
        held(keys.pitch_up),
        held(keys.pitch_down),
        view.turn_rates.pitch,
        propulsion,
        burns,
    );
    steer(
        RotationAxis::Roll,
        held(keys.roll_right),
        held(keys.roll_left),
        view.turn_rates.roll,
        propulsion,
        burns,
    );

    held(keys.fire)
}

/// Push every local velocity component back to its target: zero sideways and
/// vertically, the intended speed along the nose.
fn compensate_drift(
    intended_speed: f32,
    view: &BodyView,
    propulsion: &PropulsionClass,
    mass: f32,
    burns: &mut ThrusterBurnSet,
) {
    let deviation = view.local_velocity - Vector3::new(0.0, intended_speed, 0.0);
    let axes = [
        (deviation.x, ThrusterChannel::StrafeRight),
        (deviation.y, ThrusterChannel::Forward),
        (deviation.z, ThrusterChannel::Raise),
    ];

    for (deviation, positive) in axes {
        if deviation.abs() <= DEADBAND {
            continue;
        }

        let channel = if deviation > 0.0 {
            positive.opposite()
        } else {
            positive
        };
        burns.set(channel, linear_burn(deviation, propulsion, mass));
    }
}

/// Accelerate a held rotation up to the turning limit, or damp it once its
/// keys are released.
fn steer(
    axis: RotationAxis,
    positive_held: bool,
    negative_held: bool,
    rate: f32,
    propulsion: &PropulsionClass,
    burns: &mut ThrusterBurnSet,
) {
    if positive_held || negative_held {
        if rate.abs() < TURNING_LIMIT {
            if positive_held {
                burns.set(axis.positive(), MANUAL_BURN);
            }
            if negative_held {
                burns.set(axis.negative(), MANUAL_BURN);
            }
        }
    } else {
        damp_rotation(axis, rate, propulsion, burns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    const EPSILON: f32 = 1e-6;

    fn class() -> PropulsionClass {
        PropulsionClass::new("test", 2.0, 0.02)
    }

    fn compensated() -> ManualPilot {
        ManualPilot {
            mode: FlightMode::Compensated,
            ..Default::default()
        }
    }

    fn input(keys: &[KeyCode]) -> InputState {
        let mut input = InputState::new();
        for key in keys {
            input.press_key(*key);
        }
        input
    }

    fn fly(pilot: &mut ManualPilot, body: &Body, keys: &[KeyCode]) -> (ThrusterBurnSet, bool) {
        let mut burns = ThrusterBurnSet::new();
        let fire = fly_manual(
            pilot,
            body,
            &class(),
            &input(keys),
            &FlightKeys::default(),
            &mut burns,
        );
        (burns, fire)
    }

    #[test]
    fn test_inertial_longitudinal_burns_are_half_or_zero() {
        let keys = FlightKeys::default();
        let moving = Body::default().with_velocity(Vector3::new(0.3, -2.0, 0.1));
        let combos: [&[KeyCode]; 4] = [
            &[],
            &[keys.forward],
            &[keys.backward],
            &[keys.forward, keys.backward],
        ];

        for held in combos {
            for body in [Body::default(), moving.clone()] {
                let mut pilot = ManualPilot::default();
                let (burns, _) = fly(&mut pilot, &body, held);

                let expect_forward = if held.contains(&keys.forward) { 0.5 } else { 0.0 };
                let expect_reverse = if held.contains(&keys.backward) { 0.5 } else { 0.0 };
                assert_eq!(burns.get(ThrusterChannel::Forward), expect_forward);
                assert_eq!(burns.get(ThrusterChannel::Reverse), expect_reverse);
                // No drift damping in inertial mode.
                assert_eq!(burns.get(ThrusterChannel::StrafeLeft), 0.0);
                assert_eq!(burns.get(ThrusterChannel::Lower), 0.0);
            }
        }
    }

    #[test]
    fn test_compensated_idle_at_equilibrium() {
        let mut pilot = compensated();
        pilot.intended_speed = 1.0;
        let body = Body::default().with_velocity(Vector3::new(5e-5, 1.0 + 9e-5, -9e-5));

        let (burns, _) = fly(&mut pilot, &body, &[]);
        assert!(burns.is_idle(), "{:?}", burns);
    }

    #[test]
    fn test_compensated_cancels_drift() {
        let mut pilot = compensated();
        let body = Body::default().with_velocity(Vector3::new(0.5, 0.0, -4.0));

        let (burns, _) = fly(&mut pilot, &body, &[]);
        // 0.5 * mass 1 / thrust 2
        assert!((burns.get(ThrusterChannel::StrafeLeft) - 0.25).abs() < EPSILON);
        assert_eq!(burns.get(ThrusterChannel::StrafeRight), 0.0);
        assert_eq!(burns.get(ThrusterChannel::Raise), 1.0);
        assert_eq!(burns.get(ThrusterChannel::Forward), 0.0);
        assert_eq!(burns.get(ThrusterChannel::Reverse), 0.0);
    }

    #[test]
    fn test_compensated_intended_speed_steps() {
        let keys = FlightKeys::default();
        let mut pilot = compensated();
        let body = Body::default().with_mass(4.0);

        fly(&mut pilot, &body, &[keys.forward]);
        fly(&mut pilot, &body, &[keys.forward]);
        assert!((pilot.intended_speed - 1.0).abs() < EPSILON);

        // Under target speed: push forward.
        let (burns, _) = fly(&mut pilot, &body, &[]);
        assert!(burns.get(ThrusterChannel::Forward) > 0.0);

        for _ in 0..5 {
            fly(&mut pilot, &body, &[keys.backward]);
        }
        assert_eq!(pilot.intended_speed, 0.0);

        fly(&mut pilot, &body, &[keys.forward]);
        fly(&mut pilot, &body, &[keys.reset_speed]);
        assert_eq!(pilot.intended_speed, 0.0);
    }

    #[test]
    fn test_held_turn_accelerates_below_limit() {
        let keys = FlightKeys::default();
        let mut pilot = ManualPilot::default();

        let (burns, _) = fly(&mut pilot, &Body::default(), &[keys.yaw_left, keys.pitch_down]);
        assert_eq!(burns.get(ThrusterChannel::YawLeft), 0.5);
        assert_eq!(burns.get(ThrusterChannel::PitchDown), 0.5);

        let spinning = Body::default().with_angular_velocity(Vector3::new(0.0, 0.0, 0.15));
        let (burns, _) = fly(&mut pilot, &spinning, &[keys.yaw_left]);
        assert_eq!(burns.get(ThrusterChannel::YawLeft), 0.0);
        // A held key also suppresses damping.
        assert_eq!(burns.get(ThrusterChannel::YawRight), 0.0);
    }

    #[test]
    fn test_released_turn_is_damped() {
        let mut pilot = ManualPilot::default();
        let body = Body::default().with_angular_velocity(Vector3::new(0.0, 0.01, -0.004));

        let (burns, _) = fly(&mut pilot, &body, &[]);
        // roll right at 0.01 rad/tick, 0.02 angular thrust
        assert!((burns.get(ThrusterChannel::RollLeft) - 0.5).abs() < 1e-3);
        // yaw right at 0.004 rad/tick
        assert!((burns.get(ThrusterChannel::YawLeft) - 0.2).abs() < 1e-3);
        assert_eq!(burns.get(ThrusterChannel::PitchUp), 0.0);
        assert_eq!(burns.get(ThrusterChannel::PitchDown), 0.0);
    }

    #[test]
    fn test_fire_follows_key() {
        let keys = FlightKeys::default();
        let mut pilot = ManualPilot::default();
        assert!(fly(&mut pilot, &Body::default(), &[keys.fire]).1);
        assert!(!fly(&mut pilot, &Body::default(), &[]).1);
    }

    #[test]
    fn test_system_writes_components() {
        let mut world = World::new();
        let mut input = InputState::new();
        input.press_key(KeyCode::KeyW);
        input.press_key(KeyCode::Space);
        world.insert_resource(input);
        world.insert_resource(ControlConfig::default());

        let class = std::sync::Arc::new(class());
        let ship = world
            .spawn((
                Controller::Manual(ManualPilot::default()),
                Body::default(),
                Propulsion::new(&class),
                ThrusterBurnSet::new(),
                WeaponTrigger::default(),
            ))
            .id();
        let drone = world
            .spawn((
                Controller::Autonomous(Autopilot::default()),
                Body::default(),
                Propulsion::new(&class),
                ThrusterBurnSet::new(),
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(manual_flight);
        schedule.run(&mut world);

        let burns = world.get::<ThrusterBurnSet>(ship).unwrap();
        assert_eq!(burns.get(ThrusterChannel::Forward), 0.5);
        assert!(world.get::<WeaponTrigger>(ship).unwrap().fire_requested);
        assert!(world.get::<ThrusterBurnSet>(drone).unwrap().is_idle());
    }
}
