use crate::prelude::*;

/// Camera rig system: follow cameras snap to their target, free cameras fly
/// on the held camera keys.
pub fn camera_rig(
    input: Res<InputState>,
    config: Res<ControlConfig>,
    bodies: Query<&Body>,
    mut cameras: Query<(&Controller, &mut Camera, Option<&Tag>)>,
) {
    for (controller, mut camera, tag) in cameras.iter_mut() {
        let Controller::Camera(operator) = controller else {
            continue;
        };

        let Some(follow) = camera.follow else {
            fly_free(operator, &mut camera, &input, &config.camera);
            continue;
        };

        match bodies.get(follow.target) {
            Ok(body) => follow_body(operator, &mut camera, body, &follow.offset),
            Err(_) => {
                log::warn!(
                    "{} lost its follow target {:?}, switching to free flight",
                    tag.map_or("camera", |tag| tag.label.as_str()),
                    follow.target
                );
                camera.follow = None;
            }
        }
    }
}

/// Place the camera at `offset` in the body's frame. Velocities are left as
/// they are, so leaving follow mode resumes with the old free-flight rates.
pub fn follow_body(
    operator: &CameraOperator,
    camera: &mut Camera,
    body: &Body,
    offset: &Isometry3<f32>,
) {
    let pose = body.isometry() * offset;
    let current = camera.isometry();

    let translation = if operator.controls_position {
        pose.translation
    } else {
        current.translation
    };
    let rotation = if operator.controls_orientation {
        pose.rotation
    } else {
        current.rotation
    };
    camera.set_isometry(&Isometry3::from_parts(translation, rotation));
}

/// One tick of free flight.
pub fn fly_free(
    operator: &CameraOperator,
    camera: &mut Camera,
    input: &InputState,
    keys: &CameraKeys,
) {
    let held = |key| input.is_key_pressed(key);
    let turning = input.is_any_pressed(&keys.modifiers);

    // Arrows turn with the modifier held and move without it.
    let (turn, strafe, advance) = if turning {
        let turn = Vector3::new(
            axis_push(held(keys.forward), held(keys.backward)),
            0.0,
            axis_push(held(keys.left), held(keys.right)),
        );
        (turn, 0.0, 0.0)
    } else {
        (
            Vector3::zeros(),
            axis_push(held(keys.right), held(keys.left)),
            axis_push(held(keys.forward), held(keys.backward)),
        )
    };
    let climb = axis_push(held(keys.up), held(keys.down));
    let movement = Vector3::new(strafe, advance, climb);

    if operator.controls_orientation {
        for axis in 0..3 {
            camera.angular_velocity[axis] = integrate_rate(
                camera.angular_velocity[axis],
                turn[axis],
                camera.angular_acceleration[axis],
                camera.max_turn[axis],
            );
        }
        camera.orientation *= UnitQuaternion::from_scaled_axis(camera.angular_velocity);
    }

    if operator.controls_position {
        for axis in 0..3 {
            camera.velocity[axis] = integrate_rate(
                camera.velocity[axis],
                movement[axis],
                camera.acceleration[axis],
                camera.max_speed[axis],
            );
        }
        let displacement = camera.orientation * camera.velocity;
        camera.position += displacement;
    }
}

/// -1, 0 or 1 depending on which of an opposing key pair is held.
fn axis_push(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Step a rate toward `push * max` while pushed, otherwise decay it toward zero.
fn integrate_rate(rate: f32, push: f32, step: f32, max: f32) -> f32 {
    if push != 0.0 {
        (rate + push * step).clamp(-max, max)
    } else {
        decay(rate, step)
    }
}

/// Move `rate` toward zero by at most `step`, never past it.
pub fn decay(rate: f32, step: f32) -> f32 {
    rate - rate.signum() * step.min(rate.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;
    use winit::keyboard::KeyCode;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn position_only() -> CameraOperator {
        CameraOperator {
            controls_orientation: false,
            controls_position: true,
        }
    }

    fn input(keys: &[KeyCode]) -> InputState {
        let mut input = InputState::new();
        for key in keys {
            input.press_key(*key);
        }
        input
    }

    fn fly(camera: &mut Camera, operator: CameraOperator, keys: &[KeyCode]) {
        fly_free(&operator, camera, &input(keys), &CameraKeys::default());
    }

    #[test]
    fn test_decay_stops_at_zero() {
        assert!(approx_eq(decay(0.05, 0.02), 0.03));
        assert!(approx_eq(decay(-0.05, 0.02), -0.03));
        assert_eq!(decay(0.01, 0.02), 0.0);
        assert_eq!(decay(-0.01, 0.02), 0.0);
        assert_eq!(decay(0.0, 0.02), 0.0);
    }

    #[test]
    fn test_follow_mode_is_exact_transform() {
        let mut body = Body::at(Point3::new(3.0, -2.0, 7.0));
        body.set_orientation(UnitQuaternion::from_euler_angles(0.3, -0.2, 1.1));
        let offset = Isometry3::new(Vector3::new(0.0, -10.0, 2.0), Vector3::new(0.1, 0.0, 0.0));

        let mut camera = Camera::free(Point3::new(100.0, 0.0, 0.0), UnitQuaternion::identity());
        camera.velocity = Vector3::new(0.3, 0.0, 0.0);
        follow_body(&CameraOperator::default(), &mut camera, &body, &offset);

        let expected = body.isometry() * offset;
        assert!((camera.position.coords - expected.translation.vector).norm() < EPSILON);
        assert!(camera.orientation.angle_to(&expected.rotation) < EPSILON);
        // Free-flight rates survive.
        assert_eq!(camera.velocity, Vector3::new(0.3, 0.0, 0.0));
    }

    #[test]
    fn test_follow_respects_capabilities() {
        let body = Body::at(Point3::new(1.0, 2.0, 3.0));
        let mut spun = body.clone();
        spun.set_orientation(UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2));
        let offset = Isometry3::identity();

        let mut camera = Camera::default();
        follow_body(&CameraOperator::orientation_only(), &mut camera, &spun, &offset);
        assert_eq!(camera.position, Point3::origin());
        assert!(camera.orientation.angle_to(spun.orientation()) < EPSILON);

        let mut camera = Camera::default();
        follow_body(&position_only(), &mut camera, &spun, &offset);
        assert!((camera.position - body.position()).norm() < EPSILON);
        assert_eq!(camera.orientation, UnitQuaternion::identity());
    }

    #[test]
    fn test_free_flight_accelerates_and_clamps() {
        let mut camera = Camera::default();
        fly(&mut camera, CameraOperator::default(), &[KeyCode::ArrowUp]);
        assert!(approx_eq(camera.velocity.y, 0.02));
        assert!(approx_eq(camera.position.y, 0.02));

        for _ in 0..100 {
            fly(&mut camera, CameraOperator::default(), &[KeyCode::ArrowUp, KeyCode::PageDown]);
        }
        assert!(approx_eq(camera.velocity.y, 0.5));
        assert!(approx_eq(camera.velocity.z, -0.5));
        assert_eq!(camera.velocity.x, 0.0);
    }

    #[test]
    fn test_released_axes_decay() {
        let mut camera = Camera::default();
        camera.velocity = Vector3::new(0.05, -0.03, 0.0);
        camera.angular_velocity = Vector3::new(0.0, 0.0, 0.003);

        fly(&mut camera, CameraOperator::default(), &[]);
        assert!(approx_eq(camera.velocity.x, 0.03));
        assert!(approx_eq(camera.velocity.y, -0.01));
        assert!(approx_eq(camera.angular_velocity.z, 0.001));

        fly(&mut camera, CameraOperator::default(), &[]);
        assert_eq!(camera.velocity.y, 0.0);
        assert_eq!(camera.angular_velocity.z, 0.0);
    }

    #[test]
    fn test_modifier_turns_instead_of_moving() {
        let mut camera = Camera::default();
        fly(
            &mut camera,
            CameraOperator::default(),
            &[KeyCode::ControlLeft, KeyCode::ArrowLeft, KeyCode::ArrowUp],
        );

        assert_eq!(camera.velocity, Vector3::zeros());
        assert!(approx_eq(camera.angular_velocity.x, 0.002));
        assert!(approx_eq(camera.angular_velocity.z, 0.002));
        assert!(camera.orientation.angle() > 0.0);
        assert_eq!(camera.position, Point3::origin());
    }

    #[test]
    fn test_free_flight_moves_along_orientation() {
        let mut camera = Camera::free(
            Point3::origin(),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
        );
        camera.velocity = Vector3::new(0.0, 0.5, 0.0);
        fly(&mut camera, CameraOperator::default(), &[KeyCode::ArrowUp]);

        // Nose points along -x after a left yaw.
        assert!(approx_eq(camera.position.x, -0.5));
        assert!(approx_eq(camera.position.y, 0.0));
    }

    #[test]
    fn test_capabilities_gate_free_flight() {
        let mut camera = Camera::default();
        fly(
            &mut camera,
            CameraOperator::orientation_only(),
            &[KeyCode::ArrowUp, KeyCode::PageUp],
        );
        assert_eq!(camera.velocity, Vector3::zeros());
        assert_eq!(camera.position, Point3::origin());

        fly(
            &mut camera,
            position_only(),
            &[KeyCode::ControlRight, KeyCode::ArrowRight],
        );
        assert_eq!(camera.angular_velocity, Vector3::zeros());
        assert_eq!(camera.orientation, UnitQuaternion::identity());
    }

    #[test]
    fn test_rig_releases_missing_target() {
        let mut world = World::new();
        world.insert_resource(InputState::new());
        world.insert_resource(ControlConfig::default());

        let ship = world.spawn(Body::at(Point3::new(0.0, 5.0, 0.0))).id();
        let gone = world.spawn(Body::default()).id();
        world.despawn(gone);

        let offset = Isometry3::translation(0.0, -3.0, 1.0);
        let chase = world
            .spawn((
                Controller::Camera(CameraOperator::default()),
                Camera::following(ship, offset),
            ))
            .id();
        let orphan = world
            .spawn((
                Controller::Camera(CameraOperator::default()),
                Camera::following(gone, offset),
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(camera_rig);
        schedule.run(&mut world);

        let chase = world.get::<Camera>(chase).unwrap();
        assert!((chase.position - Point3::new(0.0, 2.0, 1.0)).norm() < EPSILON);
        assert_eq!(chase.followed(), Some(ship));
        assert_eq!(world.get::<Camera>(orphan).unwrap().follow, None);
    }
}
