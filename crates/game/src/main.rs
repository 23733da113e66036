use std::sync::Arc;

use helmsman_engine::{ApplicationBuilder, Result};
use winit::event_loop::EventLoop;

use crate::control_layer::ControlLayer;
use crate::prelude::*;

mod components;
mod config;
mod control_layer;
mod prelude;
mod systems;
mod tuning;
mod utils;

const DRONES: usize = 3;

/// Fixes the autopilot goal sequence when set, for reproducible runs.
const SEED_VAR: &str = "HELMSMAN_SEED";

fn goal_seeder() -> GoalSeeder {
    match std::env::var(SEED_VAR).map(|value| value.parse::<u64>()) {
        Ok(Ok(seed)) => {
            log::info!("Seeding autopilot goals with {}", seed);
            GoalSeeder::from_seed(seed)
        }
        Ok(Err(error)) => {
            log::warn!("Ignoring {}: {}", SEED_VAR, error);
            GoalSeeder::from_os_rng()
        }
        Err(_) => GoalSeeder::from_os_rng(),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_module("helmsman", log::LevelFilter::Debug)
        .filter_module("helmsman_engine", log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;

    let mut app = ApplicationBuilder::new()
        .add_layer(|context| Box::new(ControlLayer::new(context)))
        .build();

    let corvette = Arc::new(PropulsionClass::new("corvette", 4.0, 0.02));
    let freighter = Arc::new(PropulsionClass::new("freighter", 6.0, 0.01));
    let config = ControlConfig::default();
    let mut seeder = goal_seeder();

    let player = app.spawn(
        "Player",
        (
            Body::default(),
            Propulsion::new(&corvette),
            ThrusterBurnSet::new(),
            Controller::Manual(ManualPilot::default()),
            WeaponTrigger::default(),
            HitboxVisibility::default(),
        ),
    )?;

    let mut drones = Vec::with_capacity(DRONES);
    for index in 0..DRONES {
        let position = Point3::new(15.0 * (index as f32 + 1.0), 0.0, 0.0);
        let drone = app.spawn(
            format!("Drone {}", index),
            (
                Body::at(position).with_mass(3.0),
                Propulsion::new(&freighter),
                ThrusterBurnSet::new(),
                Controller::Autonomous(seeder.autopilot(&config.autopilot)),
                WeaponTrigger::default(),
                HitboxVisibility::default(),
            ),
        )?;
        drones.push(drone);
    }

    let chase = app.spawn(
        "Chase camera",
        (
            Camera::following(player, Isometry3::translation(0.0, -8.0, 2.0)),
            Controller::Camera(CameraOperator::default()),
        ),
    )?;

    let overview = app.spawn(
        "Overview camera",
        (
            Camera::free(
                Point3::new(0.0, -60.0, 20.0),
                UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -0.3),
            ),
            Controller::Camera(CameraOperator::default()),
        ),
    )?;

    let mut director = CameraDirector::new([chase, overview]);
    if let Some(drone) = drones.first() {
        let turret = app.spawn(
            "Turret camera",
            (
                Camera::following(*drone, Isometry3::translation(0.0, 0.0, 1.5)),
                Controller::Camera(CameraOperator::orientation_only()),
            ),
        )?;
        director.push(turret);
    }

    log::info!(
        "Spawned {} ships and {} cameras",
        drones.len() + 1,
        director.len()
    );

    app.with_world(move |world| {
        world.insert_resource(director);
        world.insert_resource(seeder);
        world.insert_resource(config);
    })?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
