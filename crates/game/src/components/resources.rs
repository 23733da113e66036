use crate::prelude::*;

use rand::{SeedableRng, rngs::StdRng};

/// Ordered list of cameras and the one currently shown.
///
/// The active index is always resolved modulo the list length, so it stays
/// valid when cameras are removed.
#[derive(Resource, Debug, Clone, Default)]
pub struct CameraDirector {
    cameras: Vec<Entity>,
    active: usize,
}

impl CameraDirector {
    pub fn new(cameras: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            cameras: cameras.into_iter().collect(),
            active: 0,
        }
    }

    pub fn push(&mut self, camera: Entity) {
        self.cameras.push(camera);
    }

    pub fn remove(&mut self, camera: Entity) {
        self.cameras.retain(|entity| *entity != camera);
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        if self.cameras.is_empty() {
            None
        } else {
            Some(self.active % self.cameras.len())
        }
    }

    pub fn active(&self) -> Option<Entity> {
        self.active_index().map(|index| self.cameras[index])
    }

    pub fn next(&mut self) -> Option<Entity> {
        let index = self.active_index()?;
        self.active = (index + 1) % self.cameras.len();
        self.active()
    }

    pub fn previous(&mut self) -> Option<Entity> {
        let index = self.active_index()?;
        self.active = (index + self.cameras.len() - 1) % self.cameras.len();
        self.active()
    }
}

/// Dispatcher bookkeeping.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchState {
    /// While set, controllers are not invoked; discrete input still drains.
    /// Pausing cuts every burn set once, so the integrator coasts.
    pub paused: bool,
}

/// Random source for autopilot goals.
#[derive(Resource, Debug, Clone)]
pub struct GoalSeeder {
    rng: StdRng,
}

impl GoalSeeder {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn autopilot(&mut self, settings: &AutopilotSettings) -> Autopilot {
        Autopilot::with_random_goals(&mut self.rng, settings.seeded_goals, settings.goal_spread)
    }
}

impl Default for GoalSeeder {
    fn default() -> Self {
        Self::from_os_rng()
    }
}
