use crate::prelude::*;

use rand::Rng;
use std::collections::VecDeque;

/// Target world position of an autopilot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goal {
    position: Point3<f32>,
}

impl Goal {
    pub fn new(position: Point3<f32>) -> Self {
        Self { position }
    }

    pub fn position(&self) -> &Point3<f32> {
        &self.position
    }
}

/// Goal-driven pilot state. Goals are visited strictly in the order given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Autopilot {
    goals: VecDeque<Goal>,
}

impl Autopilot {
    pub fn with_goals(goals: impl IntoIterator<Item = Point3<f32>>) -> Self {
        Self {
            goals: goals.into_iter().map(Goal::new).collect(),
        }
    }

    /// Autopilot with `count` goals drawn uniformly from a cube of half-extent
    /// `spread` around the origin.
    pub fn with_random_goals(rng: &mut impl Rng, count: usize, spread: f32) -> Self {
        let spread = spread.abs();
        let goals = (0..count)
            .map(|_| {
                Point3::new(
                    rng.random_range(-spread..=spread),
                    rng.random_range(-spread..=spread),
                    rng.random_range(-spread..=spread),
                )
            })
            .collect::<Vec<_>>();
        Self::with_goals(goals)
    }

    pub fn current_goal(&self) -> Option<&Goal> {
        self.goals.front()
    }

    /// Drop the current goal after reaching it.
    pub fn arrive(&mut self) -> Option<Goal> {
        self.goals.pop_front()
    }

    /// Forget every goal; the pilot then holds position.
    pub fn stop(&mut self) {
        self.goals.clear();
    }

    pub fn goals(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter()
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_idle(&self) -> bool {
        self.goals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_goals_are_fifo() {
        let mut pilot = Autopilot::with_goals([
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ]);

        let visited: Vec<f32> = std::iter::from_fn(|| pilot.arrive().map(|goal| goal.position().x)).collect();
        assert_eq!(visited, vec![1.0, 2.0, 3.0]);
        assert!(pilot.is_idle());
    }

    #[test]
    fn test_random_goals_stay_in_cube() {
        let mut rng = StdRng::seed_from_u64(7);
        let pilot = Autopilot::with_random_goals(&mut rng, 16, 10.0);

        assert_eq!(pilot.len(), 16);
        for goal in pilot.goals() {
            assert!(goal.position().coords.amax() <= 10.0);
        }
    }

    #[test]
    fn test_stop_clears_goals() {
        let mut pilot = Autopilot::with_goals([Point3::origin()]);
        pilot.stop();
        assert!(pilot.current_goal().is_none());
    }
}
