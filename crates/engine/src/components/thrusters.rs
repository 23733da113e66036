use crate::prelude::*;

/// Named thruster channel of a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrusterChannel {
    Forward,
    Reverse,
    StrafeLeft,
    StrafeRight,
    Raise,
    Lower,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    RollLeft,
    RollRight,
}

impl ThrusterChannel {
    pub const ALL: [ThrusterChannel; 12] = [
        ThrusterChannel::Forward,
        ThrusterChannel::Reverse,
        ThrusterChannel::StrafeLeft,
        ThrusterChannel::StrafeRight,
        ThrusterChannel::Raise,
        ThrusterChannel::Lower,
        ThrusterChannel::YawLeft,
        ThrusterChannel::YawRight,
        ThrusterChannel::PitchUp,
        ThrusterChannel::PitchDown,
        ThrusterChannel::RollLeft,
        ThrusterChannel::RollRight,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Self {
        match self {
            ThrusterChannel::Forward => ThrusterChannel::Reverse,
            ThrusterChannel::Reverse => ThrusterChannel::Forward,
            ThrusterChannel::StrafeLeft => ThrusterChannel::StrafeRight,
            ThrusterChannel::StrafeRight => ThrusterChannel::StrafeLeft,
            ThrusterChannel::Raise => ThrusterChannel::Lower,
            ThrusterChannel::Lower => ThrusterChannel::Raise,
            ThrusterChannel::YawLeft => ThrusterChannel::YawRight,
            ThrusterChannel::YawRight => ThrusterChannel::YawLeft,
            ThrusterChannel::PitchUp => ThrusterChannel::PitchDown,
            ThrusterChannel::PitchDown => ThrusterChannel::PitchUp,
            ThrusterChannel::RollLeft => ThrusterChannel::RollRight,
            ThrusterChannel::RollRight => ThrusterChannel::RollLeft,
        }
    }
}

/// Burn fraction in [0, 1] for every thruster channel, rewritten each tick by
/// the entity's controller and consumed by the physics integrator.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrusterBurnSet {
    burns: [f32; 12],
}

impl ThrusterBurnSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.burns = [0.0; 12];
    }

    pub fn get(&self, channel: ThrusterChannel) -> f32 {
        self.burns[channel.index()]
    }

    /// Overwrite one channel. Values are clamped to [0, 1]; NaN counts as 0.
    pub fn set(&mut self, channel: ThrusterChannel, fraction: f32) {
        self.burns[channel.index()] = clamp_fraction(fraction);
    }

    /// Add to one channel, saturating at a full burn.
    pub fn add(&mut self, channel: ThrusterChannel, fraction: f32) {
        let current = self.get(channel);
        self.set(channel, current + clamp_fraction(fraction));
    }

    /// Spread a burn of `fraction` along a local-frame direction over the six
    /// linear channels.
    pub fn fire_along(&mut self, local_direction: &Vector3<f32>, fraction: f32) {
        let axes = [
            (local_direction.x, ThrusterChannel::StrafeRight),
            (local_direction.y, ThrusterChannel::Forward),
            (local_direction.z, ThrusterChannel::Raise),
        ];

        for (component, positive) in axes {
            if component > 0.0 {
                self.add(positive, component * fraction);
            } else if component < 0.0 {
                self.add(positive.opposite(), -component * fraction);
            }
        }
    }

    /// Burn against a local-frame direction of travel.
    pub fn brake_along(&mut self, local_velocity_direction: &Vector3<f32>, fraction: f32) {
        self.fire_along(&-local_velocity_direction, fraction);
    }

    pub fn is_idle(&self) -> bool {
        self.burns.iter().all(|burn| *burn == 0.0)
    }

    /// Channels with a non-zero burn.
    pub fn active(&self) -> impl Iterator<Item = (ThrusterChannel, f32)> + '_ {
        ThrusterChannel::ALL
            .into_iter()
            .map(|channel| (channel, self.get(channel)))
            .filter(|(_, burn)| *burn > 0.0)
    }

    /// Net local linear command: x right, y forward, z up.
    pub fn linear(&self) -> Vector3<f32> {
        use ThrusterChannel::*;
        Vector3::new(
            self.get(StrafeRight) - self.get(StrafeLeft),
            self.get(Forward) - self.get(Reverse),
            self.get(Raise) - self.get(Lower),
        )
    }
}

fn clamp_fraction(fraction: f32) -> f32 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_set_clamps() {
        let mut burns = ThrusterBurnSet::new();
        burns.set(ThrusterChannel::Forward, 3.0);
        burns.set(ThrusterChannel::Reverse, -1.0);
        burns.set(ThrusterChannel::Raise, f32::NAN);

        assert_eq!(burns.get(ThrusterChannel::Forward), 1.0);
        assert_eq!(burns.get(ThrusterChannel::Reverse), 0.0);
        assert_eq!(burns.get(ThrusterChannel::Raise), 0.0);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut burns = ThrusterBurnSet::new();
        burns.set(ThrusterChannel::YawLeft, 0.5);
        burns.add(ThrusterChannel::Forward, 0.25);
        assert!(!burns.is_idle());

        burns.reset();
        assert!(burns.is_idle());
        assert_eq!(burns.active().count(), 0);
    }

    #[test]
    fn test_add_saturates() {
        let mut burns = ThrusterBurnSet::new();
        burns.add(ThrusterChannel::Forward, 0.75);
        burns.add(ThrusterChannel::Forward, 0.5);
        assert_eq!(burns.get(ThrusterChannel::Forward), 1.0);
    }

    #[test]
    fn test_brake_opposes_direction() {
        let mut burns = ThrusterBurnSet::new();
        let direction = Vector3::new(0.6, 0.8, 0.0);
        burns.brake_along(&direction, 0.5);

        assert!((burns.get(ThrusterChannel::StrafeLeft) - 0.3).abs() < EPSILON);
        assert!((burns.get(ThrusterChannel::Reverse) - 0.4).abs() < EPSILON);
        assert_eq!(burns.get(ThrusterChannel::StrafeRight), 0.0);
        assert_eq!(burns.get(ThrusterChannel::Forward), 0.0);

        let net = burns.linear();
        assert!(net.dot(&direction) < 0.0);
    }
}
