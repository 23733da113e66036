/// Flight assistance level of a manual pilot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlightMode {
    /// Keys fire raw impulses and nothing is damped.
    #[default]
    Inertial,
    /// Thrusters hold the intended speed and cancel sideways drift.
    Compensated,
}

impl FlightMode {
    pub const ALL: [FlightMode; 2] = [FlightMode::Inertial, FlightMode::Compensated];

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|mode| *mode == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

/// Keyboard-driven pilot state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualPilot {
    pub mode: FlightMode,
    /// Forward speed held in compensated mode, never negative.
    pub intended_speed: f32,
}

impl ManualPilot {
    pub fn toggle_mode(&mut self) -> FlightMode {
        self.mode = self.mode.next();
        self.mode
    }
}
