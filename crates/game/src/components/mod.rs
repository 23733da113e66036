mod autopilot;
mod camera_controller;
mod controller;
mod manual_pilot;
mod resources;

pub use autopilot::*;
pub use camera_controller::*;
pub use controller::*;
pub use manual_pilot::*;
pub use resources::*;
