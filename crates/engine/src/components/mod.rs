mod body;
mod camera;
mod label;
mod propulsion;
mod resources;
mod signals;
mod thrusters;

pub use body::*;
pub use camera::*;
pub use label::*;
pub use propulsion::*;
pub use resources::*;
pub use signals::*;
pub use thrusters::*;
