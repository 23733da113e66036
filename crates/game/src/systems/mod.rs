mod autonomous_flight;
mod camera_controller;
mod dispatcher;
mod manual_flight;

pub use autonomous_flight::*;
pub use camera_controller::*;
pub use dispatcher::*;
pub use manual_flight::*;
