mod actuator;
mod angles;
mod body_view;

pub use actuator::*;
pub use angles::*;
pub use body_view::*;
