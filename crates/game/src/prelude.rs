pub use helmsman_engine::prelude::*;

pub use crate::components::*;
pub use crate::config::*;
pub use crate::utils::*;
