pub use bevy_ecs::prelude::*;
pub use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector2, Vector3};

pub use crate::components::*;
pub use crate::input::InputState;
pub use crate::{Layer, LayerContext, LayerEvent};
