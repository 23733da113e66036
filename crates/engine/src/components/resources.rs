use crate::prelude::*;

/// Scene-wide switches flipped by discrete input and read by the renderer.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneToggles {
    pub light_rotation: bool,
}
