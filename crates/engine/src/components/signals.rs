use crate::prelude::*;

/// Per-tick discharge request read by the weapon system.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeaponTrigger {
    pub fire_requested: bool,
}

/// Whether the debug hitbox overlay of an entity is drawn.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitboxVisibility(pub bool);
