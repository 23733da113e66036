use crate::prelude::*;

/// Human readable name used in logs.
#[derive(Component, Debug, Clone)]
pub struct Tag {
    pub label: String,
}
