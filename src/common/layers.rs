//! Collision layers and surface classification.
//!
//! Terrain collaborators tag their colliders with exactly one of two surface layers:
//! - `Terrain`: a hook attaches, a player dies.
//! - `Hazard`: a hook is lost, a player dies.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Terrain,
    Hazard,
    Player,
    Hook,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    Terrain,
    Hazard,
}

impl SurfaceKind {
    /// Classify the other side of a collision. Hazard wins if a collider claims both.
    #[inline]
    pub fn classify(layers: &CollisionLayers) -> Option<Self> {
        if layers.memberships.has_all(Layer::Hazard) {
            Some(Self::Hazard)
        } else if layers.memberships.has_all(Layer::Terrain) {
            Some(Self::Terrain)
        } else {
            None
        }
    }
}

/// Layers for static terrain pillars.
#[inline]
pub fn terrain_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Terrain, [Layer::Player, Layer::Hook])
}

/// Layers for walls/floor that kill the player and swallow hooks.
#[inline]
pub fn hazard_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Hazard, [Layer::Player, Layer::Hook])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_surfaces() {
        assert_eq!(SurfaceKind::classify(&terrain_layers()), Some(SurfaceKind::Terrain));
        assert_eq!(SurfaceKind::classify(&hazard_layers()), Some(SurfaceKind::Hazard));

        let player = CollisionLayers::new(Layer::Player, [Layer::Terrain]);
        assert_eq!(SurfaceKind::classify(&player), None);
    }
}
