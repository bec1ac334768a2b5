//! World placement of visual elements

use glam::{Mat4, Quat, Vec3};

use super::{KinematicTree, Link, LinkId};
use crate::description::Visual;

/// A visual element with its world transform
#[derive(Debug, Clone, Copy)]
pub struct PlacedVisual<'a> {
    pub visual: &'a Visual,
    pub world_transform: Mat4,
}

impl PlacedVisual<'_> {
    pub fn translation(&self) -> Vec3 {
        self.world_transform.w_axis.truncate()
    }

    pub fn rotation(&self) -> Quat {
        let (_, rotation, _) = self.world_transform.to_scale_rotation_translation();
        rotation
    }

    /// Rotation as a unit axis and an angle in radians
    pub fn axis_angle(&self) -> (Vec3, f32) {
        self.rotation().to_axis_angle()
    }
}

/// All placed visuals of one link
#[derive(Debug, Clone)]
pub struct LinkVisuals<'a> {
    pub link: &'a Link,
    pub visuals: Vec<PlacedVisual<'a>>,
}

impl Link {
    /// Visuals placed in the world from the cached link transform
    pub fn placed_visuals(&self) -> impl ExactSizeIterator<Item = PlacedVisual<'_>> + '_ {
        self.visuals.iter().map(|visual| PlacedVisual {
            visual,
            world_transform: self.world_transform * visual.origin,
        })
    }
}

impl KinematicTree {
    /// Placed visuals of a link by name, in description order
    pub fn visual_world_transforms(&self, link_name: &str) -> Option<Vec<PlacedVisual<'_>>> {
        self.link(link_name).map(|link| link.placed_visuals().collect())
    }

    pub fn link_visual_world_transforms(&self, id: LinkId) -> Vec<PlacedVisual<'_>> {
        self.get_link(id)
            .map(|link| link.placed_visuals().collect())
            .unwrap_or_default()
    }

    /// Placed visuals of every link, in link description order
    pub fn all_visual_world_transforms(&self) -> Vec<LinkVisuals<'_>> {
        self.links
            .iter()
            .map(|link| LinkVisuals {
                link,
                visuals: link.placed_visuals().collect(),
            })
            .collect()
    }
}
