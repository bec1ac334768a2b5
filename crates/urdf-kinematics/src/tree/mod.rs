//! Kinematic tree: links and joints in index-addressed arenas
//!
//! Links and joints refer to each other through [`LinkId`] and [`JointId`],
//! never through owning references. The topology is fixed once built; only
//! joint values and cached link world transforms change afterwards, and only
//! through [`KinematicTree::update`] and [`KinematicTree::set_base_pose`].

mod builder;
mod transforms;
mod visuals;

use std::collections::HashMap;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::description::{JointDescriptor, Visual};
use crate::error::{BuildError, BuildWarning};
use crate::types::{JointLimits, JointType};

pub use visuals::{LinkVisuals, PlacedVisual};

/// Index of a link within its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(pub usize);

/// Index of a joint within its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JointId(pub usize);

/// A rigid body of the robot
#[derive(Debug, Clone)]
pub struct Link {
    name: String,
    visuals: Vec<Visual>,
    parent_joint: Option<JointId>,
    child_joints: Vec<JointId>,
    world_transform: Mat4,
}

impl Link {
    fn new(name: String, visuals: Vec<Visual>) -> Self {
        Self {
            name,
            visuals,
            parent_joint: None,
            child_joints: Vec::new(),
            world_transform: Mat4::IDENTITY,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Visual elements in description order
    pub fn visuals(&self) -> &[Visual] {
        &self.visuals
    }

    /// `None` for the root link
    pub fn parent_joint(&self) -> Option<JointId> {
        self.parent_joint
    }

    pub fn child_joints(&self) -> &[JointId] {
        &self.child_joints
    }

    pub fn is_root(&self) -> bool {
        self.parent_joint.is_none()
    }

    /// Cached world transform from the last update
    pub fn world_transform(&self) -> Mat4 {
        self.world_transform
    }
}

/// A motion constraint between a parent and a child link
#[derive(Debug, Clone)]
pub struct Joint {
    name: String,
    joint_type: JointType,
    origin: Mat4,
    /// Unit length
    axis: Vec3,
    limits: Option<JointLimits>,
    current_value: f32,
    parent_link: LinkId,
    child_link: LinkId,
}

impl Joint {
    /// Create a joint from its record, normalizing the axis.
    ///
    /// Joints driven by a value need a non-zero axis. For the others the
    /// axis is unused and falls back to unit X.
    fn from_descriptor(
        descriptor: &JointDescriptor,
        parent_link: LinkId,
        child_link: LinkId,
    ) -> Result<Self, BuildError> {
        let raw_axis = descriptor.axis.unwrap_or(Vec3::X);
        let axis = match raw_axis.try_normalize() {
            Some(axis) => axis,
            None if descriptor.joint_type.is_actuated() => {
                return Err(BuildError::DegenerateAxis {
                    joint: descriptor.name.clone(),
                });
            }
            None => Vec3::X,
        };

        Ok(Self {
            name: descriptor.name.clone(),
            joint_type: descriptor.joint_type,
            origin: descriptor.origin,
            axis,
            limits: descriptor.limits.filter(|_| descriptor.joint_type.has_limits()),
            current_value: 0.0,
            parent_link,
            child_link,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn joint_type(&self) -> JointType {
        self.joint_type
    }

    /// Parent-link frame to joint frame at zero configuration
    pub fn origin(&self) -> Mat4 {
        self.origin
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    /// Limits, only kept for revolute and prismatic joints
    pub fn limits(&self) -> Option<JointLimits> {
        self.limits
    }

    /// Radians for angular joints, length units for prismatic, 0 otherwise
    pub fn current_value(&self) -> f32 {
        self.current_value
    }

    pub fn parent_link(&self) -> LinkId {
        self.parent_link
    }

    pub fn child_link(&self) -> LinkId {
        self.child_link
    }

    pub fn is_actuated(&self) -> bool {
        self.joint_type.is_actuated()
    }
}

/// The robot as a tree of links connected by joints
#[derive(Debug, Clone)]
pub struct KinematicTree {
    name: String,
    links: Vec<Link>,
    joints: Vec<Joint>,
    link_index: HashMap<String, LinkId>,
    joint_index: HashMap<String, JointId>,
    root: LinkId,
    /// Joints driven by the configuration vector, in description order
    actuated: Vec<JointId>,
    /// Parents before children, starting at the root
    order: Vec<LinkId>,
    base_pose: Mat4,
    warnings: Vec<BuildWarning>,
}

impl KinematicTree {
    /// Robot name from the description
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> LinkId {
        self.root
    }

    pub fn root_link(&self) -> &Link {
        &self.links[self.root.0]
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn get_link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.0)
    }

    pub fn get_joint(&self, id: JointId) -> Option<&Joint> {
        self.joints.get(id.0)
    }

    pub fn find_link_id(&self, name: &str) -> Option<LinkId> {
        self.link_index.get(name).copied()
    }

    pub fn find_joint_id(&self, name: &str) -> Option<JointId> {
        self.joint_index.get(name).copied()
    }

    pub fn link(&self, name: &str) -> Option<&Link> {
        self.find_link_id(name).map(|id| &self.links[id.0])
    }

    pub fn joint(&self, name: &str) -> Option<&Joint> {
        self.find_joint_id(name).map(|id| &self.joints[id.0])
    }

    /// Get the parent link of a link, `None` for the root
    pub fn parent_link(&self, id: LinkId) -> Option<&Link> {
        let joint = self.links.get(id.0)?.parent_joint?;
        Some(&self.links[self.joints[joint.0].parent_link.0])
    }

    /// Child links of a link, in joint description order
    pub fn child_links(&self, id: LinkId) -> impl Iterator<Item = &Link> + '_ {
        self.links
            .get(id.0)
            .map(|link| link.child_joints.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|joint| &self.links[self.joints[joint.0].child_link.0])
    }

    /// Joints driven by the configuration vector, in their fixed order
    pub fn actuated_joints(&self) -> impl ExactSizeIterator<Item = &Joint> + '_ {
        self.actuated.iter().map(|id| &self.joints[id.0])
    }

    pub fn actuated_joint_ids(&self) -> &[JointId] {
        &self.actuated
    }

    /// Expected configuration length
    pub fn dof(&self) -> usize {
        self.actuated.len()
    }

    /// Position of a joint in the configuration vector
    pub fn actuated_index(&self, joint_name: &str) -> Option<usize> {
        let id = self.find_joint_id(joint_name)?;
        self.actuated.iter().position(|&a| a == id)
    }

    /// Current values of the actuated joints
    pub fn configuration(&self) -> Vec<f32> {
        self.actuated_joints().map(Joint::current_value).collect()
    }

    /// Link ids with every parent ahead of its children
    pub fn traversal_order(&self) -> &[LinkId] {
        &self.order
    }

    /// Pose assigned to the root link
    pub fn base_pose(&self) -> Mat4 {
        self.base_pose
    }

    /// World transform of a link by name
    pub fn world_transform(&self, link_name: &str) -> Option<Mat4> {
        self.link(link_name).map(Link::world_transform)
    }

    /// Non-fatal findings from building this tree
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }
}
