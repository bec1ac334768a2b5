//! Plain link/joint records consumed by the tree builder

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::{Geometry, JointLimits, JointType, Material, Pose};

/// A visual element attached to a link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub name: Option<String>,
    pub geometry: Geometry,
    pub material: Material,
    /// Owning-link frame to visual frame
    pub origin: Mat4,
}

impl Visual {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            name: None,
            geometry,
            material: Material::default(),
            origin: Mat4::IDENTITY,
        }
    }

    pub fn with_origin(mut self, origin: Mat4) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

/// Link record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    pub name: String,
    pub visuals: Vec<Visual>,
}

impl LinkDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visuals: Vec::new(),
        }
    }

    pub fn with_visual(mut self, visual: Visual) -> Self {
        self.visuals.push(visual);
        self
    }
}

/// Joint record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointDescriptor {
    pub name: String,
    pub joint_type: JointType,
    /// Parent link name
    pub parent: String,
    /// Child link name
    pub child: String,
    /// Parent-link frame to joint frame at zero configuration
    pub origin: Mat4,
    /// Joint axis in the joint frame; unit X when absent
    pub axis: Option<Vec3>,
    pub limits: Option<JointLimits>,
}

impl JointDescriptor {
    /// Create a builder for constructing joints with fluent API
    pub fn builder(
        name: impl Into<String>,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> JointDescriptorBuilder {
        JointDescriptorBuilder::new(name, parent, child)
    }
}

/// Builder for joint records
#[derive(Debug, Clone)]
pub struct JointDescriptorBuilder {
    name: String,
    joint_type: JointType,
    parent: String,
    child: String,
    origin: Pose,
    matrix: Option<Mat4>,
    axis: Option<Vec3>,
    limits: Option<JointLimits>,
}

impl JointDescriptorBuilder {
    pub fn new(
        name: impl Into<String>,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            joint_type: JointType::Fixed,
            parent: parent.into(),
            child: child.into(),
            origin: Pose::default(),
            matrix: None,
            axis: None,
            limits: None,
        }
    }

    pub fn joint_type(mut self, joint_type: JointType) -> Self {
        self.joint_type = joint_type;
        self
    }

    pub fn revolute(self) -> Self {
        self.joint_type(JointType::Revolute)
    }

    pub fn continuous(self) -> Self {
        self.joint_type(JointType::Continuous)
    }

    pub fn prismatic(self) -> Self {
        self.joint_type(JointType::Prismatic)
    }

    /// Set the origin as a full transform, replacing any xyz/rpy
    pub fn origin(mut self, origin: Mat4) -> Self {
        self.matrix = Some(origin);
        self
    }

    /// Set the origin position
    pub fn xyz(mut self, x: f32, y: f32, z: f32) -> Self {
        self.origin.xyz = [x, y, z];
        self.matrix = None;
        self
    }

    /// Set the origin rotation (roll, pitch, yaw)
    pub fn rpy(mut self, roll: f32, pitch: f32, yaw: f32) -> Self {
        self.origin.rpy = [roll, pitch, yaw];
        self.matrix = None;
        self
    }

    /// Set the joint axis; normalized when the tree is built
    pub fn axis(mut self, axis: Vec3) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn axis_xyz(self, x: f32, y: f32, z: f32) -> Self {
        self.axis(Vec3::new(x, y, z))
    }

    pub fn limits(mut self, limits: JointLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn limits_range(self, lower: f32, upper: f32) -> Self {
        self.limits(JointLimits::with_range(lower, upper))
    }

    pub fn build(self) -> JointDescriptor {
        JointDescriptor {
            name: self.name,
            joint_type: self.joint_type,
            parent: self.parent,
            child: self.child,
            origin: self.matrix.unwrap_or_else(|| self.origin.to_mat4()),
            axis: self.axis,
            limits: self.limits,
        }
    }
}

/// A parsed robot description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RobotDescription {
    pub name: String,
    pub links: Vec<LinkDescriptor>,
    pub joints: Vec<JointDescriptor>,
}

impl RobotDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_link(mut self, link: LinkDescriptor) -> Self {
        self.links.push(link);
        self
    }

    pub fn with_joint(mut self, joint: JointDescriptor) -> Self {
        self.joints.push(joint);
        self
    }
}
