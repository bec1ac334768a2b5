//! Per-joint control descriptions for building one input widget per actuated joint
//!
//! Configuration values are always radians (revolute, continuous) or length
//! units (prismatic). Controls may present angles in degrees; the conversion
//! happens here and nowhere else.

use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::tree::{Joint, KinematicTree};
use crate::types::{JointLimits, JointType};

/// How angular joint values are shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AngleDisplayMode {
    #[default]
    Degrees,
    Radians,
}

/// Input range and units for one actuated joint
#[derive(Debug, Clone, PartialEq)]
pub struct JointControl {
    pub name: String,
    pub joint_type: JointType,
    pub limits: Option<JointLimits>,
    /// Lower bound in configuration units
    pub min: f32,
    /// Upper bound in configuration units
    pub max: f32,
}

impl JointControl {
    pub fn for_joint(joint: &Joint) -> Self {
        let limits = joint.limits().filter(JointLimits::has_range);
        let (min, max) = match (limits, joint.joint_type()) {
            (Some(limits), _) => (limits.lower, limits.upper),
            (None, JointType::Continuous) => (-TAU, TAU),
            (None, JointType::Prismatic) => {
                let limits = JointLimits::default_prismatic();
                (limits.lower, limits.upper)
            }
            (None, _) => (-PI, PI),
        };
        Self {
            name: joint.name().to_string(),
            joint_type: joint.joint_type(),
            limits,
            min,
            max,
        }
    }

    /// Convert a configuration value to the display unit
    pub fn to_display(&self, value: f32, mode: AngleDisplayMode) -> f32 {
        match (self.joint_type.is_angular(), mode) {
            (true, AngleDisplayMode::Degrees) => value.to_degrees(),
            _ => value,
        }
    }

    /// Convert a displayed value back to a configuration value
    pub fn from_display(&self, value: f32, mode: AngleDisplayMode) -> f32 {
        match (self.joint_type.is_angular(), mode) {
            (true, AngleDisplayMode::Degrees) => value.to_radians(),
            _ => value,
        }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    /// Unit label for the display mode
    pub fn unit(&self, mode: AngleDisplayMode) -> &'static str {
        match (self.joint_type.is_angular(), mode) {
            (true, AngleDisplayMode::Degrees) => "deg",
            (true, AngleDisplayMode::Radians) => "rad",
            (false, _) => "m",
        }
    }
}

impl KinematicTree {
    /// One control per actuated joint, in configuration order
    pub fn joint_controls(&self) -> Vec<JointControl> {
        self.actuated_joints().map(JointControl::for_joint).collect()
    }
}
