//! Joint-related type definitions

use serde::{Deserialize, Serialize};

/// Joint mobility type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum JointType {
    #[default]
    Fixed,
    Revolute,
    Continuous,
    Prismatic,
    /// Not posable here; treated as fixed
    Floating,
    /// Not posable here; treated as fixed
    Planar,
}

impl JointType {
    /// Check if a configuration value drives this joint
    pub fn is_actuated(&self) -> bool {
        matches!(
            self,
            JointType::Revolute | JointType::Continuous | JointType::Prismatic
        )
    }

    /// Check if this joint type is posed as a rotation
    pub fn is_angular(&self) -> bool {
        matches!(self, JointType::Revolute | JointType::Continuous)
    }

    /// Check if this joint type has limits
    pub fn has_limits(&self) -> bool {
        matches!(self, JointType::Revolute | JointType::Prismatic)
    }

    /// Mobility types that exist in URDF but have no single-value pose
    pub fn is_supported(&self) -> bool {
        !matches!(self, JointType::Floating | JointType::Planar)
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            JointType::Fixed => "Fixed",
            JointType::Revolute => "Revolute",
            JointType::Continuous => "Continuous",
            JointType::Prismatic => "Prismatic",
            JointType::Floating => "Floating",
            JointType::Planar => "Planar",
        }
    }
}

impl std::fmt::Display for JointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl From<&urdf_rs::JointType> for JointType {
    fn from(urdf_type: &urdf_rs::JointType) -> Self {
        match urdf_type {
            urdf_rs::JointType::Fixed => JointType::Fixed,
            urdf_rs::JointType::Revolute => JointType::Revolute,
            urdf_rs::JointType::Continuous => JointType::Continuous,
            urdf_rs::JointType::Prismatic => JointType::Prismatic,
            urdf_rs::JointType::Floating => JointType::Floating,
            urdf_rs::JointType::Planar => JointType::Planar,
            urdf_rs::JointType::Spherical => JointType::Floating,
        }
    }
}

/// Joint limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointLimits {
    /// Lower position limit (rad or m)
    pub lower: f32,
    /// Upper position limit (rad or m)
    pub upper: f32,
    /// Maximum effort (N or Nm)
    pub effort: f32,
    /// Maximum velocity (rad/s or m/s)
    pub velocity: f32,
}

impl Default for JointLimits {
    fn default() -> Self {
        Self {
            lower: -std::f32::consts::PI,
            upper: std::f32::consts::PI,
            effort: 100.0,
            velocity: 1.0,
        }
    }
}

impl JointLimits {
    /// Create default limits for prismatic joints (-1m to 1m)
    pub fn default_prismatic() -> Self {
        Self {
            lower: -1.0,
            upper: 1.0,
            ..Self::default()
        }
    }

    /// Create limits with specified range
    pub fn with_range(lower: f32, upper: f32) -> Self {
        Self {
            lower,
            upper,
            ..Self::default()
        }
    }

    /// Whether the limits allow any motion; a missing URDF `<limit>` reads as 0..0
    pub fn has_range(&self) -> bool {
        self.lower < self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actuated_types() {
        assert!(JointType::Revolute.is_actuated());
        assert!(JointType::Continuous.is_actuated());
        assert!(JointType::Prismatic.is_actuated());
        assert!(!JointType::Fixed.is_actuated());
        assert!(!JointType::Floating.is_actuated());
        assert!(!JointType::Planar.is_actuated());
    }

    #[test]
    fn test_spherical_maps_to_floating() {
        assert_eq!(
            JointType::from(&urdf_rs::JointType::Spherical),
            JointType::Floating
        );
        assert!(!JointType::Floating.is_supported());
    }

    #[test]
    fn test_limits_range() {
        let limits = JointLimits::with_range(-1.0, 2.0);
        assert!(limits.has_range());
        assert_eq!(limits.effort, JointLimits::default().effort);

        assert!(!JointLimits::with_range(0.0, 0.0).has_range());
        assert!(!JointLimits::with_range(1.0, -1.0).has_range());

        let prismatic = JointLimits::default_prismatic();
        assert_eq!((prismatic.lower, prismatic.upper), (-1.0, 1.0));
    }
}
