//! Pose type definition

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Pose (position and orientation)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub xyz: [f32; 3],
    /// Fixed-axis roll, pitch, yaw in radians
    pub rpy: [f32; 3],
}

impl Pose {
    pub fn new(xyz: [f32; 3], rpy: [f32; 3]) -> Self {
        Self { xyz, rpy }
    }

    /// Homogeneous transform of this pose.
    ///
    /// Roll is applied first about X, then pitch about Y, then yaw about Z,
    /// all about the fixed parent axes: `R = Rz(yaw) * Ry(pitch) * Rx(roll)`.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.to_quat(), self.position())
    }

    /// Convert to quaternion representation
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::ZYX, self.rpy[2], self.rpy[1], self.rpy[0])
    }

    /// Get position as Vec3
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.xyz)
    }
}

impl From<&urdf_rs::Pose> for Pose {
    fn from(urdf_pose: &urdf_rs::Pose) -> Self {
        Self {
            xyz: [
                urdf_pose.xyz.0[0] as f32,
                urdf_pose.xyz.0[1] as f32,
                urdf_pose.xyz.0[2] as f32,
            ],
            rpy: [
                urdf_pose.rpy.0[0] as f32,
                urdf_pose.rpy.0[1] as f32,
                urdf_pose.rpy.0[2] as f32,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Pose::default().to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn test_yaw_rotates_x_onto_y() {
        let pose = Pose::new([1.0, 2.0, 3.0], [0.0, 0.0, FRAC_PI_2]);
        let m = pose.to_mat4();
        assert!(m.transform_vector3(Vec3::X).abs_diff_eq(Vec3::Y, 1e-6));
        assert!(m.transform_point3(Vec3::ZERO).abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));
    }

    #[test]
    fn test_roll_applied_before_yaw() {
        // Rz(90) * Rx(90) sends +Y to +Z; the reversed order would send it to -X
        let pose = Pose::new([0.0; 3], [FRAC_PI_2, 0.0, FRAC_PI_2]);
        let v = pose.to_mat4().transform_vector3(Vec3::Y);
        assert!(v.abs_diff_eq(Vec3::Z, 1e-6), "got {v:?}");
    }

    #[test]
    fn test_from_urdf_pose() {
        let urdf_pose = urdf_rs::Pose {
            xyz: urdf_rs::Vec3([1.0, 2.0, 3.0]),
            rpy: urdf_rs::Vec3([0.1, 0.2, 0.3]),
        };

        let pose = Pose::from(&urdf_pose);
        assert_eq!(pose.xyz, [1.0, 2.0, 3.0]);
        assert_eq!(pose.rpy, [0.1, 0.2, 0.3]);
    }
}
