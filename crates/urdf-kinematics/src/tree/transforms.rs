//! Forward kinematics

use glam::Mat4;

use super::{Joint, KinematicTree};
use crate::error::SolverError;
use crate::types::JointType;

impl Joint {
    /// Motion of the joint frame for a joint value
    pub fn motion(&self, value: f32) -> Mat4 {
        match self.joint_type {
            JointType::Revolute | JointType::Continuous => Mat4::from_axis_angle(self.axis, value),
            JointType::Prismatic => Mat4::from_translation(self.axis * value),
            // Floating and planar joints need more than one value
            JointType::Fixed | JointType::Floating | JointType::Planar => Mat4::IDENTITY,
        }
    }

    /// Parent-link frame to child-link frame for a joint value
    pub fn local_transform_at(&self, value: f32) -> Mat4 {
        self.origin * self.motion(value)
    }

    /// Parent-link frame to child-link frame at the current value
    pub fn local_transform(&self) -> Mat4 {
        self.local_transform_at(self.current_value)
    }
}

impl KinematicTree {
    /// Set the actuated joint values and recompute every link's world transform.
    ///
    /// `configuration[i]` drives the i-th actuated joint. On a length mismatch
    /// nothing is changed.
    pub fn update(&mut self, configuration: &[f32]) -> Result<(), SolverError> {
        let transforms = self.compute_world_transforms(configuration)?;

        for (&joint, &value) in self.actuated.iter().zip(configuration) {
            self.joints[joint.0].current_value = value;
        }
        self.publish(transforms);

        tracing::debug!(
            "Updated '{}' with {} joint values",
            self.name,
            configuration.len()
        );
        Ok(())
    }

    /// Set the pose of the root link and recompute at the current configuration
    pub fn set_base_pose(&mut self, base_pose: Mat4) {
        self.base_pose = base_pose;
        self.recompute();
    }

    /// World transforms for a configuration, indexed by link, without touching the tree
    pub fn compute_world_transforms(
        &self,
        configuration: &[f32],
    ) -> Result<Vec<Mat4>, SolverError> {
        if configuration.len() != self.actuated.len() {
            return Err(SolverError::ConfigurationLengthMismatch {
                expected: self.actuated.len(),
                actual: configuration.len(),
            });
        }
        Ok(self.world_transforms_at(configuration))
    }

    /// Caller guarantees one value per actuated joint
    fn world_transforms_at(&self, configuration: &[f32]) -> Vec<Mat4> {
        let mut values: Vec<f32> = self.joints.iter().map(|j| j.current_value).collect();
        for (&joint, &value) in self.actuated.iter().zip(configuration) {
            values[joint.0] = value;
        }

        let mut world = vec![Mat4::IDENTITY; self.links.len()];
        for &link_id in &self.order {
            world[link_id.0] = match self.links[link_id.0].parent_joint {
                None => self.base_pose,
                Some(joint_id) => {
                    let joint = &self.joints[joint_id.0];
                    world[joint.parent_link.0] * joint.local_transform_at(values[joint_id.0])
                }
            };
        }
        world
    }

    /// Recompute cached transforms from the current joint values
    pub(crate) fn recompute(&mut self) {
        let transforms = self.world_transforms_at(&self.configuration());
        self.publish(transforms);
    }

    fn publish(&mut self, transforms: Vec<Mat4>) {
        for (link, transform) in self.links.iter_mut().zip(transforms) {
            link.world_transform = transform;
        }
    }
}
