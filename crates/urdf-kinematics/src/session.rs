//! The currently loaded robot, shared between a control surface and a renderer

use std::sync::Arc;

use glam::Mat4;
use parking_lot::RwLock;

use crate::description::RobotDescription;
use crate::error::{BuildError, SolverError};
use crate::tree::KinematicTree;

/// Shared session handle.
///
/// Writers hold the write lock for a whole load or update, so readers never
/// see a partially updated tree.
pub type SharedSession = Arc<RwLock<RobotSession>>;

/// Create a new empty shared session
pub fn create_shared_session() -> SharedSession {
    Arc::new(RwLock::new(RobotSession::new()))
}

/// Build a tree from a description, posed at the zero configuration
pub fn load(description: &RobotDescription) -> Result<KinematicTree, BuildError> {
    let tree = KinematicTree::build(description)?;
    tracing::info!(
        "Loaded robot '{}': {} links, {} joints, {} actuated",
        tree.name(),
        tree.link_count(),
        tree.joint_count(),
        tree.dof()
    );
    Ok(tree)
}

/// Holds at most one loaded robot
#[derive(Debug, Clone)]
pub struct RobotSession {
    tree: Option<KinematicTree>,
    base_pose: Mat4,
}

impl Default for RobotSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RobotSession {
    pub fn new() -> Self {
        Self {
            tree: None,
            base_pose: Mat4::IDENTITY,
        }
    }

    /// Replace the loaded robot.
    ///
    /// On error the previously loaded robot stays active and unchanged.
    pub fn load(&mut self, description: &RobotDescription) -> Result<&KinematicTree, BuildError> {
        let mut tree = match load(description) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::warn!("Failed to load '{}': {}", description.name, e);
                return Err(e);
            }
        };
        if self.base_pose != Mat4::IDENTITY {
            tree.set_base_pose(self.base_pose);
        }
        Ok(&*self.tree.insert(tree))
    }

    /// Pose the loaded robot
    pub fn update(&mut self, configuration: &[f32]) -> Result<(), SolverError> {
        self.tree
            .as_mut()
            .ok_or(SolverError::NotLoaded)?
            .update(configuration)
    }

    /// Set the root pose; kept across loads
    pub fn set_base_pose(&mut self, base_pose: Mat4) {
        self.base_pose = base_pose;
        if let Some(tree) = self.tree.as_mut() {
            tree.set_base_pose(base_pose);
        }
    }

    pub fn tree(&self) -> Option<&KinematicTree> {
        self.tree.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.tree.is_some()
    }

    /// Drop the loaded robot
    pub fn unload(&mut self) -> Option<KinematicTree> {
        self.tree.take()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::description::{JointDescriptor, LinkDescriptor};
    use crate::tree::tests::sample_description;

    #[test]
    fn test_update_without_robot() {
        let mut session = RobotSession::new();
        assert_eq!(session.update(&[]), Err(SolverError::NotLoaded));
    }

    #[test]
    fn test_failed_load_keeps_previous_robot() {
        let mut session = RobotSession::new();
        session.load(&sample_description()).unwrap();
        session.update(&[0.3, 0.1]).unwrap();
        let before = session.tree().unwrap().world_transform("hand");

        let broken = RobotDescription::new("broken")
            .with_link(LinkDescriptor::new("a"))
            .with_joint(JointDescriptor::builder("j", "a", "ghost").build());
        assert!(matches!(
            session.load(&broken),
            Err(BuildError::UnresolvedLinkReference { .. })
        ));

        let tree = session.tree().unwrap();
        assert_eq!(tree.name(), "sample");
        assert_eq!(tree.configuration(), vec![0.3, 0.1]);
        assert_eq!(tree.world_transform("hand"), before);
    }

    #[test]
    fn test_load_replaces_and_starts_at_zero() {
        let mut session = RobotSession::new();
        session.load(&sample_description()).unwrap();
        session.update(&[1.0, 1.0]).unwrap();

        let tree = session.load(&sample_description()).unwrap();
        assert_eq!(tree.configuration(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_unload() {
        let mut session = RobotSession::new();
        assert!(!session.is_loaded());
        session.load(&sample_description()).unwrap();
        assert!(session.is_loaded());

        let tree = session.unload().unwrap();
        assert_eq!(tree.name(), "sample");
        assert!(!session.is_loaded());
        assert!(session.tree().is_none());
        assert_eq!(session.update(&[0.0, 0.0]), Err(SolverError::NotLoaded));
    }

    #[test]
    fn test_base_pose_survives_reload() {
        let base = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let mut session = RobotSession::new();
        session.set_base_pose(base);
        session.load(&sample_description()).unwrap();
        assert_eq!(session.tree().unwrap().root_link().world_transform(), base);
    }

    #[test]
    fn test_shared_session_readers_see_whole_updates() {
        let session = create_shared_session();
        session.write().load(&sample_description()).unwrap();

        let writer = {
            let session = Arc::clone(&session);
            std::thread::spawn(move || {
                for i in 0..200 {
                    let v = i as f32 * 0.01;
                    session.write().update(&[v, v]).unwrap();
                }
            })
        };

        for _ in 0..200 {
            let guard = session.read();
            let tree = guard.tree().unwrap();
            let expected = tree.compute_world_transforms(&tree.configuration()).unwrap();
            let cached: Vec<Mat4> = tree.links().iter().map(|l| l.world_transform()).collect();
            assert_eq!(cached, expected);
        }
        writer.join().unwrap();
    }
}
