//! Assembling a kinematic tree from description records

use std::collections::HashMap;

use glam::Mat4;

use super::{Joint, JointId, KinematicTree, Link, LinkId};
use crate::description::RobotDescription;
use crate::error::{BuildError, BuildWarning};

impl KinematicTree {
    /// Build a tree from a description and pose it at the zero configuration.
    ///
    /// Fails on unknown link names, links with more than one parent joint,
    /// zero or several roots, zero-length axes on actuated joints and links
    /// that cannot be reached from the root.
    pub fn build(description: &RobotDescription) -> Result<Self, BuildError> {
        // Links
        let mut links = Vec::with_capacity(description.links.len());
        let mut link_index = HashMap::with_capacity(description.links.len());
        for descriptor in &description.links {
            let id = LinkId(links.len());
            if link_index.insert(descriptor.name.clone(), id).is_some() {
                return Err(BuildError::DuplicateLinkName(descriptor.name.clone()));
            }
            links.push(Link::new(descriptor.name.clone(), descriptor.visuals.clone()));
        }

        // Joints, resolved against link names
        let mut joints = Vec::with_capacity(description.joints.len());
        let mut joint_index = HashMap::with_capacity(description.joints.len());
        let mut warnings = Vec::new();
        for descriptor in &description.joints {
            let resolve = |name: &str| {
                link_index
                    .get(name)
                    .copied()
                    .ok_or_else(|| BuildError::UnresolvedLinkReference {
                        joint: descriptor.name.clone(),
                        link: name.to_string(),
                    })
            };
            let parent = resolve(&descriptor.parent)?;
            let child = resolve(&descriptor.child)?;

            let id = JointId(joints.len());
            if joint_index.insert(descriptor.name.clone(), id).is_some() {
                return Err(BuildError::DuplicateJointName(descriptor.name.clone()));
            }

            if !descriptor.joint_type.is_supported() {
                tracing::warn!(
                    "Joint '{}' has unsupported type {}, treating it as fixed",
                    descriptor.name,
                    descriptor.joint_type
                );
                warnings.push(BuildWarning::UnsupportedJointType {
                    joint: descriptor.name.clone(),
                    joint_type: descriptor.joint_type,
                });
            }

            joints.push(Joint::from_descriptor(descriptor, parent, child)?);
        }

        // Parent/child relations
        for (index, joint) in joints.iter().enumerate() {
            let id = JointId(index);
            let child = &mut links[joint.child_link.0];
            if let Some(first) = child.parent_joint {
                return Err(BuildError::MultipleParentsError {
                    link: child.name.clone(),
                    first_joint: joints[first.0].name.clone(),
                    second_joint: joint.name.clone(),
                });
            }
            child.parent_joint = Some(id);
            links[joint.parent_link.0].child_joints.push(id);
        }

        // Root
        let roots: Vec<LinkId> = links
            .iter()
            .enumerate()
            .filter(|(_, link)| link.parent_joint.is_none())
            .map(|(index, _)| LinkId(index))
            .collect();
        let root = match roots.as_slice() {
            [] => return Err(BuildError::NoRootFound),
            [root] => *root,
            _ => {
                return Err(BuildError::MultipleRootsFound {
                    roots: roots.iter().map(|id| links[id.0].name.clone()).collect(),
                });
            }
        };

        let order = traversal_order(&links, &joints, root);
        if order.len() != links.len() {
            let mut reached = vec![false; links.len()];
            for id in &order {
                reached[id.0] = true;
            }
            return Err(BuildError::UnreachableLinks {
                links: links
                    .iter()
                    .zip(reached)
                    .filter(|(_, reached)| !reached)
                    .map(|(link, _)| link.name.clone())
                    .collect(),
            });
        }

        let actuated = joints
            .iter()
            .enumerate()
            .filter(|(_, joint)| joint.is_actuated())
            .map(|(index, _)| JointId(index))
            .collect();

        let mut tree = Self {
            name: description.name.clone(),
            links,
            joints,
            link_index,
            joint_index,
            root,
            actuated,
            order,
            base_pose: Mat4::IDENTITY,
            warnings,
        };
        tree.recompute();
        Ok(tree)
    }
}

/// Depth-first pre-order from the root with an explicit stack, siblings in
/// joint description order
fn traversal_order(links: &[Link], joints: &[Joint], root: LinkId) -> Vec<LinkId> {
    let mut order = Vec::with_capacity(links.len());
    let mut stack = vec![root];
    while let Some(link_id) = stack.pop() {
        order.push(link_id);
        for joint_id in links[link_id.0].child_joints.iter().rev() {
            stack.push(joints[joint_id.0].child_link);
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{JointDescriptor, LinkDescriptor};
    use crate::tree::tests::sample_description;
    use crate::types::JointType;

    fn chain(links: &[&str]) -> RobotDescription {
        let mut description = RobotDescription::new("chain");
        for name in links {
            description = description.with_link(LinkDescriptor::new(*name));
        }
        description
    }

    #[test]
    fn test_build_sample() {
        let tree = KinematicTree::build(&sample_description()).unwrap();
        assert_eq!(tree.root_link().name(), "base");
        let actuated: Vec<&str> = tree.actuated_joints().map(|j| j.name()).collect();
        assert_eq!(actuated, vec!["shoulder", "rail"]);
        assert!(tree.warnings().is_empty());
    }

    #[test]
    fn test_actuated_order_follows_description() {
        let description = chain(&["a", "b", "c", "d", "e"])
            .with_joint(JointDescriptor::builder("j_c", "b", "c").prismatic().build())
            .with_joint(JointDescriptor::builder("j_b", "a", "b").continuous().build())
            .with_joint(JointDescriptor::builder("j_d", "c", "d").build())
            .with_joint(JointDescriptor::builder("j_e", "a", "e").revolute().build());
        let tree = KinematicTree::build(&description).unwrap();
        let actuated: Vec<&str> = tree.actuated_joints().map(|j| j.name()).collect();
        assert_eq!(actuated, vec!["j_c", "j_b", "j_e"]);
        assert_eq!(tree.dof(), 3);
    }

    #[test]
    fn test_traversal_parents_first() {
        // Joints listed leaf-first
        let description = chain(&["a", "b", "c", "d"])
            .with_joint(JointDescriptor::builder("j3", "c", "d").build())
            .with_joint(JointDescriptor::builder("j2", "b", "c").build())
            .with_joint(JointDescriptor::builder("j1", "a", "b").build());
        let tree = KinematicTree::build(&description).unwrap();
        let names: Vec<&str> = tree
            .traversal_order()
            .iter()
            .map(|id| tree.get_link(*id).unwrap().name())
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_unresolved_link() {
        let description = chain(&["a", "b"])
            .with_joint(JointDescriptor::builder("j", "a", "missing").build());
        assert_eq!(
            KinematicTree::build(&description).unwrap_err(),
            BuildError::UnresolvedLinkReference {
                joint: "j".into(),
                link: "missing".into()
            }
        );
    }

    #[test]
    fn test_multiple_parents() {
        let description = chain(&["a", "b", "c"])
            .with_joint(JointDescriptor::builder("j1", "a", "c").build())
            .with_joint(JointDescriptor::builder("j2", "b", "c").build());
        assert_eq!(
            KinematicTree::build(&description).unwrap_err(),
            BuildError::MultipleParentsError {
                link: "c".into(),
                first_joint: "j1".into(),
                second_joint: "j2".into()
            }
        );
    }

    #[test]
    fn test_no_root() {
        assert_eq!(
            KinematicTree::build(&RobotDescription::new("empty")).unwrap_err(),
            BuildError::NoRootFound
        );

        let description = chain(&["a", "b"])
            .with_joint(JointDescriptor::builder("j1", "a", "b").build())
            .with_joint(JointDescriptor::builder("j2", "b", "a").build());
        assert_eq!(
            KinematicTree::build(&description).unwrap_err(),
            BuildError::NoRootFound
        );
    }

    #[test]
    fn test_multiple_roots() {
        let description = chain(&["a", "b", "c"])
            .with_joint(JointDescriptor::builder("j1", "a", "b").build());
        assert_eq!(
            KinematicTree::build(&description).unwrap_err(),
            BuildError::MultipleRootsFound {
                roots: vec!["a".into(), "c".into()]
            }
        );
    }

    #[test]
    fn test_detached_cycle_is_unreachable() {
        let description = chain(&["root", "x", "y"])
            .with_joint(JointDescriptor::builder("j1", "x", "y").build())
            .with_joint(JointDescriptor::builder("j2", "y", "x").build());
        assert_eq!(
            KinematicTree::build(&description).unwrap_err(),
            BuildError::UnreachableLinks {
                links: vec!["x".into(), "y".into()]
            }
        );
    }

    #[test]
    fn test_degenerate_axis() {
        let description = chain(&["a", "b"]).with_joint(
            JointDescriptor::builder("j", "a", "b")
                .revolute()
                .axis_xyz(0.0, 0.0, 0.0)
                .build(),
        );
        assert_eq!(
            KinematicTree::build(&description).unwrap_err(),
            BuildError::DegenerateAxis { joint: "j".into() }
        );

        // Unused on fixed joints
        let description = chain(&["a", "b"]).with_joint(
            JointDescriptor::builder("j", "a", "b")
                .axis_xyz(0.0, 0.0, 0.0)
                .build(),
        );
        assert!(KinematicTree::build(&description).is_ok());
    }

    #[test]
    fn test_duplicate_names() {
        let description = chain(&["a", "a"]);
        assert_eq!(
            KinematicTree::build(&description).unwrap_err(),
            BuildError::DuplicateLinkName("a".into())
        );

        let description = chain(&["a", "b", "c"])
            .with_joint(JointDescriptor::builder("j", "a", "b").build())
            .with_joint(JointDescriptor::builder("j", "a", "c").build());
        assert_eq!(
            KinematicTree::build(&description).unwrap_err(),
            BuildError::DuplicateJointName("j".into())
        );
    }

    #[test]
    fn test_unsupported_type_warns() {
        let description = chain(&["a", "b"]).with_joint(
            JointDescriptor::builder("float", "a", "b")
                .joint_type(JointType::Floating)
                .build(),
        );
        let tree = KinematicTree::build(&description).unwrap();
        assert_eq!(tree.dof(), 0);
        assert_eq!(
            tree.warnings(),
            &[BuildWarning::UnsupportedJointType {
                joint: "float".into(),
                joint_type: JointType::Floating
            }]
        );
    }

    #[test]
    fn test_single_link() {
        let tree = KinematicTree::build(&chain(&["only"])).unwrap();
        assert_eq!(tree.root_link().name(), "only");
        assert_eq!(tree.dof(), 0);
        assert_eq!(tree.world_transform("only"), Some(Mat4::IDENTITY));
    }
}
