//! Printable snapshot of a posed robot

use std::fmt;

use serde::Serialize;
use urdf_kinematics::{AngleDisplayMode, KinematicTree, PlacedVisual};

#[derive(Debug, Clone, Serialize)]
pub struct JointValue {
    pub name: String,
    /// Value in the display unit
    pub value: f32,
    pub unit: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisualReport {
    pub name: Option<String>,
    pub geometry: &'static str,
    pub color: [f32; 4],
    pub translation: [f32; 3],
    pub axis: [f32; 3],
    /// Radians
    pub angle: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkReport {
    pub name: String,
    pub translation: [f32; 3],
    /// Quaternion as (x, y, z, w)
    pub rotation: [f32; 4],
    pub visuals: Vec<VisualReport>,
}

/// World poses of every link and visual at the current configuration
#[derive(Debug, Clone, Serialize)]
pub struct PoseReport {
    pub robot: String,
    pub joints: Vec<JointValue>,
    pub links: Vec<LinkReport>,
}

impl PoseReport {
    pub fn from_tree(tree: &KinematicTree, mode: AngleDisplayMode) -> Self {
        let joints = tree
            .joint_controls()
            .iter()
            .zip(tree.configuration())
            .map(|(control, value)| JointValue {
                name: control.name.clone(),
                value: control.to_display(value, mode),
                unit: control.unit(mode),
            })
            .collect();

        let links = tree
            .all_visual_world_transforms()
            .into_iter()
            .map(|entry| {
                let (_, rotation, translation) =
                    entry.link.world_transform().to_scale_rotation_translation();
                LinkReport {
                    name: entry.link.name().to_string(),
                    translation: translation.to_array(),
                    rotation: rotation.to_array(),
                    visuals: entry.visuals.iter().map(visual_report).collect(),
                }
            })
            .collect();

        Self {
            robot: tree.name().to_string(),
            joints,
            links,
        }
    }
}

fn visual_report(placed: &PlacedVisual<'_>) -> VisualReport {
    let (axis, angle) = placed.axis_angle();
    VisualReport {
        name: placed.visual.name.clone(),
        geometry: placed.visual.geometry.type_name(),
        color: placed.visual.material.color,
        translation: placed.translation().to_array(),
        axis: axis.to_array(),
        angle,
    }
}

impl fmt::Display for PoseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "robot: {}", self.robot)?;

        writeln!(f, "joints:")?;
        for joint in &self.joints {
            writeln!(f, "  {} = {:.4} {}", joint.name, joint.value, joint.unit)?;
        }

        writeln!(f, "links:")?;
        for link in &self.links {
            let [x, y, z] = link.translation;
            let [qx, qy, qz, qw] = link.rotation;
            writeln!(
                f,
                "  {}  xyz=({:.4}, {:.4}, {:.4})  quat=({:.4}, {:.4}, {:.4}, {:.4})",
                link.name, x, y, z, qx, qy, qz, qw
            )?;
            for visual in &link.visuals {
                let [x, y, z] = visual.translation;
                let [ax, ay, az] = visual.axis;
                writeln!(
                    f,
                    "    {}{}  xyz=({:.4}, {:.4}, {:.4})  axis=({:.4}, {:.4}, {:.4}) angle={:.4}",
                    visual.geometry,
                    visual
                        .name
                        .as_deref()
                        .map(|n| format!(" '{}'", n))
                        .unwrap_or_default(),
                    x,
                    y,
                    z,
                    ax,
                    ay,
                    az,
                    visual.angle
                )?;
            }
        }
        Ok(())
    }
}
