//! URDF import functionality
//!
//! Converts URDF documents into description records for the tree builder.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::Vec3;

use crate::description::{JointDescriptor, LinkDescriptor, RobotDescription, Visual};
use crate::stl::load_stl;
use crate::types::{DEFAULT_COLOR, Geometry, JointLimits, JointType, Material, Pose};

/// Import options for URDF loading
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Base directory for resolving relative mesh paths (defaults to the URDF's directory)
    pub base_dir: Option<PathBuf>,
    /// Read mesh files into triangle data
    pub load_meshes: bool,
    /// Material color if not specified
    pub default_color: [f32; 4],
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            base_dir: None,
            load_meshes: false,
            default_color: DEFAULT_COLOR,
        }
    }
}

/// Errors that can occur during URDF import
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to parse URDF: {0}")]
    UrdfParse(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Mesh file not found: {path}")]
    MeshNotFound { path: String },

    #[error("Failed to load mesh '{path}': {reason}")]
    MeshLoad { path: String, reason: String },

    #[error("Unsupported mesh format: {0} (only STL is supported)")]
    UnsupportedMeshFormat(String),

    #[error("package:// URIs are not supported: {0}")]
    PackageUriNotSupported(String),
}

/// Import a URDF file
pub fn import_urdf(
    urdf_path: &Path,
    options: &ImportOptions,
) -> Result<RobotDescription, ImportError> {
    let xml = std::fs::read_to_string(urdf_path).map_err(|e| ImportError::Io(e.to_string()))?;
    let robot =
        urdf_rs::read_from_string(&xml).map_err(|e| ImportError::UrdfParse(e.to_string()))?;

    let mut options = options.clone();
    if options.base_dir.is_none() {
        options.base_dir = urdf_path.parent().map(Path::to_path_buf);
    }
    from_urdf_robot(&robot, &options)
}

/// Import a URDF document held in memory
pub fn import_urdf_str(xml: &str, options: &ImportOptions) -> Result<RobotDescription, ImportError> {
    let robot =
        urdf_rs::read_from_string(xml).map_err(|e| ImportError::UrdfParse(e.to_string()))?;
    from_urdf_robot(&robot, options)
}

/// Convert a parsed URDF robot
pub fn from_urdf_robot(
    robot: &urdf_rs::Robot,
    options: &ImportOptions,
) -> Result<RobotDescription, ImportError> {
    let base_dir = options
        .base_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    // Robot-level materials, referenced by name from visuals
    let material_colors: HashMap<&str, [f32; 4]> = robot
        .materials
        .iter()
        .filter_map(|m| m.color.as_ref().map(|c| (m.name.as_str(), convert_color(c))))
        .collect();

    let links = robot
        .links
        .iter()
        .map(|link| {
            let visuals = link
                .visual
                .iter()
                .map(|v| convert_visual(v, &base_dir, options, &material_colors))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(LinkDescriptor {
                name: link.name.clone(),
                visuals,
            })
        })
        .collect::<Result<Vec<_>, ImportError>>()?;

    let joints = robot.joints.iter().map(convert_joint).collect();

    Ok(RobotDescription {
        name: robot.name.clone(),
        links,
        joints,
    })
}

fn convert_joint(urdf_joint: &urdf_rs::Joint) -> JointDescriptor {
    let joint_type = JointType::from(&urdf_joint.joint_type);
    let limits = joint_type
        .has_limits()
        .then(|| JointLimits {
            lower: urdf_joint.limit.lower as f32,
            upper: urdf_joint.limit.upper as f32,
            effort: urdf_joint.limit.effort as f32,
            velocity: urdf_joint.limit.velocity as f32,
        })
        .filter(JointLimits::has_range);

    JointDescriptor {
        name: urdf_joint.name.clone(),
        joint_type,
        parent: urdf_joint.parent.link.clone(),
        child: urdf_joint.child.link.clone(),
        origin: Pose::from(&urdf_joint.origin).to_mat4(),
        axis: Some(convert_vec3(&urdf_joint.axis.xyz)),
        limits,
    }
}

fn convert_visual(
    visual: &urdf_rs::Visual,
    base_dir: &Path,
    options: &ImportOptions,
    material_colors: &HashMap<&str, [f32; 4]>,
) -> Result<Visual, ImportError> {
    let material = match &visual.material {
        Some(mat) => Material {
            name: (!mat.name.is_empty()).then(|| mat.name.clone()),
            color: mat
                .color
                .as_ref()
                .map(convert_color)
                .or_else(|| material_colors.get(mat.name.as_str()).copied())
                .unwrap_or(options.default_color),
        },
        None => Material::from_color(options.default_color),
    };

    let geometry = match &visual.geometry {
        urdf_rs::Geometry::Box { size } => Geometry::Box {
            size: convert_vec3(size),
        },
        urdf_rs::Geometry::Sphere { radius } => Geometry::Sphere {
            radius: *radius as f32,
        },
        urdf_rs::Geometry::Cylinder { radius, length } => Geometry::Cylinder {
            radius: *radius as f32,
            length: *length as f32,
        },
        urdf_rs::Geometry::Capsule { radius, length } => {
            tracing::debug!("Approximating capsule as cylinder");
            Geometry::Cylinder {
                radius: *radius as f32,
                length: *length as f32,
            }
        }
        urdf_rs::Geometry::Mesh { filename, scale } => {
            let scale = scale.as_ref().map(convert_vec3).unwrap_or(Vec3::ONE);
            let data = if options.load_meshes {
                let path = resolve_mesh_path(filename, base_dir)?;
                let mut mesh = load_stl(&path).map_err(|e| ImportError::MeshLoad {
                    path: filename.clone(),
                    reason: e.to_string(),
                })?;
                mesh.apply_scale(scale);
                Some(mesh)
            } else {
                None
            };
            Geometry::Mesh {
                filename: filename.clone(),
                scale,
                data,
            }
        }
    };

    Ok(Visual {
        name: visual.name.clone(),
        geometry,
        material,
        origin: Pose::from(&visual.origin).to_mat4(),
    })
}

/// Resolve mesh path from URDF filename reference
fn resolve_mesh_path(filename: &str, base_dir: &Path) -> Result<PathBuf, ImportError> {
    if filename.starts_with("package://") {
        return Err(ImportError::PackageUriNotSupported(filename.to_string()));
    }

    let path_str = filename.strip_prefix("file://").unwrap_or(filename);

    if !path_str.to_lowercase().ends_with(".stl") {
        return Err(ImportError::UnsupportedMeshFormat(filename.to_string()));
    }

    let path = if Path::new(path_str).is_absolute() {
        PathBuf::from(path_str)
    } else {
        base_dir.join(path_str)
    };

    if !path.exists() {
        return Err(ImportError::MeshNotFound {
            path: path.to_string_lossy().to_string(),
        });
    }

    Ok(path)
}

fn convert_vec3(v: &urdf_rs::Vec3) -> Vec3 {
    Vec3::new(v.0[0] as f32, v.0[1] as f32, v.0[2] as f32)
}

fn convert_color(c: &urdf_rs::Color) -> [f32; 4] {
    [
        c.rgba.0[0] as f32,
        c.rgba.0[1] as f32,
        c.rgba.0[2] as f32,
        c.rgba.0[3] as f32,
    ]
}
