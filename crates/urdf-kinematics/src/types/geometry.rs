//! Visual geometry and material definitions

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default visual color when a description gives none
pub const DEFAULT_COLOR: [f32; 4] = [0.7, 0.7, 0.7, 1.0];

/// Indexed triangle mesh data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<[f32; 3]>,
    /// One normal per triangle
    pub normals: Vec<[f32; 3]>,
    /// Three indices per triangle
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Scale vertices per axis
    pub fn apply_scale(&mut self, scale: Vec3) {
        for vertex in &mut self.vertices {
            vertex[0] *= scale.x;
            vertex[1] *= scale.y;
            vertex[2] *= scale.z;
        }
    }

    /// Axis-aligned bounds as (min, max), `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from(*v));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), v| (min.min(v), max.max(v))))
    }
}

/// Geometry of a visual element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Mesh {
        filename: String,
        scale: Vec3,
        /// Loaded triangles, if the mesh file was read
        data: Option<TriangleMesh>,
    },
    Box {
        size: Vec3,
    },
    Sphere {
        radius: f32,
    },
    Cylinder {
        radius: f32,
        length: f32,
    },
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Mesh { .. } => "Mesh",
            Geometry::Box { .. } => "Box",
            Geometry::Sphere { .. } => "Sphere",
            Geometry::Cylinder { .. } => "Cylinder",
        }
    }
}

/// Visual material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: Option<String>,
    /// RGBA
    pub color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: None,
            color: DEFAULT_COLOR,
        }
    }
}

impl Material {
    pub fn from_color(color: [f32; 4]) -> Self {
        Self { name: None, color }
    }
}
