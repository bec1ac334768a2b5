//! STL mesh loading

use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use crate::types::TriangleMesh;

/// STL loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum StlError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Load an ASCII or binary STL file
pub fn load_stl(path: impl AsRef<Path>) -> Result<TriangleMesh, StlError> {
    let file = std::fs::File::open(path.as_ref()).map_err(|e| StlError::Io(e.to_string()))?;
    read_stl(&mut BufReader::new(file))
}

/// Load STL data already in memory
pub fn load_stl_from_bytes(bytes: &[u8]) -> Result<TriangleMesh, StlError> {
    read_stl(&mut Cursor::new(bytes))
}

fn read_stl<R: Read + Seek>(reader: &mut R) -> Result<TriangleMesh, StlError> {
    let mesh = stl_io::read_stl(reader).map_err(|e| StlError::Parse(e.to_string()))?;
    Ok(convert_mesh(&mesh))
}

fn convert_mesh(mesh: &stl_io::IndexedMesh) -> TriangleMesh {
    let vertices = mesh
        .vertices
        .iter()
        .map(|v| [v[0], v[1], v[2]])
        .collect();

    let mut normals = Vec::with_capacity(mesh.faces.len());
    let mut indices = Vec::with_capacity(mesh.faces.len() * 3);
    for face in &mesh.faces {
        normals.push([face.normal[0], face.normal[1], face.normal[2]]);
        indices.extend(face.vertices.iter().map(|&i| i as u32));
    }

    TriangleMesh {
        vertices,
        normals,
        indices,
    }
}
