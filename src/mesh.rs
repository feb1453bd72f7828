use serde::{Deserialize, Serialize};
use tracing::info;

use crate::de::{ElementRecord, PlyData};
use crate::{ParseOptions, PlyError, Strictness};

pub const VERTEX_ELEMENT: &str = "vertex";
pub const FACE_ELEMENT: &str = "face";
pub const FACE_INDICES: &str = "vertex_indices";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f64; 3],
    pub normal: [f64; 3],
    /// red, green, blue, alpha
    pub color: [i32; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Face {
    pub indices: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Project the `vertex` and `face` elements of a decoded file into a mesh.
    ///
    /// Both elements must be declared. Vertex properties that a record lacks
    /// read as zero unless `options.property_lookup` is strict.
    pub fn from_ply(data: &PlyData, options: &ParseOptions) -> Result<Self, PlyError> {
        let lookup = |element: &'static str| PropertyLookup {
            element,
            policy: options.property_lookup,
        };

        let vertex_lookup = lookup(VERTEX_ELEMENT);
        let vertices = data
            .require_element(VERTEX_ELEMENT)?
            .iter()
            .map(|record| vertex_lookup.vertex(record))
            .collect::<Result<Vec<_>, _>>()?;

        let face_lookup = lookup(FACE_ELEMENT);
        let faces = data
            .require_element(FACE_ELEMENT)?
            .iter()
            .map(|record| face_lookup.face(record))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            vertices = vertices.len(),
            faces = faces.len(),
            "assembled mesh"
        );

        Ok(Mesh { vertices, faces })
    }
}

struct PropertyLookup {
    element: &'static str,
    policy: Strictness,
}

impl PropertyLookup {
    fn values<'r>(&self, record: &'r ElementRecord, property: &str) -> Result<&'r [f64], PlyError> {
        match (record.get(property), self.policy) {
            (Some(values), _) => Ok(values),
            (None, Strictness::Lenient) => Ok(record.values(property)),
            (None, Strictness::Strict) => Err(PlyError::MissingProperty {
                element: self.element.to_string(),
                property: property.to_string(),
            }),
        }
    }

    fn scalar(&self, record: &ElementRecord, property: &str) -> Result<f64, PlyError> {
        Ok(self.values(record, property)?.first().copied().unwrap_or(0.0))
    }

    fn vertex(&self, record: &ElementRecord) -> Result<Vertex, PlyError> {
        let f = |name: &str| self.scalar(record, name);
        let i = |name: &str| self.scalar(record, name).map(|v| v as i32);

        Ok(Vertex {
            position: [f("x")?, f("y")?, f("z")?],
            normal: [f("nx")?, f("ny")?, f("nz")?],
            color: [i("red")?, i("green")?, i("blue")?, i("alpha")?],
        })
    }

    fn face(&self, record: &ElementRecord) -> Result<Face, PlyError> {
        let indices = self
            .values(record, FACE_INDICES)?
            .iter()
            .map(|&v| v as i32)
            .collect();
        Ok(Face { indices })
    }
}
