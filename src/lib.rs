//! A schema-driven PLY (Polygon File Format) reader.
//!
//! PLY files describe their own record layout in a textual header, so we parse
//! the header first and let it drive the decoding of the body, whether that is
//! ASCII, little-endian or big-endian binary. The decoded records can be used
//! directly, deserialized into your own types through serde, or assembled into
//! a [`Mesh`] of vertices and faces.
//!
//! # Example
//!
//! ```rust
//! let ply_data = r#"ply
//! format ascii 1.0
//! element vertex 3
//! property float x
//! property float y
//! property float z
//! element face 1
//! property list uchar int vertex_indices
//! end_header
//! 0.0 0.0 0.0
//! 1.0 0.0 0.0
//! 0.0 1.0 0.0
//! 3 0 1 2
//! "#;
//!
//! let mesh = ply_mesh::parse(ply_data.as_bytes()).unwrap();
//! assert_eq!(mesh.vertices().len(), 3);
//! assert_eq!(mesh.faces()[0].indices, vec![0, 1, 2]);
//! ```
//!
//! Working with the generic records instead:
//!
//! ```rust
//! use serde::Deserialize;
//! use ply_mesh::{read_ply, ParseOptions};
//!
//! #[derive(Deserialize, Debug)]
//! struct Point {
//!     x: f32,
//!     y: f32,
//! }
//!
//! let ply_data = "ply\nformat ascii 1.0\nelement point 1\nproperty float x\nproperty float y\nend_header\n1 2\n";
//! let data = read_ply(ply_data.as_bytes(), &ParseOptions::default()).unwrap();
//! let points: Vec<Point> = data.deserialize_element("point").unwrap();
//! assert_eq!(points[0].y, 2.0);
//! ```

pub mod de;
mod error;
mod header;
mod mesh;
mod options;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub use de::{read_ply, ElementRecord, PlyData, RecordProperty};
pub use error::PlyError;
pub use header::{ElementDef, PlyFormat, PlyHeader, PropertyDef, ScalarType, PLY_VERSION};
pub use mesh::{Face, Mesh, Vertex, FACE_ELEMENT, FACE_INDICES, VERTEX_ELEMENT};
pub use options::{
    ParseOptions, Strictness, DEFAULT_MAX_ELEMENT_COUNT, DEFAULT_MAX_LIST_LENGTH,
};

/// Parse a mesh from an already open stream with default options.
///
/// The stream is only borrowed for the duration of the parse; closing it is
/// up to the caller.
pub fn parse<R: BufRead>(reader: R) -> Result<Mesh, PlyError> {
    parse_with(reader, &ParseOptions::default())
}

/// Parse a mesh from an already open stream with explicit options.
pub fn parse_with<R: BufRead>(reader: R, options: &ParseOptions) -> Result<Mesh, PlyError> {
    let data = read_ply(reader, options)?;
    Mesh::from_ply(&data, options)
}

/// Open, parse and close the file at `path`.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Mesh, PlyError> {
    let file = File::open(path.as_ref())?;
    parse_with(BufReader::new(file), options)
}
