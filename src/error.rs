use core::fmt;
use std::io;

use thiserror::Error;

use crate::ScalarType;

#[derive(Error, Debug)]
pub enum PlyError {
    #[error("IO error: {0}")]
    Io(#[source] io::Error),

    #[error("Malformed PLY header: {0}")]
    MalformedHeader(String),

    #[error("Unsupported PLY version: {0}")]
    UnsupportedVersion(String),

    #[error("Unknown PLY format: {0}")]
    UnknownFormat(String),

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Unexpected end of input")]
    TruncatedInput,

    #[error("Invalid list length: {0}")]
    InvalidListLength(f64),

    #[error("Invalid {ty} value: {token:?}")]
    InvalidNumber { token: String, ty: ScalarType },

    #[error("Missing required element: {0}")]
    MissingElement(String),

    #[error("Element '{element}' has no property '{property}'")]
    MissingProperty { element: String, property: String },

    #[error("Deserialize error: {0}")]
    Deserialize(String),
}

// A short read is never transient here, so it gets its own kind.
impl From<io::Error> for PlyError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            PlyError::TruncatedInput
        } else {
            PlyError::Io(err)
        }
    }
}

impl serde::de::Error for PlyError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        PlyError::Deserialize(msg.to_string())
    }
}
