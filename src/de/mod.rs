mod element;
mod row;

pub mod val_reader;
use std::io::BufRead;

use byteorder::{BigEndian, LittleEndian};
use serde::de::DeserializeOwned;
use tracing::debug;

pub use element::{decode_element, ElementRecord, RecordProperty};
use val_reader::{AsciiValReader, BinValReader, ScalarReader};

use crate::{ParseOptions, PlyError, PlyFormat, PlyHeader};

/// A fully decoded PLY file: the header plus the records of every element,
/// in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlyData {
    pub header: PlyHeader,
    /// `elements[i]` holds the records of `header.elements[i]`.
    pub elements: Vec<Vec<ElementRecord>>,
}

impl PlyData {
    /// Records of the first element called `name`.
    pub fn element(&self, name: &str) -> Option<&[ElementRecord]> {
        let index = self.header.elements.iter().position(|e| e.name == name)?;
        self.elements.get(index).map(Vec::as_slice)
    }

    pub fn require_element(&self, name: &str) -> Result<&[ElementRecord], PlyError> {
        self.element(name)
            .ok_or_else(|| PlyError::MissingElement(name.to_string()))
    }

    /// Deserialize every record of the named element into `T`.
    pub fn deserialize_element<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, PlyError> {
        self.require_element(name)?
            .iter()
            .map(|record| record.deserialize_into())
            .collect()
    }
}

/// Parse the header and eagerly decode the whole body.
///
/// `reader` is consumed only as far as the declared elements reach; any
/// trailing bytes are left unread.
pub fn read_ply<R: BufRead>(mut reader: R, options: &ParseOptions) -> Result<PlyData, PlyError> {
    let header = PlyHeader::parse(&mut reader, options)?;

    let elements = match header.format {
        PlyFormat::Ascii => decode_body(&header, &mut AsciiValReader::new(&mut reader), options),
        PlyFormat::BinaryLittleEndian => decode_body(
            &header,
            &mut BinValReader::<_, LittleEndian>::new(&mut reader, options.legacy_double_width),
            options,
        ),
        PlyFormat::BinaryBigEndian => decode_body(
            &header,
            &mut BinValReader::<_, BigEndian>::new(&mut reader, options.legacy_double_width),
            options,
        ),
    }?;

    Ok(PlyData { header, elements })
}

fn decode_body<S: ScalarReader>(
    header: &PlyHeader,
    reader: &mut S,
    options: &ParseOptions,
) -> Result<Vec<Vec<ElementRecord>>, PlyError> {
    let mut elements = Vec::with_capacity(header.elements.len());

    for def in &header.elements {
        let mut records = Vec::new();
        for _ in 0..def.count {
            records.push(decode_element(def, reader, options.max_list_length)?);
        }
        debug!(element = %def.name, records = records.len(), "decoded element");
        elements.push(records);
    }

    Ok(elements)
}
