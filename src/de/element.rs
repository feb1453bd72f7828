use crate::de::val_reader::ScalarReader;
use crate::{ElementDef, PlyError, PropertyDef};

const DEFAULT_VALUES: &[f64] = &[0.0];

/// One decoded property of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordProperty {
    pub name: String,
    /// A single value for scalar properties, the list entries otherwise.
    pub values: Vec<f64>,
    pub is_list: bool,
}

/// One decoded instance of an [`ElementDef`], properties in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementRecord {
    properties: Vec<RecordProperty>,
}

impl ElementRecord {
    pub fn new(properties: Vec<RecordProperty>) -> Self {
        Self { properties }
    }

    pub fn properties(&self) -> &[RecordProperty] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Values of the first property called `name`.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.values.as_slice())
    }

    /// Like [`get`](Self::get), but a missing property reads as `[0.0]`.
    pub fn values(&self, name: &str) -> &[f64] {
        self.get(name).unwrap_or(DEFAULT_VALUES)
    }

    /// First value of the named property, or 0.0.
    pub fn value(&self, name: &str) -> f64 {
        self.values(name).first().copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.properties
            .iter()
            .map(|p| (p.name.as_str(), p.values.as_slice()))
    }
}

/// Decode a single record of `def` from the body.
///
/// Properties are read strictly in declaration order with no padding in
/// between. A list whose decoded length is negative, non-finite or above
/// `max_list_length` is rejected before anything is allocated for it.
pub fn decode_element<S: ScalarReader>(
    def: &ElementDef,
    reader: &mut S,
    max_list_length: usize,
) -> Result<ElementRecord, PlyError> {
    let mut properties = Vec::with_capacity(def.properties.len());

    for prop in &def.properties {
        let values = match prop {
            PropertyDef::Scalar { data_type, .. } => vec![reader.read_number(*data_type)?],
            PropertyDef::List {
                count_type,
                data_type,
                ..
            } => {
                let len = list_length(reader.read_number(*count_type)?, max_list_length)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(reader.read_number(*data_type)?);
                }
                values
            }
        };

        properties.push(RecordProperty {
            name: prop.name().to_string(),
            values,
            is_list: prop.is_list(),
        });
    }

    Ok(ElementRecord { properties })
}

fn list_length(raw: f64, max_list_length: usize) -> Result<usize, PlyError> {
    if !raw.is_finite() || raw < 0.0 || raw.trunc() > max_list_length as f64 {
        return Err(PlyError::InvalidListLength(raw));
    }
    Ok(raw.trunc() as usize)
}
