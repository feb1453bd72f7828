use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::{ParseOptions, PlyError, Strictness};

/// The only PLY version this reader understands.
pub const PLY_VERSION: &str = "1.0";

/// PLY body encoding, fixed for the whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlyFormat {
    Ascii,
    BinaryLittleEndian,
    BinaryBigEndian,
}

impl fmt::Display for PlyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlyFormat::Ascii => write!(f, "ascii"),
            PlyFormat::BinaryLittleEndian => write!(f, "binary_little_endian"),
            PlyFormat::BinaryBigEndian => write!(f, "binary_big_endian"),
        }
    }
}

impl FromStr for PlyFormat {
    type Err = PlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(PlyFormat::Ascii),
            "binary_little_endian" => Ok(PlyFormat::BinaryLittleEndian),
            "binary_big_endian" => Ok(PlyFormat::BinaryBigEndian),
            _ => Err(PlyError::UnknownFormat(s.to_string())),
        }
    }
}

/// PLY scalar data types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Char,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Float,
    Double,
}

impl ScalarType {
    /// Look up a header type token. Names are case-sensitive.
    pub fn parse(s: &str) -> Result<Self, PlyError> {
        match s {
            "char" | "int8" => Ok(ScalarType::Char),
            "uchar" | "uint8" => Ok(ScalarType::UChar),
            "short" | "int16" => Ok(ScalarType::Short),
            "ushort" | "uint16" => Ok(ScalarType::UShort),
            "int" | "int32" => Ok(ScalarType::Int),
            "uint" | "uint32" => Ok(ScalarType::UInt),
            "float" | "float32" => Ok(ScalarType::Float),
            "double" | "float64" => Ok(ScalarType::Double),
            _ => Err(PlyError::UnsupportedType(s.to_string())),
        }
    }

    /// Width of one binary value. With `legacy_double_width` a double
    /// occupies 4 bytes.
    pub fn size_bytes(&self, legacy_double_width: bool) -> usize {
        match self {
            ScalarType::Char | ScalarType::UChar => 1,
            ScalarType::Short | ScalarType::UShort => 2,
            ScalarType::Int | ScalarType::UInt | ScalarType::Float => 4,
            ScalarType::Double if legacy_double_width => 4,
            ScalarType::Double => 8,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, ScalarType::Float | ScalarType::Double)
    }
}

impl FromStr for ScalarType {
    type Err = PlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::Char => "char",
            ScalarType::UChar => "uchar",
            ScalarType::Short => "short",
            ScalarType::UShort => "ushort",
            ScalarType::Int => "int",
            ScalarType::UInt => "uint",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
        };
        f.write_str(name)
    }
}

/// PLY property definition
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyDef {
    /// A scalar property with a single value
    Scalar { data_type: ScalarType, name: String },
    /// A list property with variable length
    List {
        count_type: ScalarType,
        data_type: ScalarType,
        name: String,
    },
}

impl PropertyDef {
    pub fn name(&self) -> &str {
        match self {
            PropertyDef::Scalar { name, .. } | PropertyDef::List { name, .. } => name,
        }
    }

    pub fn data_type(&self) -> ScalarType {
        match self {
            PropertyDef::Scalar { data_type, .. } | PropertyDef::List { data_type, .. } => {
                *data_type
            }
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, PropertyDef::List { .. })
    }
}

/// PLY element definition (e.g., vertex, face)
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDef {
    pub name: String,
    pub count: usize,
    pub properties: Vec<PropertyDef>,
}

/// PLY header containing format information and element definitions
#[derive(Debug, Clone, PartialEq)]
pub struct PlyHeader {
    pub format: PlyFormat,
    pub elements: Vec<ElementDef>,
    pub comments: Vec<String>,
    pub obj_info: Vec<String>,
}

impl PlyHeader {
    /// Parse a PLY header, leaving `reader` positioned on the first body byte.
    pub fn parse<R: BufRead>(reader: &mut R, options: &ParseOptions) -> Result<Self, PlyError> {
        let magic = read_header_line(reader)?;
        if magic != "ply" {
            return Err(PlyError::MalformedHeader(format!(
                "expected 'ply' magic line, found {magic:?}"
            )));
        }

        let format = parse_format_line(&read_header_line(reader)?)?;

        let mut elements: Vec<ElementDef> = Vec::new();
        let mut comments = Vec::new();
        let mut obj_info = Vec::new();

        loop {
            let line = read_header_line(reader)?;
            if line == "end_header" {
                break;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.first().copied() {
                Some("comment") => comments.push(rest_of_line(&line, "comment")),
                Some("obj_info") => obj_info.push(rest_of_line(&line, "obj_info")),
                Some("element") => {
                    elements.push(parse_element(&parts, options.max_element_count)?)
                },
                Some("property") => {
                    let element = elements.last_mut().ok_or_else(|| {
                        PlyError::MalformedHeader(format!("property before any element: {line:?}"))
                    })?;
                    element.properties.push(parse_property(&parts)?);
                }
                _ => match options.header_policy {
                    Strictness::Lenient => trace!(line = %line, "ignoring unrecognized header line"),
                    Strictness::Strict => {
                        return Err(PlyError::MalformedHeader(format!(
                            "unrecognized header line: {line:?}"
                        )))
                    }
                },
            }
        }

        debug!(
            %format,
            elements = elements.len(),
            comments = comments.len(),
            "parsed PLY header"
        );

        Ok(PlyHeader {
            format,
            elements,
            comments,
            obj_info,
        })
    }

    /// Get element definition by name
    pub fn get_element(&self, name: &str) -> Option<&ElementDef> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Check if this header defines an element with the given name
    pub fn has_element(&self, name: &str) -> bool {
        self.elements.iter().any(|e| e.name == name)
    }
}

/// Read one header line with its line terminator (LF or CRLF) removed.
fn read_header_line<R: BufRead>(reader: &mut R) -> Result<String, PlyError> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Err(PlyError::TruncatedInput);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    String::from_utf8(buf)
        .map_err(|e| PlyError::MalformedHeader(format!("header is not valid UTF-8: {e}")))
}

fn parse_format_line(line: &str) -> Result<PlyFormat, PlyError> {
    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() != 3 || parts[0] != "format" {
        return Err(PlyError::MalformedHeader(format!(
            "expected 'format <type> {PLY_VERSION}', found {line:?}"
        )));
    }
    if parts[2] != PLY_VERSION {
        return Err(PlyError::UnsupportedVersion(parts[2].to_string()));
    }
    parts[1].parse()
}

fn parse_element(parts: &[&str], max_count: usize) -> Result<ElementDef, PlyError> {
    let [_, name, count] = parts else {
        return Err(PlyError::MalformedHeader(format!(
            "invalid element line: {:?}",
            parts.join(" ")
        )));
    };
    let count = count
        .parse::<usize>()
        .map_err(|_| PlyError::MalformedHeader(format!("invalid element count: {count}")))?;
    if count > max_count {
        return Err(PlyError::MalformedHeader(format!(
            "element {name} declares {count} records, limit is {max_count}"
        )));
    }

    Ok(ElementDef {
        name: name.to_string(),
        count,
        properties: Vec::new(),
    })
}

fn parse_property(parts: &[&str]) -> Result<PropertyDef, PlyError> {
    match parts {
        [_, "list", count_type, data_type, name] => Ok(PropertyDef::List {
            count_type: count_type.parse()?,
            data_type: data_type.parse()?,
            name: name.to_string(),
        }),
        [_, data_type, name] if *data_type != "list" => Ok(PropertyDef::Scalar {
            data_type: data_type.parse()?,
            name: name.to_string(),
        }),
        _ => Err(PlyError::MalformedHeader(format!(
            "invalid property line: {:?}",
            parts.join(" ")
        ))),
    }
}

fn rest_of_line(line: &str, keyword: &str) -> String {
    line.trim_start()
        .strip_prefix(keyword)
        .unwrap_or_default()
        .trim()
        .to_string()
}
