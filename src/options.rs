use serde::Deserialize;

/// How forgiving a parsing stage is about input it does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    #[default]
    Lenient,
    Strict,
}

/// Knobs controlling how a PLY file is read.
///
/// Defaults match the behaviour most existing PLY files expect. The struct
/// implements `Deserialize` so it can live in whatever config file the host
/// application already has:
///
/// ```rust
/// use ply_mesh::{ParseOptions, Strictness};
///
/// let options = ParseOptions::default()
///     .with_legacy_double_width(true)
///     .with_header_policy(Strictness::Strict);
/// assert!(options.legacy_double_width);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Read binary `double`/`float64` values as 4-byte single precision
    /// floats. Some tools wrote files this way.
    pub legacy_double_width: bool,
    /// `Strict` rejects header lines with an unknown keyword.
    pub header_policy: Strictness,
    /// `Strict` makes the mesh assembler fail on missing vertex/face
    /// properties instead of substituting zero.
    pub property_lookup: Strictness,
    /// Upper bound on a decoded list length.
    pub max_list_length: usize,
    /// Upper bound on the record count an `element` line may declare.
    pub max_element_count: usize,
}

pub const DEFAULT_MAX_LIST_LENGTH: usize = 1 << 20;
pub const DEFAULT_MAX_ELEMENT_COUNT: usize = 1 << 24;

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            legacy_double_width: false,
            header_policy: Strictness::Lenient,
            property_lookup: Strictness::Lenient,
            max_list_length: DEFAULT_MAX_LIST_LENGTH,
            max_element_count: DEFAULT_MAX_ELEMENT_COUNT,
        }
    }
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            header_policy: Strictness::Strict,
            property_lookup: Strictness::Strict,
            ..Self::default()
        }
    }

    pub fn with_legacy_double_width(mut self, legacy: bool) -> Self {
        self.legacy_double_width = legacy;
        self
    }

    pub fn with_header_policy(mut self, policy: Strictness) -> Self {
        self.header_policy = policy;
        self
    }

    pub fn with_property_lookup(mut self, policy: Strictness) -> Self {
        self.property_lookup = policy;
        self
    }

    pub fn with_max_list_length(mut self, max: usize) -> Self {
        self.max_list_length = max;
        self
    }

    pub fn with_max_element_count(mut self, max: usize) -> Self {
        self.max_element_count = max;
        self
    }
}
