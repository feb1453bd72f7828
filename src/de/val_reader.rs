use std::io::{BufRead, Read};
use std::marker::PhantomData;

use byteorder::ByteOrder;
use byteorder::ReadBytesExt;

use crate::{PlyError, ScalarType};

/// Reads one number of a declared type from a PLY body.
///
/// Every value is widened to `f64`, which represents all PLY scalar types
/// exactly.
pub trait ScalarReader {
    fn read_number(&mut self, ty: ScalarType) -> Result<f64, PlyError>;
}

pub struct BinValReader<R: Read, E: ByteOrder> {
    reader: R,
    legacy_double_width: bool,
    _endian: PhantomData<E>,
}

impl<R: Read, E: ByteOrder> BinValReader<R, E> {
    pub fn new(reader: R, legacy_double_width: bool) -> Self {
        Self {
            reader,
            legacy_double_width,
            _endian: PhantomData,
        }
    }
}

impl<R: Read, E: ByteOrder> ScalarReader for BinValReader<R, E> {
    fn read_number(&mut self, ty: ScalarType) -> Result<f64, PlyError> {
        let value = match ty {
            ScalarType::Char => self.reader.read_i8()? as f64,
            ScalarType::UChar => self.reader.read_u8()? as f64,
            ScalarType::Short => self.reader.read_i16::<E>()? as f64,
            ScalarType::UShort => self.reader.read_u16::<E>()? as f64,
            ScalarType::Int => self.reader.read_i32::<E>()? as f64,
            ScalarType::UInt => self.reader.read_u32::<E>()? as f64,
            ScalarType::Float => self.reader.read_f32::<E>()? as f64,
            ScalarType::Double if self.legacy_double_width => self.reader.read_f32::<E>()? as f64,
            ScalarType::Double => self.reader.read_f64::<E>()?,
        };
        Ok(value)
    }
}

/// Longest run of non-whitespace bytes accepted as a single ASCII number.
pub const MAX_TOKEN_LEN: usize = 128;

pub struct AsciiValReader<R: BufRead> {
    reader: R,
    token: Vec<u8>,
}

impl<R: BufRead> AsciiValReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            token: Vec::new(),
        }
    }

    /// Next run of non-whitespace bytes. Separators before the token are
    /// skipped and the one after it is consumed. The last token in the
    /// input may be terminated by end of input instead. A run longer than
    /// [`MAX_TOKEN_LEN`] can't be a number of type `ty` and is rejected.
    fn read_ascii_token(&mut self, ty: ScalarType) -> Result<(), PlyError> {
        self.token.clear();

        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                break;
            }

            let mut used = 0;
            let mut ended = false;
            let mut too_long = false;
            for &byte in buf {
                used += 1;
                if byte.is_ascii_whitespace() {
                    if !self.token.is_empty() {
                        ended = true;
                        break;
                    }
                } else if self.token.len() == MAX_TOKEN_LEN {
                    too_long = true;
                    break;
                } else {
                    self.token.push(byte);
                }
            }
            self.reader.consume(used);

            if too_long {
                return Err(self.invalid(ty));
            }
            if ended {
                break;
            }
        }

        if self.token.is_empty() {
            return Err(PlyError::TruncatedInput);
        }
        Ok(())
    }

    fn invalid(&self, ty: ScalarType) -> PlyError {
        PlyError::InvalidNumber {
            token: String::from_utf8_lossy(&self.token).into_owned(),
            ty,
        }
    }
}

impl<R: BufRead> ScalarReader for AsciiValReader<R> {
    fn read_number(&mut self, ty: ScalarType) -> Result<f64, PlyError> {
        self.read_ascii_token(ty)?;

        let Ok(token) = std::str::from_utf8(&self.token) else {
            return Err(self.invalid(ty));
        };

        // Rust's float parser always uses '.' as the decimal separator.
        // `float` goes through f32 so ASCII and binary bodies agree.
        let parsed = match ty {
            ScalarType::Float => token.parse::<f32>().ok().map(f64::from),
            _ if ty.is_float() => token.parse::<f64>().ok(),
            _ => token.parse::<i64>().ok().map(|v| v as f64),
        };
        parsed.ok_or_else(|| self.invalid(ty))
    }
}
