//! PNM family: P1..P6 (PBM, PGM, PPM in plain and raw form).
//!
//! Credits: structure follows [zune-ppm](https://github.com/etemesi254/zune-image)
//! by Caleb Etemesi (MIT/Apache-2.0/Zlib licensed).

mod bits;
pub(crate) mod decode;
pub(crate) mod encode;
mod header;

pub use encode::{DEFAULT_COMMENT, EncodeOptions, select_variant};
pub use header::{Header, SampleWidth, Variant, sniff};
pub(crate) use header::TokenReader;

use alloc::vec::Vec;

use crate::error::PnmError;

/// Scanlines processed per chunk, both directions.
///
/// A multiple of 8 keeps every non-final PBM chunk byte-aligned.
pub(crate) const CHUNK_ROWS: usize = 8;

/// Tokenizer and writer settings shared by decode and encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PnmConfig {
    line_separator: Vec<u8>,
    strict_eof: bool,
}

impl Default for PnmConfig {
    fn default() -> Self {
        PnmConfig {
            line_separator: b"\n".to_vec(),
            strict_eof: false,
        }
    }
}

impl PnmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line separator ending comments on decode and lines on encode.
    ///
    /// An empty separator is ignored and the current one kept.
    pub fn with_line_separator(mut self, separator: impl Into<Vec<u8>>) -> Self {
        let separator = separator.into();
        if !separator.is_empty() {
            self.line_separator = separator;
        }
        self
    }

    /// Report end of stream before a token's first digit as
    /// [`std::io::ErrorKind::UnexpectedEof`] instead of reading it as `0`.
    pub fn with_strict_eof(mut self, strict: bool) -> Self {
        self.strict_eof = strict;
        self
    }

    pub fn line_separator(&self) -> &[u8] {
        &self.line_separator
    }

    pub fn strict_eof(&self) -> bool {
        self.strict_eof
    }
}

/// Parse only the header of an in-memory PNM buffer.
pub fn probe(data: &[u8]) -> Result<Header, PnmError> {
    let mut reader = TokenReader::new(data, &PnmConfig::default());
    Header::read(&mut reader)
}

/// Integer sample containers the codec reads and writes.
pub(crate) trait IntSample: Copy + Default {
    /// Truncating conversion from a decoded token.
    fn from_token(value: u32) -> Self;
    fn from_byte(value: u8) -> Self;
    fn to_u32(self) -> u32;

    fn low_byte(self) -> u8 {
        self.to_u32() as u8
    }
}

impl IntSample for u8 {
    fn from_token(value: u32) -> Self {
        value as u8
    }
    fn from_byte(value: u8) -> Self {
        value
    }
    fn to_u32(self) -> u32 {
        u32::from(self)
    }
}

impl IntSample for u16 {
    fn from_token(value: u32) -> Self {
        value as u16
    }
    fn from_byte(value: u8) -> Self {
        u16::from(value)
    }
    fn to_u32(self) -> u32 {
        u32::from(self)
    }
}

impl IntSample for u32 {
    fn from_token(value: u32) -> Self {
        value
    }
    fn from_byte(value: u8) -> Self {
        u32::from(value)
    }
    fn to_u32(self) -> u32 {
        self
    }
}
