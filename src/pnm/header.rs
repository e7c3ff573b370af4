//! PNM magic, variant table, header grammar and the decimal token reader.

use alloc::collections::VecDeque;
use alloc::format;
use alloc::vec::Vec;
use std::io::{self, BufRead, Read};

use super::PnmConfig;
use crate::error::PnmError;
use crate::pixel::SampleKind;

/// The six PNM variants, in wire-digit order (`P1`..`P6`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// P1: plain bitmap.
    PbmAscii,
    /// P2: plain graymap.
    PgmAscii,
    /// P3: plain pixmap.
    PpmAscii,
    /// P4: raw bitmap.
    PbmRaw,
    /// P5: raw graymap.
    PgmRaw,
    /// P6: raw pixmap.
    PpmRaw,
}

impl Variant {
    /// Variant for a wire digit `b'1'..=b'6'`.
    pub fn from_digit(digit: u8) -> Option<Variant> {
        match digit {
            b'1' => Some(Variant::PbmAscii),
            b'2' => Some(Variant::PgmAscii),
            b'3' => Some(Variant::PpmAscii),
            b'4' => Some(Variant::PbmRaw),
            b'5' => Some(Variant::PgmRaw),
            b'6' => Some(Variant::PpmRaw),
            _ => None,
        }
    }

    /// Wire digit (`b'1'..=b'6'`).
    pub fn digit(&self) -> u8 {
        match self {
            Variant::PbmAscii => b'1',
            Variant::PgmAscii => b'2',
            Variant::PpmAscii => b'3',
            Variant::PbmRaw => b'4',
            Variant::PgmRaw => b'5',
            Variant::PpmRaw => b'6',
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Variant::PbmRaw | Variant::PgmRaw | Variant::PpmRaw)
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, Variant::PbmAscii | Variant::PbmRaw)
    }

    /// 3 for PPM, 1 otherwise.
    pub fn bands(&self) -> usize {
        match self {
            Variant::PpmAscii | Variant::PpmRaw => 3,
            _ => 1,
        }
    }

    pub fn to_raw(self) -> Variant {
        match self {
            Variant::PbmAscii => Variant::PbmRaw,
            Variant::PgmAscii => Variant::PgmRaw,
            Variant::PpmAscii => Variant::PpmRaw,
            raw => raw,
        }
    }

    pub fn to_ascii(self) -> Variant {
        match self {
            Variant::PbmRaw => Variant::PbmAscii,
            Variant::PgmRaw => Variant::PgmAscii,
            Variant::PpmRaw => Variant::PpmAscii,
            ascii => ascii,
        }
    }
}

/// Container width for decoded samples, chosen from the max value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleWidth {
    Eight,
    Sixteen,
    ThirtyTwo,
}

impl SampleWidth {
    pub fn kind(&self) -> SampleKind {
        match self {
            SampleWidth::Eight => SampleKind::U8,
            SampleWidth::Sixteen => SampleKind::U16,
            SampleWidth::ThirtyTwo => SampleKind::U32,
        }
    }
}

/// Parsed PNM header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub variant: Variant,
    pub width: u32,
    pub height: u32,
    /// 1 for PBM. Clamped to 255 for raw variants.
    pub max_value: u32,
}

impl Header {
    pub fn bands(&self) -> usize {
        self.variant.bands()
    }

    pub fn sample_width(&self) -> SampleWidth {
        if self.max_value < 256 {
            SampleWidth::Eight
        } else if self.max_value < 65536 {
            SampleWidth::Sixteen
        } else {
            SampleWidth::ThirtyTwo
        }
    }

    /// Significant bits per sample: 1 for PBM, else the bit length of `max_value`.
    pub fn bit_depth(&self) -> u8 {
        if self.variant.is_bitmap() {
            1
        } else {
            (u32::BITS - self.max_value.leading_zeros()).max(1) as u8
        }
    }

    /// Total samples in the raster, or `None` on overflow.
    pub fn sample_count(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|wh| wh.checked_mul(self.bands()))
    }

    /// Parse `'P' digit width height [maxval]` from the token reader.
    ///
    /// For raw variants the single separator byte after the last token is
    /// consumed, leaving the reader at the first pixel byte.
    pub(crate) fn read<R: BufRead>(reader: &mut TokenReader<R>) -> Result<Header, PnmError> {
        let magic = reader
            .next_byte()?
            .ok_or_else(|| PnmError::InvalidHeader("empty stream".into()))?;
        if magic != b'P' {
            return Err(PnmError::InvalidHeader(format!(
                "expected 'P' as first byte, got 0x{magic:02x}"
            )));
        }
        let digit = reader
            .next_byte()?
            .ok_or_else(|| PnmError::InvalidHeader("missing variant digit".into()))?;
        let variant = Variant::from_digit(digit).ok_or_else(|| {
            PnmError::InvalidHeader(format!(
                "unsupported variant 'P{}', expected P1..P6",
                char::from(digit).escape_default()
            ))
        })?;

        let width = reader.read_integer()?;
        let height = reader.read_integer()?;
        if width == 0 || height == 0 {
            return Err(PnmError::InvalidHeader(format!(
                "zero dimension: {width}x{height}"
            )));
        }

        let mut max_value = if variant.is_bitmap() {
            1
        } else {
            let max_value = reader.read_integer()?;
            if max_value == 0 {
                return Err(PnmError::InvalidHeader("max value is zero".into()));
            }
            max_value
        };
        if variant.is_raw() && max_value >= 256 {
            log::debug!("raw P{} max value {max_value} clamped to 255", char::from(digit));
            max_value = 255;
        }

        let header = Header {
            variant,
            width,
            height,
            max_value,
        };
        log::debug!("parsed PNM header {header:?}");
        Ok(header)
    }
}

/// Whether the first two bytes of a stream carry the PNM magic (`P1`..`P6`).
pub fn sniff(bytes: &[u8]) -> bool {
    matches!(bytes, [b'P', b'1'..=b'6', ..])
}

/// Reads the header and pixel tokens of a PNM stream.
///
/// Tokens are non-negative decimal integers. Everything before the first
/// digit is skipped; a `#` seen there starts a comment that runs through the
/// next line separator.
pub(crate) struct TokenReader<R> {
    inner: R,
    separator: Vec<u8>,
    strict_eof: bool,
    /// Set once a token hit end of stream before its first digit.
    exhausted: bool,
}

impl<R: BufRead> TokenReader<R> {
    pub(crate) fn new(inner: R, config: &PnmConfig) -> Self {
        TokenReader {
            inner,
            separator: config.line_separator().to_vec(),
            strict_eof: config.strict_eof(),
            exhausted: false,
        }
    }

    pub(crate) fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let Some(&b) = self.inner.fill_buf()?.first() else {
            return Ok(None);
        };
        self.inner.consume(1);
        Ok(Some(b))
    }

    /// Next decimal token.
    ///
    /// End of stream before any digit yields 0, unless the reader is strict.
    pub(crate) fn read_integer(&mut self) -> Result<u32, PnmError> {
        let mut value: u32 = 0;
        let mut seen_digit = false;
        loop {
            let Some(b) = self.next_byte()? else {
                if !seen_digit {
                    if self.strict_eof {
                        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
                    }
                    self.exhausted = true;
                }
                return Ok(value);
            };
            if b.is_ascii_digit() {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u32::from(b - b'0')))
                    .ok_or_else(|| {
                        PnmError::InvalidHeader("integer token exceeds 32 bits".into())
                    })?;
                seen_digit = true;
            } else if seen_digit {
                return Ok(value);
            } else if b == b'#' {
                self.skip_comment()?;
            }
        }
    }

    /// Whether a token has already read past the end of the stream.
    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Discard bytes through the next line separator (or end of stream).
    fn skip_comment(&mut self) -> io::Result<()> {
        let sep_len = self.separator.len();
        let mut tail: VecDeque<u8> = VecDeque::with_capacity(sep_len);
        while let Some(b) = self.next_byte()? {
            if tail.len() == sep_len {
                tail.pop_front();
            }
            tail.push_back(b);
            if tail.iter().eq(self.separator.iter()) {
                return Ok(());
            }
        }
        Ok(())
    }

    pub(crate) fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(buf)
    }
}
