//! PNM encoder: variant selection, header writer and pixel serializer.

use alloc::string::String;
use alloc::vec::Vec;
use enough::Stop;
use std::io::{self, Write};

use super::bits::pack_msb_first;
use super::{CHUNK_ROWS, IntSample, PnmConfig, Variant};
use crate::error::PnmError;
use crate::pixel::{Image, Samples};

/// Comment line written after the magic unless overridden.
pub const DEFAULT_COMMENT: &str = "# written by zenpnm";

/// Plain tokens per output line.
const TOKENS_PER_LINE: u64 = 16;

/// Per-call encode options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Prefer the raw (binary) variant. Ignored when any band is wider than
    /// 8 bits, which forces plain output.
    pub raw: bool,
    /// Header comment line; `None` omits it.
    pub comment: Option<String>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            raw: true,
            comment: Some(DEFAULT_COMMENT.into()),
        }
    }
}

/// Choose the output variant from band count and per-band bit depths.
///
/// Only band 0 decides the default; the `raw` request can switch between the
/// raw and plain form of that default, but never upgrades to raw when a band
/// is wider than 8 bits.
pub fn select_variant(bands: usize, bit_depths: &[u8], raw: bool) -> Result<Variant, PnmError> {
    let depth = bit_depths
        .first()
        .copied()
        .ok_or(PnmError::UnsupportedBandCount(bands))?;
    let default = match (bands, depth) {
        (1, 1) => Variant::PbmRaw,
        (1, d) if d <= 8 => Variant::PgmRaw,
        (1, _) => Variant::PgmAscii,
        (3, d) if d <= 8 => Variant::PpmRaw,
        (3, _) => Variant::PpmAscii,
        _ => return Err(PnmError::UnsupportedBandCount(bands)),
    };

    let variant = if raw && !default.is_raw() {
        if bit_depths.iter().all(|&d| d <= 8) {
            default.to_raw()
        } else {
            default
        }
    } else if !raw && default.is_raw() {
        default.to_ascii()
    } else {
        default
    };
    Ok(variant)
}

/// Encode `image` into `out`, returning the variant written.
///
/// Validation happens before the first byte is written. The sink is flushed
/// once, after the last chunk.
pub(crate) fn encode_image<W: Write>(
    image: &Image,
    options: &EncodeOptions,
    config: &PnmConfig,
    out: &mut W,
    stop: &dyn Stop,
) -> Result<Variant, PnmError> {
    let kind = image.sample_kind();
    if kind.is_float() {
        return Err(PnmError::UnsupportedSampleType(kind));
    }
    let variant = select_variant(image.bands(), image.bit_depths(), options.raw)?;
    let max_value = (1u64 << image.bit_depths()[0]) - 1;
    stop.check()?;

    log::debug!(
        "encoding {}x{} image with {} bands as {variant:?}, max value {max_value}",
        image.width(),
        image.height(),
        image.bands()
    );

    let separator = config.line_separator();
    write_header(
        out,
        variant,
        image.width(),
        image.height(),
        max_value,
        separator,
        options.comment.as_deref(),
    )?;

    let w = image.width() as usize;
    match image.samples() {
        Samples::U8(v) => write_pixels(out, v, variant, w, separator, stop)?,
        Samples::U16(v) => write_pixels(out, v, variant, w, separator, stop)?,
        Samples::U32(v) => write_pixels(out, v, variant, w, separator, stop)?,
        _ => return Err(PnmError::UnsupportedSampleType(kind)),
    }

    out.flush()?;
    Ok(variant)
}

fn write_header<W: Write>(
    out: &mut W,
    variant: Variant,
    width: u32,
    height: u32,
    max_value: u64,
    separator: &[u8],
    comment: Option<&str>,
) -> io::Result<()> {
    out.write_all(&[b'P', variant.digit()])?;
    out.write_all(separator)?;
    if let Some(comment) = comment {
        let line = comment.lines().next().unwrap_or_default();
        if !line.starts_with('#') {
            out.write_all(b"# ")?;
        }
        out.write_all(line.as_bytes())?;
        out.write_all(separator)?;
    }
    write!(out, "{width} {height}")?;
    if !variant.is_bitmap() {
        out.write_all(separator)?;
        write!(out, "{max_value}")?;
    }
    // Exactly one whitespace byte between the header and binary data.
    if variant.is_raw() {
        out.write_all(b"\n")?;
    }
    Ok(())
}

fn write_pixels<T: IntSample, W: Write>(
    out: &mut W,
    samples: &[T],
    variant: Variant,
    width: usize,
    separator: &[u8],
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    let row_len = width * variant.bands();
    let mut tokens = TokenWriter {
        separator,
        count: 0,
    };
    let mut buf: Vec<u8> = Vec::with_capacity(row_len * CHUNK_ROWS * 4);

    for (chunk_idx, chunk) in samples.chunks(row_len * CHUNK_ROWS).enumerate() {
        stop.check()?;
        log::trace!("encoding {variant:?} chunk {chunk_idx}");
        buf.clear();

        match variant {
            Variant::PbmAscii => {
                for &s in chunk {
                    tokens.push(&mut buf, s.to_u32() & 0x01);
                }
                buf.extend_from_slice(separator);
            }
            Variant::PgmAscii => {
                for &s in chunk {
                    tokens.push(&mut buf, s.to_u32());
                }
                buf.extend_from_slice(separator);
            }
            Variant::PpmAscii => {
                for px in chunk.chunks_exact(3) {
                    tokens.push(&mut buf, px[2].to_u32());
                    tokens.push(&mut buf, px[1].to_u32());
                    tokens.push(&mut buf, px[0].to_u32());
                }
                buf.extend_from_slice(separator);
            }
            Variant::PbmRaw => {
                buf.resize(chunk.len().div_ceil(8), 0);
                pack_msb_first(chunk.iter().map(|s| s.low_byte()), &mut buf);
            }
            Variant::PgmRaw => {
                buf.extend(chunk.iter().map(|s| s.low_byte()));
            }
            Variant::PpmRaw => {
                // Raster order B, G, R back to file order R, G, B.
                for px in chunk.chunks_exact(3) {
                    buf.extend_from_slice(&[
                        px[2].low_byte(),
                        px[1].low_byte(),
                        px[0].low_byte(),
                    ]);
                }
            }
        }

        out.write_all(&buf)?;
    }
    Ok(())
}

/// Writes decimal tokens, breaking the line every 16 tokens.
struct TokenWriter<'a> {
    separator: &'a [u8],
    /// Running count over the whole image.
    count: u64,
}

impl TokenWriter<'_> {
    fn push(&mut self, buf: &mut Vec<u8>, value: u32) {
        if self.count % TOKENS_PER_LINE == 0 {
            buf.extend_from_slice(self.separator);
        } else {
            buf.push(b' ');
        }
        self.count += 1;

        let mut digits = [0u8; 10];
        let mut pos = digits.len();
        let mut v = value;
        loop {
            pos -= 1;
            digits[pos] = b'0' + (v % 10) as u8;
            v /= 10;
            if v == 0 {
                break;
            }
        }
        buf.extend_from_slice(&digits[pos..]);
    }
}
