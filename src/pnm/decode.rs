//! PNM pixel engine: fills a raster from the bytes after the header.

use alloc::vec::Vec;
use enough::Stop;
use std::io::{self, BufRead};

use super::bits::unpack_msb_first;
use super::{CHUNK_ROWS, Header, IntSample, SampleWidth, TokenReader, Variant};
use crate::error::PnmError;
use crate::pixel::{Image, Samples};

/// Decode the pixel payload described by `header`.
///
/// The reader must be positioned on the first pixel byte (raw) or token
/// (plain). Nothing is returned on failure; the partial raster is dropped.
pub(crate) fn decode_pixels<R: BufRead>(
    reader: &mut TokenReader<R>,
    header: &Header,
    stop: &dyn Stop,
) -> Result<Image, PnmError> {
    let total = header.sample_count().ok_or(PnmError::DimensionsTooLarge {
        width: header.width,
        height: header.height,
    })?;

    let samples = match header.sample_width() {
        SampleWidth::Eight => Samples::U8(fill::<u8, R>(reader, header, total, stop)?),
        SampleWidth::Sixteen => Samples::U16(fill::<u16, R>(reader, header, total, stop)?),
        SampleWidth::ThirtyTwo => Samples::U32(fill::<u32, R>(reader, header, total, stop)?),
    };

    Image::new(header.width, header.height, header.bands(), samples)?
        .with_bit_depth(header.bit_depth())
}

fn fill<T: IntSample, R: BufRead>(
    reader: &mut TokenReader<R>,
    header: &Header,
    total: usize,
    stop: &dyn Stop,
) -> Result<Vec<T>, PnmError> {
    let row_len = header.width as usize * header.bands();
    let chunk_len = row_len.saturating_mul(CHUNK_ROWS);
    // Grows one chunk at a time, never more than a chunk ahead of the input.
    let mut raster: Vec<T> = Vec::with_capacity(total.min(chunk_len));
    let mut bytes: Vec<u8> = Vec::new();
    let mut bits: Vec<u8> = Vec::new();

    while raster.len() < total {
        if reader.is_exhausted() {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        stop.check()?;
        let start = raster.len();
        let first_row = start / row_len;
        raster.resize(start + chunk_len.min(total - start), T::default());
        let chunk = &mut raster[start..];
        log::trace!(
            "decoding {:?} rows {}..{}",
            header.variant,
            first_row,
            first_row + chunk.len() / row_len
        );

        match header.variant {
            Variant::PbmRaw => {
                bytes.resize(chunk.len().div_ceil(8), 0);
                reader.read_exact(&mut bytes)?;
                bits.resize(chunk.len(), 0);
                unpack_msb_first(&bytes, &mut bits);
                for (dst, &bit) in chunk.iter_mut().zip(&bits) {
                    *dst = T::from_byte(bit);
                }
            }
            Variant::PbmAscii => {
                for dst in chunk.iter_mut() {
                    *dst = T::from_token(reader.read_integer()? & 0x01);
                }
            }
            Variant::PgmRaw | Variant::PpmRaw => {
                bytes.resize(chunk.len(), 0);
                reader.read_exact(&mut bytes)?;
                for (dst, &b) in chunk.iter_mut().zip(&bytes) {
                    *dst = T::from_byte(b);
                }
                if header.bands() == 3 {
                    // File order R, G, B; raster order B, G, R.
                    for px in chunk.chunks_exact_mut(3) {
                        px.swap(0, 2);
                    }
                }
            }
            Variant::PgmAscii => {
                for dst in chunk.iter_mut() {
                    *dst = T::from_token(reader.read_integer()?);
                }
            }
            Variant::PpmAscii => {
                for px in chunk.chunks_exact_mut(3) {
                    px[2] = T::from_token(reader.read_integer()?);
                    px[1] = T::from_token(reader.read_integer()?);
                    px[0] = T::from_token(reader.read_integer()?);
                }
            }
        }
    }

    Ok(raster)
}
