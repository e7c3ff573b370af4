use alloc::vec;
use alloc::vec::Vec;

use crate::error::PnmError;

/// Sample data kind of a raster.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleKind {
    U8,
    U16,
    U32,
    /// 32-bit float. Representable, but never encodable as PNM.
    F32,
    /// 64-bit float. Representable, but never encodable as PNM.
    F64,
}

impl SampleKind {
    /// Bits per sample of the container.
    pub fn container_bits(&self) -> u8 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::U32 | Self::F32 => 32,
            Self::F64 => 64,
        }
    }

    /// Bytes per sample of the container.
    pub fn bytes_per_sample(&self) -> usize {
        usize::from(self.container_bits() / 8)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

/// Owned, band-interleaved sample storage.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl Samples {
    pub fn kind(&self) -> SampleKind {
        match self {
            Samples::U8(_) => SampleKind::U8,
            Samples::U16(_) => SampleKind::U16,
            Samples::U32(_) => SampleKind::U32,
            Samples::F32(_) => SampleKind::F32,
            Samples::F64(_) => SampleKind::F64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Samples::U8(v) => v.len(),
            Samples::U16(v) => v.len(),
            Samples::U32(v) => v.len(),
            Samples::F32(v) => v.len(),
            Samples::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Integer sample at `index`, widened. `None` for float storage.
    pub fn get(&self, index: usize) -> Option<u64> {
        match self {
            Samples::U8(v) => v.get(index).map(|&s| u64::from(s)),
            Samples::U16(v) => v.get(index).map(|&s| u64::from(s)),
            Samples::U32(v) => v.get(index).map(|&s| u64::from(s)),
            Samples::F32(_) | Samples::F64(_) => None,
        }
    }

    pub fn as_u8(&self) -> Option<&[u8]> {
        match self {
            Samples::U8(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<&[u16]> {
        match self {
            Samples::U16(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<&[u32]> {
        match self {
            Samples::U32(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// All integer samples widened to `u64`. Empty for float storage.
    pub fn to_u64_vec(&self) -> Vec<u64> {
        (0..self.len()).filter_map(|i| self.get(i)).collect()
    }
}

/// A single dense raster: `width * height * bands` band-interleaved samples.
///
/// For 3-band images decoded from PPM, each triplet is stored B, G, R
/// (see the crate docs on channel order).
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    bands: usize,
    bit_depths: Vec<u8>,
    samples: Samples,
}

impl Image {
    /// Wrap `samples` as a `width` x `height` raster with `bands` channels.
    ///
    /// Every band's bit depth defaults to the container width.
    pub fn new(width: u32, height: u32, bands: usize, samples: Samples) -> Result<Image, PnmError> {
        if width == 0 || height == 0 || bands == 0 {
            return Err(PnmError::EmptyImage {
                width,
                height,
                bands,
            });
        }
        let needed = (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(bands))
            .ok_or(PnmError::DimensionsTooLarge { width, height })?;
        if samples.len() != needed {
            return Err(PnmError::BufferTooSmall {
                needed,
                actual: samples.len(),
            });
        }
        let depth = samples.kind().container_bits();
        Ok(Image {
            width,
            height,
            bands,
            bit_depths: vec![depth; bands],
            samples,
        })
    }

    /// Set the same significant bit depth on every band.
    pub fn with_bit_depth(self, depth: u8) -> Result<Image, PnmError> {
        let depths = vec![depth; self.bands];
        self.with_bit_depths(depths)
    }

    /// Set per-band significant bit depths (`1..=container bits`).
    pub fn with_bit_depths(mut self, depths: Vec<u8>) -> Result<Image, PnmError> {
        if depths.len() != self.bands {
            return Err(PnmError::BufferTooSmall {
                needed: self.bands,
                actual: depths.len(),
            });
        }
        let max = self.samples.kind().container_bits();
        if let Some((band, &depth)) = depths
            .iter()
            .enumerate()
            .find(|&(_, &d)| d == 0 || d > max)
        {
            return Err(PnmError::InvalidBitDepth { band, depth });
        }
        self.bit_depths = depths;
        Ok(self)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    pub fn bit_depths(&self) -> &[u8] {
        &self.bit_depths
    }

    pub fn sample_kind(&self) -> SampleKind {
        self.samples.kind()
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn into_samples(self) -> Samples {
        self.samples
    }

    /// Sample at column `x`, row `y`, channel `band` (raster order).
    pub fn sample(&self, x: u32, y: u32, band: usize) -> Option<u64> {
        if x >= self.width || y >= self.height || band >= self.bands {
            return None;
        }
        let index = (y as usize * self.width as usize + x as usize) * self.bands + band;
        self.samples.get(index)
    }

    /// View a 3-band, 8-bit raster as B, G, R pixels.
    #[cfg(feature = "rgb")]
    pub fn as_bgr8(&self) -> Option<&[rgb::alt::BGR8]> {
        use rgb::AsPixels as _;
        match (&self.samples, self.bands) {
            (Samples::U8(v), 3) => Some(v.as_pixels()),
            _ => None,
        }
    }

    /// View a 3-band, 16-bit raster as B, G, R pixels.
    #[cfg(feature = "rgb")]
    pub fn as_bgr16(&self) -> Option<&[rgb::alt::BGR16]> {
        use rgb::AsPixels as _;
        match (&self.samples, self.bands) {
            (Samples::U16(v), 3) => Some(v.as_pixels()),
            _ => None,
        }
    }

    /// Zero-copy 2D view of a 1-band, 8-bit raster.
    #[cfg(feature = "imgref")]
    pub fn as_gray_imgref8(&self) -> Option<imgref::ImgRef<'_, u8>> {
        match (&self.samples, self.bands) {
            (Samples::U8(v), 1) => Some(imgref::ImgRef::new(
                v,
                self.width as usize,
                self.height as usize,
            )),
            _ => None,
        }
    }

    /// Zero-copy 2D view of a 3-band, 8-bit raster.
    #[cfg(feature = "imgref")]
    pub fn as_bgr_imgref8(&self) -> Option<imgref::ImgRef<'_, rgb::alt::BGR8>> {
        let pixels = self.as_bgr8()?;
        Some(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}
