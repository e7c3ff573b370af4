use alloc::string::String;
use alloc::sync::Arc;
use enough::StopReason;

use crate::pixel::SampleKind;

/// Errors from PNM decoding and encoding.
///
/// `Clone` so that a memoized decode failure can be reported to every caller
/// of [`crate::PnmDecoder::raster`].
#[derive(Clone, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PnmError {
    /// Bad magic, out-of-range variant digit, or a header value that breaks
    /// the header invariants.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported sample type for encoding: {0:?}")]
    UnsupportedSampleType(SampleKind),

    #[error("unsupported band count for encoding: {0} (expected 1 or 3)")]
    UnsupportedBandCount(usize),

    /// Stream read/write failure. Truncated input surfaces as
    /// [`std::io::ErrorKind::UnexpectedEof`].
    #[error("I/O error: {0}")]
    Io(#[source] Arc<std::io::Error>),

    #[error("PNM has one page and one tile; requested page {page}, tile ({tile_x}, {tile_y})")]
    InvalidPageOrTile { page: u32, tile_x: u32, tile_y: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("empty image: {width}x{height} with {bands} bands")]
    EmptyImage { width: u32, height: u32, bands: usize },

    #[error("buffer size mismatch: need {needed} samples, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("invalid bit depth {depth} for band {band}")]
    InvalidBitDepth { band: usize, depth: u8 },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl PnmError {
    /// Whether this is an I/O error caused by the stream ending early.
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, PnmError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}

impl From<std::io::Error> for PnmError {
    fn from(e: std::io::Error) -> Self {
        PnmError::Io(Arc::new(e))
    }
}

impl From<StopReason> for PnmError {
    fn from(r: StopReason) -> Self {
        PnmError::Cancelled(r)
    }
}
