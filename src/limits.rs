use crate::error::PnmError;

/// Resource limits applied while decoding.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the decoded raster.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check header dimensions against limits.
    pub(crate) fn check_dimensions(&self, width: u32, height: u32) -> Result<(), PnmError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(PnmError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(PnmError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(PnmError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check a raster of `samples` elements, each `bytes_per_sample` wide.
    pub(crate) fn check_raster(
        &self,
        samples: usize,
        bytes_per_sample: usize,
    ) -> Result<(), PnmError> {
        if let Some(max_mem) = self.max_memory_bytes {
            let bytes = (samples as u64).saturating_mul(bytes_per_sample as u64);
            if bytes > max_mem {
                return Err(PnmError::LimitExceeded(alloc::format!(
                    "raster of {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
