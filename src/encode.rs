use alloc::vec::Vec;
use enough::{Stop, Unstoppable};
use std::io::Write;

use crate::error::PnmError;
use crate::pixel::Image;
use crate::pnm::{self, EncodeOptions, PnmConfig, Variant};

/// Encode `image` into `sink` with default tokenizer settings.
pub fn encode<W: Write>(
    image: &Image,
    options: &EncodeOptions,
    sink: W,
) -> Result<Variant, PnmError> {
    EncodeRequest::new()
        .with_options(options.clone())
        .encode(image, sink, Unstoppable)
}

/// Encode `image` into a new buffer.
pub fn encode_to_vec(image: &Image, options: &EncodeOptions) -> Result<Vec<u8>, PnmError> {
    EncodeRequest::new()
        .with_options(options.clone())
        .encode_to_vec(image, Unstoppable)
}

/// Builder for PNM encoding.
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest<'a> {
    options: EncodeOptions,
    config: Option<&'a PnmConfig>,
}

impl<'a> EncodeRequest<'a> {
    /// Raw output preferred, default comment, `"\n"` line separator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer the raw (`true`) or plain (`false`) form.
    pub fn raw(mut self, raw: bool) -> Self {
        self.options.raw = raw;
        self
    }

    /// Header comment line, or `None` for no comment.
    pub fn comment(mut self, comment: Option<&str>) -> Self {
        self.options.comment = comment.map(Into::into);
        self
    }

    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_config(mut self, config: &'a PnmConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Variant this request would write for `image`, without writing anything.
    pub fn variant_for(&self, image: &Image) -> Result<Variant, PnmError> {
        let kind = image.sample_kind();
        if kind.is_float() {
            return Err(PnmError::UnsupportedSampleType(kind));
        }
        pnm::select_variant(image.bands(), image.bit_depths(), self.options.raw)
    }

    pub fn encode<W: Write>(
        &self,
        image: &Image,
        mut sink: W,
        stop: impl Stop,
    ) -> Result<Variant, PnmError> {
        let default_config;
        let config = match self.config {
            Some(config) => config,
            None => {
                default_config = PnmConfig::default();
                &default_config
            }
        };
        pnm::encode::encode_image(image, &self.options, config, &mut sink, &stop)
    }

    pub fn encode_to_vec(&self, image: &Image, stop: impl Stop) -> Result<Vec<u8>, PnmError> {
        let mut out = Vec::new();
        self.encode(image, &mut out, stop)?;
        Ok(out)
    }
}
