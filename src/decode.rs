use enough::{Stop, Unstoppable};
use std::io::{self, BufReader, Read};
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::error::PnmError;
use crate::limits::Limits;
use crate::pixel::Image;
use crate::pnm::{self, Header, PnmConfig, TokenReader};

/// Decode a PNM stream with default settings.
pub fn decode<R: Read>(source: R) -> Result<Image, PnmError> {
    DecodeRequest::new(source).decode(Unstoppable)
}

/// Builder for a one-shot or lazy decode.
pub struct DecodeRequest<'a, R> {
    source: R,
    limits: Option<&'a Limits>,
    config: Option<&'a PnmConfig>,
}

impl<'a, R: Read> DecodeRequest<'a, R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            limits: None,
            config: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_config(mut self, config: &'a PnmConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Parse the header and decode the full raster now.
    pub fn decode(self, stop: impl Stop) -> Result<Image, PnmError> {
        let (header, mut reader) = self.read_header()?;
        stop.check()?;
        pnm::decode::decode_pixels(&mut reader, &header, &stop)
    }

    /// Parse the header now; decode the raster on first access.
    pub fn open(self) -> Result<PnmDecoder<R>, PnmError> {
        let (header, reader) = self.read_header()?;
        log::debug!("opened PNM stream, raster deferred");
        Ok(PnmDecoder {
            header,
            source: Mutex::new(Some(reader)),
            raster: OnceLock::new(),
        })
    }

    fn read_header(self) -> Result<(Header, TokenReader<BufReader<R>>), PnmError> {
        let default_config;
        let config = match self.config {
            Some(config) => config,
            None => {
                default_config = PnmConfig::default();
                &default_config
            }
        };
        let mut reader = TokenReader::new(BufReader::new(self.source), config);
        let header = Header::read(&mut reader)?;

        if let Some(limits) = self.limits {
            limits.check_dimensions(header.width, header.height)?;
            let samples = header.sample_count().ok_or(PnmError::DimensionsTooLarge {
                width: header.width,
                height: header.height,
            })?;
            limits.check_raster(samples, header.sample_width().kind().bytes_per_sample())?;
        }
        Ok((header, reader))
    }
}

/// A PNM stream whose header is parsed and whose raster is decoded lazily.
///
/// The raster is decoded at most once. Concurrent first callers of
/// [`raster`](Self::raster) block until that decode finishes and then see
/// the same raster (or the same error). The source is dropped as soon as
/// the pixel data has been read.
pub struct PnmDecoder<R> {
    header: Header,
    source: Mutex<Option<TokenReader<BufReader<R>>>>,
    raster: OnceLock<Result<Image, PnmError>>,
}

impl<R: Read> PnmDecoder<R> {
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// PNM files hold exactly one page.
    pub fn num_pages(&self) -> u32 {
        1
    }

    /// The decoded raster, decoding it on first call.
    pub fn raster(&self) -> Result<&Image, PnmError> {
        self.raster
            .get_or_init(|| self.decode_source())
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Page `index`; only page 0 exists.
    pub fn page(&self, index: u32) -> Result<&Image, PnmError> {
        if index != 0 {
            return Err(PnmError::InvalidPageOrTile {
                page: index,
                tile_x: 0,
                tile_y: 0,
            });
        }
        self.raster()
    }

    /// Tile at grid position (`tile_x`, `tile_y`); the whole image is the
    /// single tile at (0, 0).
    pub fn tile(&self, tile_x: u32, tile_y: u32) -> Result<&Image, PnmError> {
        if tile_x != 0 || tile_y != 0 {
            return Err(PnmError::InvalidPageOrTile {
                page: 0,
                tile_x,
                tile_y,
            });
        }
        self.raster()
    }

    /// Whether the raster has been decoded (successfully or not).
    pub fn is_decoded(&self) -> bool {
        self.raster.get().is_some()
    }

    /// Take the raster, decoding it if nobody has yet.
    pub fn into_image(self) -> Result<Image, PnmError> {
        if let Some(result) = self.raster.into_inner() {
            return result;
        }
        let reader = self
            .source
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        decode_with(reader, &self.header)
    }

    fn decode_source(&self) -> Result<Image, PnmError> {
        let reader = self
            .source
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        decode_with(reader, &self.header)
    }
}

fn decode_with<R: Read>(
    reader: Option<TokenReader<BufReader<R>>>,
    header: &Header,
) -> Result<Image, PnmError> {
    let Some(mut reader) = reader else {
        return Err(io::Error::other("PNM source was already consumed").into());
    };
    let result = pnm::decode::decode_pixels(&mut reader, header, &Unstoppable);
    drop(reader);
    log::debug!("PNM source closed after pixel decode");
    result
}
