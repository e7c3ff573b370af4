//! # zenpnm
//!
//! PNM (PBM, PGM, PPM) decoder and encoder, plain (ASCII) and raw (binary).
//!
//! ## Supported Formats
//!
//! - **P1/P4** (PBM) — bi-level, decoded as 0/1 samples
//! - **P2/P5** (PGM) — grayscale
//! - **P3/P6** (PPM) — color, 3 bands
//!
//! Plain variants carry samples up to 32 bits; raw variants carry one byte
//! per sample (a raw max value of 256 or more is read as 255).
//!
//! ## Channel Order
//!
//! Color rasters are stored B, G, R: each file triplet R, G, B lands at
//! raster positions 2, 1, 0. The encoder applies the inverse, so every
//! raster written by this crate decodes back to the same samples.
//!
//! ## Variant Selection
//!
//! The encoder picks the most compact variant band 0's bit depth allows:
//! depth 1 is PBM, depth up to 8 is raw PGM/PPM, wider depths are plain
//! PGM/PPM. [`EncodeOptions::raw`] switches between the raw and plain form
//! where the depths permit it.
//!
//! ## Non-Goals
//!
//! - Streaming or incremental decode (the raster is decoded in one piece)
//! - PAM (P7), PFM, and multi-image files
//! - Floating-point samples
//!
//! ## Usage
//!
//! ```no_run
//! use zenpnm::{EncodeOptions, Image, Samples};
//!
//! let data: &[u8] = b"P2\n2 1\n1023\n10 1000\n";
//! assert!(zenpnm::sniff(data));
//!
//! let image = zenpnm::decode(data)?;
//! assert_eq!(image.samples(), &Samples::U16(vec![10, 1000]));
//!
//! let bytes = zenpnm::encode_to_vec(&image, &EncodeOptions::default())?;
//! assert_eq!(zenpnm::decode(&bytes[..])?, image);
//! # Ok::<(), zenpnm::PnmError>(())
//! ```

#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod limits;
mod pixel;

pub mod pnm;

mod decode;
mod encode;

// Re-exports
pub use decode::{DecodeRequest, PnmDecoder, decode};
pub use encode::{EncodeRequest, encode, encode_to_vec};
pub use enough::{Stop, Unstoppable};
pub use error::PnmError;
pub use limits::Limits;
pub use pixel::{Image, SampleKind, Samples};
pub use pnm::{EncodeOptions, Header, PnmConfig, Variant, probe, sniff};
