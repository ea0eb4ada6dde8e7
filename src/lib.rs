/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! Invisible DCT-domain watermarking for raster images.
//!
//! A short fingerprint of an arbitrary payload string is embedded into the
//! sign of selected mid-frequency DCT coefficients of the luminance
//! channel, spread redundantly across many 8x8 blocks. Recovery reads the
//! same coefficients back and votes on the encoded bits; it does not need
//! the watermarked image to be byte-identical to the output of [`watermark`],
//! only perceptually close (e.g. after a JPEG re-encode).
//!
//! The five core subsystems — [`fingerprint`], [`ecc`], [`structs::prng`],
//! [`structs::dct_block`], and the embed/extract pipeline in [`codec`] — are
//! a bit-exact wire contract. Changing their behavior breaks interoperability
//! with watermarks written by any other conforming implementation.

pub mod adapters;
pub mod codec;
pub mod consts;
pub mod ecc;
pub mod error;
pub mod fingerprint;
pub mod logging;
pub mod overlay;
pub mod structs;

pub use codec::{embed, extract, extract_debug, verify};
pub use error::{WatermarkError, WatermarkErrorKind};
pub use structs::pixel_buffer::PixelBuffer;

/// Options accepted by [`watermark`]/[`codec::embed`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WatermarkOptions {
    /// Encoder quality in `[0,1]`, applied only to JPEG/WebP output.
    pub jpeg_quality: f32,
    /// Optional cosmetic overlay drawn after embedding. Never affects verification.
    pub visible: Option<overlay::VisibleOverlay>,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        WatermarkOptions {
            jpeg_quality: consts::JPEG_QUALITY,
            visible: None,
        }
    }
}

/// Options accepted by [`codec::verify`].
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VerifyOptions {
    /// Minimum confidence required, in addition to an exact digest match.
    pub threshold: f32,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        VerifyOptions {
            threshold: consts::MATCH_THRESHOLD,
        }
    }
}

/// Result of [`codec::verify`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct VerifyOutcome {
    pub is_match: bool,
    pub confidence: f32,
}

/// Result of [`codec::extract_debug`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExtractDebugOutcome {
    pub digest_hex: String,
    pub confidence: f32,
}

/// High-level adapter-backed convenience wrapper: decode `image_bytes`,
/// run [`codec::embed`], re-encode as `format` at `opts.jpeg_quality`.
///
/// This is the "whole pipeline" entry point described in spec §6; library
/// consumers that already hold a decoded [`PixelBuffer`] should call
/// [`codec::embed`] directly instead.
pub fn watermark(
    image_bytes: &[u8],
    payload: &str,
    format: adapters::image_io::ImageFormat,
    opts: &WatermarkOptions,
) -> Result<adapters::image_io::EncodedImage, WatermarkError> {
    let buffer = adapters::image_io::decode(image_bytes)?;
    let mut watermarked = codec::embed(&buffer, payload)?;
    if let Some(overlay) = &opts.visible {
        overlay::apply(&mut watermarked, overlay);
    }
    adapters::image_io::encode(&watermarked, format, opts.jpeg_quality)
}
