/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! Image decode/encode adapter (spec.md §6's "Adapter contract — image
//! I/O"): compressed bytes in sRGB, straight alpha, row-major RGBA out, and
//! back. Built on the `image` crate, which the rest of this pack's raster
//! examples (e.g. the Stegstr and kurpod steganography tools) also reach
//! for at exactly this seam.

use std::io::Cursor;

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader};
use log::warn;

use crate::error::{WatermarkError, WatermarkErrorKind};
use crate::structs::pixel_buffer::PixelBuffer;

/// Target container for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
        }
    }
}

/// Result of [`encode`]: the opaque byte blob plus the metadata callers
/// need without re-parsing it (spec.md §6's `watermark` return shape).
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub mime_type: &'static str,
}

/// Decodes arbitrary compressed image bytes into an RGBA [`PixelBuffer`].
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, WatermarkError> {
    let decode_inner = || -> anyhow::Result<PixelBuffer> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .context("could not guess image container format")?;
        let dynamic = reader.decode().context("image decoder rejected input")?;
        let rgba = dynamic.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelBuffer::new(width, height, rgba.into_raw())
            .map_err(|e| anyhow::anyhow!(e.to_string()))
    };

    decode_inner().map_err(|e| {
        WatermarkError::with_source(WatermarkErrorKind::DecodeFailure, "failed to decode image", e)
    })
}

/// Encodes an RGBA [`PixelBuffer`] into `format` bytes. `quality` is in
/// `[0,1]` and only affects JPEG output; the `image` crate's WebP encoder
/// pinned here is lossless and has no quality knob, so a non-default
/// quality on WebP output is logged and ignored rather than silently
/// dropped (see DESIGN.md's Open Question #4).
pub fn encode(
    buffer: &PixelBuffer,
    format: ImageFormat,
    quality: f32,
) -> Result<EncodedImage, WatermarkError> {
    let encode_inner = || -> anyhow::Result<Vec<u8>> {
        let mut out = Vec::new();
        match format {
            ImageFormat::Png => {
                PngEncoder::new(&mut out)
                    .write_image(
                        &buffer.pixels,
                        buffer.width,
                        buffer.height,
                        ExtendedColorType::Rgba8,
                    )
                    .context("PNG encoder rejected pixel buffer")?;
            }
            ImageFormat::Jpeg => {
                let quality_u8 = (quality.clamp(0.0, 1.0) * 100.0).round() as u8;
                JpegEncoder::new_with_quality(&mut out, quality_u8)
                    .write_image(
                        &buffer.pixels,
                        buffer.width,
                        buffer.height,
                        ExtendedColorType::Rgba8,
                    )
                    .context("JPEG encoder rejected pixel buffer")?;
            }
            ImageFormat::WebP => {
                if (quality - crate::consts::JPEG_QUALITY).abs() > f32::EPSILON {
                    warn!("WebP encoder is lossless; ignoring requested quality {quality}");
                }
                WebPEncoder::new_lossless(&mut out)
                    .write_image(
                        &buffer.pixels,
                        buffer.width,
                        buffer.height,
                        ExtendedColorType::Rgba8,
                    )
                    .context("WebP encoder rejected pixel buffer")?;
            }
        }
        Ok(out)
    };

    let bytes = encode_inner().map_err(|e| {
        WatermarkError::with_source(WatermarkErrorKind::EncodeFailure, "failed to encode image", e)
    })?;

    Ok(EncodedImage {
        bytes,
        width: buffer.width,
        height: buffer.height,
        mime_type: format.mime_type(),
    })
}
