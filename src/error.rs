/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! Error taxonomy for the public API (spec.md §7). Core functions never
//! recover internally; an adapter failure always surfaces as one
//! [`WatermarkError`] with a [`WatermarkErrorKind`] and a human-readable
//! message. "Watermark not found" is never an error — see [`crate::codec::verify`].

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkErrorKind {
    /// Pixel buffer length does not match `4 * width * height`, or a
    /// dimension is zero.
    InputShape,
    /// The image-decode adapter refused to produce an RGBA buffer.
    DecodeFailure,
    /// The image-encode adapter refused to produce the requested format.
    EncodeFailure,
    /// The host hashing primitive failed.
    HashFailure,
}

impl fmt::Display for WatermarkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WatermarkErrorKind::InputShape => "input-shape",
            WatermarkErrorKind::DecodeFailure => "decode-failure",
            WatermarkErrorKind::EncodeFailure => "encode-failure",
            WatermarkErrorKind::HashFailure => "hash-failure",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct WatermarkError {
    pub kind: WatermarkErrorKind,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl WatermarkError {
    pub fn new(kind: WatermarkErrorKind, message: impl Into<String>) -> Self {
        WatermarkError {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an adapter-boundary `anyhow::Error` chain, preserving its
    /// display text as the source without exposing the `anyhow` type
    /// through the public API.
    pub fn with_source(
        kind: WatermarkErrorKind,
        message: impl Into<String>,
        source: anyhow::Error,
    ) -> Self {
        WatermarkError {
            kind,
            message: message.into(),
            source: Some(Box::<dyn std::error::Error + Send + Sync>::from(
                source.to_string(),
            )),
        }
    }
}
