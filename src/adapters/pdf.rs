/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! PDF carrier path (spec.md §9): the **attach-carrier** strategy only.
//! A neutral-gray 512x512 carrier image is watermarked via the core codec,
//! PNG-encoded, and attached to the PDF as a named embedded file. The
//! mutually incompatible rasterize-every-page variant is not implemented
//! here — see DESIGN.md's Open Question #2.

use anyhow::Context;
use lopdf::{dictionary, Document, Object, Stream};

use crate::adapters::image_io::{self, ImageFormat};
use crate::codec;
use crate::error::{WatermarkError, WatermarkErrorKind};
use crate::structs::pixel_buffer::PixelBuffer;
use crate::VerifyOptions;

const CARRIER_SIZE: u32 = 512;
const CARRIER_GRAY: u8 = 128;
const EMBEDDED_FILE_NAME: &str = "lumaprint-carrier.png";

fn neutral_gray_carrier() -> PixelBuffer {
    let mut pixels = Vec::with_capacity((CARRIER_SIZE * CARRIER_SIZE * 4) as usize);
    for _ in 0..(CARRIER_SIZE * CARRIER_SIZE) {
        pixels.extend_from_slice(&[CARRIER_GRAY, CARRIER_GRAY, CARRIER_GRAY, 255]);
    }
    PixelBuffer::new(CARRIER_SIZE, CARRIER_SIZE, pixels)
        .expect("carrier dimensions are fixed and always valid")
}

/// Watermarks a freshly synthesized carrier image with `payload` and
/// attaches it to `pdf_bytes` as a named embedded file, returning the
/// rewritten PDF bytes.
pub fn attach_carrier(pdf_bytes: &[u8], payload: &str) -> Result<Vec<u8>, WatermarkError> {
    let inner = || -> anyhow::Result<Vec<u8>> {
        let carrier = neutral_gray_carrier();
        let watermarked = codec::embed(&carrier, payload)
            .map_err(|e| anyhow::anyhow!(e.to_string()))
            .context("embedding into carrier image failed")?;
        let encoded = image_io::encode(&watermarked, ImageFormat::Png, 1.0)
            .map_err(|e| anyhow::anyhow!(e.to_string()))
            .context("PNG-encoding carrier failed")?;

        let mut doc = Document::load_mem(pdf_bytes).context("PDF container could not be parsed")?;

        let file_stream_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "EmbeddedFile",
                "Subtype" => "image/png",
            },
            encoded.bytes,
        ));

        let filespec_id = doc.add_object(dictionary! {
            "Type" => "Filespec",
            "F" => Object::string_literal(EMBEDDED_FILE_NAME),
            "EF" => dictionary! {
                "F" => file_stream_id,
            },
        });

        let names_tree = dictionary! {
            "Names" => vec![
                Object::string_literal(EMBEDDED_FILE_NAME),
                Object::Reference(filespec_id),
            ],
        };
        let embedded_files_id = doc.add_object(names_tree);

        let catalog_id = doc
            .trailer
            .get(b"Root")
            .context("PDF trailer has no /Root entry")?
            .as_reference()
            .context("/Root is not an indirect reference")?;

        let catalog = doc
            .get_object_mut(catalog_id)
            .context("catalog object vanished")?
            .as_dict_mut()
            .context("catalog is not a dictionary")?;
        catalog.set("Names", dictionary! { "EmbeddedFiles" => embedded_files_id });

        let mut out = Vec::new();
        doc.save_to(&mut out).context("failed to serialize PDF")?;
        Ok(out)
    };

    inner().map_err(|e| {
        WatermarkError::with_source(
            WatermarkErrorKind::EncodeFailure,
            "failed to attach watermark carrier to PDF",
            e,
        )
    })
}

/// Recovers and verifies the carrier image previously attached by
/// [`attach_carrier`].
pub fn verify_carrier(
    pdf_bytes: &[u8],
    payload: &str,
    opts: &VerifyOptions,
) -> Result<crate::VerifyOutcome, WatermarkError> {
    let inner = || -> anyhow::Result<crate::VerifyOutcome> {
        let doc = Document::load_mem(pdf_bytes).context("PDF container could not be parsed")?;

        let mut carrier_bytes = None;
        for (_, object) in doc.objects.iter() {
            if let Ok(stream) = object.as_stream() {
                if stream
                    .dict
                    .get(b"Subtype")
                    .ok()
                    .and_then(|o| o.as_name_str().ok())
                    == Some("image/png")
                {
                    carrier_bytes = Some(
                        stream
                            .decompressed_content()
                            .unwrap_or_else(|_| stream.content.clone()),
                    );
                    break;
                }
            }
        }

        let carrier_bytes =
            carrier_bytes.context("no lumaprint carrier stream found in PDF")?;
        let buffer = image_io::decode(&carrier_bytes).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        codec::verify(&buffer, payload, opts).map_err(|e| anyhow::anyhow!(e.to_string()))
    };

    inner().map_err(|e| {
        WatermarkError::with_source(
            WatermarkErrorKind::DecodeFailure,
            "failed to recover watermark carrier from PDF",
            e,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carrier_is_512_square() {
        let carrier = neutral_gray_carrier();
        assert_eq!(carrier.width, CARRIER_SIZE);
        assert_eq!(carrier.height, CARRIER_SIZE);
    }

    #[test]
    fn carrier_roundtrips_through_the_core_codec() {
        let carrier = neutral_gray_carrier();
        let watermarked = codec::embed(&carrier, "pdf-payload").unwrap();
        let outcome = codec::verify(&watermarked, "pdf-payload", &VerifyOptions::default()).unwrap();
        assert!(outcome.is_match);
    }
}
