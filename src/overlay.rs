/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! Visible overlay rendering (spec.md §1, §4.9): a cosmetic layer drawing
//! translucent payload text onto pixels at a chosen anchor. This never
//! participates in verification — it runs after [`crate::codec::embed`] and
//! operates on whole RGB pixels, not DCT coefficients.

use crate::structs::pixel_buffer::PixelBuffer;

/// Where the overlay text is anchored within the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

/// A cosmetic text overlay: what to draw, how opaque, and where.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct VisibleOverlay {
    pub text: String,
    pub anchor: Anchor,
    /// Blend opacity in `[0,1]`; 0 draws nothing, 1 fully replaces the pixel.
    pub opacity: f32,
    /// Width/height, in pixels, of one glyph cell before scaling.
    pub scale: u32,
}

impl Default for VisibleOverlay {
    fn default() -> Self {
        VisibleOverlay {
            text: String::new(),
            anchor: Anchor::BottomRight,
            opacity: 0.35,
            scale: 2,
        }
    }
}

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;

/// Alpha-blends `overlay.text` onto `image` in place, in white, at the
/// requested anchor/opacity. Unsupported characters render as a blank cell.
pub fn apply(image: &mut PixelBuffer, overlay: &VisibleOverlay) {
    if overlay.text.is_empty() || overlay.opacity <= 0.0 {
        return;
    }
    let scale = overlay.scale.max(1);
    let cell_w = (GLYPH_WIDTH as u32 + 1) * scale;
    let cell_h = GLYPH_HEIGHT as u32 * scale;
    let text_w = cell_w * overlay.text.chars().count() as u32;
    let text_h = cell_h;

    let (origin_x, origin_y) = anchor_origin(overlay.anchor, image.width, image.height, text_w, text_h);

    for (char_index, ch) in overlay.text.chars().enumerate() {
        let glyph = glyph_for(ch);
        let base_x = origin_x + char_index as u32 * cell_w;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                    continue;
                }
                blend_cell(
                    image,
                    base_x + col as u32 * scale,
                    origin_y + row as u32 * scale,
                    scale,
                    overlay.opacity,
                );
            }
        }
    }
}

fn anchor_origin(anchor: Anchor, width: u32, height: u32, text_w: u32, text_h: u32) -> (u32, u32) {
    let margin = 4u32.min(width.min(height) / 16);
    match anchor {
        Anchor::TopLeft => (margin, margin),
        Anchor::TopRight => (width.saturating_sub(text_w + margin), margin),
        Anchor::BottomLeft => (margin, height.saturating_sub(text_h + margin)),
        Anchor::BottomRight => (
            width.saturating_sub(text_w + margin),
            height.saturating_sub(text_h + margin),
        ),
        Anchor::Center => (
            width.saturating_sub(text_w) / 2,
            height.saturating_sub(text_h) / 2,
        ),
    }
}

fn blend_cell(image: &mut PixelBuffer, x0: u32, y0: u32, scale: u32, opacity: f32) {
    for dy in 0..scale {
        for dx in 0..scale {
            let x = x0 + dx;
            let y = y0 + dy;
            if x >= image.width || y >= image.height {
                continue;
            }
            let idx = 4 * (y as usize * image.width as usize + x as usize);
            for channel in 0..3 {
                let existing = image.pixels[idx + channel] as f32;
                let blended = existing + (255.0 - existing) * opacity;
                image.pixels[idx + channel] = blended.clamp(0.0, 255.0).round() as u8;
            }
        }
    }
}

/// A minimal 5x7 bitmap font covering uppercase ASCII, digits, space, and a
/// few punctuation marks; each row is 5 bits packed into a `u8`.
fn glyph_for(ch: char) -> [u8; GLYPH_HEIGHT] {
    let upper = ch.to_ascii_uppercase();
    match upper {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b11110, 0b10001, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00001, 0b00001, 0b00001, 0b00001, 0b10001, 0b10001, 0b01110],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10011, 0b10101, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0, 0, 0, 0b11111, 0, 0, 0],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        '_' => [0, 0, 0, 0, 0, 0, 0b11111],
        ' ' => [0; GLYPH_HEIGHT],
        _ => [0; GLYPH_HEIGHT],
    }
}
