/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! Data model (spec.md §3): the row-major RGBA pixel buffer and its derived
//! luminance plane. This is the one type the core algorithms operate on —
//! there is no `ImageInput` union inside the core, only this.

use crate::consts::BLOCK_SIZE;
use crate::error::{WatermarkError, WatermarkErrorKind};

/// Row-major, 8-bit RGBA pixel buffer with known dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Validates `pixels.len() == 4 * width * height` and both dimensions
    /// are non-zero, per spec.md §7's `InputShape` error kind.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, WatermarkError> {
        if width == 0 || height == 0 {
            return Err(WatermarkError::new(
                WatermarkErrorKind::InputShape,
                "width and height must both be non-zero",
            ));
        }
        let expected = 4usize * width as usize * height as usize;
        if pixels.len() != expected {
            return Err(WatermarkError::new(
                WatermarkErrorKind::InputShape,
                format!(
                    "pixel buffer length {} does not match 4*{}*{}={}",
                    pixels.len(),
                    width,
                    height,
                    expected
                ),
            ));
        }
        Ok(PixelBuffer {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        4 * (y as usize * self.width as usize + x as usize)
    }

    /// `Y = 0.299R + 0.587G + 0.114B`, one float per pixel, row-major.
    pub fn luminance(&self) -> Vec<f32> {
        let mut plane = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let i = self.pixel_index(x, y);
                let r = self.pixels[i] as f32;
                let g = self.pixels[i + 1] as f32;
                let b = self.pixels[i + 2] as f32;
                plane.push(0.299 * r + 0.587 * g + 0.114 * b);
            }
        }
        plane
    }

    /// Number of whole, non-overlapping 8x8 blocks anchored at pixel (0,0).
    /// Partial strips on the right/bottom are never blocks.
    pub fn block_grid(&self) -> (u32, u32) {
        (
            self.width / BLOCK_SIZE as u32,
            self.height / BLOCK_SIZE as u32,
        )
    }

    pub fn total_blocks(&self) -> u32 {
        let (bw, bh) = self.block_grid();
        bw * bh
    }

    /// Applies a per-pixel luminance delta uniformly to R, G, B (clamped to
    /// `[0,255]`); alpha is untouched. `delta.len()` must equal
    /// `width * height`.
    pub fn apply_luminance_delta(&self, delta: &[f32]) -> PixelBuffer {
        debug_assert_eq!(delta.len(), self.width as usize * self.height as usize);
        let mut pixels = self.pixels.clone();
        for y in 0..self.height {
            for x in 0..self.width {
                let plane_idx = (y as usize * self.width as usize) + x as usize;
                let d = delta[plane_idx];
                let i = self.pixel_index(x, y);
                for channel in 0..3 {
                    let v = pixels[i + channel] as f32 + d;
                    pixels[i + channel] = v.clamp(0.0, 255.0).round() as u8;
                }
            }
        }
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// Row/column of the block grid for a flat block index, in row-major order.
/// `blocks_wide == 0` (an image narrower than one block) maps everything to
/// `(0, 0)`; callers in that situation never have more than the single
/// zero-padded block at the origin to read from anyway.
pub fn block_row_col(block_index: u32, blocks_wide: u32) -> (u32, u32) {
    if blocks_wide == 0 {
        return (0, 0);
    }
    (block_index / blocks_wide, block_index % blocks_wide)
}

/// Reads the 8x8 window of `plane` for block `(row, col)`. Out-of-bounds
/// pixels (only possible when the plane is smaller than the block grid
/// implies, which does not happen for whole blocks anchored at (0,0), but
/// is handled defensively) read as zero.
pub fn read_block(
    plane: &[f32],
    width: u32,
    height: u32,
    row: u32,
    col: u32,
) -> crate::structs::dct_block::Block {
    use crate::structs::dct_block::Block;
    let mut block = Block::zeroed();
    let base_y = row * BLOCK_SIZE as u32;
    let base_x = col * BLOCK_SIZE as u32;
    for dy in 0..BLOCK_SIZE as u32 {
        for dx in 0..BLOCK_SIZE as u32 {
            let y = base_y + dy;
            let x = base_x + dx;
            let value = if x < width && y < height {
                plane[(y * width + x) as usize]
            } else {
                0.0
            };
            block.set(dy as usize, dx as usize, value);
        }
    }
    block
}

/// Writes an 8x8 block back into `plane` at `(row, col)`, dropping any
/// samples that fall outside the plane bounds (mirrors [`read_block`]'s
/// zero-padding).
pub fn write_block(
    plane: &mut [f32],
    width: u32,
    height: u32,
    row: u32,
    col: u32,
    block: &crate::structs::dct_block::Block,
) {
    let base_y = row * BLOCK_SIZE as u32;
    let base_x = col * BLOCK_SIZE as u32;
    for dy in 0..BLOCK_SIZE as u32 {
        for dx in 0..BLOCK_SIZE as u32 {
            let y = base_y + dy;
            let x = base_x + dx;
            if x < width && y < height {
                plane[(y * width + x) as usize] = block.get(dy as usize, dx as usize);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_length() {
        let err = PixelBuffer::new(2, 2, vec![0u8; 10]).unwrap_err();
        assert_eq!(err.kind, WatermarkErrorKind::InputShape);
    }

    #[test]
    fn rejects_zero_dimension() {
        let err = PixelBuffer::new(0, 4, vec![]).unwrap_err();
        assert_eq!(err.kind, WatermarkErrorKind::InputShape);
    }

    #[test]
    fn gray_image_has_flat_luminance() {
        let buf = PixelBuffer::new(2, 2, vec![128, 128, 128, 255].repeat(4)).unwrap();
        let plane = buf.luminance();
        assert!(plane.iter().all(|&v| (v - 128.0).abs() < 1e-3));
    }

    #[test]
    fn total_blocks_ignores_partial_strips() {
        let buf = PixelBuffer::new(20, 16, vec![0u8; 20 * 16 * 4]).unwrap();
        assert_eq!(buf.block_grid(), (2, 2));
        assert_eq!(buf.total_blocks(), 4);
    }

    #[test]
    fn too_small_image_has_zero_blocks() {
        let buf = PixelBuffer::new(4, 4, vec![0u8; 4 * 4 * 4]).unwrap();
        assert_eq!(buf.total_blocks(), 0);
    }

    #[test]
    fn alpha_and_chroma_preserved_outside_delta() {
        let buf = PixelBuffer::new(1, 1, vec![10, 20, 30, 42]).unwrap();
        let delta = [5.0f32];
        let out = buf.apply_luminance_delta(&delta);
        assert_eq!(out.pixels[3], 42);
        assert_eq!(out.pixels[0], 15);
        assert_eq!(out.pixels[1], 25);
        assert_eq!(out.pixels[2], 35);
    }

    #[test]
    fn delta_clamps_to_byte_range() {
        let buf = PixelBuffer::new(1, 1, vec![250, 250, 250, 255]).unwrap();
        let out = buf.apply_luminance_delta(&[100.0]);
        assert_eq!(out.pixels[0], 255);
    }
}
