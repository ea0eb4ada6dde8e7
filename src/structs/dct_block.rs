/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! §4.5 separable 8x8 DCT-II / IDCT over the luminance channel.

use std::sync::OnceLock;
use unroll::unroll_for_loops;

use crate::consts::BLOCK_SIZE;

/// A single 8x8 luminance window, row-major. Used both for raw pixel
/// windows (pre-DCT) and for DCT-domain coefficient matrices (post-DCT).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block(pub [[f32; BLOCK_SIZE]; BLOCK_SIZE]);

impl Block {
    pub const fn zeroed() -> Self {
        Block([[0.0; BLOCK_SIZE]; BLOCK_SIZE])
    }

    #[inline]
    pub fn get(&self, u: usize, v: usize) -> f32 {
        self.0[u][v]
    }

    #[inline]
    pub fn set(&mut self, u: usize, v: usize, value: f32) {
        self.0[u][v] = value;
    }
}

fn cosine_table() -> &'static [[f32; BLOCK_SIZE]; BLOCK_SIZE] {
    static TABLE: OnceLock<[[f32; BLOCK_SIZE]; BLOCK_SIZE]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [[0.0f32; BLOCK_SIZE]; BLOCK_SIZE];
        for (i, row) in table.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (((2 * i + 1) as f32 * j as f32 * std::f32::consts::PI) / 16.0).cos();
            }
        }
        table
    })
}

#[inline]
fn c(k: usize) -> f32 {
    if k == 0 {
        std::f32::consts::FRAC_1_SQRT_2
    } else {
        1.0
    }
}

/// Forward DCT-II: row pass then column pass, each scaled by `0.5 * C(_)`.
#[unroll_for_loops]
pub fn forward_dct(block: &Block) -> Block {
    let cos = cosine_table();
    let mut temp = Block::zeroed();
    for u in 0..8 {
        for v in 0..8 {
            let mut sum = 0.0f32;
            for x in 0..8 {
                sum += block.get(x, v) * cos[x][u];
            }
            temp.set(u, v, 0.5 * c(u) * sum);
        }
    }

    let mut result = Block::zeroed();
    for u in 0..8 {
        for v in 0..8 {
            let mut sum = 0.0f32;
            for y in 0..8 {
                sum += temp.get(u, y) * cos[y][v];
            }
            result.set(u, v, 0.5 * c(v) * sum);
        }
    }
    result
}

/// Inverse DCT: the transpose of the forward transform, with the same `C`
/// multipliers applied on the summation side.
#[unroll_for_loops]
pub fn inverse_dct(block: &Block) -> Block {
    let cos = cosine_table();
    let mut temp = Block::zeroed();
    for x in 0..8 {
        for v in 0..8 {
            let mut sum = 0.0f32;
            for u in 0..8 {
                sum += c(u) * block.get(u, v) * cos[x][u];
            }
            temp.set(x, v, 0.5 * sum);
        }
    }

    let mut result = Block::zeroed();
    for x in 0..8 {
        for y in 0..8 {
            let mut sum = 0.0f32;
            for v in 0..8 {
                sum += c(v) * temp.get(x, v) * cos[y][v];
            }
            result.set(x, y, 0.5 * sum);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn roundtrip_constant_block() {
        let block = Block([[128.0; 8]; 8]);
        let dct = forward_dct(&block);
        let back = inverse_dct(&dct);
        for u in 0..8 {
            for v in 0..8 {
                assert!((back.get(u, v) - block.get(u, v)).abs() < 1.0);
            }
        }
    }

    #[test]
    fn roundtrip_random_blocks() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let mut block = Block::zeroed();
            for row in block.0.iter_mut() {
                for cell in row.iter_mut() {
                    *cell = rng.gen_range(0.0..255.0);
                }
            }
            let dct = forward_dct(&block);
            let back = inverse_dct(&dct);
            for u in 0..8 {
                for v in 0..8 {
                    assert!(
                        (back.get(u, v) - block.get(u, v)).abs() < 1.0,
                        "mismatch at ({u},{v}): {} vs {}",
                        back.get(u, v),
                        block.get(u, v)
                    );
                }
            }
        }
    }

    #[test]
    fn dc_coefficient_reflects_block_mean() {
        let mut block = Block::zeroed();
        for row in block.0.iter_mut() {
            for cell in row.iter_mut() {
                *cell = 100.0;
            }
        }
        let dct = forward_dct(&block);
        // DC term: 0.5 * C(0) * 0.5 * C(0) * sum of all 64 samples = mean * 8.
        assert!((dct.get(0, 0) - 800.0).abs() < 1e-2);
        for u in 0..8 {
            for v in 0..8 {
                if (u, v) != (0, 0) {
                    assert!(dct.get(u, v).abs() < 1e-2);
                }
            }
        }
    }
}
