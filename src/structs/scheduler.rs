/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! §4.4 block scheduler: turns a [`XorshiftPrng`] stream into a deterministic
//! sequence of `(block index, coefficient index)` pairs, one pair per sample
//! consumed by embed and extract, in lock-step.

use crate::consts::{ENCODED_BITS, MID_FREQUENCY_TABLE};

use super::prng::XorshiftPrng;

/// Either a precomputed shuffled block-index list, or a signal to draw a
/// fresh index per sample (the `⊥` case of spec.md §4.4).
enum Assignment {
    Shuffled(Vec<u32>),
    DrawPerSample,
}

/// Deterministically assigns blocks and mid-frequency coefficients to each
/// of the `ENCODED_BITS` coded bits. Construct once per embed/extract call
/// and drain it with [`Scheduler::next_sample`] in bit-index order, exactly
/// `blocks_per_bit` times per bit — reordering the draws desynchronizes the
/// PRNG stream between embed and extract.
pub struct Scheduler {
    prng: XorshiftPrng,
    total_blocks: u32,
    assignment: Assignment,
    cursor: usize,
    pub blocks_per_bit: usize,
}

/// One `(block, coefficient)` draw, in the order embed and extract must
/// both consume them.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub block_index: u32,
    pub coefficient: (u8, u8),
}

impl Scheduler {
    pub fn new(mut prng: XorshiftPrng, total_blocks: u32) -> Self {
        let total = total_blocks as usize;
        let blocks_per_bit = (total / ENCODED_BITS).max(1);

        let assignment = if blocks_per_bit * ENCODED_BITS <= total {
            let mut indices: Vec<u32> = (0..total_blocks).collect();
            // Fisher-Yates, swap index floor(prng.next() * (i+1)) for i from total-1 down to 1.
            for i in (1..indices.len()).rev() {
                let j = prng.next_int(i + 1);
                indices.swap(i, j);
            }
            indices.truncate(blocks_per_bit * ENCODED_BITS);
            Assignment::Shuffled(indices)
        } else {
            Assignment::DrawPerSample
        };

        Scheduler {
            prng,
            total_blocks,
            assignment,
            cursor: 0,
            blocks_per_bit,
        }
    }

    /// Draws the next `(block, coefficient)` sample, consuming the PRNG
    /// stream in the shared embed/extract order.
    pub fn next_sample(&mut self) -> Sample {
        let block_index = match &self.assignment {
            Assignment::Shuffled(indices) => {
                let idx = indices[self.cursor];
                self.cursor += 1;
                idx
            }
            Assignment::DrawPerSample => self.prng.next_int(self.total_blocks as usize) as u32,
        };
        let coefficient = MID_FREQUENCY_TABLE[self.prng.next_int(MID_FREQUENCY_TABLE.len())];
        Sample {
            block_index,
            coefficient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_per_bit_is_at_least_one() {
        let prng = XorshiftPrng::from_seed_bytes(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let scheduler = Scheduler::new(prng, 4);
        assert_eq!(scheduler.blocks_per_bit, 1);
    }

    #[test]
    fn falls_back_to_draw_per_sample_when_blocks_scarce() {
        let prng = XorshiftPrng::from_seed_bytes(&[1, 2, 3, 4, 5, 6, 7, 8]);
        // ENCODED_BITS = 192; with only 10 total blocks, blocks_per_bit=1 but
        // 1*192 > 10, so this must fall back to draw-per-sample.
        let mut scheduler = Scheduler::new(prng, 10);
        for _ in 0..ENCODED_BITS {
            let sample = scheduler.next_sample();
            assert!(sample.block_index < 10);
        }
    }

    #[test]
    fn shuffled_assignment_never_exceeds_total_blocks() {
        let prng = XorshiftPrng::from_seed_bytes(&[9, 9, 9, 9, 9, 9, 9, 9]);
        let total_blocks = 4096u32; // blocks_per_bit = 21, 21*192=4032 <= 4096
        let mut scheduler = Scheduler::new(prng, total_blocks);
        assert_eq!(scheduler.blocks_per_bit, 21);
        for _ in 0..(scheduler.blocks_per_bit * ENCODED_BITS) {
            let sample = scheduler.next_sample();
            assert!(sample.block_index < total_blocks);
        }
    }

    #[test]
    fn embed_and_extract_schedulers_agree() {
        let seed = [3u8, 1, 4, 1, 5, 9, 2, 6];
        let mut embed = Scheduler::new(XorshiftPrng::from_seed_bytes(&seed), 4096);
        let mut extract = Scheduler::new(XorshiftPrng::from_seed_bytes(&seed), 4096);
        for _ in 0..500 {
            let a = embed.next_sample();
            let b = extract.next_sample();
            assert_eq!(a.block_index, b.block_index);
            assert_eq!(a.coefficient, b.coefficient);
        }
    }
}
