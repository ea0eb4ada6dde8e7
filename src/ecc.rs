/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! §4.2 repetition ECC: 3x redundancy with majority-vote decoding and a
//! per-bit confidence derived from how far the vote mean sits from 0.5.

use crate::consts::{PAYLOAD_BITS, REPETITION_FACTOR};

/// Repeats each of the `PAYLOAD_BITS` input bits `REPETITION_FACTOR` times,
/// consecutively, producing `ENCODED_BITS` coded bits.
pub fn encode(bits: &[u8; PAYLOAD_BITS]) -> Vec<u8> {
    let mut coded = Vec::with_capacity(PAYLOAD_BITS * REPETITION_FACTOR);
    for &bit in bits {
        for _ in 0..REPETITION_FACTOR {
            coded.push(bit);
        }
    }
    coded
}

/// Decodes `ENCODED_BITS` soft values in `[0,1]` into `PAYLOAD_BITS` hard
/// bits plus an overall confidence in `[0,1]`.
///
/// Per spec.md §4.2: the mean of each `REPETITION_FACTOR`-sample group
/// decides the bit (ties at exactly 0.5 resolve to `0`); per-bit confidence
/// is `|mean - 0.5| * 2`; overall confidence is the mean of the per-bit
/// confidences.
pub fn decode(soft: &[f32]) -> ([u8; PAYLOAD_BITS], f32) {
    assert_eq!(soft.len(), PAYLOAD_BITS * REPETITION_FACTOR);

    let mut bits = [0u8; PAYLOAD_BITS];
    let mut confidence_sum = 0.0f32;

    for (i, bit) in bits.iter_mut().enumerate() {
        let group = &soft[i * REPETITION_FACTOR..(i + 1) * REPETITION_FACTOR];
        let mean: f32 = group.iter().sum::<f32>() / REPETITION_FACTOR as f32;
        *bit = if mean > 0.5 { 1 } else { 0 };
        confidence_sum += (mean - 0.5).abs() * 2.0;
    }

    (bits, confidence_sum / PAYLOAD_BITS as f32)
}
