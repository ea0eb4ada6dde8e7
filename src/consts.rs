/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! Wire-exposed and tunable constants. The wire-exposed group is part of
//! the interoperability contract: two implementations only produce
//! compatible watermarks if they agree on every constant in this module.

/// Number of bits in a payload fingerprint (wire-exposed).
pub const PAYLOAD_BITS: usize = 64;

/// Side length, in pixels, of one DCT block (wire-exposed).
pub const BLOCK_SIZE: usize = 8;

/// How many times each fingerprint bit is repeated by the ECC layer (wire-exposed).
pub const REPETITION_FACTOR: usize = 3;

/// `PAYLOAD_BITS * REPETITION_FACTOR`.
pub const ENCODED_BITS: usize = PAYLOAD_BITS * REPETITION_FACTOR;

/// Fixed salt mixed into the payload before hashing (wire-exposed).
///
/// Interoperable implementations must use this exact string. It does not
/// provide secrecy on its own; see spec.md §1's "Non-goals".
pub const MODULE_SALT: &str = "lumaprint-v1";

/// The 15 mid-frequency `(u, v)` coefficient positions eligible for
/// embedding, in consumption order (wire-exposed; order matters because the
/// scheduler draws an index into this table, not a position directly).
pub const MID_FREQUENCY_TABLE: [(u8, u8); 15] = [
    (1, 2),
    (2, 1),
    (2, 2),
    (3, 1),
    (1, 3),
    (3, 2),
    (2, 3),
    (3, 3),
    (4, 1),
    (1, 4),
    (4, 2),
    (2, 4),
    (4, 3),
    (3, 4),
    (4, 4),
];

/// Magnitude floor imposed on a selected coefficient at embed time. Tunable:
/// raising it trades visibility for robustness. Not part of the wire
/// contract — a decoder never needs to know the encoder's strength, only
/// the coefficient's sign.
pub const EMBEDDING_STRENGTH: f32 = 12.0;

/// Default minimum confidence for a `verify` match. Caller-overridable.
pub const MATCH_THRESHOLD: f32 = 0.85;

/// Default JPEG/WebP encoder quality, in `[0,1]`.
pub const JPEG_QUALITY: f32 = 0.92;

/// The fixed debug string hashed to seed [`crate::codec::extract_debug`].
/// See spec.md §9's open question: the digest this seed reads back is not
/// the embedded payload's digest.
pub const DEBUG_SEED_STRING: &str = "dummy";
