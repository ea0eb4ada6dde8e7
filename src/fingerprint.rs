/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! §4.1 payload fingerprint: salted SHA-256, truncated to the high-order 64 bits.

use sha2::{Digest as _, Sha256};

use crate::consts::{MODULE_SALT, PAYLOAD_BITS};

/// An 8-byte (64-bit) payload fingerprint, high-order-first.
pub type Digest = [u8; PAYLOAD_BITS / 8];

/// Derives the 64-bit fingerprint of `payload`.
///
/// Deterministic and infallible: `derive(p)` called twice returns equal
/// bytes, and the empty string hashes like any other payload.
pub fn derive(payload: &str) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hasher.update(MODULE_SALT.as_bytes());
    let full = hasher.finalize();

    let mut digest = [0u8; PAYLOAD_BITS / 8];
    digest.copy_from_slice(&full[..PAYLOAD_BITS / 8]);
    digest
}

/// Expands a digest into its `PAYLOAD_BITS` raw bits, MSB-first within each
/// byte: bit `i` comes from byte `i / 8`, shift `7 - (i % 8)`.
pub fn digest_to_bits(digest: &Digest) -> [u8; PAYLOAD_BITS] {
    let mut bits = [0u8; PAYLOAD_BITS];
    for (i, bit) in bits.iter_mut().enumerate() {
        let byte = digest[i / 8];
        *bit = (byte >> (7 - (i % 8))) & 1;
    }
    bits
}

/// Packs `PAYLOAD_BITS` raw bits back into a digest, MSB-first within each byte.
pub fn bits_to_digest(bits: &[u8; PAYLOAD_BITS]) -> Digest {
    let mut digest = [0u8; PAYLOAD_BITS / 8];
    for (i, &bit) in bits.iter().enumerate() {
        if bit != 0 {
            digest[i / 8] |= 1 << (7 - (i % 8));
        }
    }
    digest
}

/// Renders a digest as lowercase hex, for diagnostics and `verify`'s
/// optional `recoveredDigestHex` output.
pub fn to_hex(digest: &Digest) -> String {
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_stability() {
        let a = derive("hello world");
        let b = derive("hello world");
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn empty_payload_hashes_normally() {
        let digest = derive("");
        assert_eq!(digest.len(), 8);
    }

    #[test]
    fn salt_sensitivity() {
        use crate::consts::MODULE_SALT;
        let a = derive("payload");
        let b = derive(&format!("payload{}", MODULE_SALT));
        assert_ne!(a, b);
    }

    #[test]
    fn bit_roundtrip() {
        let digest = derive("round-trip-me");
        let bits = digest_to_bits(&digest);
        let back = bits_to_digest(&bits);
        assert_eq!(digest, back);
    }

    #[test]
    fn bit_order_is_msb_first() {
        let digest: Digest = [0b1000_0000, 0, 0, 0, 0, 0, 0, 0];
        let bits = digest_to_bits(&digest);
        assert_eq!(bits[0], 1);
        assert!(bits[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn hex_encoding() {
        let digest: Digest = [0xde, 0xad, 0xbe, 0xef, 0x00, 0x11, 0x22, 0x33];
        assert_eq!(to_hex(&digest), "deadbeef00112233");
    }
}
