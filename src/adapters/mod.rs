/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! Replaceable adapters around the core codec (spec.md §1, §6): image
//! decode/encode and, optionally, a PDF carrier path. None of this module
//! is part of the bit-exact wire contract — only [`crate::codec`] is.

pub mod image_io;

#[cfg(feature = "pdf")]
pub mod pdf;

/// Tagged page-selection variants for adapters that paginate (spec.md §9).
/// Resolution rules: invalid indices are dropped; inverted ranges are
/// normalized; an empty result after resolution is a hard error upstream
/// of the core, not a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PageSelector {
    All,
    First,
    Indices(Vec<usize>),
    Range { from: usize, to: usize },
}

impl PageSelector {
    /// Resolves this selector against a document of `page_count` pages,
    /// applying the normalization rules from spec.md §9.
    pub fn resolve(&self, page_count: usize) -> Vec<usize> {
        match self {
            PageSelector::All => (0..page_count).collect(),
            PageSelector::First => {
                if page_count == 0 {
                    Vec::new()
                } else {
                    vec![0]
                }
            }
            PageSelector::Indices(indices) => indices
                .iter()
                .copied()
                .filter(|&i| i < page_count)
                .collect(),
            PageSelector::Range { from, to } => {
                let (lo, hi) = if from <= to { (*from, *to) } else { (*to, *from) };
                (lo..=hi).filter(|&i| i < page_count).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_selects_every_page() {
        assert_eq!(PageSelector::All.resolve(3), vec![0, 1, 2]);
    }

    #[test]
    fn first_on_empty_document_is_empty() {
        assert_eq!(PageSelector::First.resolve(0), Vec::<usize>::new());
    }

    #[test]
    fn indices_drops_out_of_range() {
        assert_eq!(
            PageSelector::Indices(vec![0, 5, 2]).resolve(3),
            vec![0, 2]
        );
    }

    #[test]
    fn inverted_range_is_normalized() {
        assert_eq!(
            PageSelector::Range { from: 4, to: 1 }.resolve(6),
            vec![1, 2, 3, 4]
        );
    }
}
