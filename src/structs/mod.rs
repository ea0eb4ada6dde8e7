/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! Core data-structure-bearing pieces of the codec: the PRNG, the block
//! scheduler built on top of it, the DCT/IDCT transform, and the pixel
//! buffer / luminance plane data model.

pub mod dct_block;
pub mod pixel_buffer;
pub mod prng;
pub mod scheduler;
