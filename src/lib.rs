//
// Copyright 2023-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//

#![deny(missing_docs)]
//! `atlas-packer` packs independently sized blocks of pixels into one growable texture atlas.
//!
//! Blocks are placed first-fit in scan order, each surrounded by a blank padding border.
//! The atlas starts tiny and doubles whenever a block does not fit, keeping every earlier
//! placement where it was. Free space is detected with an exact sentinel color, so no
//! free-list is kept: the grid itself is the only state.
//!
//! ```
//! use atlas_packer::*;
//!
//! let mut packer = AtlasPacker::new(PackerConfig::default()).unwrap();
//! let red = color4b(0xFF, 0, 0, 0xFF);
//! let rect = packer.add(4, 4, &[red; 16]).unwrap();
//! assert_eq!((rect.x, rect.y), (2, 2));
//!
//! let atlas = packer.finalize();
//! assert_eq!((atlas.width(), atlas.height()), (8, 8));
//! ```

mod atlas;
mod error;
mod grid;
mod occupancy;
mod packer;
mod rect_packer;
mod sprite;

pub use atlas::*;
pub use error::{AtlasError, Result};
pub use grid::AtlasGrid;
pub use occupancy::*;
pub use packer::*;
pub use rect_packer::*;
pub use rs_math3d::*;
pub use sprite::*;

/// Source bytes for [`load_image_bytes`].
pub enum ImageSource<'a> {
    /// Raw RGBA pixels laid out as width × height × 4 bytes.
    Raw {
        /// Width in pixels.
        width: usize,
        /// Height in pixels.
        height: usize,
        /// Pixel buffer in RGBA8888 format.
        pixels: &'a [u8],
    },
    #[cfg(feature = "png_source")]
    /// PNG-compressed byte slice (requires the `builder` or `png_source` feature).
    /// Grayscale and RGB images are expanded to opaque RGBA (alpha = 255).
    Png {
        /// Compressed PNG payload.
        bytes: &'a [u8],
    },
}

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Expands (or shrinks) a rectangle uniformly on all sides.
pub fn expand_rect(r: Recti, n: i32) -> Recti { rect(r.x - n, r.y - n, r.width + n * 2, r.height + n * 2) }
