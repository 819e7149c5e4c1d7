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

//! Sentinel colors and the free-space test used by the placement search.
//!
//! A cell is free when it holds the empty sentinel, bit for bit. Nothing else is
//! tracked: a region is free when every one of its cells is free, and that is
//! recomputed on every query.

use crate::*;

/// Color of never-written cells.
pub const EMPTY_COLOR: Color4b = Color4b { x: 0, y: 0, z: 0, w: 0 };

/// Color of cells written by the packer itself (padding, and content that would
/// otherwise read as empty).
pub const PADDING_COLOR: Color4b = Color4b { x: 0, y: 0, z: 0, w: 1 };

/// Bitwise color equality. Colors are opaque to the packer.
#[inline(always)]
pub fn same_color(a: Color4b, b: Color4b) -> bool { a.x == b.x && a.y == b.y && a.z == b.z && a.w == b.w }

/// The two reserved colors of a packer instance.
#[derive(Copy, Clone, Debug)]
pub struct Sentinels {
    /// Marks a cell as available.
    pub empty: Color4b,
    /// Marks a cell as deliberately blank.
    pub padding: Color4b,
}

impl Default for Sentinels {
    fn default() -> Self { Self { empty: EMPTY_COLOR, padding: PADDING_COLOR } }
}

impl Sentinels {
    /// Creates a sentinel pair. Use [`Sentinels::validate`] before packing with it.
    pub fn new(empty: Color4b, padding: Color4b) -> Self { Self { empty, padding } }

    /// The two sentinels must be distinguishable.
    pub fn validate(&self) -> Result<()> {
        if same_color(self.empty, self.padding) {
            return Err(AtlasError::InvalidConfig("empty and padding sentinels must differ"));
        }
        Ok(())
    }

    /// Returns true if `c` is the empty sentinel.
    #[inline(always)]
    pub fn is_empty(&self, c: Color4b) -> bool { same_color(c, self.empty) }

    /// Returns true if `c` is the padding sentinel.
    #[inline(always)]
    pub fn is_padding(&self, c: Color4b) -> bool { same_color(c, self.padding) }

    /// Maps a caller color to what gets stored in the grid.
    /// Content equal to `empty` would look free, so it is kept as `padding`.
    #[inline(always)]
    pub fn store(&self, c: Color4b) -> Color4b {
        if self.is_empty(c) { self.padding } else { c }
    }

    /// Maps a stored color to its output value: padding renders as empty.
    #[inline(always)]
    pub fn render(&self, c: Color4b) -> Color4b {
        if self.is_padding(c) { self.empty } else { c }
    }
}

impl AtlasGrid {
    /// Returns true if the cell at `(x, y)` holds the empty sentinel.
    #[inline(always)]
    pub fn is_free(&self, x: usize, y: usize) -> bool { self.sentinels().is_empty(self.get(x, y)) }

    /// Returns true if every cell of the `width` x `height` region at `(x, y)` is free.
    ///
    /// The region must lie inside the grid; callers check bounds first.
    pub fn region_is_free(&self, x: usize, y: usize, width: usize, height: usize) -> bool {
        debug_assert!(x + width <= self.width() && y + height <= self.height());
        (y..y + height).all(|row| self.row(row)[x..x + width].iter().all(|c| self.sentinels().is_empty(*c)))
    }
}
