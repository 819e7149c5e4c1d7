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

//! The growable color buffer behind a packer.

use log::debug;

use crate::*;

/// Row-major grid of colors. Cells start as the empty sentinel.
///
/// Dimensions never exceed `i32::MAX`, so any coordinate inside the grid fits a [`Recti`].
#[derive(Clone, Debug)]
pub struct AtlasGrid {
    width: usize,
    height: usize,
    sentinels: Sentinels,
    cells: Vec<Color4b>,
}

fn filled_cells(width: usize, height: usize, fill: Color4b) -> Result<Vec<Color4b>> {
    let too_large = AtlasError::TooLarge { width, height };
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(too_large);
    }
    let count = width.checked_mul(height).ok_or(too_large)?;
    let mut cells = Vec::new();
    cells.try_reserve_exact(count).map_err(|_| AtlasError::Allocation { cells: count })?;
    cells.resize(count, fill);
    Ok(cells)
}

impl AtlasGrid {
    /// Creates a `width` x `height` grid filled with `sentinels.empty`.
    pub fn new(width: usize, height: usize, sentinels: Sentinels) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AtlasError::InvalidConfig("atlas dimensions must be positive"));
        }
        let cells = filled_cells(width, height, sentinels.empty)?;
        Ok(Self { width, height, sentinels, cells })
    }

    /// Width in cells.
    pub fn width(&self) -> usize { self.width }

    /// Height in cells.
    pub fn height(&self) -> usize { self.height }

    /// Grid size as a [`Dimensioni`].
    pub fn dimension(&self) -> Dimensioni { Dimensioni::new(self.width as i32, self.height as i32) }

    /// Sentinel pair this grid was created with.
    pub fn sentinels(&self) -> &Sentinels { &self.sentinels }

    /// Color at `(x, y)`. Panics when out of bounds.
    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> Color4b {
        assert!(x < self.width && y < self.height);
        self.cells[x + y * self.width]
    }

    /// Overwrites the color at `(x, y)`. Panics when out of bounds.
    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, c: Color4b) {
        assert!(x < self.width && y < self.height);
        self.cells[x + y * self.width] = c;
    }

    /// One row of cells.
    pub fn row(&self, y: usize) -> &[Color4b] { &self.cells[y * self.width..(y + 1) * self.width] }

    /// All cells, row by row.
    pub fn cells(&self) -> &[Color4b] { &self.cells }

    /// Doubles both dimensions. Existing cells keep their coordinates; new cells are empty.
    pub fn grow(&mut self) -> Result<()> {
        let width = self.width.saturating_mul(2);
        let height = self.height.saturating_mul(2);
        let mut cells = filled_cells(width, height, self.sentinels.empty)?;
        for (y, row) in self.cells.chunks_exact(self.width).enumerate() {
            cells[y * width..y * width + self.width].copy_from_slice(row);
        }
        debug!("atlas grown from {}x{} to {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
        self.cells = cells;
        Ok(())
    }
}
