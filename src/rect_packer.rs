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

//! First-fit placement search. Finds the first free padded region in scan order.

use log::trace;

use crate::*;

/// Edge accessors and overlap tests for integer rectangles.
pub trait RectTrait {
    /// Smallest row inside the rectangle.
    fn top(&self) -> i32;
    /// First row past the rectangle.
    fn bottom(&self) -> i32;
    /// Smallest column inside the rectangle.
    fn left(&self) -> i32;
    /// First column past the rectangle.
    fn right(&self) -> i32;

    /// Number of cells covered.
    fn cell_count(&self) -> i64 { (self.bottom() - self.top()) as i64 * (self.right() - self.left()) as i64 }

    /// Check if intersection of two rectangles is non empty.
    fn overlaps(&self, other: &Self) -> bool {
        self.left() < other.right() && other.left() < self.right() && self.top() < other.bottom() && other.top() < self.bottom()
    }

    /// Check if `other` rectangle is completely inside `self`.
    fn contains_rect(&self, other: &Self) -> bool {
        self.left() <= other.left() && self.right() >= other.right() && self.top() <= other.top() && self.bottom() >= other.bottom()
    }

    /// Check if given pixel is inside this rectangle.
    fn contains_cell(&self, x: i32, y: i32) -> bool { self.left() <= x && x < self.right() && self.top() <= y && y < self.bottom() }
}

impl RectTrait for Recti {
    #[inline(always)]
    fn top(&self) -> i32 { self.y }

    #[inline(always)]
    fn bottom(&self) -> i32 { self.y + self.height }

    #[inline(always)]
    fn left(&self) -> i32 { self.x }

    #[inline(always)]
    fn right(&self) -> i32 { self.x + self.width }
}

/// Size of a block once a `padding` border is added on every side.
/// `None` when the result is not addressable by the grid.
pub fn padded_extent(width: usize, height: usize, padding: usize) -> Option<(usize, usize)> {
    let border = padding.checked_mul(2)?;
    let width = width.checked_add(border)?;
    let height = height.checked_add(border)?;
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return None;
    }
    Some((width, height))
}

/// Position where the next search resumes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanCursor {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl ScanCursor {
    /// Top-left cell of the grid.
    pub const ORIGIN: ScanCursor = ScanCursor { x: 0, y: 0 };

    /// Returns true if the cursor sits on the origin.
    pub fn is_origin(&self) -> bool { *self == Self::ORIGIN }

    fn is_past(&self, grid: &AtlasGrid) -> bool { self.x >= grid.width() && self.y >= grid.height() }
}

/// First-fit search state. Only the scan cursor survives between calls.
#[derive(Clone, Debug, Default)]
pub struct FirstFit {
    cursor: ScanCursor,
}

impl FirstFit {
    /// Creates a search starting at the origin.
    pub fn new() -> Self { Self::default() }

    /// Where the next search starts.
    pub fn cursor(&self) -> ScanCursor { self.cursor }

    /// Finds room for a `width` x `height` block surrounded by `padding` cells on every side.
    ///
    /// Returns the padded region, or `None` when the grid has no room for it. A failed
    /// search from the cursor is repeated once from the origin before giving up, so the
    /// verdict is the same as a full scan. The grid is never resized here.
    pub fn find_region(&mut self, grid: &AtlasGrid, width: usize, height: usize, padding: usize) -> Option<Recti> {
        let (pw, ph) = padded_extent(width, height, padding)?;

        if self.cursor.is_past(grid) {
            trace!("scan cursor ({}, {}) outside the atlas, back to origin", self.cursor.x, self.cursor.y);
            self.cursor = ScanCursor::ORIGIN;
        }

        let mut found = Self::scan(grid, self.cursor, pw, ph);
        if found.is_none() && !self.cursor.is_origin() {
            self.cursor = ScanCursor::ORIGIN;
            found = Self::scan(grid, self.cursor, pw, ph);
        }

        let (x, y) = found?;
        self.cursor = ScanCursor { x: x + pw, y };
        Some(Recti::new(x as i32, y as i32, pw as i32, ph as i32))
    }

    // row-major from `start`, restricted to columns >= start.x and rows >= start.y
    fn scan(grid: &AtlasGrid, start: ScanCursor, pw: usize, ph: usize) -> Option<(usize, usize)> {
        for y in start.y..grid.height() {
            // every later row is lower still
            if y + ph > grid.height() {
                return None;
            }
            for x in start.x..grid.width() {
                if !grid.is_free(x, y) {
                    continue;
                }
                // the coarse check keeps the per-cell check inside the grid
                if x + pw > grid.width() {
                    break;
                }
                if grid.region_is_free(x, y, pw, ph) {
                    return Some((x, y));
                }
            }
        }
        None
    }
}
