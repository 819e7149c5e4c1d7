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

//! The atlas packer: places blocks into a growing grid and finalizes it into pixels.

use log::trace;

use crate::*;

/// Padding used when none is configured.
pub const DEFAULT_PADDING: usize = 2;

/// Settings fixed for the lifetime of a packer.
#[derive(Copy, Clone, Debug)]
pub struct PackerConfig {
    /// Width of the blank border kept around every block.
    pub padding: usize,
    /// Width of the grid before the first growth.
    pub initial_width: usize,
    /// Height of the grid before the first growth.
    pub initial_height: usize,
    /// Empty and padding marker colors.
    pub sentinels: Sentinels,
}

impl Default for PackerConfig {
    fn default() -> Self { Self { padding: DEFAULT_PADDING, initial_width: 1, initial_height: 1, sentinels: Sentinels::default() } }
}

impl PackerConfig {
    /// Returns a copy with the given padding.
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Returns a copy starting from a `width` x `height` grid.
    pub fn with_initial_size(mut self, width: usize, height: usize) -> Self {
        self.initial_width = width;
        self.initial_height = height;
        self
    }

    /// Returns a copy using other sentinel colors.
    pub fn with_sentinels(mut self, sentinels: Sentinels) -> Self {
        self.sentinels = sentinels;
        self
    }
}

/// Packs blocks of colors into one atlas.
///
/// Every [`AtlasPacker::add`] finds the first free spot in scan order that can hold the
/// block plus its padding border, doubling the atlas until one exists. Placed blocks
/// never move, so returned rectangles stay valid in the finalized atlas.
#[derive(Clone, Debug)]
pub struct AtlasPacker {
    config: PackerConfig,
    grid: AtlasGrid,
    search: FirstFit,
    placed: usize,
}

impl AtlasPacker {
    /// Creates an empty packer.
    pub fn new(config: PackerConfig) -> Result<Self> {
        config.sentinels.validate()?;
        let grid = AtlasGrid::new(config.initial_width, config.initial_height, config.sentinels)?;
        Ok(Self { config, grid, search: FirstFit::new(), placed: 0 })
    }

    /// Current configuration.
    pub fn config(&self) -> PackerConfig { self.config }

    /// Border width around every block.
    pub fn padding(&self) -> usize { self.config.padding }

    /// Changes the padding. Only allowed before the first block is placed.
    pub fn set_padding(&mut self, padding: usize) -> Result<()> {
        if self.placed > 0 {
            return Err(AtlasError::PaddingLocked { placed: self.placed });
        }
        self.config.padding = padding;
        Ok(())
    }

    /// Current atlas size.
    pub fn dimension(&self) -> Dimensioni { self.grid.dimension() }

    /// Number of blocks placed so far.
    pub fn placed(&self) -> usize { self.placed }

    /// Read access to the working grid, sentinels included.
    pub fn grid(&self) -> &AtlasGrid { &self.grid }

    /// Places a `width` x `height` block given as row-major `pixels`.
    ///
    /// Returns the rectangle covered by the block's content (padding excluded). Pixels
    /// equal to the empty sentinel come back as empty after [`AtlasPacker::finalize`].
    pub fn add(&mut self, width: usize, height: usize, pixels: &[Color4b]) -> Result<Recti> {
        if width == 0 || height == 0 {
            return Err(AtlasError::EmptyRequest { width, height });
        }
        let padding = self.config.padding;
        if padded_extent(width, height, padding).is_none() {
            return Err(AtlasError::TooLarge { width, height });
        }
        let expected = width.checked_mul(height).ok_or(AtlasError::TooLarge { width, height })?;
        if pixels.len() != expected {
            return Err(AtlasError::PixelCount { expected, found: pixels.len() });
        }

        let region = loop {
            match self.search.find_region(&self.grid, width, height, padding) {
                Some(region) => break region,
                None => self.grid.grow()?,
            }
        };

        let content = expand_rect(region, -(padding as i32));
        self.write_block(region, content, pixels);
        self.placed += 1;
        trace!("placed {}x{} block at ({}, {})", width, height, content.x, content.y);
        Ok(content)
    }

    /// Places a block given as rows of equal length.
    pub fn add_rows<R: AsRef<[Color4b]>>(&mut self, rows: &[R]) -> Result<Recti> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut pixels = Vec::with_capacity(width.saturating_mul(height));
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != width {
                return Err(AtlasError::RaggedRows { row, expected: width, found: r.len() });
            }
            pixels.extend_from_slice(r);
        }
        self.add(width, height, &pixels)
    }

    // cells of `region` outside `content` form the padding border
    fn write_block(&mut self, region: Recti, content: Recti, pixels: &[Color4b]) {
        let sentinels = self.config.sentinels;
        let width = content.width as usize;
        for y in region.top()..region.bottom() {
            for x in region.left()..region.right() {
                let c = if content.contains_cell(x, y) {
                    let (cx, cy) = ((x - content.x) as usize, (y - content.y) as usize);
                    sentinels.store(pixels[cx + cy * width])
                } else {
                    sentinels.padding
                };
                self.grid.set(x as usize, y as usize, c);
            }
        }
    }

    /// Consumes the packer and renders the atlas. Padding cells become empty.
    pub fn finalize(self) -> PackedAtlas {
        let sentinels = self.config.sentinels;
        let pixels = self.grid.cells().iter().map(|c| sentinels.render(*c)).collect();
        PackedAtlas::new(self.grid.width(), self.grid.height(), pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn solid(width: usize, height: usize, c: Color4b) -> Vec<Color4b> { vec![c; width * height] }

    fn red() -> Color4b { color4b(0xFF, 0, 0, 0xFF) }

    fn blue() -> Color4b { color4b(0, 0, 0xFF, 0xFF) }

    fn packer(padding: usize) -> AtlasPacker { AtlasPacker::new(PackerConfig::default().with_padding(padding)).unwrap() }

    #[test]
    fn padded_block_grows_to_eight() {
        let mut p = packer(2);
        let first = p.add(4, 4, &solid(4, 4, red())).unwrap();
        assert_eq!((first.x, first.y, first.width, first.height), (2, 2, 4, 4));
        let dim = p.dimension();
        assert_eq!((dim.width, dim.height), (8, 8));

        let second = p.add(4, 4, &solid(4, 4, blue())).unwrap();
        assert!(!expand_rect(first, 2).overlaps(&expand_rect(second, 2)));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn single_empty_pixel_without_padding() {
        let mut p = packer(0);
        let r = p.add(1, 1, &[EMPTY_COLOR]).unwrap();
        assert_eq!((r.x, r.y), (0, 0));
        let dim = p.dimension();
        assert_eq!((dim.width, dim.height), (1, 1));

        let atlas = p.finalize();
        assert_eq!((atlas.width(), atlas.height()), (1, 1));
        assert!(same_color(atlas.pixel(0, 0), EMPTY_COLOR));
    }

    #[test]
    fn exact_size_request_does_not_grow() {
        let config = PackerConfig::default().with_padding(0).with_initial_size(4, 2);
        let mut p = AtlasPacker::new(config).unwrap();
        p.add(4, 2, &solid(4, 2, red())).unwrap();
        let dim = p.dimension();
        assert_eq!((dim.width, dim.height), (4, 2));
    }

    #[test]
    fn larger_than_initial_grid_grows() {
        let mut p = packer(0);
        p.add(2, 1, &solid(2, 1, red())).unwrap();
        let dim = p.dimension();
        assert_eq!((dim.width, dim.height), (2, 2));
    }

    #[test]
    fn invalid_requests_are_rejected_before_search() {
        let mut p = packer(2);
        assert!(matches!(p.add(0, 3, &[]), Err(AtlasError::EmptyRequest { .. })));
        assert!(matches!(p.add(3, 0, &[]), Err(AtlasError::EmptyRequest { .. })));
        assert!(matches!(p.add(2, 2, &[red(); 3]), Err(AtlasError::PixelCount { expected: 4, found: 3 })));
        let rows: [&[Color4b]; 2] = [&[red(), red()], &[red()]];
        assert!(matches!(p.add_rows(&rows), Err(AtlasError::RaggedRows { row: 1, .. })));
        let no_rows: [&[Color4b]; 0] = [];
        assert!(matches!(p.add_rows(&no_rows), Err(AtlasError::EmptyRequest { .. })));
        assert_eq!(p.placed(), 0);
        let dim = p.dimension();
        assert_eq!((dim.width, dim.height), (1, 1));
    }

    #[test]
    fn unaddressable_request_is_too_large() {
        let mut p = packer(1);
        let res = p.add(i32::MAX as usize, 1, &[]);
        assert!(matches!(res, Err(AtlasError::TooLarge { .. })));
    }

    #[test]
    fn padding_is_locked_after_first_block() {
        let mut p = packer(2);
        p.set_padding(1).unwrap();
        assert_eq!(p.padding(), 1);
        p.add(1, 1, &[red()]).unwrap();
        assert!(matches!(p.set_padding(3), Err(AtlasError::PaddingLocked { placed: 1 })));
        assert_eq!(p.padding(), 1);
    }

    #[test]
    fn equal_sentinels_are_rejected() {
        let config = PackerConfig::default().with_sentinels(Sentinels::new(red(), red()));
        assert!(matches!(AtlasPacker::new(config), Err(AtlasError::InvalidConfig(_))));
    }

    #[test]
    fn padding_border_is_written_then_cleared() {
        let mut p = packer(2);
        let content = p.add(3, 2, &solid(3, 2, red())).unwrap();
        let padded = expand_rect(content, 2);
        let s = *p.grid().sentinels();
        for y in padded.top()..padded.bottom() {
            for x in padded.left()..padded.right() {
                let c = p.grid().get(x as usize, y as usize);
                if content.contains_cell(x, y) {
                    assert!(same_color(c, red()));
                } else {
                    assert!(s.is_padding(c), "({}, {}) should be padding", x, y);
                }
            }
        }

        let atlas = p.finalize();
        for y in padded.top()..padded.bottom() {
            for x in padded.left()..padded.right() {
                let c = atlas.pixel(x as usize, y as usize);
                if content.contains_cell(x, y) {
                    assert!(same_color(c, red()));
                } else {
                    assert!(same_color(c, EMPTY_COLOR));
                }
            }
        }
    }

    #[test]
    fn empty_colored_content_round_trips_as_empty() {
        let mut p = packer(1);
        let pixels = [red(), EMPTY_COLOR, EMPTY_COLOR, blue()];
        let r = p.add(2, 2, &pixels).unwrap();
        let (x, y) = (r.x as usize, r.y as usize);
        assert!(p.grid().sentinels().is_padding(p.grid().get(x + 1, y)));

        // the stored padding keeps the cell occupied for later searches
        p.add(1, 1, &[red()]).unwrap();
        let atlas = p.finalize();
        assert!(same_color(atlas.pixel(x, y), red()));
        assert!(same_color(atlas.pixel(x + 1, y), EMPTY_COLOR));
        assert!(same_color(atlas.pixel(x, y + 1), EMPTY_COLOR));
        assert!(same_color(atlas.pixel(x + 1, y + 1), blue()));
    }

    #[test]
    fn rows_are_placed_row_major() {
        let mut p = packer(0);
        let rows = vec![vec![red(), blue()], vec![blue(), red()], vec![red(), red()]];
        let r = p.add_rows(&rows).unwrap();
        assert_eq!((r.width, r.height), (2, 3));
        let atlas = p.finalize();
        for (dy, row) in rows.iter().enumerate() {
            for (dx, c) in row.iter().enumerate() {
                assert!(same_color(atlas.pixel(r.x as usize + dx, r.y as usize + dy), *c));
            }
        }
    }

    #[test]
    fn growth_preserves_earlier_placements() {
        let mut p = packer(1);
        let first = p.add(3, 3, &solid(3, 3, red())).unwrap();
        let before = p.grid().clone();
        let mut grew = false;
        for _ in 0..8 {
            let old = p.dimension();
            p.add(5, 2, &solid(5, 2, blue())).unwrap();
            grew |= p.dimension().width != old.width;
        }
        assert!(grew);
        for y in 0..before.height() {
            for x in 0..before.width() {
                let old = before.get(x, y);
                if !before.sentinels().is_empty(old) {
                    assert!(same_color(p.grid().get(x, y), old));
                }
            }
        }
        let atlas = p.finalize();
        assert!(same_color(atlas.pixel(first.x as usize, first.y as usize), red()));
    }

    #[test]
    fn random_blocks_never_overlap() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for padding in [0usize, 1, 2] {
            let mut p = packer(padding);
            let mut placed: Vec<(Recti, Color4b)> = Vec::new();
            for i in 0..40u8 {
                let w = rng.random_range(1..=9);
                let h = rng.random_range(1..=9);
                let c = color4b(i + 1, 0x80, 0x40, 0xFF);
                let r = p.add(w, h, &solid(w, h, c)).unwrap();
                assert_eq!((r.width, r.height), (w as i32, h as i32));
                placed.push((r, c));
            }

            let pad = padding as i32;
            let dim = p.dimension();
            let bounds = Recti::new(0, 0, dim.width, dim.height);
            let covered: i64 = placed.iter().map(|(r, _)| expand_rect(*r, pad).cell_count()).sum();
            assert!(covered <= bounds.cell_count());
            for (i, (a, _)) in placed.iter().enumerate() {
                assert!(bounds.contains_rect(&expand_rect(*a, pad)));
                for (b, _) in &placed[i + 1..] {
                    assert!(!a.overlaps(b));
                    assert!(!expand_rect(*a, pad).overlaps(b));
                    assert!(!expand_rect(*b, pad).overlaps(a));
                }
            }

            let atlas = p.finalize();
            for (r, c) in &placed {
                for y in r.top()..r.bottom() {
                    for x in r.left()..r.right() {
                        assert!(same_color(atlas.pixel(x as usize, y as usize), *c));
                    }
                }
            }
        }
    }
}
