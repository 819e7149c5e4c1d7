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

//! Sprite metadata derived from placements.

#[cfg(feature = "builder")]
use log::info;
#[cfg(feature = "builder")]
use std::path::{Path, PathBuf};

use crate::*;

/// File name used by [`SpriteSheet::save`] when none is given.
pub const DEFAULT_SHEET_NAME: &str = "Texture";

/// Anchor of a sprite inside its rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Middle of the rectangle.
    #[default]
    Center,
    /// Top-left corner.
    TopLeft,
    /// Middle of the top edge.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Middle of the left edge.
    LeftCenter,
    /// Middle of the right edge.
    RightCenter,
    /// Bottom-left corner.
    BottomLeft,
    /// Middle of the bottom edge.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

impl Alignment {
    /// Normalized pivot, y pointing up.
    pub fn pivot(self) -> Vec2f {
        match self {
            Alignment::Center => Vec2f::new(0.5, 0.5),
            Alignment::TopLeft => Vec2f::new(0.0, 1.0),
            Alignment::TopCenter => Vec2f::new(0.5, 1.0),
            Alignment::TopRight => Vec2f::new(1.0, 1.0),
            Alignment::LeftCenter => Vec2f::new(0.0, 0.5),
            Alignment::RightCenter => Vec2f::new(1.0, 0.5),
            Alignment::BottomLeft => Vec2f::new(0.0, 0.0),
            Alignment::BottomCenter => Vec2f::new(0.5, 0.0),
            Alignment::BottomRight => Vec2f::new(1.0, 0.0),
        }
    }
}

/// Where a named sprite lives inside an atlas.
#[derive(Clone, Debug)]
pub struct SpriteRect {
    /// Sprite name.
    pub name: String,
    /// Content rectangle inside the atlas, padding excluded.
    pub rect: Recti,
    /// Anchor preset.
    pub alignment: Alignment,
    /// Normalized pivot matching `alignment`.
    pub pivot: Vec2f,
}

impl SpriteRect {
    /// Centered sprite covering `rect`.
    pub fn new(name: &str, rect: Recti) -> Self {
        let alignment = Alignment::default();
        Self { name: name.to_string(), rect, alignment, pivot: alignment.pivot() }
    }

    /// Builds the record from a placement origin and a block size.
    pub fn from_placement(name: &str, origin: Vec2i, size: Dimensioni) -> Self { Self::new(name, Recti::new(origin.x, origin.y, size.width, size.height)) }

    /// Returns a copy anchored at `alignment`.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self.pivot = alignment.pivot();
        self
    }

    /// Rectangle with rows counted from the other edge of an atlas `atlas_height` tall.
    pub fn flip_y(&self, atlas_height: usize) -> Recti {
        let r = self.rect;
        Recti::new(r.x, atlas_height as i32 - r.y - r.height, r.width, r.height)
    }
}

/// A finalized atlas with the sprites packed into it.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    /// Atlas pixels.
    pub atlas: PackedAtlas,
    /// Sprites in the order they were added.
    pub sprites: Vec<SpriteRect>,
}

impl SpriteSheet {
    /// Looks a sprite up by name.
    pub fn sprite(&self, name: &str) -> Option<&SpriteRect> { self.sprites.iter().find(|s| s.name == name) }

    /// Writes `<dir>/<name>.png` and returns its path.
    /// An empty `name` falls back to [`DEFAULT_SHEET_NAME`].
    #[cfg(feature = "builder")]
    pub fn save<P: AsRef<Path>>(&self, dir: P, name: &str) -> Result<PathBuf> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(AtlasError::MissingDirectory(dir.display().to_string()));
        }
        let name = if name.is_empty() { DEFAULT_SHEET_NAME } else { name };
        let path = dir.join(format!("{}.png", name));
        self.atlas.save_png_image(&path)?;
        info!("atlas {}x{} with {} sprite(s) written to {}", self.atlas.width(), self.atlas.height(), self.sprites.len(), path.display());
        Ok(path)
    }

    #[cfg(feature = "save-to-rust")]
    /// Emits the sprite table as Rust source: a size constant and a `(name, rect)` slice.
    pub fn to_rust_source(&self, const_name: &str) -> String {
        let mut src = String::new();
        src.push_str("use atlas_packer::*;\n\n");
        src.push_str(format!("pub const {}_SIZE: (usize, usize) = ({}, {});\n\n", const_name, self.atlas.width(), self.atlas.height()).as_str());
        src.push_str(format!("pub const {}: &[(&str, Recti)] = &[\n", const_name).as_str());
        for s in &self.sprites {
            let r = s.rect;
            src.push_str(format!("    ({:?}, Recti {{ x: {}, y: {}, width: {}, height: {} }}),\n", s.name, r.x, r.y, r.width, r.height).as_str());
        }
        src.push_str("];\n");
        src
    }

    #[cfg(feature = "save-to-rust")]
    /// Writes [`SpriteSheet::to_rust_source`] to `path`.
    pub fn to_rust_file<P: AsRef<std::path::Path>>(&self, const_name: &str, path: P) -> Result<()> {
        std::fs::write(path, self.to_rust_source(const_name))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> SpriteSheet {
        let mut packer = AtlasPacker::new(PackerConfig::default()).unwrap();
        let red = color4b(0xFF, 0, 0, 0xFF);
        let a = packer.add(2, 3, &[red; 6]).unwrap();
        let b = packer.add(1, 1, &[red]).unwrap();
        SpriteSheet { atlas: packer.finalize(), sprites: vec![SpriteRect::new("a", a), SpriteRect::new("b \"quoted\"", b)] }
    }

    #[test]
    fn placement_maps_to_centered_rect() {
        let s = SpriteRect::from_placement("hero", Vec2i::new(2, 4), Dimensioni::new(8, 6));
        assert_eq!((s.rect.x, s.rect.y, s.rect.width, s.rect.height), (2, 4, 8, 6));
        assert_eq!(s.alignment, Alignment::Center);
        assert_eq!((s.pivot.x, s.pivot.y), (0.5, 0.5));

        let s = s.with_alignment(Alignment::BottomRight);
        assert_eq!((s.pivot.x, s.pivot.y), (1.0, 0.0));
    }

    #[test]
    fn flip_y_counts_rows_from_the_other_edge() {
        let s = SpriteRect::new("s", Recti::new(2, 2, 4, 3));
        let r = s.flip_y(16);
        assert_eq!((r.x, r.y, r.width, r.height), (2, 11, 4, 3));
    }

    #[test]
    fn lookup_by_name() {
        let sheet = sheet();
        assert_eq!(sheet.sprite("a").map(|s| (s.rect.width, s.rect.height)), Some((2, 3)));
        assert!(sheet.sprite("missing").is_none());
    }

    #[cfg(feature = "save-to-rust")]
    #[test]
    fn rust_source_lists_every_sprite() {
        let sheet = sheet();
        let a = sheet.sprites[0].rect;
        let src = sheet.to_rust_source("SHEET");
        assert!(src.contains(&format!("pub const SHEET_SIZE: (usize, usize) = ({}, {});", sheet.atlas.width(), sheet.atlas.height())));
        assert!(src.contains(&format!("(\"a\", Recti {{ x: {}, y: {}, width: 2, height: 3 }}),", a.x, a.y)));
        assert!(src.contains("(\"b \\\"quoted\\\"\", Recti"));
    }

    #[cfg(feature = "builder")]
    #[test]
    fn save_requires_an_existing_directory() {
        let sheet = sheet();
        let missing = std::env::temp_dir().join("atlas_packer_no_such_dir").join("nested");
        assert!(matches!(sheet.save(&missing, "x"), Err(AtlasError::MissingDirectory(_))));

        let dir = std::env::temp_dir();
        let path = sheet.save(&dir, "").unwrap();
        assert_eq!(path, dir.join("Texture.png"));
        assert!(path.is_file());
        let _ = std::fs::remove_file(path);
    }
}
