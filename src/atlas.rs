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

#[cfg(feature = "png_source")]
use png::{BitDepth, ColorType, Decoder, Transformations};
#[cfg(feature = "png_source")]
use std::io::Cursor;

use super::*;

/// Decodes image data into 32-bit pixels according to `source`.
/// Grayscale and RGB PNG inputs are expanded to opaque RGBA (alpha = 255).
pub fn load_image_bytes(source: ImageSource) -> Result<(usize, usize, Vec<Color4b>)> {
    match source {
        ImageSource::Raw { width, height, pixels } => {
            if width == 0 || height == 0 {
                return Err(AtlasError::Image("image dimensions must be positive".into()));
            }
            let expected = width.checked_mul(height).and_then(|n| n.checked_mul(4)).ok_or(AtlasError::TooLarge { width, height })?;
            if pixels.len() != expected {
                return Err(AtlasError::Image(format!("expected {} RGBA bytes, found {}", expected, pixels.len())));
            }
            let colors = pixels.chunks_exact(4).map(|c| color4b(c[0], c[1], c[2], c[3])).collect();
            Ok((width, height, colors))
        }
        #[cfg(feature = "png_source")]
        ImageSource::Png { bytes } => decode_png_to_colors(bytes),
    }
}

#[cfg(feature = "png_source")]
fn decode_png_to_colors(bytes: &[u8]) -> Result<(usize, usize, Vec<Color4b>)> {
    let mut cursor = Cursor::new(bytes);
    let mut decoder = Decoder::new(&mut cursor);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;
    let buf_size = reader.output_buffer_size().ok_or_else(|| AtlasError::Image("PNG decoder did not report output size".into()))?;
    let mut img_data = vec![0; buf_size];
    let info = reader.next_frame(&mut img_data)?;

    if info.bit_depth != BitDepth::Eight {
        return Err(AtlasError::Image(format!("unsupported PNG bit depth: {:?}", info.bit_depth)));
    }

    let pixel_size = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Indexed => return Err(AtlasError::Image("indexed PNGs are not supported".into())),
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
    };

    let (width, height) = (info.width as usize, info.height as usize);
    let mut pixels = Vec::with_capacity(width * height);
    for line in img_data.chunks(info.line_size).take(height) {
        for px in line.chunks_exact(pixel_size).take(width) {
            pixels.push(match px {
                [v] => color4b(*v, *v, *v, 0xFF),
                [v, a] => color4b(*v, *v, *v, *a),
                [r, g, b] => color4b(*r, *g, *b, 0xFF),
                [r, g, b, a] => color4b(*r, *g, *b, *a),
                _ => unreachable!(),
            });
        }
    }

    Ok((width, height, pixels))
}

/// A finished atlas: plain pixels, sentinels resolved.
#[derive(Clone, Debug)]
pub struct PackedAtlas {
    width: usize,
    height: usize,
    pixels: Vec<Color4b>,
}

impl PackedAtlas {
    pub(crate) fn new(width: usize, height: usize, pixels: Vec<Color4b>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self { width, height, pixels }
    }

    /// Returns the atlas texture width in pixels.
    pub fn width(&self) -> usize { self.width }
    /// Returns the atlas texture height in pixels.
    pub fn height(&self) -> usize { self.height }

    /// Returns the atlas texture dimensions.
    pub fn get_texture_dimension(&self) -> Dimensioni { Dimensioni::new(self.width as _, self.height as _) }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[Color4b] { &self.pixels }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Color4b {
        assert!(x < self.width && y < self.height);
        self.pixels[x + y * self.width]
    }

    /// Takes the pixel buffer.
    pub fn into_pixels(self) -> Vec<Color4b> { self.pixels }

    /// Pixels as RGBA8 bytes.
    pub fn rgba_bytes(&self) -> Vec<u8> { self.pixels.iter().flat_map(|c| [c.x, c.y, c.z, c.w]).collect() }

    /// Serializes the atlas texture into PNG bytes.
    #[cfg(feature = "builder")]
    pub fn png_image_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, self.width as _, self.height as _);
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(self.rgba_bytes().as_slice())?;
        }
        Ok(bytes)
    }

    /// Writes the atlas texture to disk as a PNG.
    #[cfg(feature = "builder")]
    pub fn save_png_image<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        use std::io::Write;
        let bytes = self.png_image_bytes()?;
        let mut w = std::io::BufWriter::new(std::fs::File::create(path.as_ref())?);
        w.write_all(bytes.as_slice())?;
        w.flush()?;
        Ok(())
    }
}

#[cfg(feature = "builder")]
/// Helpers for building sprite sheets from image files.
pub mod builder {
    use std::fs::File;
    use std::io::Read;
    use std::path::Path;

    use log::info;

    use super::*;

    /// Packs images into one sheet, recording a [`SpriteRect`] per image.
    pub struct SheetBuilder {
        packer: AtlasPacker,
        sprites: Vec<SpriteRect>,
    }

    impl SheetBuilder {
        /// Creates a builder packing with `config`.
        pub fn new(config: PackerConfig) -> Result<Self> { Ok(Self { packer: AtlasPacker::new(config)?, sprites: Vec::new() }) }

        /// Packs raw pixels under `name` and returns where they landed.
        pub fn add_pixels(&mut self, name: &str, width: usize, height: usize, pixels: &[Color4b]) -> Result<Recti> {
            let rect = self.packer.add(width, height, pixels)?;
            self.sprites.push(SpriteRect::new(name, rect));
            Ok(rect)
        }

        /// Decodes a PNG and packs it under `name`.
        pub fn add_png_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<Recti> {
            let (width, height, pixels) = load_image_bytes(ImageSource::Png { bytes })?;
            self.add_pixels(name, width, height, &pixels)
        }

        /// Loads a PNG file and packs it, named after the file stem.
        pub fn add_image<P: AsRef<Path>>(&mut self, path: P) -> Result<Recti> {
            let path = path.as_ref();
            let mut bytes = Vec::new();
            File::open(path)?.read_to_end(&mut bytes)?;
            let rect = self.add_png_bytes(&Self::format_path(path), &bytes)?;
            info!("packed '{}' at ({}, {}) {}x{}", path.display(), rect.x, rect.y, rect.width, rect.height);
            Ok(rect)
        }

        fn format_path(path: &Path) -> String { path.file_stem().and_then(|n| n.to_str()).map(str::to_string).unwrap_or_else(|| path.display().to_string()) }

        /// Sprites packed so far, in insertion order.
        pub fn sprites(&self) -> &[SpriteRect] { &self.sprites }

        /// Finalizes the atlas.
        pub fn finish(self) -> SpriteSheet { SpriteSheet { atlas: self.packer.finalize(), sprites: self.sprites } }
    }
}
