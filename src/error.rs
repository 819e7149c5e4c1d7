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

use thiserror::Error;

/// Errors reported by the packer and the image layers built on top of it.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// A block with a zero width or height was submitted.
    #[error("Block dimensions must be positive, got {width}x{height}")]
    EmptyRequest {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// The pixel slice does not hold exactly `width * height` colors.
    #[error("Expected {expected} pixels for the block, found {found}")]
    PixelCount {
        /// `width * height`.
        expected: usize,
        /// Length of the submitted slice.
        found: usize,
    },

    /// A row of a row-based block has a different length than the first row.
    #[error("Row {row} has {found} pixels, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// The packer was configured with values it cannot work with.
    #[error("Invalid packer configuration: {0}")]
    InvalidConfig(&'static str),

    /// Padding may only change before the first block is placed.
    #[error("Padding cannot change after {placed} block(s) have been placed")]
    PaddingLocked {
        /// Number of blocks already in the atlas.
        placed: usize,
    },

    /// The atlas would exceed the addressable size.
    #[error("Atlas of {width}x{height} exceeds the addressable size")]
    TooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// The host could not provide memory for a larger atlas.
    #[error("Cannot allocate {cells} cells for the atlas")]
    Allocation {
        /// Number of cells that failed to allocate.
        cells: usize,
    },

    /// The output directory does not exist.
    #[error("Directory '{0}' does not exist")]
    MissingDirectory(String),

    /// The image data could not be interpreted.
    #[error("Unsupported image: {0}")]
    Image(String),

    /// Underlying file system error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// PNG decoding failed.
    #[cfg(feature = "png_source")]
    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    /// PNG encoding failed.
    #[cfg(feature = "png_source")]
    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AtlasError>;
