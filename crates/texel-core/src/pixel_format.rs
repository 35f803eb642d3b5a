/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel formats, their bit layouts and size information
//!
//! Every format has a stable `u8` value. Formats with a value greater or equal
//! to [`COMPRESSED_THRESHOLD`] are block compressed, this crate treats them as
//! opaque payloads which can be sized but never decoded.
//!
//!|value|format            | bits per pixel | layout                               |
//!|-----|------------------|----------------|--------------------------------------|
//!| 0   | `Generic16`      | 16             | caller defined packed word           |
//!| 1   | `Grayscale`      | 8              | `L`                                  |
//!| 2   | `GrayAlpha`      | 16             | `L,A`                                |
//!| 3   | `R5G6B5`         | 16             | little endian `u16`, red on top      |
//!| 4   | `R8G8B8`         | 24             | `R,G,B`                              |
//!| 5   | `R5G5B5A1`       | 16             | little endian `u16`, alpha in bit 0  |
//!| 6   | `R4G4B4A4`       | 16             | little endian `u16`, red on top      |
//!| 7   | `R8G8B8A8`       | 32             | `R,G,B,A`                            |
//!| 8   | `R32`            | 32             | one little endian `f32`              |
//!| 9   | `R32G32B32`      | 96             | three little endian `f32`            |
//!| 10  | `R32G32B32A32`   | 128            | four little endian `f32`             |
//!| 11..| compressed       | 2..8           | opaque                               |

/// Formats with a numeric value at or above this are compressed
pub const COMPRESSED_THRESHOLD: u8 = 11;

/// All supported pixel formats
#[allow(clippy::upper_case_acronyms)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PixelFormat {
    /// A 16 bit packed word whose channel layout is only known to
    /// the caller.
    ///
    /// Produced by dithering to a bit layout that matches
    /// none of the named 16 bit formats
    Generic16 = 0,
    /// 8 bit luminance
    Grayscale = 1,
    /// 8 bit luminance followed by 8 bit alpha
    GrayAlpha = 2,
    R5G6B5 = 3,
    R8G8B8 = 4,
    R5G5B5A1 = 5,
    R4G4B4A4 = 6,
    R8G8B8A8 = 7,
    /// A single 32 bit float channel
    R32 = 8,
    R32G32B32 = 9,
    R32G32B32A32 = 10,
    Dxt1Rgb = 11,
    Dxt1Rgba = 12,
    Dxt3Rgba = 13,
    Dxt5Rgba = 14,
    Etc1Rgb = 15,
    Etc2Rgb = 16,
    Etc2EacRgba = 17,
    PvrtRgb = 18,
    PvrtRgba = 19,
    Astc4x4Rgba = 20,
    Astc8x8Rgba = 21
}

impl PixelFormat {
    /// Every format, ordered by its numeric value
    pub const ALL: [PixelFormat; 22] = [
        Self::Generic16,
        Self::Grayscale,
        Self::GrayAlpha,
        Self::R5G6B5,
        Self::R8G8B8,
        Self::R5G5B5A1,
        Self::R4G4B4A4,
        Self::R8G8B8A8,
        Self::R32,
        Self::R32G32B32,
        Self::R32G32B32A32,
        Self::Dxt1Rgb,
        Self::Dxt1Rgba,
        Self::Dxt3Rgba,
        Self::Dxt5Rgba,
        Self::Etc1Rgb,
        Self::Etc2Rgb,
        Self::Etc2EacRgba,
        Self::PvrtRgb,
        Self::PvrtRgba,
        Self::Astc4x4Rgba,
        Self::Astc8x8Rgba
    ];

    /// Formats the pixel codec can decode and encode
    pub const UNCOMPRESSED: [PixelFormat; 10] = [
        Self::Grayscale,
        Self::GrayAlpha,
        Self::R5G6B5,
        Self::R8G8B8,
        Self::R5G5B5A1,
        Self::R4G4B4A4,
        Self::R8G8B8A8,
        Self::R32,
        Self::R32G32B32,
        Self::R32G32B32A32
    ];

    /// Get a format from its numeric value
    ///
    /// Returns `None` if the value does not name a format
    ///
    /// ```
    /// use texel_core::pixel_format::PixelFormat;
    /// assert_eq!(PixelFormat::from_u8(7), Some(PixelFormat::R8G8B8A8));
    /// assert_eq!(PixelFormat::from_u8(200), None);
    /// ```
    pub const fn from_u8(value: u8) -> Option<PixelFormat> {
        if (value as usize) < Self::ALL.len() {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }

    /// Return the numeric value of this format
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Return true if this is a block compressed format
    pub const fn is_compressed(self) -> bool {
        self as u8 >= COMPRESSED_THRESHOLD
    }

    /// Return true if the pixel codec can read and write this format
    ///
    /// This excludes compressed formats and [`PixelFormat::Generic16`]
    pub const fn is_decodable(self) -> bool {
        !self.is_compressed() && !matches!(self, Self::Generic16)
    }

    /// Number of bits a single pixel occupies
    ///
    /// For compressed formats this is the average over a block
    #[rustfmt::skip]
    pub const fn bits_per_pixel(self) -> usize {
        match self {
            Self::Grayscale => 8,
            Self::GrayAlpha
            | Self::R5G6B5
            | Self::R5G5B5A1
            | Self::R4G4B4A4
            | Self::Generic16 => 16,
            Self::R8G8B8 => 24,
            Self::R8G8B8A8 | Self::R32 => 32,
            Self::R32G32B32 => 96,
            Self::R32G32B32A32 => 128,
            Self::Dxt1Rgb
            | Self::Dxt1Rgba
            | Self::Etc1Rgb
            | Self::Etc2Rgb
            | Self::PvrtRgb
            | Self::PvrtRgba => 4,
            Self::Dxt3Rgba
            | Self::Dxt5Rgba
            | Self::Etc2EacRgba
            | Self::Astc4x4Rgba => 8,
            Self::Astc8x8Rgba => 2
        }
    }

    /// Number of bytes a single pixel occupies
    ///
    /// Returns `None` for compressed formats, whose pixels
    /// do not occupy whole bytes
    pub const fn bytes_per_pixel(self) -> Option<usize> {
        if self.is_compressed() {
            None
        } else {
            Some(self.bits_per_pixel() / 8)
        }
    }

    /// Return true if the format stores an alpha channel
    pub const fn has_alpha(self) -> bool {
        matches!(
            self,
            Self::GrayAlpha
                | Self::R5G5B5A1
                | Self::R4G4B4A4
                | Self::R8G8B8A8
                | Self::R32G32B32A32
                | Self::Dxt1Rgba
                | Self::Dxt3Rgba
                | Self::Dxt5Rgba
                | Self::Etc2EacRgba
                | Self::PvrtRgba
                | Self::Astc4x4Rgba
                | Self::Astc8x8Rgba
        )
    }

    /// Return true if channels are stored as 32 bit floats
    pub const fn is_float(self) -> bool {
        matches!(self, Self::R32 | Self::R32G32B32 | Self::R32G32B32A32)
    }

    /// Number of bytes in a single compressed block, `None` for uncompressed formats
    ///
    /// All compressed formats here use 4x4 blocks except ASTC 8x8
    pub const fn block_bytes(self) -> Option<usize> {
        match self {
            Self::Dxt1Rgb
            | Self::Dxt1Rgba
            | Self::Etc1Rgb
            | Self::Etc2Rgb
            | Self::PvrtRgb
            | Self::PvrtRgba => Some(8),
            Self::Dxt3Rgba
            | Self::Dxt5Rgba
            | Self::Etc2EacRgba
            | Self::Astc4x4Rgba
            | Self::Astc8x8Rgba => Some(16),
            _ => None
        }
    }

    /// Find the named 16 bit format whose channel widths match
    /// `(r, g, b, a)` exactly
    ///
    /// ```
    /// use texel_core::pixel_format::PixelFormat;
    /// assert_eq!(PixelFormat::from_channel_bits(5, 6, 5, 0), Some(PixelFormat::R5G6B5));
    /// assert_eq!(PixelFormat::from_channel_bits(3, 3, 2, 0), None);
    /// ```
    pub const fn from_channel_bits(r: u8, g: u8, b: u8, a: u8) -> Option<PixelFormat> {
        match (r, g, b, a) {
            (5, 6, 5, 0) => Some(Self::R5G6B5),
            (5, 5, 5, 1) => Some(Self::R5G5B5A1),
            (4, 4, 4, 4) => Some(Self::R4G4B4A4),
            _ => None
        }
    }
}

impl TryFrom<u8> for PixelFormat {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PixelFormat::from_u8(value).ok_or(value)
    }
}

impl From<PixelFormat> for u8 {
    fn from(value: PixelFormat) -> Self {
        value.to_u8()
    }
}
