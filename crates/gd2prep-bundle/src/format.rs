//! Bitmap pixel formats understood by the FT800 graphics engine.
//!
//! Each format knows its controller format code, its size in bytes and how
//! to pack an 8-bit RGBA pixel. Multi-byte pixels are stored little-endian,
//! which is the controller's native byte order.

use std::fmt;
use std::str::FromStr;

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// Output pixel format for a registered cell sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// 1-bit alpha, 5 bits per color channel.
    Argb1555,
    /// 5-6-5 RGB, no alpha.
    #[default]
    Rgb565,
    /// 4 bits per channel including alpha.
    Argb4,
    /// 8-bit luminance.
    L8,
    /// 3-3-2 RGB.
    Rgb332,
}

impl PixelFormat {
    /// All supported formats.
    pub const ALL: [PixelFormat; 5] = [
        PixelFormat::Argb1555,
        PixelFormat::Rgb565,
        PixelFormat::Argb4,
        PixelFormat::L8,
        PixelFormat::Rgb332,
    ];

    /// Format code used in `BITMAP_LAYOUT`.
    pub const fn code(self) -> u32 {
        match self {
            PixelFormat::Argb1555 => 0,
            PixelFormat::L8 => 3,
            PixelFormat::Rgb332 => 4,
            PixelFormat::Argb4 => 6,
            PixelFormat::Rgb565 => 7,
        }
    }

    /// Bytes per pixel.
    pub const fn bytes_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Argb1555 | PixelFormat::Rgb565 | PixelFormat::Argb4 => 2,
            PixelFormat::L8 | PixelFormat::Rgb332 => 1,
        }
    }

    /// Lowercase name as used in manifests and headers.
    pub const fn as_str(self) -> &'static str {
        match self {
            PixelFormat::Argb1555 => "argb1555",
            PixelFormat::Rgb565 => "rgb565",
            PixelFormat::Argb4 => "argb4",
            PixelFormat::L8 => "l8",
            PixelFormat::Rgb332 => "rgb332",
        }
    }

    /// Row stride in bytes for a bitmap of the given width.
    pub const fn stride(self, width: u32) -> u32 {
        width * self.bytes_per_pixel()
    }

    /// Pack one pixel, appending its bytes to `out`.
    pub fn encode_pixel(self, pixel: Rgba<u8>, out: &mut Vec<u8>) {
        let [r, g, b, a] = pixel.0;
        let (r, g, b, a) = (r as u16, g as u16, b as u16, a as u16);
        match self {
            PixelFormat::Rgb565 => {
                let v = ((r >> 3) << 11) | ((g >> 2) << 5) | (b >> 3);
                out.extend_from_slice(&v.to_le_bytes());
            }
            PixelFormat::Argb1555 => {
                let alpha = if a >= 128 { 1 << 15 } else { 0 };
                let v = alpha | ((r >> 3) << 10) | ((g >> 3) << 5) | (b >> 3);
                out.extend_from_slice(&v.to_le_bytes());
            }
            PixelFormat::Argb4 => {
                let v = ((a >> 4) << 12) | ((r >> 4) << 8) | ((g >> 4) << 4) | (b >> 4);
                out.extend_from_slice(&v.to_le_bytes());
            }
            PixelFormat::L8 => {
                // Rec.601 luma in fixed point
                let l = (77 * r as u32 + 150 * g as u32 + 29 * b as u32) >> 8;
                out.push(l as u8);
            }
            PixelFormat::Rgb332 => {
                let v = ((r >> 5) << 5) | ((g >> 5) << 2) | (b >> 6);
                out.push(v as u8);
            }
        }
    }

    /// Pack a whole image row-major.
    pub fn encode_image(self, image: &RgbaImage) -> Vec<u8> {
        let mut out =
            Vec::with_capacity((image.width() * image.height() * self.bytes_per_pixel()) as usize);
        for pixel in image.pixels() {
            self.encode_pixel(*pixel, &mut out);
        }
        out
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PixelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PixelFormat::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown pixel format '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(format: PixelFormat, rgba: [u8; 4]) -> Vec<u8> {
        let mut out = Vec::new();
        format.encode_pixel(Rgba(rgba), &mut out);
        out
    }

    #[test]
    fn test_rgb565_primaries() {
        assert_eq!(encode(PixelFormat::Rgb565, [255, 0, 0, 255]), vec![0x00, 0xF8]);
        assert_eq!(encode(PixelFormat::Rgb565, [0, 255, 0, 255]), vec![0xE0, 0x07]);
        assert_eq!(encode(PixelFormat::Rgb565, [0, 0, 255, 255]), vec![0x1F, 0x00]);
        assert_eq!(encode(PixelFormat::Rgb565, [255, 255, 255, 0]), vec![0xFF, 0xFF]);
    }

    #[test]
    fn test_rgb565_truncates_low_bits() {
        // 0b0000_0111 in every channel drops out entirely
        assert_eq!(encode(PixelFormat::Rgb565, [7, 3, 7, 255]), vec![0x00, 0x00]);
    }

    #[test]
    fn test_argb1555_alpha_threshold() {
        assert_eq!(encode(PixelFormat::Argb1555, [0, 0, 0, 127]), vec![0x00, 0x00]);
        assert_eq!(encode(PixelFormat::Argb1555, [0, 0, 0, 128]), vec![0x00, 0x80]);
        assert_eq!(encode(PixelFormat::Argb1555, [255, 0, 0, 255]), vec![0x00, 0xFC]);
    }

    #[test]
    fn test_argb4() {
        assert_eq!(encode(PixelFormat::Argb4, [0x10, 0x20, 0x30, 0xF0]), vec![0x23, 0xF1]);
    }

    #[test]
    fn test_eight_bit_formats() {
        assert_eq!(encode(PixelFormat::L8, [255, 255, 255, 255]), vec![255]);
        assert_eq!(encode(PixelFormat::L8, [0, 0, 0, 255]), vec![0]);
        assert_eq!(encode(PixelFormat::Rgb332, [255, 255, 255, 255]), vec![0xFF]);
        assert_eq!(encode(PixelFormat::Rgb332, [255, 0, 0, 255]), vec![0xE0]);
    }

    #[test]
    fn test_encode_image_is_row_major() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let data = PixelFormat::Rgb565.encode_image(&image);
        assert_eq!(data, vec![0x00, 0xF8, 0x1F, 0x00]);
    }

    #[test]
    fn test_parse_and_display() {
        for format in PixelFormat::ALL {
            assert_eq!(format.to_string().parse::<PixelFormat>().unwrap(), format);
        }
        assert_eq!("RGB565".parse::<PixelFormat>().unwrap(), PixelFormat::Rgb565);
        assert!("rgba8".parse::<PixelFormat>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PixelFormat::Argb1555).unwrap();
        assert_eq!(json, "\"argb1555\"");
        let parsed: PixelFormat = serde_json::from_str("\"rgb332\"").unwrap();
        assert_eq!(parsed, PixelFormat::Rgb332);
    }

    #[test]
    fn test_sixteen_bit_formats() {
        assert_eq!(PixelFormat::Rgb565.bytes_per_pixel(), 2);
        assert_eq!(PixelFormat::Rgb565.code(), 7);
        assert_eq!(PixelFormat::Rgb565.stride(30), 60);
        assert_eq!(PixelFormat::default(), PixelFormat::Rgb565);
    }
}
