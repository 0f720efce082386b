//! Controller command stream and C header encoding.
//!
//! The command stream is a sequence of little-endian 32-bit words fed to the
//! coprocessor FIFO: one `CMD_INFLATE` carrying the whole graphics RAM
//! image as a zlib stream, then the display list commands that point each bitmap handle at
//! its cells. The header wraps that stream in a `PROGMEM` array alongside
//! the handle constants the sketch uses to draw cells.

use std::fmt::Write as _;

use crate::bundle::{AssetBundle, BundleEntry};

/// Coprocessor command: inflate the following zlib stream into memory.
pub const CMD_INFLATE: u32 = 0xFFFF_FF22;

/// Fixed deflate level so identical inputs give identical streams.
pub const COMPRESSION_LEVEL: u8 = 9;

/// Bitmap filtering for `BITMAP_SIZE`.
const NEAREST: u32 = 0;
/// Wrap mode for `BITMAP_SIZE`.
const BORDER: u32 = 0;

/// Bytes printed per line in the header array.
const BYTES_PER_LINE: usize = 16;

pub const fn bitmap_handle(handle: u32) -> u32 {
    (5 << 24) | (handle & 31)
}

pub const fn bitmap_source(address: u32) -> u32 {
    (1 << 24) | (address & 0xF_FFFF)
}

pub const fn bitmap_layout(format: u32, stride: u32, height: u32) -> u32 {
    (7 << 24) | ((format & 31) << 19) | ((stride & 1023) << 9) | (height & 511)
}

pub const fn bitmap_size(filter: u32, wrap_x: u32, wrap_y: u32, width: u32, height: u32) -> u32 {
    (8 << 24)
        | ((filter & 1) << 20)
        | ((wrap_x & 1) << 19)
        | ((wrap_y & 1) << 18)
        | ((width & 511) << 9)
        | (height & 511)
}

/// Display list words configuring one entry's bitmap handle.
pub fn handle_setup(entry: &BundleEntry) -> [u32; 4] {
    [
        bitmap_handle(entry.handle as u32),
        bitmap_source(entry.address as u32),
        bitmap_layout(entry.format.code(), entry.stride(), entry.height),
        bitmap_size(NEAREST, BORDER, BORDER, entry.width, entry.height),
    ]
}

/// zlib-compress a graphics RAM image for `CMD_INFLATE`.
pub fn compress(data: &[u8]) -> Vec<u8> {
    miniz_oxide::deflate::compress_to_vec_zlib(data, COMPRESSION_LEVEL)
}

/// Encode the full command stream for `bundle`.
pub fn command_stream(bundle: &AssetBundle) -> Vec<u8> {
    let compressed = compress(bundle.data());
    let padded = compressed.len().div_ceil(4) * 4;
    let mut out = Vec::with_capacity(8 + padded + bundle.entries().len() * 16);

    push_word(&mut out, CMD_INFLATE);
    push_word(&mut out, 0);
    out.extend_from_slice(&compressed);
    out.resize(8 + padded, 0);

    for entry in bundle.entries() {
        for word in handle_setup(entry) {
            push_word(&mut out, word);
        }
    }
    out
}

fn push_word(out: &mut Vec<u8>, word: u32) {
    out.extend_from_slice(&word.to_le_bytes());
}

/// Render the C header for `bundle`.
pub fn render_header(bundle: &AssetBundle) -> String {
    let stream = command_stream(bundle);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "// {}_assets.h: generated by gd2prep, do not edit", bundle.name());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "#define LOAD_ASSETS()  (GD.copy(__assets, sizeof(__assets)), GD.loadptr = ASSETS_END)"
    );
    let _ = writeln!(out, "static const PROGMEM uint8_t __assets[{}] = {{", stream.len());
    for chunk in stream.chunks(BYTES_PER_LINE) {
        let line: Vec<String> = chunk.iter().map(|b| format!("0x{:02x}", b)).collect();
        let _ = writeln!(out, "{},", line.join(", "));
    }
    let _ = writeln!(out, "}};");
    let _ = writeln!(out);

    for entry in bundle.entries() {
        let _ = writeln!(out, "// {} cells, {}", entry.cells, entry.format);
        let _ = writeln!(out, "#define {}_HANDLE {}", entry.name, entry.handle);
        let _ = writeln!(out, "#define {}_WIDTH {}", entry.name, entry.width);
        let _ = writeln!(out, "#define {}_HEIGHT {}", entry.name, entry.height);
        let _ = writeln!(out, "#define {}_CELLS {}", entry.name, entry.cells);
    }
    let _ = writeln!(out, "#define ASSETS_END {}UL", bundle.end_address());
    out
}
