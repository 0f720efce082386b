//! Asset bundle builder.
//!
//! An [`AssetBundle`] accumulates named cell sequences, assigns each one a
//! bitmap handle slot and a graphics RAM address, and finally serializes
//! everything as a C header holding the controller command stream.
//!
//! The bundle is an ordinary value owned by its caller. Entries are appended
//! in registration order and never removed or replaced.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::Serialize;

use crate::encode;
use crate::error::BundleError;
use crate::format::PixelFormat;
use crate::write::write_atomic;

/// Size of the FT800 general purpose graphics RAM.
pub const RAM_G_SIZE: usize = 256 * 1024;

/// Highest bitmap handle available to assets. Handle 15 is scratch space
/// for the coprocessor's built-in widgets.
pub const MAX_HANDLE: u8 = 14;

/// `BITMAP_SIZE` width and height fields are 9 bits wide.
pub const MAX_CELL_DIMENSION: u32 = 511;

const ALIGNMENT: usize = 4;

/// A registered cell sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleEntry {
    /// Handle name, emitted as the prefix of the header symbols.
    pub name: String,
    /// Bitmap handle slot.
    pub handle: u8,
    /// Cell width in pixels.
    pub width: u32,
    /// Cell height in pixels.
    pub height: u32,
    /// Number of cells.
    pub cells: usize,
    /// Pixel format of the stored data.
    pub format: PixelFormat,
    /// Byte address of the first cell in graphics RAM.
    pub address: usize,
    /// Total bytes occupied by all cells.
    pub size: usize,
}

impl BundleEntry {
    /// Bytes per row of one cell.
    pub fn stride(&self) -> u32 {
        self.format.stride(self.width)
    }

    /// Bytes occupied by one cell.
    pub fn cell_size(&self) -> usize {
        self.stride() as usize * self.height as usize
    }
}

/// Result of writing a bundle to disk.
#[derive(Debug, Clone, Serialize)]
pub struct BundleOutput {
    /// Where the bundle was written.
    pub path: PathBuf,
    /// File size in bytes.
    pub bytes: usize,
    /// BLAKE3 hash of the file contents.
    pub hash: String,
}

/// In-memory accumulator of bundle entries.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    name: String,
    entries: Vec<BundleEntry>,
    data: Vec<u8>,
}

impl AssetBundle {
    /// Create an empty bundle. `name` names the generated header.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Bundle name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered entries in registration order.
    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    /// Look up an entry by handle name.
    pub fn entry(&self, name: &str) -> Option<&BundleEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// True if `name` is already registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Graphics RAM image: every entry's pixel data at its address.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// First free graphics RAM address.
    pub fn end_address(&self) -> usize {
        self.data.len()
    }

    /// Register `cells` under `name`, converted to `format`.
    ///
    /// All checks run before the bundle is touched, so a failed call leaves
    /// it unchanged.
    pub fn load_handle(
        &mut self,
        name: &str,
        cells: &[RgbaImage],
        format: PixelFormat,
    ) -> Result<&BundleEntry, BundleError> {
        if !is_c_identifier(name) {
            return Err(BundleError::InvalidHandleName(name.to_string()));
        }
        if self.contains(name) {
            return Err(BundleError::DuplicateHandle(name.to_string()));
        }
        let first = cells
            .first()
            .ok_or_else(|| BundleError::EmptySheet(name.to_string()))?;
        let (width, height) = first.dimensions();
        if cells.iter().any(|c| c.dimensions() != (width, height)) {
            return Err(BundleError::InconsistentCells(name.to_string()));
        }

        let slot = self.entries.len();
        if slot > MAX_HANDLE as usize {
            return Err(BundleError::TooManyHandles {
                name: name.to_string(),
                slot: slot.min(u8::MAX as usize) as u8,
                max: MAX_HANDLE,
            });
        }

        // a 511 px row of the widest format (2 bytes) still fits the 10-bit
        // BITMAP_LAYOUT stride field, so the side limit covers the stride too
        if width > MAX_CELL_DIMENSION || height > MAX_CELL_DIMENSION {
            return Err(BundleError::CellTooLarge {
                name: name.to_string(),
                reason: format!(
                    "{}x{} exceeds {} pixels per side",
                    width, height, MAX_CELL_DIMENSION
                ),
            });
        }

        let stride = format.stride(width);
        let address = align_up(self.data.len());
        let size = stride as usize * height as usize * cells.len();
        if address + size > RAM_G_SIZE {
            return Err(BundleError::OutOfMemory {
                name: name.to_string(),
                needed: size,
                available: RAM_G_SIZE.saturating_sub(address),
            });
        }

        self.data.resize(address, 0);
        for cell in cells {
            self.data.extend_from_slice(&format.encode_image(cell));
        }

        self.entries.push(BundleEntry {
            name: name.to_string(),
            handle: slot as u8,
            width,
            height,
            cells: cells.len(),
            format,
            address,
            size,
        });
        Ok(&self.entries[slot])
    }

    /// Controller command stream that uploads and configures the bundle.
    pub fn command_stream(&self) -> Vec<u8> {
        encode::command_stream(self)
    }

    /// Serialized bundle (C header text) as bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode::render_header(self).into_bytes()
    }

    /// Write the bundle to `path`, replacing any previous file atomically.
    pub fn finalize(&self, path: &Path) -> Result<BundleOutput, BundleError> {
        let bytes = self.to_bytes();
        write_atomic(path, &bytes)?;
        Ok(BundleOutput {
            path: path.to_path_buf(),
            bytes: bytes.len(),
            hash: blake3::hash(&bytes).to_hex().to_string(),
        })
    }
}

fn align_up(offset: usize) -> usize {
    offset.div_ceil(ALIGNMENT) * ALIGNMENT
}

/// True if `name` is usable as a C preprocessor symbol prefix.
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
