//! Sprite-sheet loading and grid slicing.
//!
//! Sheets are tiled left-to-right, top-to-bottom into equal cells. Pixels
//! past the last complete row or column are dropped: cells are never cropped
//! or padded.

use std::path::Path;

use image::{GenericImageView, RgbaImage};

use crate::error::BundleError;

/// Grid geometry of a sheet for a given cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGrid {
    /// Complete cells per row.
    pub cols: u32,
    /// Complete rows of cells.
    pub rows: u32,
    /// Cell width in pixels.
    pub cell_width: u32,
    /// Cell height in pixels.
    pub cell_height: u32,
    /// Pixels discarded at the right edge.
    pub remainder_x: u32,
    /// Pixels discarded at the bottom edge.
    pub remainder_y: u32,
}

impl CellGrid {
    /// Compute the grid for an image of `width`x`height`.
    pub fn compute(
        width: u32,
        height: u32,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self, BundleError> {
        if cell_width == 0 || cell_height == 0 {
            return Err(BundleError::InvalidCellSize(cell_width, cell_height));
        }
        Ok(Self {
            cols: width / cell_width,
            rows: height / cell_height,
            cell_width,
            cell_height,
            remainder_x: width % cell_width,
            remainder_y: height % cell_height,
        })
    }

    /// Total number of complete cells.
    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// True if the image is an exact multiple of the cell size.
    pub fn is_exact(&self) -> bool {
        self.remainder_x == 0 && self.remainder_y == 0
    }

    /// `(row, col)` of the cell at `index` in row-major order.
    pub fn position(&self, index: usize) -> (u32, u32) {
        let cols = self.cols as usize;
        ((index / cols) as u32, (index % cols) as u32)
    }

    /// Pixel rectangle `(x, y, width, height)` of the cell at `index`.
    pub fn rect(&self, index: usize) -> (u32, u32, u32, u32) {
        let (row, col) = self.position(index);
        (
            col * self.cell_width,
            row * self.cell_height,
            self.cell_width,
            self.cell_height,
        )
    }
}

/// Load a sheet image from disk as 8-bit RGBA.
pub fn load_sheet(path: &Path) -> Result<RgbaImage, BundleError> {
    let image = image::open(path).map_err(|source| BundleError::AssetLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Cut `image` into `cell_width`x`cell_height` cells in row-major order.
pub fn split(
    image: &RgbaImage,
    cell_width: u32,
    cell_height: u32,
) -> Result<Vec<RgbaImage>, BundleError> {
    let grid = CellGrid::compute(image.width(), image.height(), cell_width, cell_height)?;
    Ok(split_grid(image, &grid))
}

/// Cut `image` along an already computed grid.
pub fn split_grid(image: &RgbaImage, grid: &CellGrid) -> Vec<RgbaImage> {
    (0..grid.cell_count())
        .map(|index| {
            let (x, y, w, h) = grid.rect(index);
            image.view(x, y, w, h).to_image()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use pretty_assertions::assert_eq;

    /// Each pixel encodes its own coordinates so cells can be identified.
    fn coordinate_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, (x / 256) as u8, 255])
        })
    }

    #[test]
    fn test_single_cell_equals_whole_image() {
        let image = coordinate_image(30, 157);
        let cells = split(&image, 30, 157).unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0], image);
    }

    #[test]
    fn test_horizontal_strip_left_to_right() {
        let image = coordinate_image(300, 157);
        let cells = split(&image, 30, 157).unwrap();
        assert_eq!(cells.len(), 10);
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.dimensions(), (30, 157));
            assert_eq!(cell.get_pixel(0, 0).0[0], (i * 30) as u8);
        }
    }

    #[test]
    fn test_row_major_order() {
        let image = coordinate_image(64, 48);
        let cells = split(&image, 16, 16).unwrap();
        let grid = CellGrid::compute(64, 48, 16, 16).unwrap();
        assert_eq!(cells.len(), 12);
        for (i, cell) in cells.iter().enumerate() {
            let (row, col) = (i / 4, i % 4);
            assert_eq!(grid.position(i), (row as u32, col as u32));
            let origin = cell.get_pixel(0, 0).0;
            assert_eq!(origin[0] as usize, col * 16);
            assert_eq!(origin[1] as usize, row * 16);
        }
    }

    #[test]
    fn test_remainder_is_discarded() {
        // 50x37 at 16x16: 3 columns (2px spare), 2 rows (5px spare)
        let image = coordinate_image(50, 37);
        let grid = CellGrid::compute(50, 37, 16, 16).unwrap();
        assert_eq!((grid.cols, grid.rows), (3, 2));
        assert_eq!((grid.remainder_x, grid.remainder_y), (2, 5));
        assert!(!grid.is_exact());

        let cells = split(&image, 16, 16).unwrap();
        assert_eq!(cells.len(), 6);
        for cell in &cells {
            assert_eq!(cell.dimensions(), (16, 16));
        }
        let last = cells.last().unwrap();
        assert_eq!(last.get_pixel(15, 15).0[0], 47);
        assert_eq!(last.get_pixel(15, 15).0[1], 31);
    }

    #[test]
    fn test_cell_larger_than_image_yields_nothing() {
        let image = coordinate_image(10, 10);
        let cells = split(&image, 16, 16).unwrap();
        assert!(cells.is_empty());
    }

    #[test]
    fn test_zero_cell_size_rejected() {
        let image = coordinate_image(10, 10);
        assert!(matches!(
            split(&image, 0, 4),
            Err(BundleError::InvalidCellSize(0, 4))
        ));
    }

    #[test]
    fn test_cell_pixels_match_source_rect() {
        let image = coordinate_image(40, 30);
        let grid = CellGrid::compute(40, 30, 20, 10).unwrap();
        let cells = split_grid(&image, &grid);
        for (i, cell) in cells.iter().enumerate() {
            let (x0, y0, w, h) = grid.rect(i);
            for y in 0..h {
                for x in 0..w {
                    assert_eq!(cell.get_pixel(x, y), image.get_pixel(x0 + x, y0 + y));
                }
            }
        }
    }

    #[test]
    fn test_load_missing_sheet() {
        let err = load_sheet(Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, BundleError::AssetLoad { .. }));
        assert_eq!(err.code(), "GD2_001");
    }
}
