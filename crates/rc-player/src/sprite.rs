//! Contact-sheet coordinate mapping.
//!
//! A contact sheet is one image holding a row-major grid of equally sized
//! thumbnails sampled across the media. A hover percentage selects the cell
//! with the same linear index, so the client can show a preview by shifting
//! the sheet instead of fetching a frame.

use rc_core::config::PreviewConfig;
use serde::Serialize;

/// Pixel origin of one cell inside the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellOrigin {
    pub x: u32,
    pub y: u32,
}

impl CellOrigin {
    /// CSS `object-position` that brings this cell into a cell-sized viewport.
    pub fn object_position(&self) -> String {
        format!("-{}px -{}px", self.x, self.y)
    }
}

/// Fixed grid geometry of a contact sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteGrid {
    sheet_width: u32,
    sheet_height: u32,
    cell_width: u32,
    cell_height: u32,
}

impl Default for SpriteGrid {
    fn default() -> Self {
        PreviewConfig::default().into()
    }
}

impl From<PreviewConfig> for SpriteGrid {
    fn from(config: PreviewConfig) -> Self {
        Self::new(
            config.sheet_width,
            config.sheet_height,
            config.cell_width,
            config.cell_height,
        )
    }
}

impl SpriteGrid {
    pub fn new(sheet_width: u32, sheet_height: u32, cell_width: u32, cell_height: u32) -> Self {
        Self {
            sheet_width,
            sheet_height,
            cell_width,
            cell_height,
        }
    }

    pub fn sheet_size(&self) -> (u32, u32) {
        (self.sheet_width, self.sheet_height)
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Cells per row. A degenerate grid (zero cell width, or a sheet narrower
    /// than one cell) is treated as a single column so mapping stays total.
    pub fn columns(&self) -> u32 {
        self.sheet_width
            .checked_div(self.cell_width)
            .unwrap_or(0)
            .max(1)
    }

    /// Map an integer hover percentage to the origin of its cell.
    ///
    /// The percentage is used directly as the linear cell index; values above
    /// 100 are treated as 100. Origins saturate at `u32::MAX` for grids too
    /// large to address.
    pub fn cell_for(&self, percentage: u32) -> CellOrigin {
        let index = percentage.min(100);
        let columns = self.columns();
        let col = index % columns;
        let row = index / columns;
        CellOrigin {
            x: col.saturating_mul(self.cell_width),
            y: row.saturating_mul(self.cell_height),
        }
    }
}
