//! Grid sizing derived from the label provider.
//!
//! Label metrics are consulted once, when the grid is (re)built; the gesture
//! path never touches them.

use ratatui::text::Line;

/// Measures caption bubbles for the grid.
pub trait LabelMetrics {
    /// Width of a rendered caption, pixels.
    fn label_width(&self, label: &str) -> u32;
    /// Height of one caption line, pixels.
    fn line_height(&self) -> u32;
}

/// Caption metrics on a terminal, where each cell maps to a fixed pixel box.
#[derive(Debug, Clone, Copy)]
pub struct TerminalLabels {
    pub cell_width_px: u16,
    pub cell_height_px: u16,
}

impl LabelMetrics for TerminalLabels {
    fn label_width(&self, label: &str) -> u32 {
        Line::from(label).width() as u32 * self.cell_width_px as u32
    }

    fn line_height(&self) -> u32 {
        self.cell_height_px as u32
    }
}

/// Caption bubble dimensions shared by every tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridParams {
    /// Widest caption the bubble shows, pixels
    pub bubble_width: u32,
    /// Tallest caption the bubble shows, pixels
    pub bubble_height: u32,
    /// Bubble backing size including padding
    pub bubble_bitmap_width: u32,
    pub bubble_bitmap_height: u32,
}

impl GridParams {
    /// Widest caption before truncation, in cells.
    pub const MAX_LABEL_CELLS: u32 = 14;
    pub const MIN_LABEL_CELLS: u32 = 6;
    /// Lines a caption may wrap to.
    pub const LABEL_LINES: u32 = 2;
    /// Padding on each side of the bubble, in cells.
    pub const PADDING_CELLS: u32 = 1;

    /// Size bubbles to fit the widest of `labels`, within fixed bounds.
    pub fn measure<'a, M: LabelMetrics>(
        metrics: &M,
        cell_width_px: u16,
        labels: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let cell = cell_width_px.max(1) as u32;
        let widest = labels
            .into_iter()
            .map(|label| metrics.label_width(label))
            .max()
            .unwrap_or(0);

        let bubble_width = widest.clamp(Self::MIN_LABEL_CELLS * cell, Self::MAX_LABEL_CELLS * cell);
        let bubble_height = metrics.line_height() * Self::LABEL_LINES;

        Self {
            bubble_width,
            bubble_height,
            bubble_bitmap_width: bubble_width + 2 * Self::PADDING_CELLS * cell,
            bubble_bitmap_height: bubble_height + metrics.line_height(),
        }
    }

    /// Horizontal pitch of one grid column, pixels.
    pub fn tile_width(&self) -> u32 {
        self.bubble_bitmap_width
    }
}

/// Icon grid geometry in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub tile_width: u32,
    pub rows: u32,
    pub viewport_width: u32,
}

impl GridGeometry {
    pub fn columns(&self, icon_count: usize) -> u32 {
        let rows = self.rows.max(1) as usize;
        icon_count.div_ceil(rows) as u32
    }

    pub fn content_width(&self, icon_count: usize) -> u32 {
        self.columns(icon_count) * self.tile_width
    }

    /// Lowest allowed scroll offset; scrolling runs from here up to 0.
    ///
    /// Dragging left moves content left, so offsets are non-positive.
    pub fn min_scroll(&self, icon_count: usize) -> i32 {
        let overflow = self.content_width(icon_count).saturating_sub(self.viewport_width);
        -(overflow.min(i32::MAX as u32) as i32)
    }

    pub fn clamp_scroll(&self, icon_count: usize, scroll_x: i32) -> i32 {
        scroll_x.clamp(self.min_scroll(icon_count), 0)
    }
}
