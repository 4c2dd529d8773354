//! Demo table model, its geometry and the dependent viewports

use std::cell::Cell;
use std::rc::Rc;

use gridscroll_core::config::UiConfig;
use gridscroll_core::{Extents, TargetRect, Viewport, ViewportGeometry};

use crate::adapter::CellMetrics;

/// Width of the sticky name column in cells
pub const NAME_WIDTH: u16 = 10;

/// A fixed table: a sticky name column plus scrollable numeric columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoTable {
    pub rows: usize,
    pub columns: usize,
    pub column_width: u16,
}

impl DemoTable {
    pub fn from_config(ui: &UiConfig) -> Self {
        Self {
            rows: ui.rows,
            columns: ui.columns,
            column_width: ui.column_width.max(4),
        }
    }

    /// Width of the scrollable part in cells
    pub fn scroll_width(&self) -> usize {
        self.columns * self.column_width as usize
    }

    /// Left edge of column `index` in cells
    pub fn column_left(&self, index: usize) -> usize {
        index * self.column_width as usize
    }

    /// Column index for a `col-N` target name
    pub fn column_target(&self, target: &str) -> Option<usize> {
        let index: usize = target.strip_prefix("col-")?.parse().ok()?;
        (index < self.columns).then_some(index)
    }

    pub fn header_line(&self) -> String {
        (0..self.columns)
            .map(|c| self.cell(&format!("col {}", c + 1)))
            .collect()
    }

    pub fn row_line(&self, row: usize) -> String {
        (0..self.columns)
            .map(|c| self.cell(&format!("{}", (row + 1) * 100 + c * 7)))
            .collect()
    }

    pub fn row_name(&self, row: usize) -> String {
        format!(" row {:<width$}", row + 1, width = NAME_WIDTH as usize - 5)
    }

    fn cell(&self, text: &str) -> String {
        let width = self.column_width as usize;
        let mut cell = format!(" {:>width$}", text, width = width - 2);
        cell.truncate(width - 1);
        cell.push('│');
        cell
    }
}

/// Cut the visible window out of a full-width line
pub fn visible_slice(line: &str, offset: usize, width: usize) -> String {
    line.chars().skip(offset).take(width).collect()
}

/// Geometry query backed by the body area of the last layout
///
/// Vertical scrolling belongs to the terminal, so content height always
/// equals the viewport height.
#[derive(Debug, Clone)]
pub struct TableGeometry {
    table: DemoTable,
    metrics: CellMetrics,
    area: Rc<Cell<(u16, u16)>>,
}

impl TableGeometry {
    pub fn new(table: DemoTable, metrics: CellMetrics) -> Self {
        Self {
            table,
            metrics,
            area: Rc::new(Cell::new((0, 0))),
        }
    }

    /// Record the body area in cells; returns whether it changed
    pub fn set_area(&self, width: u16, height: u16) -> bool {
        let changed = self.area.get() != (width, height);
        self.area.set((width, height));
        changed
    }

    pub fn area(&self) -> (u16, u16) {
        self.area.get()
    }
}

impl ViewportGeometry for TableGeometry {
    fn extents(&self) -> Extents {
        let (width, height) = self.area.get();
        let viewport_height = height as f64 * self.metrics.height;
        Extents {
            content_width: self.table.scroll_width() as f64 * self.metrics.width,
            content_height: viewport_height,
            viewport_width: width as f64 * self.metrics.width,
            viewport_height,
        }
    }

    fn target_rect(&self, target: &str) -> Option<TargetRect> {
        let index = self.table.column_target(target)?;
        let (_, height) = self.area.get();
        Some(TargetRect {
            left: self.table.column_left(index) as f64 * self.metrics.width,
            top: 0.0,
            width: self.table.column_width as f64 * self.metrics.width,
            height: height as f64 * self.metrics.height,
        })
    }
}

/// Offset last pushed to one dependent view
#[derive(Debug, Clone, Default)]
pub struct SharedOffset(Rc<Cell<(f64, f64)>>);

impl SharedOffset {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(left, top)` in viewport convention
    pub fn get(&self) -> (f64, f64) {
        self.0.get()
    }

    pub fn left(&self) -> f64 {
        self.0.get().0
    }

    /// Handle to attach to the engine
    pub fn viewport(&self) -> Box<dyn Viewport> {
        let cell = self.0.clone();
        Box::new(move |left: f64, top: f64| cell.set((left, top)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DemoTable {
        DemoTable {
            rows: 200,
            columns: 12,
            column_width: 14,
        }
    }

    #[test]
    fn test_lines_span_the_scroll_width() {
        let table = table();
        assert_eq!(table.header_line().chars().count(), table.scroll_width());
        assert_eq!(table.row_line(5).chars().count(), 168);
        assert_eq!(table.row_name(0).chars().count(), NAME_WIDTH as usize);
    }

    #[test]
    fn test_visible_slice() {
        assert_eq!(visible_slice("abcdef", 2, 3), "cde");
        assert_eq!(visible_slice("abc", 5, 3), "");
        assert_eq!(visible_slice("a│b", 1, 5), "│b");
    }

    #[test]
    fn test_geometry_in_pixels() {
        let geometry = TableGeometry::new(table(), CellMetrics::from_cell_px(10.0));
        assert!(geometry.set_area(40, 20));
        assert!(!geometry.set_area(40, 20));

        let extents = geometry.extents();
        assert_eq!(extents.content_width, 1680.0);
        assert_eq!(extents.viewport_width, 400.0);
        assert_eq!(extents.content_height, extents.viewport_height);
    }

    #[test]
    fn test_column_targets() {
        let geometry = TableGeometry::new(table(), CellMetrics::from_cell_px(10.0));
        geometry.set_area(40, 20);
        let rect = geometry.target_rect("col-3").unwrap();
        assert_eq!(rect.left, 420.0);
        assert_eq!(rect.width, 140.0);
        assert_eq!(geometry.target_rect("col-12"), None);
        assert_eq!(geometry.target_rect("row-1"), None);
    }

    #[test]
    fn test_shared_offset_follows_viewport() {
        let offset = SharedOffset::new();
        let mut viewport = offset.viewport();
        viewport.set_offset(120.0, 0.0);
        assert_eq!(offset.get(), (120.0, 0.0));
        assert_eq!(offset.left(), 120.0);
    }
}
