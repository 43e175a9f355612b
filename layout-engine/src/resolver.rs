//! FILENAME: layout-engine/src/resolver.rs
//! PURPOSE: Assigns an absolute span to every label and data cell of a table.
//! CONTEXT: Layout of a table anchored at `origin`:
//!
//! ```text
//!   origin -> +--------+---------------------+
//!             | corner |   column header     |  header_depth rows
//!             +--------+---------------------+
//!             |  row   |                     |
//!             | index  |    data region      |
//!             |        |                     |
//!             +--------+---------------------+
//!             index_depth cols
//! ```
//!
//! Header nodes are laid out level by level; every level has its own column
//! cursor so siblings pack left to right without gaps. The row index is the
//! same walk transposed. Nested tables are resolved at their cell's top-left
//! corner one nesting level deeper.

use std::sync::Arc;
use log::{debug, trace};
use grid_model::{checked_coord, Cell, CellCoord, LabelTree, LayoutError, NodeData, Span, TableModel};
use crate::span::{heights, node_extents, table_height, table_width, widths};
use crate::view::{ResolvedCell, ResolvedTable};

/// Resolves `table` with its top-left corner at `origin`.
///
/// Label uniqueness is checked for this table and every nested one before
/// any span is computed, so an error never leaves a partial layout behind.
/// The cell just past the table's bottom-right corner must still be
/// addressable, otherwise `CoordinateOverflow` is returned.
pub fn resolve(
    table: impl Into<Arc<TableModel>>,
    origin: CellCoord,
    nesting_level: u32,
) -> Result<ResolvedTable, LayoutError> {
    let table = table.into();
    debug!(
        "[LAYOUT] resolve: {}x{} data cells at {:?}, header_depth={}, index_depth={}, nesting_level={}",
        table.row_count(),
        table.col_count(),
        origin,
        table.header_depth(),
        table.index_depth(),
        nesting_level
    );
    table.validate()?;
    checked_coord(
        i64::from(origin.0) + i64::from(table_height(&table)),
        i64::from(origin.1) + i64::from(table_width(&table)),
    )?;
    Ok(resolve_validated(table, origin, nesting_level))
}

fn resolve_validated(table: Arc<TableModel>, origin: CellCoord, nesting_level: u32) -> ResolvedTable {
    let (row0, col0) = origin;
    let header_depth = table.header_depth();
    let index_depth = table.index_depth();
    let col_widths = widths(&table);
    let row_heights = heights(&table);

    let corner = (header_depth > 0 && index_depth > 0)
        .then(|| Span::new(row0, col0, row0 + header_depth - 1, col0 + index_depth - 1));

    let header = (header_depth > 0)
        .then(|| resolve_header(table.column_tree(), &col_widths, (row0, col0 + index_depth)));

    let index = (index_depth > 0)
        .then(|| resolve_index(table.row_tree(), &row_heights, (row0 + header_depth, col0)));

    let mut cells = Vec::with_capacity(table.row_count());
    let mut row = row0 + header_depth;
    for (source_row, &height) in table.cells().iter().zip(&row_heights) {
        let mut col = col0 + index_depth;
        let mut resolved_row = Vec::with_capacity(source_row.len());
        for (cell, &width) in source_row.iter().zip(&col_widths) {
            let span = Span::sized((row, col), height, width);
            resolved_row.push(match cell {
                Cell::Leaf { .. } => ResolvedCell::Leaf(span),
                Cell::Nested(inner) => {
                    trace!("[LAYOUT] nested table at {} (level {})", span, nesting_level + 1);
                    ResolvedCell::Nested {
                        span,
                        table: Box::new(resolve_validated(Arc::clone(inner), span.start(), nesting_level + 1)),
                    }
                }
            });
            col += width;
        }
        cells.push(resolved_row);
        row += height;
    }

    ResolvedTable {
        height: table_height(&table),
        width: table_width(&table),
        model: table,
        origin,
        nesting_level,
        corner,
        header,
        index,
        cells,
    }
}

/// Column header: level `d` occupies row `origin.row + d`, nodes advance
/// to the right by their width.
fn resolve_header(tree: &LabelTree, col_widths: &[u32], origin: CellCoord) -> NodeData<Span> {
    let extents = node_extents(tree, col_widths);
    let mut cursors = vec![origin.1; tree.levels()];
    tree.map_level_order(|id, node| {
        let level = node.depth() - 1;
        let row = origin.0 + level as u32;
        let col = cursors[level];
        cursors[level] += extents[id];
        Span::new(row, col, row, col + extents[id] - 1)
    })
}

/// Row index: level `d` occupies column `origin.col + d`, nodes advance
/// downwards by their height.
fn resolve_index(tree: &LabelTree, row_heights: &[u32], origin: CellCoord) -> NodeData<Span> {
    let extents = node_extents(tree, row_heights);
    let mut cursors = vec![origin.0; tree.levels()];
    tree.map_level_order(|id, node| {
        let level = node.depth() - 1;
        let col = origin.1 + level as u32;
        let row = cursors[level];
        cursors[level] += extents[id];
        Span::new(row, col, row + extents[id] - 1, col)
    })
}
