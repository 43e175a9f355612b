//! FILENAME: grid-model/src/coord.rs
//! PURPOSE: Absolute grid coordinates and merged-region spans.
//! CONTEXT: All coordinates are 0-based (row, col). A `Span` is an inclusive
//! rectangle; when start == end on both axes it is a single, unmerged cell.
//! The A1 helpers convert to spreadsheet notation for renderers
//! (column 0 = "A", row 0 = "1").

use std::fmt;
use serde::{Deserialize, Serialize};
use rustc_hash::FxHashMap;

use crate::error::LayoutError;

/// A cell coordinate as (row, col) with 0-based indices.
pub type CellCoord = (u32, u32);

/// Inclusive rectangular range occupied by one logical entry.
/// Ordering is row-major on the start corner, which is the order renderers
/// emit cells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl Span {
    pub const fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Span { start_row, start_col, end_row, end_col }
    }

    /// A single, unmerged cell.
    pub const fn cell(row: u32, col: u32) -> Self {
        Span::new(row, col, row, col)
    }

    /// A span of `height` rows and `width` columns anchored at `origin`.
    /// Zero extents are treated as one.
    pub fn sized(origin: CellCoord, height: u32, width: u32) -> Self {
        let (row, col) = origin;
        Span::new(row, col, row + height.max(1) - 1, col + width.max(1) - 1)
    }

    pub fn start(&self) -> CellCoord {
        (self.start_row, self.start_col)
    }

    pub fn height(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    pub fn width(&self) -> u32 {
        self.end_col - self.start_col + 1
    }

    /// True when the span covers more than one cell and must be merged.
    pub fn is_merged(&self) -> bool {
        self.start_row != self.end_row || self.start_col != self.end_col
    }

    /// Translates all four coordinates by the given deltas.
    pub fn shifted(&self, d_row: u32, d_col: u32) -> Result<Span, LayoutError> {
        self.offset(i64::from(d_row), i64::from(d_col))
    }

    /// Moves the span so that `from` lands on `to`.
    pub fn rebased(&self, from: CellCoord, to: CellCoord) -> Result<Span, LayoutError> {
        self.offset(
            i64::from(to.0) - i64::from(from.0),
            i64::from(to.1) - i64::from(from.1),
        )
    }

    fn offset(&self, d_row: i64, d_col: i64) -> Result<Span, LayoutError> {
        let (start_row, start_col) = checked_coord(
            i64::from(self.start_row) + d_row,
            i64::from(self.start_col) + d_col,
        )?;
        let (end_row, end_col) = checked_coord(
            i64::from(self.end_row) + d_row,
            i64::from(self.end_col) + d_col,
        )?;
        Ok(Span::new(start_row, start_col, end_row, end_col))
    }
}

/// Narrows a wide (row, col) pair to a `CellCoord`, failing with
/// `CoordinateOverflow` when either part is negative or exceeds `u32::MAX`.
pub fn checked_coord(row: i64, col: i64) -> Result<CellCoord, LayoutError> {
    match (u32::try_from(row), u32::try_from(col)) {
        (Ok(row), Ok(col)) => Ok((row, col)),
        _ => Err(LayoutError::CoordinateOverflow { row, col }),
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.start_row, self.start_col, self.end_row, self.end_col
        )
    }
}

/// Spreadsheet column letters for a 0-based index: 0 -> "A", 25 -> "Z",
/// 26 -> "AA", 701 -> "ZZ".
pub fn index_to_col(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col as u64 + 1;
    while n > 0 {
        let digit = ((n - 1) % 26) as u8;
        letters.push(b'A' + digit);
        n = (n - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Converts a 0-based (row, col) coordinate to an A1-style reference string.
/// (0, 0) -> "A1", (1, 1) -> "B2", (99, 26) -> "AA100"
pub fn coord_to_a1(coord: CellCoord) -> String {
    let (row, col) = coord;
    format!("{}{}", index_to_col(col), row + 1)
}

/// Read-through cache of column letters for one rendering pass.
/// The cache is owned by the caller and dropped with it; nothing is shared
/// between passes.
#[derive(Debug, Default)]
pub struct A1Cache {
    columns: FxHashMap<u32, String>,
}

impl A1Cache {
    pub fn new() -> Self {
        A1Cache::default()
    }

    pub fn column(&mut self, col: u32) -> &str {
        self.columns.entry(col).or_insert_with(|| index_to_col(col))
    }

    pub fn cell(&mut self, coord: CellCoord) -> String {
        let (row, col) = coord;
        format!("{}{}", self.column(col), row + 1)
    }

    /// "B3" for a single cell, "B3:D4" for a merged span.
    pub fn range(&mut self, span: &Span) -> String {
        let start = self.cell(span.start());
        if !span.is_merged() {
            return start;
        }
        let end = self.cell((span.end_row, span.end_col));
        format!("{}:{}", start, end)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_to_col() {
        assert_eq!(index_to_col(0), "A");
        assert_eq!(index_to_col(25), "Z");
        assert_eq!(index_to_col(26), "AA");
        assert_eq!(index_to_col(52), "BA");
        assert_eq!(index_to_col(701), "ZZ");
        assert_eq!(index_to_col(702), "AAA");
        assert_eq!(index_to_col(16383), "XFD");
    }

    #[test]
    fn test_coord_to_a1() {
        assert_eq!(coord_to_a1((0, 0)), "A1");
        assert_eq!(coord_to_a1((99, 26)), "AA100");
    }

    #[test]
    fn test_span_geometry() {
        let span = Span::new(2, 3, 4, 3);
        assert_eq!(span.height(), 3);
        assert_eq!(span.width(), 1);
        assert!(span.is_merged());
        assert!(!Span::cell(1, 1).is_merged());
        assert_eq!(Span::sized((1, 1), 0, 2), Span::new(1, 1, 1, 2));
    }

    #[test]
    fn test_span_translation() {
        let span = Span::new(2, 3, 2, 6);
        assert_eq!(span.shifted(2, 4).unwrap(), Span::new(4, 7, 4, 10));
        assert_eq!(span.rebased((2, 3), (0, 0)).unwrap(), Span::new(0, 0, 0, 3));
        assert_eq!(span.rebased((0, 0), (1, 1)).unwrap(), Span::new(3, 4, 3, 7));
    }

    #[test]
    fn test_span_translation_out_of_range() {
        let span = Span::new(2, 3, 2, 6);
        assert!(matches!(
            span.shifted(u32::MAX, 0),
            Err(LayoutError::CoordinateOverflow { .. })
        ));
        assert!(matches!(
            span.shifted(0, u32::MAX - 6),
            Ok(s) if s.end_col == u32::MAX
        ));
        assert!(matches!(
            span.rebased((5, 0), (0, 0)),
            Err(LayoutError::CoordinateOverflow { row: -3, col: 3 })
        ));
    }

    #[test]
    fn test_span_ordering_is_row_major() {
        let mut spans = vec![Span::cell(1, 0), Span::cell(0, 5), Span::cell(0, 1)];
        spans.sort();
        assert_eq!(spans, vec![Span::cell(0, 1), Span::cell(0, 5), Span::cell(1, 0)]);
    }

    #[test]
    fn test_a1_cache_ranges() {
        let mut cache = A1Cache::new();
        assert_eq!(cache.range(&Span::cell(2, 1)), "B3");
        assert_eq!(cache.range(&Span::new(2, 1, 3, 3)), "B3:D4");
        assert_eq!(cache.len(), 2); // B and D
        assert_eq!(cache.column(27), "AB");
    }
}
