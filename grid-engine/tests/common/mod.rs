//! FILENAME: grid-engine/tests/common/mod.rs
//! Table fixtures for grid composition integration tests.

#![allow(dead_code)]

use grid_model::{Cell, Label, Labels, Span, Style, StyledValue, TableModel, TableSource, Value};
use layout_engine::{FlatCell, FlatCellMap};

/// A table whose resolved size is `height` x `width`, labels included.
/// Data is (height - 1) x (width - 1); the corner label carries `name` so
/// tests can find where the table was placed.
pub fn sized_table(name: &str, height: u32, width: u32) -> TableModel {
    let rows = (height - 1) as usize;
    let cols = (width - 1) as usize;
    let cells = (0..rows)
        .map(|r| (0..cols).map(|c| Cell::leaf(format!("{name}:{r}:{c}"), Style::new())).collect())
        .collect();
    TableModel::new(
        &Labels::flat((0..cols).map(|c| format!("c{c}"))),
        &Labels::flat((0..rows as i64).collect::<Vec<_>>()),
        cells,
    )
    .expect("valid fixture")
    .with_corner(StyledValue::new(name, Style::new()))
}

/// Rows [1, 2, 3], columns ["a", "b"], values "a1".."b3".
pub fn numbers_table() -> TableModel {
    TableSource::new(Labels::flat([1, 2, 3]), Labels::flat(["a", "b"]), |r, c| {
        format!("{}{}", c[0], r[0])
    })
    .build()
    .expect("valid fixture")
}

/// Two-level columns [("a", 1), ("a", 2), ("b", 1)] over one row.
pub fn two_level_table() -> TableModel {
    TableSource::new(
        Labels::flat(["r"]),
        Labels::hierarchical([
            [Label::from("a"), Label::from(1)],
            [Label::from("a"), Label::from(2)],
            [Label::from("b"), Label::from(1)],
        ]),
        |_, c| Value::text(format!("{}{}", c[0], c[1])),
    )
    .build()
    .expect("valid fixture")
}

/// `numbers_table` placed in the cell at row 2, column "b" of an outer 3x2
/// table.
pub fn outer_with_nested() -> TableModel {
    TableSource::new(Labels::flat([1, 2, 3]), Labels::flat(["a", "b"]), |r, c| {
        if r[0] == Label::from(2) && c[0] == Label::from("b") {
            grid_model::CellContent::Table(numbers_table())
        } else {
            grid_model::CellContent::from(0.0)
        }
    })
    .build()
    .expect("valid fixture")
}

/// Where the table whose corner label is `name` ended up.
pub fn corner_of(map: &FlatCellMap, name: &str) -> Option<Span> {
    map.iter()
        .find(|(_, cell)| cell.as_scalar() == Some(&Value::text(name)))
        .map(|(span, _)| *span)
}

pub fn text_at<'a>(map: &'a FlatCellMap, span: Span) -> Option<&'a Value> {
    map.get(&span).and_then(FlatCell::as_scalar)
}
