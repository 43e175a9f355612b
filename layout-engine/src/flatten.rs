//! FILENAME: layout-engine/src/flatten.rs
//! PURPOSE: Turns resolved tables into the span -> content map renderers read.
//! CONTEXT: Two flattening modes exist. `Inline` merges every nested table's
//! entries into the same map (a spreadsheet has one coordinate space).
//! `Nested` keeps a nested table as one entry at its outer cell whose value
//! is the nested table's own map (HTML nests containers).
//!
//! The map refuses to overwrite an entry. Two entries resolving to the same
//! span can only come from a layout bug and abort with `InvariantViolation`.

use std::collections::btree_map::{self, BTreeMap};
use serde::{Deserialize, Serialize};
use grid_model::{LayoutError, NodeData, Span, Style, StyleId, StyleRegistry, StyledValue, Value};
use crate::view::{ResolvedCell, ResolvedTable};

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlattenMode {
    #[default]
    Inline,
    Nested,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlatValue {
    Scalar(Value),
    /// A whole nested table (only produced by `FlattenMode::Nested`).
    Table(FlatCellMap),
}

/// One entry of the output grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatCell {
    pub value: FlatValue,
    pub style: Style,
    pub nesting_level: u32,
}

impl FlatCell {
    pub fn scalar(value: Value, style: Style, nesting_level: u32) -> Self {
        FlatCell {
            value: FlatValue::Scalar(value),
            style,
            nesting_level,
        }
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match &self.value {
            FlatValue::Scalar(v) => Some(v),
            FlatValue::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&FlatCellMap> {
        match &self.value {
            FlatValue::Table(t) => Some(t),
            FlatValue::Scalar(_) => None,
        }
    }
}

/// Span -> content, iterated row-major by start corner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatCellMap {
    cells: BTreeMap<Span, FlatCell>,
}

impl FlatCellMap {
    pub fn new() -> Self {
        FlatCellMap::default()
    }

    /// Adds an entry; fails if `span` is already taken.
    pub fn insert(&mut self, span: Span, cell: FlatCell) -> Result<(), LayoutError> {
        match self.cells.entry(span) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(cell);
                Ok(())
            }
            btree_map::Entry::Occupied(_) => Err(LayoutError::InvariantViolation { span }),
        }
    }

    /// Moves every entry of `other` into `self`.
    pub fn merge(&mut self, other: FlatCellMap) -> Result<(), LayoutError> {
        for (span, cell) in other.cells {
            self.insert(span, cell)?;
        }
        Ok(())
    }

    pub fn get(&self, span: &Span) -> Option<&FlatCell> {
        self.cells.get(span)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Span, &FlatCell)> {
        self.cells.iter()
    }

    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.cells.keys()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Entries grouped by start row, in row order. Rows without any entry
    /// starting on them are absent.
    pub fn rows(&self) -> Vec<(u32, Vec<(&Span, &FlatCell)>)> {
        let mut rows: Vec<(u32, Vec<(&Span, &FlatCell)>)> = Vec::new();
        for (span, cell) in &self.cells {
            if let Some((row, entries)) = rows.last_mut() {
                if *row == span.start_row {
                    entries.push((span, cell));
                    continue;
                }
            }
            rows.push((span.start_row, vec![(span, cell)]));
        }
        rows
    }

    /// Number of rows and columns needed to hold every entry, counted from
    /// (0, 0). Saturates at `u32::MAX` for entries on the grid's last row or
    /// column.
    pub fn extent(&self) -> (u32, u32) {
        self.cells.keys().fold((0, 0), |(rows, cols), s| {
            (rows.max(s.end_row.saturating_add(1)), cols.max(s.end_col.saturating_add(1)))
        })
    }

    /// Interns the style of every top-level entry and returns the id per span.
    /// Nested maps are interned by calling this on them.
    pub fn intern_styles(&self, registry: &mut StyleRegistry) -> BTreeMap<Span, StyleId> {
        self.cells
            .iter()
            .map(|(span, cell)| (*span, registry.intern(&cell.style)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a FlatCellMap {
    type Item = (&'a Span, &'a FlatCell);
    type IntoIter = btree_map::Iter<'a, Span, FlatCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

// ============================================================================
// FLATTENING
// ============================================================================

impl ResolvedTable {
    pub fn flatten(&self, mode: FlattenMode) -> Result<FlatCellMap, LayoutError> {
        let mut map = FlatCellMap::new();
        self.flatten_into(&mut map, mode)?;
        Ok(map)
    }

    /// Writes this table's entries into `map`.
    pub fn flatten_into(&self, map: &mut FlatCellMap, mode: FlattenMode) -> Result<(), LayoutError> {
        let level = self.nesting_level;
        let model = &self.model;

        if let Some(span) = self.corner {
            let corner = model.corner();
            map.insert(span, FlatCell::scalar(corner.value.clone(), corner.style.clone(), level))?;
        }
        if let Some(spans) = &self.header {
            insert_labels(map, spans, model.header(), level)?;
        }
        if let Some(spans) = &self.index {
            insert_labels(map, spans, model.index(), level)?;
        }

        for (resolved_row, source_row) in self.cells.iter().zip(model.cells()) {
            for (resolved, source) in resolved_row.iter().zip(source_row) {
                match (resolved, source) {
                    (ResolvedCell::Leaf(span), grid_model::Cell::Leaf { value, style }) => {
                        map.insert(*span, FlatCell::scalar(value.clone(), style.clone(), level))?;
                    }
                    (ResolvedCell::Nested { span, table }, _) => match mode {
                        FlattenMode::Inline => table.flatten_into(map, mode)?,
                        FlattenMode::Nested => {
                            let inner = table.flatten(mode)?;
                            map.insert(
                                *span,
                                FlatCell {
                                    value: FlatValue::Table(inner),
                                    style: Style::new(),
                                    nesting_level: table.nesting_level,
                                },
                            )?;
                        }
                    },
                    (ResolvedCell::Leaf(span), grid_model::Cell::Nested(_)) => {
                        return Err(LayoutError::InvariantViolation { span: *span });
                    }
                }
            }
        }
        Ok(())
    }
}

fn insert_labels(
    map: &mut FlatCellMap,
    spans: &NodeData<Span>,
    labels: &NodeData<StyledValue>,
    level: u32,
) -> Result<(), LayoutError> {
    for (id, span) in spans.iter() {
        let label = &labels[id];
        map.insert(*span, FlatCell::scalar(label.value.clone(), label.style.clone(), level))?;
    }
    Ok(())
}
