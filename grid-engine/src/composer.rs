//! FILENAME: grid-engine/src/composer.rs
//! PURPOSE: Packs many tables into one coordinate space.
//! CONTEXT: Composition runs in four steps:
//! 1. Build   - the `LayoutSpec` becomes a `GridNode` tree, orientation
//!              flipping at every nested group.
//! 2. Resolve - every leaf is resolved (or relocated) at (0, 0).
//! 3. Pack    - one depth-first pass hands each leaf its global origin.
//!              Children are sized bottom-up and positioned top-down.
//! 4. Flatten - every placed table is merged into a single `FlatCellMap`.
//!
//! A leaf's footprint is its size plus the configured padding on both axes.
//! A vertical group sums its children's heights and takes the widest width;
//! a horizontal group does the opposite.

use std::convert::Infallible;
use log::{debug, trace};
use grid_model::{checked_coord, CellCoord, LayoutError};
use layout_engine::{resolve, FlatCellMap, FlattenMode, ResolvedTable};
use crate::definition::{ComposeOptions, LayoutSpec, Orientation};

// ============================================================================
// GRID TREE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum GridNode<T> {
    Leaf(T),
    Group {
        orientation: Orientation,
        children: Vec<GridNode<T>>,
    },
}

/// A leaf that has not been resolved yet.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingTable {
    Table(grid_model::TableModel),
    Resolved(ResolvedTable),
}

/// Per-table flat maps arranged the way the layout spec nests them.
pub type ComposedTree = GridNode<FlatCellMap>;

impl GridNode<PendingTable> {
    /// Converts a layout spec, starting with `orientation` at the top.
    pub fn build(spec: LayoutSpec, orientation: Orientation) -> Self {
        match spec {
            LayoutSpec::Table(table) => GridNode::Leaf(PendingTable::Table(table)),
            LayoutSpec::Resolved(table) => GridNode::Leaf(PendingTable::Resolved(table)),
            LayoutSpec::Group(members) => GridNode::Group {
                orientation,
                children: members
                    .into_iter()
                    .map(|member| GridNode::build(member, orientation.flip()))
                    .collect(),
            },
        }
    }

    /// Resolves every leaf with its top-left corner at (0, 0).
    pub fn resolve_leaves(self) -> Result<GridNode<ResolvedTable>, LayoutError> {
        self.try_map(|pending| match pending {
            PendingTable::Table(table) => resolve(table, (0, 0), 0),
            PendingTable::Resolved(table) => table.relocated(0, 0),
        })
    }
}

impl<T> GridNode<T> {
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<GridNode<U>, E> {
        self.try_map_with(&mut f)
    }

    fn try_map_with<U, E, F>(self, f: &mut F) -> Result<GridNode<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(match self {
            GridNode::Leaf(item) => GridNode::Leaf(f(item)?),
            GridNode::Group { orientation, children } => GridNode::Group {
                orientation,
                children: children
                    .into_iter()
                    .map(|child| child.try_map_with(f))
                    .collect::<Result<_, E>>()?,
            },
        })
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> GridNode<U> {
        match self.try_map(|item| Ok::<U, Infallible>(f(item))) {
            Ok(node) => node,
            Err(never) => match never {},
        }
    }

    /// Folds over the leaves left to right, depth first.
    pub fn fold<A>(&self, init: A, mut f: impl FnMut(A, &T) -> A) -> A {
        self.leaves().into_iter().fold(init, |acc, item| f(acc, item))
    }

    /// Leaves in layout order.
    pub fn leaves(&self) -> Vec<&T> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                GridNode::Leaf(item) => leaves.push(item),
                GridNode::Group { children, .. } => stack.extend(children.iter().rev()),
            }
        }
        leaves
    }

    pub fn orientation(&self) -> Option<Orientation> {
        match self {
            GridNode::Group { orientation, .. } => Some(*orientation),
            GridNode::Leaf(_) => None,
        }
    }
}

// ============================================================================
// PACKING
// ============================================================================

/// Something with a rectangular size that can be moved.
pub trait Placeable: Sized {
    /// `(height, width)` in cells.
    fn footprint(&self) -> (u32, u32);

    /// Moves an item sitting at (0, 0) so its top-left corner is `origin`.
    fn place(self, origin: CellCoord) -> Result<Self, LayoutError>;
}

impl Placeable for ResolvedTable {
    fn footprint(&self) -> (u32, u32) {
        (self.height(), self.width())
    }

    fn place(self, origin: CellCoord) -> Result<Self, LayoutError> {
        if self.origin() == origin {
            Ok(self)
        } else {
            self.relocated(origin.0, origin.1)
        }
    }
}

/// Places every leaf of `node` starting at `origin`. Returns the padded
/// footprint of the whole subtree together with the placed tree.
///
/// Footprints are summed in `u64`, so padding only fails when a leaf would
/// actually start past `u32::MAX`.
pub fn pack<T: Placeable>(
    node: GridNode<T>,
    origin: CellCoord,
    options: &ComposeOptions,
) -> Result<((u64, u64), GridNode<T>), LayoutError> {
    pack_at(node, (u64::from(origin.0), u64::from(origin.1)), options)
}

fn pack_at<T: Placeable>(
    node: GridNode<T>,
    origin: (u64, u64),
    options: &ComposeOptions,
) -> Result<((u64, u64), GridNode<T>), LayoutError> {
    match node {
        GridNode::Leaf(item) => {
            let (height, width) = item.footprint();
            let origin = checked_coord(wide(origin.0), wide(origin.1))?;
            trace!("[GRID] place {}x{} at {:?}", height, width, origin);
            let footprint = (
                u64::from(height) + u64::from(options.v_shift_by),
                u64::from(width) + u64::from(options.h_shift_by),
            );
            Ok((footprint, GridNode::Leaf(item.place(origin)?)))
        }
        GridNode::Group { orientation, children } => {
            let (mut row, mut col) = origin;
            let (mut total_rows, mut total_cols) = (0u64, 0u64);
            let mut placed = Vec::with_capacity(children.len());
            for child in children {
                let ((rows, cols), child) = pack_at(child, (row, col), options)?;
                match orientation {
                    Orientation::Vertical => {
                        row = row.saturating_add(rows);
                        total_rows = total_rows.saturating_add(rows);
                        total_cols = total_cols.max(cols);
                    }
                    Orientation::Horizontal => {
                        col = col.saturating_add(cols);
                        total_cols = total_cols.saturating_add(cols);
                        total_rows = total_rows.max(rows);
                    }
                }
                placed.push(child);
            }
            Ok((
                (total_rows, total_cols),
                GridNode::Group {
                    orientation,
                    children: placed,
                },
            ))
        }
    }
}

fn wide(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

// ============================================================================
// COMPOSITION
// ============================================================================

/// Composes `spec` into one absolute grid.
///
/// Nested tables inside cells are flattened inline, each entry keeping the
/// nesting level of the table it came from.
pub fn compose(spec: impl Into<LayoutSpec>, options: &ComposeOptions) -> Result<FlatCellMap, LayoutError> {
    let spec = spec.into();
    debug!(
        "[GRID] compose: {} table(s), orientation={}, h_shift_by={}, v_shift_by={}",
        spec.table_count(),
        options.orientation,
        options.h_shift_by,
        options.v_shift_by
    );

    let resolved = GridNode::build(spec, options.orientation).resolve_leaves()?;
    let ((rows, cols), placed) = pack(resolved, (0, 0), options)?;
    debug!("[GRID] packed footprint {}x{} (padding included)", rows, cols);

    let mut map = FlatCellMap::new();
    for table in placed.leaves() {
        table.flatten_into(&mut map, FlattenMode::Inline)?;
    }
    Ok(map)
}

/// Resolves every table of `spec` at (0, 0) without packing them, and
/// flattens each one keeping nested tables as nested maps. The result keeps
/// the grouping of `spec` so a renderer can nest containers instead of using
/// absolute coordinates.
pub fn compose_unshifted(spec: impl Into<LayoutSpec>, orientation: Orientation) -> Result<ComposedTree, LayoutError> {
    let spec = spec.into();
    debug!(
        "[GRID] compose_unshifted: {} table(s), orientation={}",
        spec.table_count(),
        orientation
    );
    GridNode::build(spec, orientation)
        .resolve_leaves()?
        .try_map(|table| table.flatten(FlattenMode::Nested))
}
