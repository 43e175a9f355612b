//! FILENAME: layout-engine/src/span.rs
//! PURPOSE: Row heights, column widths and the sizes of label nodes.
//! CONTEXT: A data column is as wide as the widest table nested anywhere in
//! it (at least one cell); a row is as tall as its tallest nested table.
//! Header and index nodes then span the sum of their leaves.

use grid_model::{Cell, LabelTree, NodeData, TableModel};

/// Width of every leaf column, in declared order.
pub fn widths(table: &TableModel) -> Vec<u32> {
    let mut widths = vec![1u32; table.col_count()];
    for row in table.cells() {
        for (width, cell) in widths.iter_mut().zip(row) {
            if let Cell::Nested(inner) = cell {
                *width = (*width).max(table_width(inner));
            }
        }
    }
    widths
}

/// Height of every leaf row, in declared order.
pub fn heights(table: &TableModel) -> Vec<u32> {
    table
        .cells()
        .iter()
        .map(|row| {
            row.iter()
                .filter_map(Cell::as_nested)
                .map(table_height)
                .fold(1, u32::max)
        })
        .collect()
}

/// Total columns a table occupies, row index included.
pub fn table_width(table: &TableModel) -> u32 {
    widths(table).iter().sum::<u32>() + table.index_depth()
}

/// Total rows a table occupies, column header included.
pub fn table_height(table: &TableModel) -> u32 {
    heights(table).iter().sum::<u32>() + table.header_depth()
}

/// Extent of every node along the tree's axis: a leaf takes its own entry
/// of `leaf_sizes`, an inner node the sum over its children. Never below 1.
pub fn node_extents(tree: &LabelTree, leaf_sizes: &[u32]) -> NodeData<u32> {
    let mut extents = vec![0u32; tree.len()];
    for (position, id) in tree.leaves().into_iter().enumerate() {
        extents[id] = leaf_sizes.get(position).copied().unwrap_or(1);
    }
    // Level-order arena: children always sit after their parent.
    for id in (0..tree.len()).rev() {
        let node = tree.node(id);
        if !node.is_leaf() {
            extents[id] = node.children.iter().map(|&c| extents[c]).sum();
        }
        extents[id] = extents[id].max(1);
    }
    NodeData::from_vec(extents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_model::{Axis, Label, Labels, Style};

    fn leaf_grid(rows: usize, cols: usize) -> Vec<Vec<Cell>> {
        (0..rows)
            .map(|_| (0..cols).map(|_| Cell::leaf(0.0, Style::new())).collect())
            .collect()
    }

    fn flat(rows: usize, cols: usize) -> TableModel {
        let row_labels: Vec<i64> = (0..rows as i64).collect();
        let col_labels: Vec<String> = (0..cols).map(|c| format!("c{}", c)).collect();
        TableModel::new(&Labels::flat(col_labels), &Labels::flat(row_labels), leaf_grid(rows, cols)).unwrap()
    }

    #[test]
    fn test_plain_table_sizes() {
        let table = flat(3, 2);
        assert_eq!(widths(&table), vec![1, 1]);
        assert_eq!(heights(&table), vec![1, 1, 1]);
        assert_eq!(table_width(&table), 3);
        assert_eq!(table_height(&table), 4);
    }

    #[test]
    fn test_nested_table_widens_column_and_row() {
        // 2x2 inner table occupies 3 rows x 3 cols with its labels.
        let inner = flat(2, 2);
        let mut cells = leaf_grid(2, 2);
        cells[1][1] = Cell::nested(inner);
        let outer = TableModel::new(&Labels::flat(["a", "b"]), &Labels::flat([1, 2]), cells).unwrap();

        assert_eq!(widths(&outer), vec![1, 3]);
        assert_eq!(heights(&outer), vec![1, 3]);
        assert_eq!(table_width(&outer), 5);
        assert_eq!(table_height(&outer), 5);
    }

    #[test]
    fn test_zero_rows_keep_unit_width() {
        let table = TableModel::new(&Labels::flat(["a", "b"]), &Labels::flat(Vec::<Label>::new()), Vec::new()).unwrap();
        assert_eq!(widths(&table), vec![1, 1]);
        assert!(heights(&table).is_empty());
        assert_eq!(table_height(&table), 1);
    }

    #[test]
    fn test_node_extents_sum_leaves() {
        let labels = Labels::hierarchical([
            [Label::from("a"), Label::from(1)],
            [Label::from("a"), Label::from(2)],
            [Label::from("b"), Label::from(1)],
            [Label::from("b"), Label::from(2)],
        ]);
        let tree = LabelTree::build(Axis::Columns, &labels).unwrap();
        let extents = node_extents(&tree, &[2, 2, 2, 3]);

        let a = tree.find(&[Label::from("a")]).unwrap();
        let b = tree.find(&[Label::from("b")]).unwrap();
        let b2 = tree.find(&[Label::from("b"), Label::from(2)]).unwrap();
        assert_eq!(extents[a], 4);
        assert_eq!(extents[b], 5);
        assert_eq!(extents[b2], 3);
    }
}
