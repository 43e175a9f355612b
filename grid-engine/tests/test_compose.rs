//! FILENAME: grid-engine/tests/test_compose.rs
//! Integration tests for composing tables into one grid.

mod common;

use common::{corner_of, numbers_table, outer_with_nested, sized_table, text_at, two_level_table};
use grid_engine::{compose, compose_unshifted, ComposeOptions, GridNode, LayoutSpec, Orientation};
use grid_model::{A1Cache, LayoutError, Labels, Span, Style, TableModel, Value};
use layout_engine::{resolve, FlatValue};

fn vertical() -> ComposeOptions {
    ComposeOptions::default()
}

fn horizontal() -> ComposeOptions {
    ComposeOptions::new(Orientation::Horizontal)
}

// ============================================================================
// SINGLE TABLES
// ============================================================================

#[test]
fn test_single_table_spans() {
    let map = compose(numbers_table(), &vertical()).unwrap();

    assert_eq!(text_at(&map, Span::cell(0, 1)), Some(&Value::text("a")));
    assert_eq!(text_at(&map, Span::cell(0, 2)), Some(&Value::text("b")));
    assert_eq!(text_at(&map, Span::cell(1, 0)), Some(&Value::Number(1.0)));
    assert_eq!(text_at(&map, Span::cell(3, 0)), Some(&Value::Number(3.0)));
    assert_eq!(text_at(&map, Span::cell(1, 1)), Some(&Value::text("a1")));
    assert_eq!(text_at(&map, Span::cell(3, 2)), Some(&Value::text("b3")));
    assert_eq!(map.len(), 12);
}

#[test]
fn test_two_level_header_merges() {
    let map = compose(two_level_table(), &vertical()).unwrap();

    assert_eq!(text_at(&map, Span::new(0, 1, 0, 2)), Some(&Value::text("a")));
    assert_eq!(text_at(&map, Span::cell(0, 3)), Some(&Value::text("b")));
    assert_eq!(text_at(&map, Span::cell(1, 1)), Some(&Value::Number(1.0)));
    assert_eq!(text_at(&map, Span::cell(1, 2)), Some(&Value::Number(2.0)));
    assert_eq!(text_at(&map, Span::cell(2, 3)), Some(&Value::text("b1")));

    let mut a1 = A1Cache::new();
    assert_eq!(a1.range(&Span::new(0, 1, 0, 2)), "B1:C1");
    assert!(map.spans().filter(|s| s.is_merged()).count() == 2);
}

// ============================================================================
// PACKING REAL TABLES
// ============================================================================

#[test]
fn test_pair_vertical_and_horizontal() {
    let a = sized_table("A", 4, 3);
    let b = sized_table("B", 2, 2);

    let map = compose(LayoutSpec::group([a.clone(), b.clone()]), &vertical()).unwrap();
    assert_eq!(corner_of(&map, "B"), Some(Span::cell(5, 0)));

    let map = compose(LayoutSpec::group([a, b]), &horizontal()).unwrap();
    assert_eq!(corner_of(&map, "B"), Some(Span::cell(0, 4)));
}

#[test]
fn test_singleton_group_adds_no_padding() {
    let a = || sized_table("A", 3, 3);
    let flat = compose(a(), &vertical()).unwrap();
    let single = compose(LayoutSpec::group([a()]), &vertical()).unwrap();
    let double = compose(LayoutSpec::group([LayoutSpec::group([a()])]), &vertical()).unwrap();

    assert_eq!(flat, single);
    assert_eq!(single, double);
}

#[test]
fn test_grid_of_tables() {
    let t = |name: &str, h, w| LayoutSpec::from(sized_table(name, h, w));
    let spec = LayoutSpec::Group(vec![
        LayoutSpec::Group(vec![
            t("t1", 2, 2),
            LayoutSpec::Group(vec![
                t("t2", 2, 2),
                LayoutSpec::Group(vec![
                    t("t3", 2, 4),
                    LayoutSpec::Group(vec![t("t4", 4, 2), t("t5", 4, 2)]),
                    t("t6", 2, 2),
                ]),
            ]),
        ]),
        t("t7", 2, 2),
    ]);
    let map = compose(spec, &vertical()).unwrap();

    let expected = [
        ("t1", (0, 0)),
        ("t2", (0, 3)),
        ("t3", (3, 3)),
        ("t4", (3, 8)),
        ("t5", (8, 8)),
        ("t6", (3, 11)),
        ("t7", (13, 0)),
    ];
    for (name, (row, col)) in expected {
        assert_eq!(corner_of(&map, name), Some(Span::cell(row, col)), "table {name}");
    }
}

#[test]
fn test_custom_spacing() {
    let spec = LayoutSpec::group([sized_table("A", 2, 2), sized_table("B", 2, 2)]);
    let map = compose(spec.clone(), &vertical().with_shifts(1, 0)).unwrap();
    assert_eq!(corner_of(&map, "B"), Some(Span::cell(2, 0)));

    let map = compose(spec, &horizontal().with_shifts(3, 1)).unwrap();
    assert_eq!(corner_of(&map, "B"), Some(Span::cell(0, 5)));
}

#[test]
fn test_spacing_past_grid_edge_is_an_error() {
    let spec = LayoutSpec::group([sized_table("A", 2, 2), sized_table("B", 2, 2)]);
    let options = ComposeOptions::from_json(r#"{"v_shift_by": 4294967295}"#).unwrap();
    assert!(matches!(
        compose(spec.clone(), &options),
        Err(LayoutError::CoordinateOverflow { .. })
    ));

    // B's bottom row lands one short of the last addressable row.
    let options = vertical().with_shifts(1, u32::MAX - 4);
    let map = compose(spec.clone(), &options).unwrap();
    assert_eq!(corner_of(&map, "B"), Some(Span::cell(u32::MAX - 2, 0)));
    assert_eq!(map.extent(), (u32::MAX, 2));

    // A lone table never reaches its trailing padding.
    let options = ComposeOptions::from_json(r#"{"v_shift_by": 4294967295}"#).unwrap();
    assert_eq!(compose(sized_table("A", 2, 2), &options).unwrap().len(), 4);
}

#[test]
fn test_empty_groups() {
    let empty = compose(LayoutSpec::Group(Vec::new()), &vertical()).unwrap();
    assert!(empty.is_empty());

    let with_gap = compose(
        LayoutSpec::Group(vec![
            sized_table("A", 2, 2).into(),
            LayoutSpec::Group(Vec::new()),
            sized_table("B", 2, 2).into(),
        ]),
        &vertical(),
    )
    .unwrap();
    assert_eq!(corner_of(&with_gap, "B"), Some(Span::cell(3, 0)));
}

#[test]
fn test_pre_resolved_leaf_is_relocated() {
    let table = sized_table("A", 3, 3);
    let resolved = resolve(table.clone(), (7, 7), 0).unwrap();

    let with_b = |a: LayoutSpec| LayoutSpec::Group(vec![a, sized_table("B", 2, 2).into()]);
    let from_resolved = compose(with_b(resolved.clone().into()), &vertical()).unwrap();
    let from_model = compose(with_b(table.into()), &vertical()).unwrap();
    assert_eq!(from_resolved, from_model);

    // The same resolved table can appear twice in one composition.
    let twice = compose(
        LayoutSpec::group([LayoutSpec::from(resolved.clone()), LayoutSpec::from(resolved)]),
        &horizontal(),
    )
    .unwrap();
    assert_eq!(twice.len(), 18);
    assert_eq!(text_at(&twice, Span::cell(0, 0)), Some(&Value::text("A")));
    assert_eq!(text_at(&twice, Span::cell(0, 4)), Some(&Value::text("A")));
}

// ============================================================================
// NESTED TABLES
// ============================================================================

#[test]
fn test_nested_table_levels_in_composition() {
    let map = compose(
        LayoutSpec::group([sized_table("top", 2, 2), outer_with_nested()]),
        &vertical(),
    )
    .unwrap();

    // Outer starts on row 3. Its column "b" starts at col 2, row "2" at row 5.
    let nested: Vec<_> = map.iter().filter(|(_, c)| c.nesting_level == 1).collect();
    assert_eq!(nested.len(), 12);
    let min_start = nested.iter().map(|(s, _)| s.start()).min().unwrap();
    assert_eq!(min_start, (5, 2));
    assert_eq!(text_at(&map, Span::cell(6, 3)), Some(&Value::text("a1")));
}

#[test]
fn test_compose_unshifted_keeps_grouping() {
    let spec = LayoutSpec::group([LayoutSpec::from(numbers_table()), LayoutSpec::group([outer_with_nested()])]);
    let tree = compose_unshifted(spec, Orientation::Vertical).unwrap();

    assert_eq!(tree.orientation(), Some(Orientation::Vertical));
    let maps = tree.leaves();
    assert_eq!(maps.len(), 2);
    // Every table starts at (0, 0).
    assert!(maps.iter().all(|m| m.get(&Span::cell(0, 1)).is_some()));

    // The nested table stays one entry holding its own map.
    let outer = maps[1];
    let entry = outer.get(&Span::new(2, 2, 5, 4)).unwrap();
    assert_eq!(entry.nesting_level, 1);
    match &entry.value {
        FlatValue::Table(inner) => assert_eq!(inner.len(), 12),
        FlatValue::Scalar(v) => panic!("expected nested map, got {v:?}"),
    }

    let GridNode::Group { children, .. } = &tree else { panic!("expected a group") };
    assert_eq!(children[1].orientation(), Some(Orientation::Horizontal));
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_duplicate_labels_abort_composition() {
    let dup = TableModel::new(
        &Labels::flat(["x", "x"]),
        &Labels::flat([1]),
        vec![vec![grid_model::Cell::leaf(1.0, Style::new()), grid_model::Cell::leaf(2.0, Style::new())]],
    )
    .unwrap();
    let result = compose(LayoutSpec::group([numbers_table(), dup]), &vertical());
    assert!(matches!(result, Err(LayoutError::DuplicateLabel { .. })));
}
