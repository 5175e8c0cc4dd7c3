use super::*;
use crate::scene::dsl::{NodeBuilder, frame, rect};

fn tree_with(children: Vec<NodeBuilder>) -> (SceneTree, Vec<ElementId>) {
    let mut root = frame("root").size(50.0, 50.0);
    for c in children {
        root = root.child(c);
    }
    let tree = SceneTree::from_node(&root.build().unwrap()).unwrap();
    let ids = tree.visible_children(tree.root());
    (tree, ids)
}

fn square(id: &str, x: f64, y: f64) -> NodeBuilder {
    rect(id).at(x, y).size(20.0, 20.0)
}

fn names(tree: &SceneTree, ids: &[ElementId]) -> Vec<String> {
    ids.iter().map(|&i| tree[i].source_id.clone()).collect()
}

fn run(tree: &SceneTree, ids: &[ElementId]) -> Classification {
    let reference = tree[tree.root()].rect();
    classify(tree, reference, ids, false, &InferenceConfig::default())
}

#[test]
fn side_by_side_squares_form_a_row() {
    let (tree, ids) = tree_with(vec![square("b", 20.0, 0.0), square("a", 0.0, 0.0)]);
    let c = run(&tree, &ids);
    assert_eq!(c.direction, Direction::RowLike);
    assert_eq!(names(&tree, &c.ordered_children), ["a", "b"]);
    assert_eq!(c.spacing_samples, vec![0.0]);
}

#[test]
fn stacked_squares_form_a_column() {
    let (tree, ids) = tree_with(vec![square("b", 0.0, 20.0), square("a", 0.0, 0.0)]);
    let c = run(&tree, &ids);
    assert_eq!(c.direction, Direction::ColumnLike);
    assert_eq!(names(&tree, &c.ordered_children), ["a", "b"]);
    assert_eq!(c.spacing_samples, vec![0.0]);
}

#[test]
fn wide_header_over_offset_square_is_a_column() {
    let (tree, ids) = tree_with(vec![
        square("b", 25.0, 25.0),
        rect("a").at(0.0, 0.0).size(50.0, 20.0),
    ]);
    let c = run(&tree, &ids);
    assert_eq!(c.direction, Direction::ColumnLike);
    assert_eq!(names(&tree, &c.ordered_children), ["a", "b"]);
    assert_eq!(c.spacing_samples, vec![5.0]);
}

#[test]
fn tall_bar_beside_square_is_a_row() {
    let (tree, ids) = tree_with(vec![
        square("b", 20.0, 20.0),
        rect("a").at(0.0, 0.0).size(20.0, 50.0),
    ]);
    let c = run(&tree, &ids);
    assert_eq!(c.direction, Direction::RowLike);
    assert_eq!(names(&tree, &c.ordered_children), ["a", "b"]);
}

#[test]
fn overlapping_squares_stay_stacked_in_input_order() {
    let (tree, ids) = tree_with(vec![square("b", 10.0, 10.0), square("a", 0.0, 0.0)]);
    let c = run(&tree, &ids);
    assert_eq!(c.direction, Direction::None);
    assert_eq!(names(&tree, &c.ordered_children), ["b", "a"]);
    assert!(c.spacing_samples.is_empty());
}

#[test]
fn rounding_noise_within_tolerance_still_classifies() {
    let (tree, ids) = tree_with(vec![
        square("a", 0.0, 0.0),
        rect("b").at(0.0, 19.2).size(20.0, 20.0),
    ]);
    let c = run(&tree, &ids);
    assert_eq!(c.direction, Direction::ColumnLike);
    assert!((c.spacing_samples[0] + 0.8).abs() < 1e-9);
}

#[test]
fn classification_is_idempotent() {
    let (tree, ids) = tree_with(vec![
        square("c", 0.0, 30.0),
        square("a", 25.0, 0.0),
        rect("b").at(0.0, 21.0).size(10.0, 5.0),
    ]);
    let first = run(&tree, &ids);
    let second = run(&tree, &first.ordered_children);
    assert_eq!(first, second);
}

#[test]
fn ordered_children_are_a_permutation_for_every_input_order() {
    let (tree, ids) = tree_with(vec![
        square("a", 0.0, 0.0),
        square("b", 22.0, 0.0),
        rect("c").at(44.0, 2.0).size(4.0, 4.0),
    ]);
    let perms = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
    for p in perms {
        let input: Vec<_> = p.iter().map(|&i| ids[i]).collect();
        let c = run(&tree, &input);
        assert_eq!(c.direction, Direction::RowLike);
        let mut got = c.ordered_children.clone();
        got.sort();
        let mut want = ids.clone();
        want.sort();
        assert_eq!(got, want);
        assert_eq!(names(&tree, &c.ordered_children), ["a", "b", "c"]);
    }
}

#[test]
fn single_child_filling_the_container_is_a_trivial_wrapper() {
    let (tree, ids) = tree_with(vec![rect("a").at(0.0, 0.0).size(50.0, 50.0)]);
    assert_eq!(run(&tree, &ids).direction, Direction::ColumnLike);

    let (tree, ids) = tree_with(vec![square("a", 9.0, 9.0)]);
    assert_eq!(run(&tree, &ids).direction, Direction::None);
}

#[test]
fn single_child_over_a_background_is_a_wrapper() {
    let (tree, ids) = tree_with(vec![square("a", 9.0, 9.0)]);
    let reference = tree[tree.root()].rect();
    let c = classify(&tree, reference, &ids, true, &InferenceConfig::default());
    assert_eq!(c.direction, Direction::ColumnLike);
}

#[test]
fn empty_child_set_is_none() {
    let (tree, _) = tree_with(vec![]);
    let c = run(&tree, &[]);
    assert_eq!(c.direction, Direction::None);
    assert!(c.ordered_children.is_empty());
}

#[test]
fn intervals_report_signed_gaps() {
    let (tree, ids) = tree_with(vec![square("a", 0.0, 0.0), square("b", 30.0, 5.0)]);
    let (_, gx) = intervals(&tree, &ids, Axis::Horizontal);
    let (_, gy) = intervals(&tree, &ids, Axis::Vertical);
    assert_eq!(gx, vec![10.0]);
    assert_eq!(gy, vec![-15.0]);
}

#[test]
fn disjoint_columns_off_a_shared_line_are_not_a_row() {
    let mut root = frame("root").size(100.0, 200.0);
    for (name, x, y) in [("a", 0.0, 0.0), ("b", 20.0, 5.0), ("c", 40.0, 100.0)] {
        root = root.child(rect(name).at(x, y).size(10.0, 10.0));
    }
    let tree = SceneTree::from_node(&root.build().unwrap()).unwrap();
    let ids = tree.visible_children(tree.root());

    let (_, gy) = intervals(&tree, &ids, Axis::Vertical);
    assert_eq!(gy, vec![-5.0, 85.0]);
    let c = run(&tree, &ids);
    assert_eq!(c.direction, Direction::None);
    assert_eq!(names(&tree, &c.ordered_children), ["a", "b", "c"]);
}
