use super::*;
use crate::{
    infer::{config::InferenceConfig, pass::infer_layout},
    scene::{
        dsl::{NodeBuilder, frame, rect, text},
        model::{Color, LayoutAlign},
    },
};

fn annotated(root: NodeBuilder) -> SceneTree {
    let mut tree = SceneTree::from_node(&root.build().unwrap()).unwrap();
    infer_layout(&mut tree, &InferenceConfig::default());
    tree
}

fn size_of(tree: &SceneTree, source_id: &str) -> ResolvedSize {
    let id = tree.find(source_id).unwrap();
    tree[id].annotations.size.unwrap()
}

fn stroked(align: StrokeAlign) -> NodeBuilder {
    rect("leaf")
        .size(8.0, 8.0)
        .stroke(Color::rgb(0.0, 0.0, 0.0), 4.0, align)
}

#[test]
fn stroke_alignment_inflates_leaf_size() {
    for (align, expected) in [
        (StrokeAlign::Outside, 16.0),
        (StrokeAlign::Center, 12.0),
        (StrokeAlign::Inside, 8.0),
    ] {
        let tree = annotated(stroked(align));
        assert_eq!(
            resolve_size(&tree, tree.root(), &InferenceRegistry::new()),
            ResolvedSize::fixed(Size::new(expected, expected)),
            "{align:?}"
        );
    }
}

#[test]
fn stroke_weight_without_paint_does_not_inflate() {
    let style = Style {
        stroke_weight: 10.0,
        stroke_align: StrokeAlign::Outside,
        ..Style::default()
    };
    assert_eq!(stroke_inflation(&style), 0.0);
}

#[test]
fn stretch_fills_only_the_parent_cross_axis() {
    let tree = annotated(
        frame("row")
            .size(100.0, 40.0)
            .layout_mode(LayoutMode::Horizontal)
            .child(
                rect("bar")
                    .at(0.0, 0.0)
                    .size(30.0, 10.0)
                    .layout_align(LayoutAlign::Stretch),
            )
            .child(rect("dot").at(40.0, 0.0).size(10.0, 10.0)),
    );
    let bar = size_of(&tree, "bar");
    assert_eq!(bar.width, AxisSize::Fixed(30.0));
    assert_eq!(bar.height, AxisSize::Fill);
    assert_eq!(size_of(&tree, "dot").height, AxisSize::Fixed(10.0));
}

#[test]
fn auto_sizing_modes_hug_their_axes() {
    let tree = annotated(
        frame("col")
            .size(100.0, 60.0)
            .layout_mode(LayoutMode::Vertical)
            .sizing(SizingMode::Auto, SizingMode::Fixed)
            .child(rect("a").at(0.0, 0.0).size(10.0, 10.0))
            .child(rect("b").at(0.0, 20.0).size(10.0, 10.0)),
    );
    let col = size_of(&tree, "col");
    assert_eq!(col.height, AxisSize::Hug);
    assert_eq!(col.width, AxisSize::Fixed(100.0));

    let tree = annotated(
        frame("col")
            .size(100.0, 60.0)
            .layout_mode(LayoutMode::Vertical)
            .sizing(SizingMode::Fixed, SizingMode::Auto)
            .child(rect("a").at(0.0, 0.0).size(10.0, 10.0))
            .child(rect("b").at(0.0, 20.0).size(10.0, 10.0)),
    );
    let col = size_of(&tree, "col");
    assert_eq!(col.height, AxisSize::Fixed(60.0));
    assert_eq!(col.width, AxisSize::Hug);
}

#[test]
fn single_child_of_equal_size_suppresses_container_size() {
    let tree = annotated(
        frame("wrap")
            .size(40.0, 20.0)
            .child(rect("inner").at(0.0, 0.0).size(40.0, 20.0)),
    );
    assert_eq!(size_of(&tree, "wrap"), ResolvedSize::hug());
    assert_eq!(size_of(&tree, "inner").width, AxisSize::Fill);
}

#[test]
fn stroked_child_overflow_raises_parent() {
    let tree = annotated(
        frame("box")
            .size(10.0, 10.0)
            .child(
                rect("ring")
                    .at(0.0, 0.0)
                    .size(8.0, 8.0)
                    .stroke(Color::rgb(1.0, 0.0, 0.0), 4.0, StrokeAlign::Outside),
            )
            .child(rect("dot").at(2.0, 2.0).size(2.0, 2.0)),
    );
    assert_eq!(
        size_of(&tree, "box"),
        ResolvedSize::fixed(Size::new(16.0, 16.0))
    );
}

#[test]
fn text_follows_auto_resize() {
    let tree = annotated(
        text("t", "Hello")
            .size(40.0, 12.0)
            .auto_resize(TextAutoResize::Height),
    );
    let t = size_of(&tree, "t");
    assert_eq!(t.width, AxisSize::Fixed(40.0));
    assert_eq!(t.height, AxisSize::Hug);

    let tree = annotated(
        text("t", "Hello")
            .size(40.0, 12.0)
            .auto_resize(TextAutoResize::WidthAndHeight),
    );
    assert_eq!(size_of(&tree, "t"), ResolvedSize::hug());
}

#[test]
fn grow_in_declared_parent_expands_primary_axis() {
    let tree = annotated(
        frame("row")
            .size(100.0, 20.0)
            .layout_mode(LayoutMode::Horizontal)
            .child(rect("grow").at(0.0, 0.0).size(30.0, 10.0).layout_grow(1.0))
            .child(rect("fixed").at(30.0, 0.0).size(10.0, 10.0)),
    );
    let grow = size_of(&tree, "grow");
    assert!(grow.expands);
    assert_eq!(grow.width, AxisSize::Hug);
    assert_eq!(grow.height, AxisSize::Fixed(10.0));
    assert!(!size_of(&tree, "fixed").expands);
}

#[test]
fn absolutely_placed_children_keep_fixed_sizes() {
    let tree = annotated(
        frame("stack")
            .size(50.0, 50.0)
            .child(rect("a").at(10.0, 10.0).size(20.0, 20.0))
            .child(rect("b").at(0.0, 0.0).size(20.0, 20.0)),
    );
    assert_eq!(
        size_of(&tree, "a"),
        ResolvedSize::fixed(Size::new(20.0, 20.0))
    );
}

#[test]
fn axis_size_serializes_tagged() {
    let json = serde_json::to_value(ResolvedSize {
        width: AxisSize::Fixed(12.0),
        height: AxisSize::Fill,
        expands: false,
    })
    .unwrap();
    assert_eq!(
        json,
        serde_json::json!({"width": {"type": "fixed", "value": 12.0}, "height": {"type": "fill"}})
    );
}
