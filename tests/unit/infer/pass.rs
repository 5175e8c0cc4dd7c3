use super::*;
use crate::{
    foundation::core::{Edges, Vec2},
    scene::{
        dsl::{NodeBuilder, SceneBuilder, frame, group, rect, text},
        model::{LayoutAlign, LayoutMode},
    },
};

fn run(root: NodeBuilder) -> (SceneTree, InferenceRegistry) {
    let mut tree = SceneTree::from_node(&root.build().unwrap()).unwrap();
    let registry = infer_layout(&mut tree, &InferenceConfig::default());
    (tree, registry)
}

fn id(tree: &SceneTree, source_id: &str) -> ElementId {
    tree.find(source_id).unwrap()
}

#[test]
fn every_container_gets_direction_padding_and_spacing() {
    let (tree, registry) = run(
        frame("root")
            .size(100.0, 100.0)
            .child(
                group("inner")
                    .at(0.0, 0.0)
                    .size(40.0, 40.0)
                    .child(rect("a").at(0.0, 0.0).size(10.0, 10.0)),
            )
            .child(rect("b").at(50.0, 0.0).size(10.0, 10.0)),
    );
    assert_eq!(registry.len(), 2);
    for e in tree.iter().filter(|e| e.kind.is_container()) {
        assert!(e.annotations.direction.is_some(), "{}", e.source_id);
        assert!(e.annotations.padding.is_some());
        assert!(e.annotations.spacing.is_some());
    }
    assert_eq!(registry.direction(tree.root()), Direction::RowLike);
    assert!(tree[tree.root()].annotations.placement.is_none());
}

#[test]
fn background_is_promoted_and_excluded_from_flow() {
    let (tree, registry) = run(
        frame("button")
            .size(120.0, 60.0)
            .child(rect("bg").at(10.0, 10.0).size(100.0, 40.0))
            .child(text("label", "Buy").at(30.0, 20.0).size(60.0, 20.0)),
    );
    let root = tree.root();
    let bg = id(&tree, "bg");
    let label = id(&tree, "label");

    assert_eq!(registry.background(root), Some(bg));
    assert!(registry.is_restructured(root));
    assert_eq!(registry.relation(root), Some(RelationTag::Parent));
    assert_eq!(registry.relation(bg), Some(RelationTag::Changed));
    assert_eq!(registry.relation(label), Some(RelationTag::Child));

    let result = registry.result(root).unwrap();
    assert!(!result.ordered_children.contains(&bg));
    assert_eq!(result.direction, Direction::ColumnLike);

    // Padding is measured against the background box.
    assert_eq!(
        tree[root].annotations.padding,
        Some(Edges {
            top: 10.0,
            right: 20.0,
            bottom: 10.0,
            left: 20.0
        })
    );
    assert_eq!(tree[bg].annotations.alignment, Some(Alignment::Center));
    assert_eq!(tree[bg].annotations.margins, Some(Vec2::new(0.0, 0.0)));
    assert_eq!(tree[label].annotations.alignment, Some(Alignment::Center));
}

#[test]
fn off_center_background_records_margins() {
    let (tree, _) = run(
        frame("card")
            .size(100.0, 100.0)
            .child(rect("bg").at(0.0, 0.0).size(60.0, 60.0))
            .child(rect("dot").at(10.0, 10.0).size(10.0, 10.0)),
    );
    let bg = id(&tree, "bg");
    assert_eq!(tree[bg].annotations.margins, Some(Vec2::new(-20.0, -20.0)));
}

#[test]
fn declared_layout_is_taken_verbatim() {
    let (tree, registry) = run(
        frame("row")
            .size(200.0, 40.0)
            .layout_mode(LayoutMode::Horizontal)
            .item_spacing(12.0)
            .padding(Edges::uniform(8.0))
            // Source order wins even when geometry disagrees.
            .child(rect("b").at(60.0, 8.0).size(20.0, 20.0))
            .child(
                rect("a")
                    .at(8.0, 8.0)
                    .size(20.0, 20.0)
                    .layout_align(LayoutAlign::Max),
            ),
    );
    let root = tree.root();
    let result = registry.result(root).unwrap();
    assert!(result.declared);
    assert_eq!(result.ordered_children, vec![id(&tree, "b"), id(&tree, "a")]);
    assert_eq!(tree[root].annotations.spacing, Some(12.0));
    assert_eq!(tree[root].annotations.padding, Some(Edges::uniform(8.0)));
    assert_eq!(tree[id(&tree, "a")].annotations.alignment, Some(Alignment::End));
}

#[test]
fn invisible_children_are_ignored() {
    let (tree, registry) = run(
        frame("root")
            .size(50.0, 50.0)
            .child(rect("a").at(0.0, 0.0).size(20.0, 20.0))
            .child(rect("ghost").at(5.0, 5.0).size(0.0, 20.0))
            .child(rect("b").at(20.0, 0.0).size(20.0, 20.0)),
    );
    let result = registry.result(tree.root()).unwrap();
    assert_eq!(result.direction, Direction::RowLike);
    assert_eq!(result.ordered_children.len(), 2);
    let ghost = id(&tree, "ghost");
    assert_eq!(tree[ghost].annotations, Default::default());
}

#[test]
fn convert_keeps_roots_independent() {
    let scene = SceneBuilder::new()
        .root(
            frame("one")
                .size(50.0, 50.0)
                .child(rect("a").at(0.0, 0.0).size(20.0, 20.0))
                .child(rect("b").at(20.0, 0.0).size(20.0, 20.0)),
        )
        .root(
            frame("two")
                .size(50.0, 50.0)
                .child(rect("c").at(0.0, 0.0).size(20.0, 20.0))
                .child(rect("d").at(0.0, 20.0).size(20.0, 20.0)),
        )
        .build()
        .unwrap();
    let cfg = InferenceConfig::default();
    let out = convert(&scene, &cfg).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].registry.direction(out[0].tree.root()), Direction::RowLike);
    assert_eq!(out[1].registry.direction(out[1].tree.root()), Direction::ColumnLike);

    let par = convert_parallel(&scene, &cfg, Some(2)).unwrap();
    for (a, b) in out.iter().zip(&par) {
        assert_eq!(a.tree.to_annotated().id, b.tree.to_annotated().id);
        assert_eq!(
            a.registry.direction(a.tree.root()),
            b.registry.direction(b.tree.root())
        );
    }
}

#[test]
fn convert_rejects_invalid_config_and_zero_threads() {
    let scene = SceneBuilder::new()
        .root(frame("one").size(10.0, 10.0))
        .build()
        .unwrap();
    let bad = InferenceConfig {
        center_threshold: f64::NAN,
        ..InferenceConfig::default()
    };
    assert!(convert(&scene, &bad).is_err());
    assert!(convert_parallel(&scene, &InferenceConfig::default(), Some(0)).is_err());
}

#[test]
fn promoted_frame_keeps_laying_out_its_own_children() {
    let (tree, registry) = run(
        frame("root")
            .size(100.0, 100.0)
            .child(
                frame("card")
                    .at(0.0, 0.0)
                    .size(100.0, 100.0)
                    .child(rect("inner").at(10.0, 10.0).size(10.0, 10.0)),
            )
            .child(rect("sibling").at(50.0, 50.0).size(20.0, 20.0)),
    );
    let card = id(&tree, "card");
    let sibling = id(&tree, "sibling");
    let inner = id(&tree, "inner");

    assert_eq!(registry.background(tree.root()), Some(card));
    // The card is restructured only from its parent's side.
    assert_eq!(registry.relation(card), Some(RelationTag::Changed));
    assert_eq!(registry.relation(sibling), Some(RelationTag::Child));
    assert_eq!(registry.relation(inner), None);

    assert_eq!(tree[card].annotations.alignment, Some(Alignment::Center));
    assert_eq!(tree[card].annotations.margins, Some(Vec2::new(0.0, 0.0)));
    assert_eq!(tree[sibling].annotations.placement, Some(Placement::Flow));
    assert_eq!(tree[sibling].annotations.alignment, Some(Alignment::End));

    assert_eq!(registry.direction(card), Direction::None);
    assert_eq!(
        tree[inner].annotations.placement,
        Some(Placement::Absolute {
            left: 10.0,
            top: 10.0
        })
    );
}
