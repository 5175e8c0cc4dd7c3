use crate::{
    foundation::core::Rect,
    foundation::error::{FlexError, FlexResult},
    infer::{
        align::{Alignment, Placement, center_offset, resolve_alignment},
        background::extract_background,
        config::InferenceConfig,
        direction::classify,
        registry::{Direction, InferenceRegistry, InferenceResult, RelationTag},
        size::resolve_size,
        spacing::{resolve_padding, resolve_spacing},
    },
    scene::{
        model::{LayoutMode, Scene, SceneNode},
        tree::{ElementId, SceneTree},
    },
};

use rayon::prelude::*;

/// One converted root: the annotated tree and the registry that produced it.
#[derive(Clone, Debug)]
pub struct Conversion {
    pub tree: SceneTree,
    pub registry: InferenceRegistry,
    /// Thresholds the passes ran with; builders reuse them when simplifying output.
    pub config: InferenceConfig,
}

/// Run every inference pass over `tree`, annotating it in place.
///
/// Passes run in a fixed order: direction and background per container (top-down),
/// then padding and spacing, then cross-axis alignment, then sizes. The returned
/// registry is owned by this run only.
#[tracing::instrument(skip(tree, config), fields(elements = tree.len()))]
pub fn infer_layout(tree: &mut SceneTree, config: &InferenceConfig) -> InferenceRegistry {
    let mut registry = InferenceRegistry::new();
    classify_containers(tree, config, &mut registry);
    solve_padding_and_spacing(tree, config, &registry);
    resolve_alignments(tree, config, &registry);
    resolve_sizes(tree, &registry);
    registry
}

fn classify_containers(tree: &SceneTree, config: &InferenceConfig, registry: &mut InferenceRegistry) {
    for id in tree.pre_order() {
        let element = &tree[id];
        if !element.kind.is_container() {
            continue;
        }
        let children = tree.visible_children(id);

        let result = match element.layout.layout_mode {
            LayoutMode::Horizontal | LayoutMode::Vertical => InferenceResult {
                direction: if element.layout.layout_mode == LayoutMode::Horizontal {
                    Direction::RowLike
                } else {
                    Direction::ColumnLike
                },
                ordered_children: children,
                spacing_samples: Vec::new(),
                background: None,
                declared: true,
            },
            LayoutMode::None => {
                let background = extract_background(tree, &children);
                let reference = match background {
                    Some(bg) => {
                        tracing::debug!(
                            container = %element.source_id,
                            background = %tree[bg].source_id,
                            "promoted background sibling"
                        );
                        registry.tag(id, RelationTag::Parent);
                        registry.tag(bg, RelationTag::Changed);
                        for &c in children.iter().filter(|&&c| c != bg) {
                            registry.tag(c, RelationTag::Child);
                        }
                        tree[bg].rect()
                    }
                    None => element.rect(),
                };
                let rest: Vec<ElementId> = children
                    .iter()
                    .copied()
                    .filter(|&c| Some(c) != background)
                    .collect();
                let c = classify(tree, reference, &rest, background.is_some(), config);
                InferenceResult {
                    direction: c.direction,
                    ordered_children: c.ordered_children,
                    spacing_samples: c.spacing_samples,
                    background,
                    declared: false,
                }
            }
        };

        tracing::debug!(
            container = %element.source_id,
            direction = ?result.direction,
            children = result.ordered_children.len(),
            declared = result.declared,
            "classified container"
        );
        registry.insert(id, result);
    }
}

/// Box the container's flowing children are measured against.
fn reference_box(tree: &SceneTree, container: ElementId, result: &InferenceResult) -> Rect {
    match result.background {
        Some(bg) => tree[bg].rect(),
        None => tree[container].rect(),
    }
}

fn solve_padding_and_spacing(tree: &mut SceneTree, config: &InferenceConfig, registry: &InferenceRegistry) {
    for (id, result) in registry.iter() {
        let (padding, spacing) = if result.declared {
            (tree[id].layout.padding, tree[id].layout.item_spacing)
        } else {
            let reference = reference_box(tree, id, result);
            (
                resolve_padding(tree, reference, &result.ordered_children, result.direction),
                resolve_spacing(&result.spacing_samples, config),
            )
        };
        let annotations = &mut tree[id].annotations;
        annotations.direction = Some(result.direction);
        annotations.padding = Some(padding);
        annotations.spacing = Some(spacing);
    }
}

/// Alignment is driven by the relation tags: a `Changed` sibling is centered on the
/// container with explicit margins, and every other child is measured against it.
fn resolve_alignments(tree: &mut SceneTree, config: &InferenceConfig, registry: &InferenceRegistry) {
    for (id, result) in registry.iter() {
        let children = tree.visible_children(id);
        let background = children
            .iter()
            .copied()
            .find(|&c| registry.relation(c) == Some(RelationTag::Changed));
        let reference = match background {
            Some(bg) => tree[bg].rect(),
            None => tree[id].rect(),
        };

        if let Some(bg) = background {
            let offset = center_offset(reference, tree[id].rect());
            let annotations = &mut tree[bg].annotations;
            annotations.alignment = Some(Alignment::Center);
            annotations.margins = Some(offset);
        }

        match result.direction.cross_axis() {
            Some(cross) => {
                for &c in &result.ordered_children {
                    let alignment = resolve_alignment(
                        tree[c].rect(),
                        reference,
                        cross,
                        tree[c].layout.layout_align,
                        result.declared,
                        config,
                    );
                    let annotations = &mut tree[c].annotations;
                    annotations.alignment = Some(alignment);
                    annotations.placement = Some(Placement::Flow);
                }
            }
            None => {
                for &c in &result.ordered_children {
                    let placement = Placement::absolute(tree[c].rect(), reference);
                    tree[c].annotations.placement = Some(placement);
                }
            }
        }
    }
}

fn resolve_sizes(tree: &mut SceneTree, registry: &InferenceRegistry) {
    let sizes: Vec<_> = tree
        .pre_order()
        .filter(|&id| tree[id].has_visible_box())
        .map(|id| (id, resolve_size(tree, id, registry)))
        .collect();
    for (id, size) in sizes {
        tree[id].annotations.size = Some(size);
    }
}

/// Convert every root of `scene` in order.
///
/// Each root gets its own tree and registry; nothing is shared between roots.
#[tracing::instrument(skip(scene, config), fields(roots = scene.roots.len()))]
pub fn convert(scene: &Scene, config: &InferenceConfig) -> FlexResult<Vec<Conversion>> {
    config.validate()?;
    scene
        .roots
        .iter()
        .map(|root| convert_root(root, config))
        .collect()
}

/// Like [`convert`], but runs roots on a rayon pool. Output order matches input order.
#[tracing::instrument(skip(scene, config), fields(roots = scene.roots.len()))]
pub fn convert_parallel(
    scene: &Scene,
    config: &InferenceConfig,
    threads: Option<usize>,
) -> FlexResult<Vec<Conversion>> {
    config.validate()?;
    let pool = build_thread_pool(threads)?;
    pool.install(|| {
        scene
            .roots
            .par_iter()
            .map(|root| convert_root(root, config))
            .collect()
    })
}

fn convert_root(root: &SceneNode, config: &InferenceConfig) -> FlexResult<Conversion> {
    let mut tree = SceneTree::from_node(root)?;
    let registry = infer_layout(&mut tree, config);
    Ok(Conversion {
        tree,
        registry,
        config: *config,
    })
}

fn build_thread_pool(threads: Option<usize>) -> FlexResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FlexError::validation("'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FlexError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/infer/pass.rs"]
mod tests;
