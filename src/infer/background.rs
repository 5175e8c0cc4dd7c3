use crate::{
    foundation::core::Rect,
    scene::tree::{ElementId, SceneTree},
};

/// Find a sibling that visually backs every other child.
///
/// The candidate must hold both the maximum width and the maximum height among
/// `children`, be a kind that can act as a container substitute, and fully contain
/// every other child's box. Needs at least two children; callers only pass the
/// visible children of containers without declared auto layout.
pub fn extract_background(tree: &SceneTree, children: &[ElementId]) -> Option<ElementId> {
    if children.len() < 2 {
        return None;
    }

    let max_w = children
        .iter()
        .map(|&c| tree[c].geometry.width)
        .fold(f64::NEG_INFINITY, f64::max);
    let max_h = children
        .iter()
        .map(|&c| tree[c].geometry.height)
        .fold(f64::NEG_INFINITY, f64::max);

    let candidate = children.iter().copied().find(|&c| {
        let g = &tree[c].geometry;
        g.width == max_w && g.height == max_h
    })?;

    if !tree[candidate].kind.can_be_background() {
        return None;
    }

    let bg = tree[candidate].rect();
    children
        .iter()
        .filter(|&&c| c != candidate)
        .all(|&c| contains(bg, tree[c].rect()))
        .then_some(candidate)
}

fn contains(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

#[cfg(test)]
#[path = "../../tests/unit/infer/background.rs"]
mod tests;
