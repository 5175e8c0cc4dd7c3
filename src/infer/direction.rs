use crate::{
    foundation::core::{Axis, Rect, same_extent},
    infer::{config::InferenceConfig, registry::Direction},
    scene::tree::{ElementId, SceneTree},
};

#[derive(Clone, Debug, PartialEq)]
/// Output of [`classify`].
pub struct Classification {
    /// Inferred direction.
    pub direction: Direction,
    /// Children sorted along the primary axis, or in input order for [`Direction::None`].
    pub ordered_children: Vec<ElementId>,
    /// Gaps between consecutive ordered children along the primary axis.
    pub spacing_samples: Vec<f64>,
}

impl Classification {
    fn stacked(children: Vec<ElementId>) -> Self {
        Self {
            direction: Direction::None,
            ordered_children: children,
            spacing_samples: Vec::new(),
        }
    }
}

/// Sort `children` by their leading edge on `axis` and measure neighbour gaps.
///
/// `gap[i] = start(i + 1) - end(i)`; negative gaps mean the pair overlaps on `axis`.
pub fn intervals(tree: &SceneTree, children: &[ElementId], axis: Axis) -> (Vec<ElementId>, Vec<f64>) {
    let mut sorted = children.to_vec();
    // Stable, so an already ordered input keeps its order.
    sorted.sort_by(|&a, &b| axis.start(tree[a].rect()).total_cmp(&axis.start(tree[b].rect())));
    let gaps = sorted
        .windows(2)
        .map(|pair| axis.start(tree[pair[1]].rect()) - axis.end(tree[pair[0]].rect()))
        .collect();
    (sorted, gaps)
}

/// Decide whether `children` form a column, a row, or an absolute stack.
///
/// The column test runs first: children sorted by `y` must never overlap vertically by
/// more than the tolerance. A row additionally requires the children to share a line
/// (every `y` gap below the tolerance) before the same test is applied to `x`.
/// `reference` is the box the children live in (the container, or its extracted
/// background).
pub fn classify(
    tree: &SceneTree,
    reference: Rect,
    children: &[ElementId],
    has_background: bool,
    config: &InferenceConfig,
) -> Classification {
    match children {
        [] => Classification::stacked(Vec::new()),
        [only] => {
            if has_background || fills(tree[*only].rect(), reference) {
                Classification {
                    direction: Direction::ColumnLike,
                    ordered_children: vec![*only],
                    spacing_samples: Vec::new(),
                }
            } else {
                Classification::stacked(vec![*only])
            }
        }
        _ => {
            let tolerance = config.overlap_tolerance;
            let (by_y, gaps_y) = intervals(tree, children, Axis::Vertical);
            if gaps_y.iter().all(|&g| g >= -tolerance) {
                return Classification {
                    direction: Direction::ColumnLike,
                    ordered_children: by_y,
                    spacing_samples: gaps_y,
                };
            }
            // A row needs every child on one line: no vertical gap between any pair.
            if gaps_y.iter().all(|&g| g < tolerance) {
                let (by_x, gaps_x) = intervals(tree, children, Axis::Horizontal);
                if gaps_x.iter().all(|&g| g >= -tolerance) {
                    return Classification {
                        direction: Direction::RowLike,
                        ordered_children: by_x,
                        spacing_samples: gaps_x,
                    };
                }
            }
            Classification::stacked(children.to_vec())
        }
    }
}

fn fills(child: Rect, reference: Rect) -> bool {
    same_extent(child.x0, reference.x0)
        && same_extent(child.y0, reference.y0)
        && same_extent(child.x1, reference.x1)
        && same_extent(child.y1, reference.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/infer/direction.rs"]
mod tests;
