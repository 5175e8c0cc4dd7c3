use crate::{
    foundation::core::{Axis, Edges, Rect},
    infer::{config::InferenceConfig, registry::Direction},
    scene::tree::{ElementId, SceneTree},
};

/// Collapse observed gaps into one representative spacing.
///
/// The arithmetic mean of `samples`; means below `config.min_spacing` count as
/// touching and resolve to zero.
pub fn resolve_spacing(samples: &[f64], config: &InferenceConfig) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    if mean < config.min_spacing { 0.0 } else { mean }
}

/// Solve container padding from the placement of its ordered children.
///
/// Along the primary axis the padding is the first child's leading offset and the
/// last child's trailing offset. Across it, each side takes the tightest margin over
/// all children. A container without a flow direction uses the tightest margin on
/// every side. Children overflowing `reference` clamp to zero.
pub fn resolve_padding(
    tree: &SceneTree,
    reference: Rect,
    ordered: &[ElementId],
    direction: Direction,
) -> Edges {
    let (Some(first), Some(last)) = (ordered.first(), ordered.last()) else {
        return Edges::default();
    };

    let mut padding = Edges::default();
    let tightest = |axis: Axis, padding: &mut Edges| {
        let near = ordered
            .iter()
            .map(|&c| axis.start(tree[c].rect()) - axis.start(reference))
            .fold(f64::INFINITY, f64::min);
        let far = ordered
            .iter()
            .map(|&c| axis.end(reference) - axis.end(tree[c].rect()))
            .fold(f64::INFINITY, f64::min);
        padding.set_near(axis, near.max(0.0));
        padding.set_far(axis, far.max(0.0));
    };

    match direction.primary_axis() {
        Some(primary) => {
            let near = primary.start(tree[*first].rect()) - primary.start(reference);
            let far = primary.end(reference) - primary.end(tree[*last].rect());
            padding.set_near(primary, near.max(0.0));
            padding.set_far(primary, far.max(0.0));
            tightest(primary.cross(), &mut padding);
        }
        None => {
            tightest(Axis::Horizontal, &mut padding);
            tightest(Axis::Vertical, &mut padding);
        }
    }
    padding
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Most compact expression of a padding box.
pub enum PaddingShape {
    /// No padding at all.
    Zero,
    /// One value on every side.
    Uniform(f64),
    /// One value per axis.
    Symmetric {
        /// Left and right.
        horizontal: f64,
        /// Top and bottom.
        vertical: f64,
    },
    /// Independent sides.
    Sides(Edges),
}

impl PaddingShape {
    /// Simplify `edges`: opposite sides closer than `config.symmetry_tolerance`
    /// collapse to the smaller of the two.
    pub fn of(edges: Edges, config: &InferenceConfig) -> Self {
        let tol = config.symmetry_tolerance;
        let close = |a: f64, b: f64| (a - b).abs() < tol;

        if close(edges.left, edges.right) && close(edges.top, edges.bottom) {
            let horizontal = edges.left.min(edges.right);
            let vertical = edges.top.min(edges.bottom);
            if close(horizontal, vertical) {
                let v = horizontal.min(vertical);
                return if v == 0.0 { Self::Zero } else { Self::Uniform(v) };
            }
            return Self::Symmetric {
                horizontal,
                vertical,
            };
        }
        Self::Sides(edges)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/infer/spacing.rs"]
mod tests;
