use crate::{
    foundation::core::{Axis, Rect, Vec2},
    infer::config::InferenceConfig,
    scene::model::LayoutAlign,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Cross-axis self alignment of a child inside a flowing parent.
pub enum Alignment {
    Start,
    Center,
    End,
    /// Span the parent's full cross extent.
    Stretch,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
/// How a child is positioned inside its parent.
pub enum Placement {
    /// Positioned by the parent's row or column.
    Flow,
    /// Positioned by explicit offsets from the parent's reference box.
    Absolute {
        /// Offset from the reference box's left edge.
        left: f64,
        /// Offset from the reference box's top edge.
        top: f64,
    },
}

impl Placement {
    /// Absolute offsets of `child` inside `reference`.
    pub fn absolute(child: Rect, reference: Rect) -> Self {
        Self::Absolute {
            left: child.x0 - reference.x0,
            top: child.y0 - reference.y0,
        }
    }
}

/// Resolve the alignment of `child` across `cross` inside `reference`.
///
/// A declared `layout_align` wins when the parent declares its own layout; otherwise
/// the child's geometry decides. A child spanning the full cross extent (within the
/// overlap tolerance) stretches; one whose center sits more than the center threshold
/// away aligns to that edge.
pub fn resolve_alignment(
    child: Rect,
    reference: Rect,
    cross: Axis,
    layout_align: LayoutAlign,
    parent_declared: bool,
    config: &InferenceConfig,
) -> Alignment {
    if parent_declared {
        match layout_align {
            LayoutAlign::Min => return Alignment::Start,
            LayoutAlign::Center => return Alignment::Center,
            LayoutAlign::Max => return Alignment::End,
            LayoutAlign::Stretch => return Alignment::Stretch,
            LayoutAlign::Inherit => {}
        }
    }

    if cross.extent(child) >= cross.extent(reference) - config.overlap_tolerance {
        return Alignment::Stretch;
    }

    let delta = cross.center(child) - cross.center(reference);
    if delta > config.center_threshold {
        Alignment::End
    } else if delta < -config.center_threshold {
        Alignment::Start
    } else {
        Alignment::Center
    }
}

/// Signed offset of `child`'s center from `reference`'s center.
pub fn center_offset(child: Rect, reference: Rect) -> Vec2 {
    child.center() - reference.center()
}

#[cfg(test)]
#[path = "../../tests/unit/infer/align.rs"]
mod tests;
