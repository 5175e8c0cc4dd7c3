use crate::{
    foundation::core::{Axis, Size, same_extent},
    infer::{align::Alignment, registry::InferenceRegistry},
    scene::{
        model::{ElementKind, LayoutMode, SizingMode, StrokeAlign, Style, TextAutoResize},
        tree::{Element, ElementId, SceneTree},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
/// Size of an element along one axis.
pub enum AxisSize {
    /// Explicit size in design units.
    Fixed(f64),
    /// Sized by content.
    Hug,
    /// Expands to the available space.
    Fill,
}

impl AxisSize {
    pub fn fixed(self) -> Option<f64> {
        match self {
            Self::Fixed(v) => Some(v),
            Self::Hug | Self::Fill => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Per-axis size of an element.
pub struct ResolvedSize {
    pub width: AxisSize,
    pub height: AxisSize,
    /// Grows along its parent's flow axis.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub expands: bool,
}

impl ResolvedSize {
    pub fn fixed(size: Size) -> Self {
        Self {
            width: AxisSize::Fixed(size.width),
            height: AxisSize::Fixed(size.height),
            expands: false,
        }
    }

    pub fn hug() -> Self {
        Self {
            width: AxisSize::Hug,
            height: AxisSize::Hug,
            expands: false,
        }
    }

    pub fn get(&self, axis: Axis) -> AxisSize {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn set(&mut self, axis: Axis, value: AxisSize) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }
}

/// Extra extent a stroke adds on each axis.
pub fn stroke_inflation(style: &Style) -> f64 {
    if style.strokes.is_empty() {
        return 0.0;
    }
    match style.stroke_align {
        StrokeAlign::Inside => 0.0,
        StrokeAlign::Center => style.stroke_weight,
        StrokeAlign::Outside => 2.0 * style.stroke_weight,
    }
}

/// Raw size plus stroke inflation.
pub fn inflated_size(element: &Element) -> Size {
    let extra = stroke_inflation(&element.style);
    Size::new(
        element.geometry.width + extra,
        element.geometry.height + extra,
    )
}

fn raw_size(element: &Element) -> Size {
    Size::new(element.geometry.width, element.geometry.height)
}

fn axis_of(size: Size, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => size.width,
        Axis::Vertical => size.height,
    }
}

/// Resolve the rendered size of `id`.
///
/// Reads the element's own alignment annotation, so alignment must already be
/// resolved. Never fails: unknown cases fall back to the raw fixed size.
pub fn resolve_size(tree: &SceneTree, id: ElementId, registry: &InferenceRegistry) -> ResolvedSize {
    let element = &tree[id];
    let mut size = intrinsic_size(tree, element);

    let Some(parent) = element.parent else {
        return size;
    };
    let parent_result = registry.result(parent);
    let Some(primary) = parent_result.and_then(|r| r.direction.primary_axis()) else {
        return size;
    };

    if element.annotations.alignment == Some(Alignment::Stretch) {
        size.set(primary.cross(), AxisSize::Fill);
    }
    if parent_result.is_some_and(|r| r.declared) && element.layout.layout_grow > 0.0 {
        size.set(primary, AxisSize::Hug);
        size.expands = true;
    }
    size
}

fn intrinsic_size(tree: &SceneTree, element: &Element) -> ResolvedSize {
    match element.kind {
        ElementKind::Rectangle | ElementKind::Ellipse | ElementKind::Vector => {
            ResolvedSize::fixed(inflated_size(element))
        }
        ElementKind::Text => {
            let fixed = ResolvedSize::fixed(inflated_size(element));
            match element.text.as_ref().map(|t| t.auto_resize) {
                Some(TextAutoResize::Height) => ResolvedSize {
                    height: AxisSize::Hug,
                    ..fixed
                },
                Some(TextAutoResize::WidthAndHeight) => ResolvedSize::hug(),
                Some(TextAutoResize::None) | None => fixed,
            }
        }
        ElementKind::Frame | ElementKind::Group | ElementKind::Component | ElementKind::Instance => {
            container_size(tree, element)
        }
    }
}

fn container_size(tree: &SceneTree, element: &Element) -> ResolvedSize {
    let raw = raw_size(element);
    let children = tree.visible_children(element.id);

    if let [only] = children.as_slice() {
        let child = inflated_size(&tree[*only]);
        if same_extent(child.width, raw.width) && same_extent(child.height, raw.height) {
            return ResolvedSize::hug();
        }
    }

    let mut size = ResolvedSize::fixed(raw);
    let layout = &element.layout;
    let primary = match layout.layout_mode {
        LayoutMode::Horizontal => Some(Axis::Horizontal),
        LayoutMode::Vertical => Some(Axis::Vertical),
        LayoutMode::None => None,
    };
    if let Some(primary) = primary {
        if layout.primary_axis_sizing_mode == SizingMode::Auto {
            size.set(primary, AxisSize::Hug);
        }
        if layout.counter_axis_sizing_mode == SizingMode::Auto {
            size.set(primary.cross(), AxisSize::Hug);
        }
    }

    // Stroked children may overflow a fixed box; grow it instead of clipping.
    for axis in [Axis::Horizontal, Axis::Vertical] {
        let Some(mut value) = size.get(axis).fixed() else {
            continue;
        };
        for &c in &children {
            let child = &tree[c];
            if !child.style.strokes.is_empty() {
                value = value.max(axis_of(inflated_size(child), axis));
            }
        }
        size.set(axis, AxisSize::Fixed(value));
    }
    size
}

#[cfg(test)]
#[path = "../../tests/unit/infer/size.rs"]
mod tests;
