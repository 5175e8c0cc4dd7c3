use crate::{
    foundation::core::Edges,
    foundation::error::FlexResult,
    scene::model::{
        Color, CornerRadius, Effect, ElementKind, Geometry, LayoutAlign, LayoutMetadata,
        LayoutMode, Paint, Scene, SceneNode, SizingMode, StrokeAlign, Style, TextAlign,
        TextAutoResize, TextProps,
    },
};

/// Programmatic scene construction.
pub struct SceneBuilder {
    roots: Vec<SceneNode>,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    pub fn root(mut self, node: NodeBuilder) -> Self {
        self.roots.push(node.node);
        self
    }

    pub fn build(self) -> FlexResult<Scene> {
        let scene = Scene { roots: self.roots };
        scene.validate()?;
        Ok(scene)
    }
}

/// Fluent builder for one [`SceneNode`] and its children.
pub struct NodeBuilder {
    node: SceneNode,
}

pub fn frame(id: impl Into<String>) -> NodeBuilder {
    NodeBuilder::new(id, ElementKind::Frame)
}

pub fn group(id: impl Into<String>) -> NodeBuilder {
    NodeBuilder::new(id, ElementKind::Group)
}

pub fn component(id: impl Into<String>) -> NodeBuilder {
    NodeBuilder::new(id, ElementKind::Component)
}

pub fn instance(id: impl Into<String>) -> NodeBuilder {
    NodeBuilder::new(id, ElementKind::Instance)
}

pub fn rect(id: impl Into<String>) -> NodeBuilder {
    NodeBuilder::new(id, ElementKind::Rectangle)
}

pub fn ellipse(id: impl Into<String>) -> NodeBuilder {
    NodeBuilder::new(id, ElementKind::Ellipse)
}

pub fn vector(id: impl Into<String>) -> NodeBuilder {
    NodeBuilder::new(id, ElementKind::Vector)
}

pub fn text(id: impl Into<String>, characters: impl Into<String>) -> NodeBuilder {
    let mut b = NodeBuilder::new(id, ElementKind::Text);
    b.node.text = Some(TextProps::new(characters));
    b
}

impl NodeBuilder {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            node: SceneNode {
                id: id.into(),
                name: String::new(),
                kind,
                geometry: Geometry::default(),
                style: Style::default(),
                layout: LayoutMetadata::default(),
                text: None,
                children: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.node.name = name.into();
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.node.geometry.x = x;
        self.node.geometry.y = y;
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.node.geometry.width = width;
        self.node.geometry.height = height;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.node.style.fills.push(Paint::solid(color));
        self
    }

    pub fn stroke(mut self, color: Color, weight: f64, align: StrokeAlign) -> Self {
        self.node.style.strokes.push(Paint::solid(color));
        self.node.style.stroke_weight = weight;
        self.node.style.stroke_align = align;
        self
    }

    pub fn corner_radius(mut self, radius: CornerRadius) -> Self {
        self.node.style.corner_radius = radius;
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.node.style.effects.push(effect);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.node.style.opacity = opacity;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.node.style.visible = false;
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.node.style.rotation = degrees;
        self
    }

    pub fn layout_mode(mut self, mode: LayoutMode) -> Self {
        self.node.layout.layout_mode = mode;
        self
    }

    pub fn sizing(mut self, primary: SizingMode, counter: SizingMode) -> Self {
        self.node.layout.primary_axis_sizing_mode = primary;
        self.node.layout.counter_axis_sizing_mode = counter;
        self
    }

    pub fn item_spacing(mut self, spacing: f64) -> Self {
        self.node.layout.item_spacing = spacing;
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.node.layout.padding = padding;
        self
    }

    pub fn layout_align(mut self, align: LayoutAlign) -> Self {
        self.node.layout.layout_align = align;
        self
    }

    pub fn layout_grow(mut self, grow: f64) -> Self {
        self.node.layout.layout_grow = grow;
        self
    }

    /// Text box sizing; no-op for non-text nodes.
    pub fn auto_resize(mut self, mode: TextAutoResize) -> Self {
        if let Some(t) = self.node.text.as_mut() {
            t.auto_resize = mode;
        }
        self
    }

    /// Text alignment; no-op for non-text nodes.
    pub fn text_align(mut self, align: TextAlign) -> Self {
        if let Some(t) = self.node.text.as_mut() {
            t.text_align = align;
        }
        self
    }

    /// Font size and weight; no-op for non-text nodes.
    pub fn font(mut self, size: f64, weight: u16) -> Self {
        if let Some(t) = self.node.text.as_mut() {
            t.font_size = size;
            t.font_weight = weight;
        }
        self
    }

    pub fn child(mut self, child: NodeBuilder) -> Self {
        self.node.children.push(child.node);
        self
    }

    /// Finish without validating.
    pub fn into_node(self) -> SceneNode {
        self.node
    }

    pub fn build(self) -> FlexResult<SceneNode> {
        self.node.validate()?;
        Ok(self.node)
    }
}
