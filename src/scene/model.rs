use std::collections::BTreeSet;
use std::path::Path;

use crate::foundation::core::{Edges, Rect, Vec2};
use crate::foundation::error::{FlexError, FlexResult};

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// A selection of design nodes handed over by the scene-graph normalizer.
///
/// Each root is converted independently (see [`crate::convert`]).
pub struct Scene {
    /// Top-level selected elements, in selection order.
    pub roots: Vec<SceneNode>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One design node as delivered by the host tool.
pub struct SceneNode {
    /// Stable identity, unique within a scene.
    pub id: String,
    /// Layer name (used only for optional class naming).
    #[serde(default)]
    pub name: String,
    /// Variant tag.
    pub kind: ElementKind,
    /// Absolute box in scene coordinates.
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Paint, stroke and blend attributes.
    #[serde(default)]
    pub style: Style,
    /// Host auto-layout metadata (meaningful for containers only).
    #[serde(default)]
    pub layout: LayoutMetadata,
    /// Text content and typography (Text kind only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextProps>,
    /// Children in host insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Element variant tag.
pub enum ElementKind {
    /// Frame container.
    Frame,
    /// Group container (no own styling).
    Group,
    /// Rectangle leaf shape.
    Rectangle,
    /// Ellipse leaf shape.
    Ellipse,
    /// Text run.
    Text,
    /// Vector path.
    Vector,
    /// Component definition (container).
    Component,
    /// Component instance (container).
    Instance,
}

impl ElementKind {
    /// Kinds that may hold children and take part in layout inference.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::Frame | Self::Group | Self::Component | Self::Instance
        )
    }

    pub fn is_leaf_shape(self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse)
    }

    /// Kinds that may be reclassified as a sibling group's background.
    pub fn can_be_background(self) -> bool {
        matches!(
            self,
            Self::Frame | Self::Rectangle | Self::Component | Self::Instance
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Absolute position and size.
pub struct Geometry {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width; values `<= 0` mean there is no visible box.
    pub width: f64,
    /// Height; values `<= 0` mean there is no visible box.
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// `false` for zero-or-negative area boxes, which inference ignores.
    pub fn has_visible_box(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Straight (non-premultiplied) color with channels in `[0, 1]`.
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    #[serde(default = "default_one")]
    pub a: f64,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
/// Paint descriptor for fills and strokes.
pub enum Paint {
    /// Solid color.
    Solid {
        /// Color channels.
        color: Color,
        /// Paint opacity multiplier.
        #[serde(default = "default_one")]
        opacity: f64,
        /// Hidden paints are skipped by builders.
        #[serde(default = "default_true")]
        visible: bool,
    },
    /// Gradient (builders fall back to the first stop).
    Gradient {
        /// Gradient stop colors in order.
        stops: Vec<Color>,
    },
    /// Image fill (opaque to this engine).
    Image {
        /// Hidden paints are skipped by builders.
        #[serde(default = "default_true")]
        visible: bool,
    },
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self::Solid {
            color,
            opacity: 1.0,
            visible: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Where the stroke sits relative to the geometry edge.
pub enum StrokeAlign {
    /// Stroke drawn inside the box; size unaffected.
    #[default]
    Inside,
    /// Stroke centered on the edge; adds one stroke weight per axis.
    Center,
    /// Stroke drawn outside the box; adds two stroke weights per axis.
    Outside,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Corner rounding.
pub enum CornerRadius {
    /// Same radius on every corner.
    Uniform(f64),
    /// Independent radius per corner.
    #[serde(rename_all = "camelCase")]
    PerCorner {
        /// Top-left radius.
        top_left: f64,
        /// Top-right radius.
        top_right: f64,
        /// Bottom-right radius.
        bottom_right: f64,
        /// Bottom-left radius.
        bottom_left: f64,
    },
}

impl Default for CornerRadius {
    fn default() -> Self {
        Self::Uniform(0.0)
    }
}

impl CornerRadius {
    pub fn is_zero(&self) -> bool {
        match *self {
            Self::Uniform(r) => r == 0.0,
            Self::PerCorner {
                top_left,
                top_right,
                bottom_right,
                bottom_left,
            } => top_left == 0.0 && top_right == 0.0 && bottom_right == 0.0 && bottom_left == 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
/// Visual effect attached to an element.
pub enum Effect {
    /// Outer drop shadow.
    DropShadow {
        /// Shadow color including alpha.
        color: Color,
        /// Shadow offset.
        offset: Vec2,
        /// Blur radius.
        radius: f64,
        /// Hidden effects are skipped by builders.
        #[serde(default = "default_true")]
        visible: bool,
    },
    /// Inner shadow (not rendered by the bundled builders).
    InnerShadow {
        /// Shadow color including alpha.
        color: Color,
        /// Shadow offset.
        offset: Vec2,
        /// Blur radius.
        radius: f64,
    },
    /// Layer blur (not rendered by the bundled builders).
    LayerBlur {
        /// Blur radius.
        radius: f64,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Paint, stroke and blend attributes.
pub struct Style {
    /// Fill paints; the first solid paint wins for color extraction.
    #[serde(default)]
    pub fills: Vec<Paint>,
    /// Stroke paints.
    #[serde(default)]
    pub strokes: Vec<Paint>,
    /// Stroke thickness.
    #[serde(default)]
    pub stroke_weight: f64,
    /// Stroke placement.
    #[serde(default)]
    pub stroke_align: StrokeAlign,
    /// Corner rounding.
    #[serde(default)]
    pub corner_radius: CornerRadius,
    /// Effects such as drop shadows.
    #[serde(default)]
    pub effects: Vec<Effect>,
    /// Layer opacity in `[0, 1]`.
    #[serde(default = "default_one")]
    pub opacity: f64,
    /// Layer visibility.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: 0.0,
            stroke_align: StrokeAlign::Inside,
            corner_radius: CornerRadius::default(),
            effects: Vec::new(),
            opacity: 1.0,
            visible: true,
            rotation: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Host auto-layout mode.
pub enum LayoutMode {
    /// Children are absolutely positioned.
    #[default]
    None,
    /// Children flow left to right.
    Horizontal,
    /// Children flow top to bottom.
    Vertical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Host sizing mode along one auto-layout axis.
pub enum SizingMode {
    /// The declared size is kept.
    #[default]
    Fixed,
    /// The size follows the content.
    Auto,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Cross-axis self alignment declared by the host tool.
pub enum LayoutAlign {
    /// Align to the start edge.
    Min,
    /// Align to the center.
    Center,
    /// Align to the end edge.
    Max,
    /// Stretch across the parent's cross axis.
    Stretch,
    /// Follow the parent.
    #[default]
    Inherit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Auto-layout metadata.
pub struct LayoutMetadata {
    /// Declared flow direction.
    #[serde(default)]
    pub layout_mode: LayoutMode,
    /// Sizing along the flow axis.
    #[serde(default)]
    pub primary_axis_sizing_mode: SizingMode,
    /// Sizing across the flow axis.
    #[serde(default)]
    pub counter_axis_sizing_mode: SizingMode,
    /// Declared gap between flowing children.
    #[serde(default)]
    pub item_spacing: f64,
    /// Declared padding of an auto-layout container.
    #[serde(default)]
    pub padding: Edges,
    /// Self alignment inside an auto-layout parent.
    #[serde(default)]
    pub layout_align: LayoutAlign,
    /// Grow factor along the parent's flow axis.
    #[serde(default)]
    pub layout_grow: f64,
}

impl LayoutMetadata {
    /// `true` when the host already declares a row or column.
    pub fn is_auto_layout(&self) -> bool {
        self.layout_mode != LayoutMode::None
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Horizontal text alignment.
pub enum TextAlign {
    /// Left aligned.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
    /// Justified.
    Justified,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Case transform applied to the characters.
pub enum TextCase {
    /// Characters as typed.
    #[default]
    Original,
    /// Upper case.
    Upper,
    /// Lower case.
    Lower,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// How the host sizes a text box.
pub enum TextAutoResize {
    /// Fixed box.
    #[default]
    None,
    /// Fixed width, height follows content.
    Height,
    /// Both axes follow content.
    WidthAndHeight,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Text content and typography.
pub struct TextProps {
    /// UTF-8 content.
    pub characters: String,
    /// Font size in design units.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Font family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Numeric font weight (100..=900).
    #[serde(default = "default_font_weight")]
    pub font_weight: u16,
    /// Horizontal alignment.
    #[serde(default)]
    pub text_align: TextAlign,
    /// Case transform.
    #[serde(default)]
    pub text_case: TextCase,
    /// Host box sizing.
    #[serde(default)]
    pub auto_resize: TextAutoResize,
}

impl TextProps {
    pub fn new(characters: impl Into<String>) -> Self {
        Self {
            characters: characters.into(),
            font_size: default_font_size(),
            font_family: None,
            font_weight: default_font_weight(),
            text_align: TextAlign::Left,
            text_case: TextCase::Original,
            auto_resize: TextAutoResize::None,
        }
    }

    /// Characters after applying [`TextProps::text_case`].
    pub fn display_text(&self) -> String {
        match self.text_case {
            TextCase::Original => self.characters.clone(),
            TextCase::Upper => self.characters.to_uppercase(),
            TextCase::Lower => self.characters.to_lowercase(),
        }
    }
}

fn default_one() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_font_size() -> f64 {
    14.0
}

fn default_font_weight() -> u16 {
    400
}

impl Scene {
    /// Parse and validate a scene from a JSON string.
    pub fn from_json_str(json: &str) -> FlexResult<Self> {
        let scene: Self =
            serde_json::from_str(json).map_err(|e| FlexError::serde(e.to_string()))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Read, parse and validate a scene JSON file.
    pub fn from_path(path: &Path) -> FlexResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            FlexError::Other(anyhow::Error::new(e).context(format!(
                "read scene '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&json)
    }

    /// Validate model-boundary invariants for every node.
    pub fn validate(&self) -> FlexResult<()> {
        let mut seen = BTreeSet::new();
        for root in &self.roots {
            root.validate_into(&mut seen)?;
        }
        Ok(())
    }
}

impl SceneNode {
    /// Validate this subtree on its own.
    pub fn validate(&self) -> FlexResult<()> {
        self.validate_into(&mut BTreeSet::new())
    }

    fn validate_into<'a>(&'a self, seen: &mut BTreeSet<&'a str>) -> FlexResult<()> {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            node.validate_node(seen)?;
            pending.extend(node.children.iter().rev());
        }
        Ok(())
    }

    fn validate_node<'a>(&'a self, seen: &mut BTreeSet<&'a str>) -> FlexResult<()> {
        if self.id.trim().is_empty() {
            return Err(FlexError::validation("node id must be non-empty"));
        }
        if !seen.insert(self.id.as_str()) {
            return Err(FlexError::validation(format!(
                "duplicate node id '{}'",
                self.id
            )));
        }
        if !self.geometry.is_finite() {
            return Err(FlexError::validation(format!(
                "node '{}' has non-finite geometry",
                self.id
            )));
        }
        let style = &self.style;
        if !style.opacity.is_finite() || !(0.0..=1.0).contains(&style.opacity) {
            return Err(FlexError::validation(format!(
                "node '{}' opacity must be within [0, 1]",
                self.id
            )));
        }
        if !style.stroke_weight.is_finite() || style.stroke_weight < 0.0 {
            return Err(FlexError::validation(format!(
                "node '{}' strokeWeight must be finite and >= 0",
                self.id
            )));
        }
        if !style.rotation.is_finite() {
            return Err(FlexError::validation(format!(
                "node '{}' rotation must be finite",
                self.id
            )));
        }
        let layout = &self.layout;
        if !layout.item_spacing.is_finite() || !layout.layout_grow.is_finite() {
            return Err(FlexError::validation(format!(
                "node '{}' itemSpacing/layoutGrow must be finite",
                self.id
            )));
        }
        layout
            .padding
            .validate(&format!("node '{}' padding", self.id))?;
        if !self.children.is_empty() && !self.kind.is_container() {
            return Err(FlexError::validation(format!(
                "node '{}' of kind {:?} cannot have children",
                self.id, self.kind
            )));
        }
        if let Some(text) = &self.text
            && (!text.font_size.is_finite() || text.font_size <= 0.0)
        {
            return Err(FlexError::validation(format!(
                "node '{}' fontSize must be finite and > 0",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
