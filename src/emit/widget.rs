use std::fmt::Write as _;

use crate::{
    emit::{
        builder::{Builder, num},
        colors::{argb_literal, first_solid},
    },
    foundation::core::{Axis, Edges, Vec2},
    foundation::error::FlexResult,
    infer::{
        align::{Alignment, Placement},
        pass::Conversion,
        registry::{Direction, InferenceResult},
        size::{AxisSize, ResolvedSize},
        spacing::PaddingShape,
    },
    scene::{
        model::{CornerRadius, Effect, ElementKind, TextAlign},
        tree::{Element, ElementId},
    },
};

/// Widget-tree emitter (`Row`, `Column`, `Stack`, `Container`, ...).
#[derive(Clone, Copy, Debug, Default)]
pub struct WidgetBuilder;

impl WidgetBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl Builder for WidgetBuilder {
    #[tracing::instrument(skip_all, fields(elements = conversion.tree.len()))]
    fn build(&self, conversion: &Conversion) -> FlexResult<String> {
        let Some(root) = Emitter { conversion }.element(conversion.tree.root()) else {
            return Ok(String::new());
        };
        let mut out = String::new();
        root.write(&mut out, 0)?;
        Ok(out)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Arg {
    Value(String),
    Child(Widget),
    Children(Vec<Widget>),
}

/// A constructor call with named arguments.
#[derive(Clone, Debug, PartialEq)]
struct Widget {
    name: &'static str,
    positional: Option<String>,
    args: Vec<(&'static str, Arg)>,
}

impl Widget {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            positional: None,
            args: Vec::new(),
        }
    }

    fn positional(mut self, v: impl Into<String>) -> Self {
        self.positional = Some(v.into());
        self
    }

    fn arg(mut self, key: &'static str, v: impl Into<String>) -> Self {
        self.args.push((key, Arg::Value(v.into())));
        self
    }

    fn arg_opt(self, key: &'static str, v: Option<String>) -> Self {
        match v {
            Some(v) => self.arg(key, v),
            None => self,
        }
    }

    fn child(mut self, w: Widget) -> Self {
        self.args.push(("child", Arg::Child(w)));
        self
    }

    fn children(mut self, ws: Vec<Widget>) -> Self {
        self.args.push(("children", Arg::Children(ws)));
        self
    }

    fn is_flat(&self) -> bool {
        self.args.iter().all(|(_, a)| matches!(a, Arg::Value(_)))
    }

    fn write(&self, out: &mut String, depth: usize) -> std::fmt::Result {
        let pad = "  ".repeat(depth);
        if self.is_flat() {
            let mut parts: Vec<String> = self.positional.iter().cloned().collect();
            for (k, a) in &self.args {
                if let Arg::Value(v) = a {
                    parts.push(format!("{k}: {v}"));
                }
            }
            return write!(out, "{}({})", self.name, parts.join(", "));
        }

        writeln!(out, "{}(", self.name)?;
        if let Some(p) = &self.positional {
            writeln!(out, "{pad}  {p},")?;
        }
        for (k, a) in &self.args {
            write!(out, "{pad}  {k}: ")?;
            match a {
                Arg::Value(v) => write!(out, "{v}")?,
                Arg::Child(w) => w.write(out, depth + 1)?,
                Arg::Children(ws) => {
                    writeln!(out, "[")?;
                    for w in ws {
                        write!(out, "{pad}    ")?;
                        w.write(out, depth + 2)?;
                        writeln!(out, ",")?;
                    }
                    write!(out, "{pad}  ]")?;
                }
            }
            writeln!(out, ",")?;
        }
        write!(out, "{pad})")
    }
}

struct Emitter<'a> {
    conversion: &'a Conversion,
}

impl Emitter<'_> {
    fn element(&self, id: ElementId) -> Option<Widget> {
        let e = &self.conversion.tree[id];
        if !e.has_visible_box() {
            return None;
        }
        let core = match e.kind {
            ElementKind::Text => text_widget(e),
            ElementKind::Rectangle | ElementKind::Ellipse | ElementKind::Vector => {
                sized_box_widget("Container", e.annotations.size).arg_opt("decoration", decoration(e))
            }
            ElementKind::Frame | ElementKind::Group | ElementKind::Component | ElementKind::Instance => {
                match self.conversion.registry.result(id) {
                    Some(result) => self.container(e, result, false),
                    None => sized_box_widget("SizedBox", e.annotations.size),
                }
            }
        };
        Some(wrap_blend(e, core))
    }

    /// `as_layer` renders only the content of a promoted background; its box and
    /// decoration belong to the enclosing container.
    fn container(&self, e: &Element, result: &InferenceResult, as_layer: bool) -> Widget {
        let body = self.layout(e, result);
        let padding = match result.direction {
            Direction::None => None,
            _ => e
                .annotations
                .padding
                .and_then(|p| edge_insets(PaddingShape::of(p, &self.conversion.config))),
        };

        if let Some(bg) = result.background {
            let b = &self.conversion.tree[bg];
            // The background's own children sit under the flow, filling its box.
            let (padding, body) = match self.background_layer(bg) {
                Some(layer) => (
                    None,
                    Widget::new("Stack").children(vec![
                        Widget::new("Positioned.fill").child(layer),
                        padded(padding, body),
                    ]),
                ),
                None => (padding, body),
            };
            let inner = sized_box_widget("Container", b.annotations.size)
                .arg_opt("margin", b.annotations.margins.and_then(margin_insets))
                .arg_opt("padding", padding)
                .arg_opt("decoration", decoration(b))
                .child(body);
            let outer = if as_layer {
                Widget::new("Container")
            } else {
                sized_box_widget("Container", e.annotations.size).arg_opt("decoration", decoration(e))
            };
            return outer.arg("alignment", "Alignment.center").child(inner);
        }

        if as_layer {
            return padded(padding, body);
        }

        let decoration = decoration(e);
        let sized = size_args(e.annotations.size);
        if decoration.is_some() || !sized.is_empty() {
            let mut w = Widget::new("Container");
            w.args.extend(sized);
            w.arg_opt("padding", padding)
                .arg_opt("decoration", decoration)
                .child(body)
        } else {
            padded(padding, body)
        }
    }

    fn background_layer(&self, bg: ElementId) -> Option<Widget> {
        let result = self.conversion.registry.result(bg)?;
        if result.ordered_children.is_empty() && result.background.is_none() {
            return None;
        }
        Some(self.container(&self.conversion.tree[bg], result, true))
    }

    fn layout(&self, container: &Element, result: &InferenceResult) -> Widget {
        let tree = &self.conversion.tree;
        let Some(primary) = result.direction.primary_axis() else {
            let children = result
                .ordered_children
                .iter()
                .filter_map(|&c| {
                    let w = self.element(c)?;
                    Some(match tree[c].annotations.placement {
                        Some(Placement::Absolute { left, top }) => Widget::new("Positioned")
                            .arg("left", num(left))
                            .arg("top", num(top))
                            .child(w),
                        _ => w,
                    })
                })
                .collect();
            return Widget::new("Stack").children(children);
        };

        let alignments: Vec<Alignment> = result
            .ordered_children
            .iter()
            .filter(|&&c| tree[c].has_visible_box())
            .filter_map(|&c| tree[c].annotations.alignment)
            .collect();
        let dominant = dominant_alignment(&alignments);
        let spacing = container.annotations.spacing.unwrap_or(0.0);

        let mut children = Vec::new();
        for &c in &result.ordered_children {
            let Some(mut w) = self.element(c) else {
                continue;
            };
            let a = &tree[c].annotations;
            if let Some(align) = a.alignment
                && align != dominant
                && align != Alignment::Stretch
            {
                w = Widget::new("Align")
                    .arg("alignment", align_literal(primary, align))
                    .child(w);
            }
            if a.size.is_some_and(|s| s.expands) {
                w = Widget::new("Expanded").child(w);
            }
            if !children.is_empty() && spacing > 0.0 {
                let key = match primary {
                    Axis::Horizontal => "width",
                    Axis::Vertical => "height",
                };
                children.push(Widget::new("SizedBox").arg(key, num(spacing)));
            }
            children.push(w);
        }

        let name = match primary {
            Axis::Horizontal => "Row",
            Axis::Vertical => "Column",
        };
        Widget::new(name)
            .arg("mainAxisSize", "MainAxisSize.min")
            .arg("crossAxisAlignment", cross_literal(dominant))
            .children(children)
    }
}

fn padded(padding: Option<String>, body: Widget) -> Widget {
    match padding {
        Some(p) => Widget::new("Padding").arg("padding", p).child(body),
        None => body,
    }
}

/// Most frequent alignment; ties go to the earlier variant, empty input to `Start`.
fn dominant_alignment(alignments: &[Alignment]) -> Alignment {
    let order = [
        Alignment::Start,
        Alignment::Center,
        Alignment::End,
        Alignment::Stretch,
    ];
    let mut best = Alignment::Start;
    let mut best_count = 0;
    for candidate in order {
        let count = alignments.iter().filter(|&&a| a == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

fn cross_literal(a: Alignment) -> &'static str {
    match a {
        Alignment::Start => "CrossAxisAlignment.start",
        Alignment::Center => "CrossAxisAlignment.center",
        Alignment::End => "CrossAxisAlignment.end",
        Alignment::Stretch => "CrossAxisAlignment.stretch",
    }
}

fn align_literal(primary: Axis, a: Alignment) -> &'static str {
    match (primary, a) {
        (Axis::Horizontal, Alignment::Start) => "Alignment.topCenter",
        (Axis::Horizontal, Alignment::End) => "Alignment.bottomCenter",
        (Axis::Vertical, Alignment::Start) => "Alignment.centerLeft",
        (Axis::Vertical, Alignment::End) => "Alignment.centerRight",
        (_, Alignment::Center | Alignment::Stretch) => "Alignment.center",
    }
}

fn size_args(size: Option<ResolvedSize>) -> Vec<(&'static str, Arg)> {
    let Some(size) = size else {
        return Vec::new();
    };
    let mut args = Vec::new();
    for (key, axis) in [("width", size.width), ("height", size.height)] {
        match axis {
            AxisSize::Fixed(v) => args.push((key, Arg::Value(num(v)))),
            AxisSize::Fill => args.push((key, Arg::Value("double.infinity".to_string()))),
            AxisSize::Hug => {}
        }
    }
    args
}

fn sized_box_widget(name: &'static str, size: Option<ResolvedSize>) -> Widget {
    let mut w = Widget::new(name);
    w.args.extend(size_args(size));
    w
}

fn edge_insets(shape: PaddingShape) -> Option<String> {
    match shape {
        PaddingShape::Zero => None,
        PaddingShape::Uniform(v) => Some(format!("const EdgeInsets.all({})", num(v))),
        PaddingShape::Symmetric {
            horizontal,
            vertical,
        } => {
            let parts: Vec<String> = [("horizontal", horizontal), ("vertical", vertical)]
                .into_iter()
                .filter(|&(_, v)| v > 0.0)
                .map(|(k, v)| format!("{k}: {}", num(v)))
                .collect();
            Some(format!("const EdgeInsets.symmetric({})", parts.join(", ")))
        }
        PaddingShape::Sides(e) => only_insets(e),
    }
}

fn only_insets(e: Edges) -> Option<String> {
    let parts: Vec<String> = [
        ("left", e.left),
        ("top", e.top),
        ("right", e.right),
        ("bottom", e.bottom),
    ]
    .into_iter()
    .filter(|&(_, v)| v > 0.0)
    .map(|(k, v)| format!("{k}: {}", num(v)))
    .collect();
    if parts.is_empty() {
        None
    } else {
        Some(format!("const EdgeInsets.only({})", parts.join(", ")))
    }
}

fn margin_insets(m: Vec2) -> Option<String> {
    only_insets(Edges {
        left: m.x.max(0.0),
        right: (-m.x).max(0.0),
        top: m.y.max(0.0),
        bottom: (-m.y).max(0.0),
    })
}

fn color(c: crate::scene::model::Color) -> String {
    format!("Color({})", argb_literal(c))
}

fn decoration(e: &Element) -> Option<String> {
    let style = &e.style;
    let mut parts = Vec::new();
    if let Some(c) = first_solid(&style.fills) {
        parts.push(format!("color: {}", color(c)));
    }
    if e.kind == ElementKind::Ellipse {
        parts.push("shape: BoxShape.circle".to_string());
    } else {
        match style.corner_radius {
            CornerRadius::Uniform(r) if r > 0.0 => {
                parts.push(format!("borderRadius: BorderRadius.circular({})", num(r)));
            }
            CornerRadius::Uniform(_) => {}
            CornerRadius::PerCorner {
                top_left,
                top_right,
                bottom_right,
                bottom_left,
            } => parts.push(format!(
                "borderRadius: BorderRadius.only(topLeft: Radius.circular({}), topRight: Radius.circular({}), bottomRight: Radius.circular({}), bottomLeft: Radius.circular({}))",
                num(top_left),
                num(top_right),
                num(bottom_right),
                num(bottom_left)
            )),
        }
    }
    if let Some(c) = first_solid(&style.strokes)
        && style.stroke_weight > 0.0
    {
        parts.push(format!(
            "border: Border.all(color: {}, width: {})",
            color(c),
            num(style.stroke_weight)
        ));
    }
    let shadows: Vec<String> = style
        .effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::DropShadow {
                color: c,
                offset,
                radius,
                visible: true,
            } => Some(format!(
                "BoxShadow(color: {}, blurRadius: {}, offset: Offset({}, {}))",
                color(*c),
                num(*radius),
                num(offset.x),
                num(offset.y)
            )),
            _ => None,
        })
        .collect();
    if !shadows.is_empty() {
        parts.push(format!("boxShadow: [{}]", shadows.join(", ")));
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("BoxDecoration({})", parts.join(", ")))
    }
}

fn text_widget(e: &Element) -> Widget {
    let Some(t) = &e.text else {
        return sized_box_widget("SizedBox", e.annotations.size);
    };
    let mut style = vec![
        format!("fontSize: {}", num(t.font_size)),
        format!(
            "fontWeight: FontWeight.w{}",
            (t.font_weight.clamp(100, 900) + 50) / 100 * 100
        ),
    ];
    if let Some(family) = &t.font_family {
        style.push(format!("fontFamily: '{}'", family.replace('\'', "\\'")));
    }
    if let Some(c) = first_solid(&e.style.fills) {
        style.push(format!("color: {}", color(c)));
    }

    let align = match t.text_align {
        TextAlign::Left => None,
        TextAlign::Center => Some("TextAlign.center"),
        TextAlign::Right => Some("TextAlign.right"),
        TextAlign::Justified => Some("TextAlign.justify"),
    };
    let text = Widget::new("Text")
        .positional(dart_string(&t.display_text()))
        .arg_opt("textAlign", align.map(str::to_string))
        .arg("style", format!("TextStyle({})", style.join(", ")));

    let sized = size_args(e.annotations.size);
    if sized.is_empty() {
        return text;
    }
    let mut w = Widget::new("SizedBox");
    w.args.extend(sized);
    w.child(text)
}

fn wrap_blend(e: &Element, mut w: Widget) -> Widget {
    let style = &e.style;
    if style.rotation != 0.0 {
        let angle = style.rotation * -std::f64::consts::PI / 180.0;
        w = Widget::new("Transform.rotate")
            .arg("angle", num(angle))
            .child(w);
    }
    if style.opacity < 1.0 {
        w = Widget::new("Opacity")
            .arg("opacity", num(style.opacity))
            .child(w);
    }
    if !style.visible {
        w = Widget::new("Visibility").arg("visible", "false").child(w);
    }
    w
}

fn dart_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
#[path = "../../tests/unit/emit/widget.rs"]
mod tests;
