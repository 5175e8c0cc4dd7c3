use std::fmt::Write as _;

use crate::{
    emit::{
        builder::{Builder, EmitOptions, num},
        colors::{first_solid, hex},
    },
    foundation::core::{Edges, Vec2},
    foundation::error::FlexResult,
    infer::{
        align::{Alignment, Placement},
        pass::Conversion,
        registry::Direction,
        size::{AxisSize, ResolvedSize},
        spacing::PaddingShape,
    },
    scene::{
        model::{CornerRadius, Effect, ElementKind, TextAlign},
        tree::{Element, ElementId},
    },
};

/// HTML emitter using flex utility classes with arbitrary values (`w-[20px]`).
#[derive(Clone, Debug, Default)]
pub struct MarkupBuilder {
    options: EmitOptions,
}

impl MarkupBuilder {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }
}

impl Builder for MarkupBuilder {
    #[tracing::instrument(skip_all, fields(elements = conversion.tree.len(), jsx = self.options.jsx))]
    fn build(&self, conversion: &Conversion) -> FlexResult<String> {
        let mut out = String::new();
        let w = Writer {
            conversion,
            options: self.options,
        };
        w.element(&mut out, conversion.tree.root(), 0)?;
        Ok(out.trim_end().to_string())
    }
}

struct Writer<'a> {
    conversion: &'a Conversion,
    options: EmitOptions,
}

#[derive(Default)]
struct Tag {
    classes: Vec<String>,
    style: Vec<(&'static str, String)>,
}

impl Tag {
    fn class(&mut self, c: impl Into<String>) {
        self.classes.push(c.into());
    }
}

impl Writer<'_> {
    fn element(&self, out: &mut String, id: ElementId, depth: usize) -> FlexResult<()> {
        let tree = &self.conversion.tree;
        let e = &tree[id];
        if !e.has_visible_box() {
            return Ok(());
        }

        let mut tag = Tag::default();
        size_classes(&mut tag, e.annotations.size);

        if e.kind == ElementKind::Text {
            placement_classes(&mut tag, e);
            text_classes(&mut tag, e);
            self.name_class(&mut tag, e);
            let content = e
                .text
                .as_ref()
                .map(|t| escape(&t.display_text()))
                .unwrap_or_default();
            writeln!(out, "{}<p{}>{content}</p>", indent(depth), self.attrs(&tag))?;
            return Ok(());
        }

        if !e.kind.is_container() {
            self.decorate(&mut tag, e);
            writeln!(out, "{}<div{}></div>", indent(depth), self.attrs(&tag))?;
            return Ok(());
        }

        self.container(out, id, tag, depth, false)
    }

    /// Writes a container and its flow. `as_layer` renders only the content box of a
    /// promoted background: its box and decoration already sit on the enclosing div.
    fn container(
        &self,
        out: &mut String,
        id: ElementId,
        mut tag: Tag,
        depth: usize,
        as_layer: bool,
    ) -> FlexResult<()> {
        let tree = &self.conversion.tree;
        let e = &tree[id];
        let Some(result) = self.conversion.registry.result(id) else {
            writeln!(out, "{}<div{}></div>", indent(depth), self.attrs(&tag))?;
            return Ok(());
        };

        match result.background {
            Some(bg) => {
                // The container centers its promoted background, which carries the flow.
                tag.class("flex items-center justify-center");
                if !as_layer {
                    self.decorate(&mut tag, e);
                }
                writeln!(out, "{}<div{}>", indent(depth), self.attrs(&tag))?;

                let b = &tree[bg];
                let layered = self.has_own_content(bg);
                let mut inner = Tag::default();
                size_classes(&mut inner, b.annotations.size);
                self.layout_classes(&mut inner, e, false);
                if layered && !inner.classes.iter().any(|c| c == "relative") {
                    inner.class("relative");
                }
                if let Some(m) = b.annotations.margins {
                    margin_classes(&mut inner, m);
                }
                visual_classes(&mut inner, b);
                self.name_class(&mut inner, b);
                writeln!(out, "{}<div{}>", indent(depth + 1), self.attrs(&inner))?;
                if layered {
                    let mut layer = Tag::default();
                    layer.class("absolute inset-0");
                    self.container(out, bg, layer, depth + 2, true)?;
                }
                for &c in &result.ordered_children {
                    self.element(out, c, depth + 2)?;
                }
                writeln!(out, "{}</div>", indent(depth + 1))?;
            }
            None => {
                self.layout_classes(&mut tag, e, as_layer);
                if !as_layer {
                    self.decorate(&mut tag, e);
                }
                writeln!(out, "{}<div{}>", indent(depth), self.attrs(&tag))?;
                for &c in &result.ordered_children {
                    self.element(out, c, depth + 1)?;
                }
            }
        }
        writeln!(out, "{}</div>", indent(depth))?;
        Ok(())
    }

    /// Whether a promoted background has children of its own to lay out.
    fn has_own_content(&self, bg: ElementId) -> bool {
        self.conversion
            .registry
            .result(bg)
            .is_some_and(|r| !r.ordered_children.is_empty() || r.background.is_some())
    }

    fn decorate(&self, tag: &mut Tag, e: &Element) {
        placement_classes(tag, e);
        visual_classes(tag, e);
        self.name_class(tag, e);
    }

    /// `positioned` marks a tag that is already a containing block for absolute children.
    fn layout_classes(&self, tag: &mut Tag, container: &Element, positioned: bool) {
        let a = &container.annotations;
        match a.direction.unwrap_or_default() {
            Direction::RowLike => tag.class("flex flex-row"),
            Direction::ColumnLike => tag.class("flex flex-col"),
            Direction::None => {
                // Absolute children carry their own offsets.
                if !positioned {
                    tag.class("relative");
                }
                return;
            }
        }
        if let Some(gap) = a.spacing.filter(|&s| s > 0.0) {
            tag.class(format!("gap-[{}px]", num(gap)));
        }
        if let Some(p) = a.padding {
            padding_classes(tag, PaddingShape::of(p, &self.conversion.config));
        }
    }

    fn name_class(&self, tag: &mut Tag, e: &Element) {
        if !self.options.layer_names {
            return;
        }
        let name = layer_class(&e.name);
        if !name.is_empty() {
            tag.class(name);
        }
    }

    fn attrs(&self, tag: &Tag) -> String {
        let mut s = String::new();
        if !tag.classes.is_empty() {
            let key = if self.options.jsx { "className" } else { "class" };
            s.push_str(&format!(" {key}=\"{}\"", tag.classes.join(" ")));
        }
        if !tag.style.is_empty() {
            if self.options.jsx {
                let body = tag
                    .style
                    .iter()
                    .map(|(k, v)| format!("{k}: \"{v}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                s.push_str(&format!(" style={{{{{body}}}}}"));
            } else {
                let body = tag
                    .style
                    .iter()
                    .map(|(k, v)| format!("{k}: {v};"))
                    .collect::<Vec<_>>()
                    .join(" ");
                s.push_str(&format!(" style=\"{body}\""));
            }
        }
        s
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn size_classes(tag: &mut Tag, size: Option<ResolvedSize>) {
    let Some(size) = size else {
        return;
    };
    for (prefix, axis) in [("w", size.width), ("h", size.height)] {
        match axis {
            AxisSize::Fixed(v) => tag.class(format!("{prefix}-[{}px]", num(v))),
            AxisSize::Fill => tag.class(format!("{prefix}-full")),
            AxisSize::Hug => {}
        }
    }
    if size.expands {
        tag.class("flex-1");
    }
}

fn placement_classes(tag: &mut Tag, e: &Element) {
    match e.annotations.placement {
        Some(Placement::Absolute { left, top }) => {
            tag.class("absolute");
            tag.style.push(("left", format!("{}px", num(left))));
            tag.style.push(("top", format!("{}px", num(top))));
        }
        Some(Placement::Flow) => match e.annotations.alignment {
            Some(Alignment::Start) => tag.class("self-start"),
            Some(Alignment::Center) => tag.class("self-center"),
            Some(Alignment::End) => tag.class("self-end"),
            Some(Alignment::Stretch) => tag.class("self-stretch"),
            None => {}
        },
        None => {}
    }
}

fn padding_classes(tag: &mut Tag, shape: PaddingShape) {
    let px = |v: f64| format!("[{}px]", num(v));
    match shape {
        PaddingShape::Zero => {}
        PaddingShape::Uniform(v) => tag.class(format!("p-{}", px(v))),
        PaddingShape::Symmetric {
            horizontal,
            vertical,
        } => {
            if horizontal > 0.0 {
                tag.class(format!("px-{}", px(horizontal)));
            }
            if vertical > 0.0 {
                tag.class(format!("py-{}", px(vertical)));
            }
        }
        PaddingShape::Sides(Edges {
            top,
            right,
            bottom,
            left,
        }) => {
            for (prefix, v) in [("pt", top), ("pr", right), ("pb", bottom), ("pl", left)] {
                if v > 0.0 {
                    tag.class(format!("{prefix}-{}", px(v)));
                }
            }
        }
    }
}

fn margin_classes(tag: &mut Tag, m: Vec2) {
    if m.x > 0.0 {
        tag.class(format!("ml-[{}px]", num(m.x)));
    } else if m.x < 0.0 {
        tag.class(format!("mr-[{}px]", num(-m.x)));
    }
    if m.y > 0.0 {
        tag.class(format!("mt-[{}px]", num(m.y)));
    } else if m.y < 0.0 {
        tag.class(format!("mb-[{}px]", num(-m.y)));
    }
}

fn visual_classes(tag: &mut Tag, e: &Element) {
    let style = &e.style;
    if let Some(c) = first_solid(&style.fills) {
        tag.class(format!("bg-[{}]", hex(c)));
    }
    if let Some(c) = first_solid(&style.strokes)
        && style.stroke_weight > 0.0
    {
        tag.class(format!("border-[{}px] border-[{}]", num(style.stroke_weight), hex(c)));
    }
    if e.kind == ElementKind::Ellipse {
        tag.class("rounded-full");
    } else {
        match style.corner_radius {
            CornerRadius::Uniform(r) if r > 0.0 => tag.class(format!("rounded-[{}px]", num(r))),
            CornerRadius::Uniform(_) => {}
            CornerRadius::PerCorner {
                top_left,
                top_right,
                bottom_right,
                bottom_left,
            } => {
                for (prefix, r) in [
                    ("tl", top_left),
                    ("tr", top_right),
                    ("br", bottom_right),
                    ("bl", bottom_left),
                ] {
                    if r > 0.0 {
                        tag.class(format!("rounded-{prefix}-[{}px]", num(r)));
                    }
                }
            }
        }
    }
    for effect in &style.effects {
        if let Effect::DropShadow {
            color,
            offset,
            radius,
            visible: true,
        } = effect
        {
            tag.class(format!(
                "shadow-[{}px_{}px_{}px_{}]",
                num(offset.x),
                num(offset.y),
                num(*radius),
                hex(*color)
            ));
        }
    }
    blend_classes(tag, e);
}

fn blend_classes(tag: &mut Tag, e: &Element) {
    let style = &e.style;
    if style.opacity < 1.0 {
        tag.class(format!("opacity-[{}]", num(style.opacity)));
    }
    if !style.visible {
        tag.class("invisible");
    }
    if style.rotation != 0.0 {
        tag.class(format!("rotate-[{}deg]", num(style.rotation)));
    }
}

fn text_classes(tag: &mut Tag, e: &Element) {
    if let Some(t) = &e.text {
        tag.class(format!("text-[{}px]", num(t.font_size)));
        tag.class(format!("font-[{}]", t.font_weight));
        match t.text_align {
            TextAlign::Left => {}
            TextAlign::Center => tag.class("text-center"),
            TextAlign::Right => tag.class("text-right"),
            TextAlign::Justified => tag.class("text-justify"),
        }
    }
    if let Some(c) = first_solid(&e.style.fills) {
        tag.class(format!("text-[{}]", hex(c)));
    }
    blend_classes(tag, e);
}

/// Lower-case, dash-separated class name from a layer name.
fn layer_class(name: &str) -> String {
    let mut out = String::new();
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if matches!(ch, ' ' | '-' | '_' | '/') && !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '{' | '}' => {
                out.push_str(&format!("&#{};", ch as u32));
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/emit/markup.rs"]
mod tests;
