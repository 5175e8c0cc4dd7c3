use std::collections::BTreeSet;

use crate::scene::{
    model::{Color, Paint},
    tree::SceneTree,
};

fn channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// `#rrggbb`, or `#rrggbbaa` when the color is not fully opaque.
pub fn hex(c: Color) -> String {
    let (r, g, b, a) = (channel(c.r), channel(c.g), channel(c.b), channel(c.a));
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// `0xAARRGGBB` literal for widget code.
pub fn argb_literal(c: Color) -> String {
    let (r, g, b, a) = (channel(c.r), channel(c.g), channel(c.b), channel(c.a));
    format!("0x{a:02X}{r:02X}{g:02X}{b:02X}")
}

/// First visible paint that resolves to a flat color.
///
/// Solid paints fold their opacity into alpha; gradients fall back to their first
/// stop; images are skipped.
pub fn first_solid(paints: &[Paint]) -> Option<Color> {
    paints.iter().find_map(|p| match p {
        Paint::Solid {
            color,
            opacity,
            visible: true,
        } => Some(Color {
            a: color.a * opacity,
            ..*color
        }),
        Paint::Gradient { stops } => stops.first().copied(),
        Paint::Solid { visible: false, .. } | Paint::Image { .. } => None,
    })
}

/// Distinct colors of every element's first fill and stroke, sorted.
pub fn collect_colors(tree: &SceneTree) -> Vec<String> {
    let mut out = BTreeSet::new();
    for e in tree.iter() {
        for paints in [&e.style.fills, &e.style.strokes] {
            if let Some(c) = first_solid(paints) {
                out.insert(hex(c));
            }
        }
    }
    out.into_iter().collect()
}

#[cfg(test)]
#[path = "../../tests/unit/emit/colors.rs"]
mod tests;
