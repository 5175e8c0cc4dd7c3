use crate::{foundation::error::FlexResult, infer::pass::Conversion};

/// Code generator for one target, fed an annotated [`Conversion`].
///
/// Builders read annotations and raw style attributes only; layout geometry is never
/// re-derived here.
pub trait Builder {
    fn build(&self, conversion: &Conversion) -> FlexResult<String>;

    /// Build every conversion and join the outputs with a blank line.
    fn build_all(&self, conversions: &[Conversion]) -> FlexResult<String> {
        let mut parts = Vec::with_capacity(conversions.len());
        for c in conversions {
            parts.push(self.build(c)?);
        }
        Ok(parts.join("\n\n"))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Output flavor.
pub enum Target {
    /// HTML with flex utility classes.
    #[default]
    Markup,
    /// Declarative widget tree.
    Widget,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Knobs shared by all builders.
pub struct EmitOptions {
    /// Emit JSX attribute syntax. Markup only.
    pub jsx: bool,
    /// Add a class derived from each layer name. Markup only.
    pub layer_names: bool,
}

pub fn create_builder(target: Target, options: EmitOptions) -> Box<dyn Builder> {
    match target {
        Target::Markup => Box::new(crate::emit::markup::MarkupBuilder::new(options)),
        Target::Widget => Box::new(crate::emit::widget::WidgetBuilder::new()),
    }
}

/// Format a design-unit number: integers without a fraction, otherwise at most two
/// decimals with trailing zeros removed.
pub(crate) fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        // Avoid "-0".
        format!("{}", rounded.trunc() as i64)
    } else {
        let s = format!("{rounded:.2}");
        s.trim_end_matches('0').to_string()
    }
}
