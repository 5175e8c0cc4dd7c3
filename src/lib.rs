//! flexinfer turns absolutely positioned design trees into flex-style layout code.
//!
//! Design tools hand over elements with absolute boxes. flexinfer infers, per
//! container, whether the children form a row, a column, or an overlapping stack,
//! and annotates every element with padding, spacing, cross-axis alignment and
//! per-axis sizing. Builders then turn the annotated tree into code.
//!
//! # Pipeline overview
//!
//! 1. **Load**: JSON or the builder DSL -> [`Scene`], validated at the boundary.
//! 2. **Flatten**: each root -> [`SceneTree`] (arena, parent/child ids).
//! 3. **Infer**: [`infer_layout`] annotates the tree and returns an [`InferenceRegistry`].
//! 4. **Emit**: a [`Builder`] from [`create_builder`] renders markup or widget code.
//!
//! Inference never fails: geometry it cannot explain degrades to absolute
//! positioning and fixed sizes. Errors only come from parsing, validation and emission.
#![forbid(unsafe_code)]

pub mod emit;
pub mod foundation;
pub mod infer;
pub mod scene;

pub use emit::builder::{Builder, EmitOptions, Target, create_builder};
pub use emit::colors::{collect_colors, first_solid, hex};
pub use emit::markup::MarkupBuilder;
pub use emit::widget::WidgetBuilder;
pub use foundation::core::{Axis, Edges, Point, Rect, Size, Vec2};
pub use foundation::error::{FlexError, FlexResult};
pub use infer::align::{Alignment, Placement};
pub use infer::config::InferenceConfig;
pub use infer::pass::{Conversion, convert, convert_parallel, infer_layout};
pub use infer::registry::{Direction, InferenceRegistry, InferenceResult, RelationTag};
pub use infer::size::{AxisSize, ResolvedSize};
pub use infer::spacing::PaddingShape;
pub use scene::dsl::{
    NodeBuilder, SceneBuilder, component, ellipse, frame, group, instance, rect, text, vector,
};
pub use scene::model::{
    Color, CornerRadius, Effect, ElementKind, Geometry, LayoutAlign, LayoutMetadata, LayoutMode,
    Paint, Scene, SceneNode, SizingMode, StrokeAlign, Style, TextAlign, TextAutoResize, TextCase,
    TextProps,
};
pub use scene::tree::{AnnotatedNode, Annotations, Element, ElementId, SceneTree};
