//! Auto-layout inference passes.
//!
//! [`pass::infer_layout`] runs, in order: direction classification with background
//! extraction, padding and spacing, cross-axis alignment, and size resolution.

pub mod align;
pub mod background;
pub mod config;
pub mod direction;
pub mod pass;
pub mod registry;
pub mod size;
pub mod spacing;
