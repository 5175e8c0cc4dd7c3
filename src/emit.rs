//! Code generators that consume annotated trees.

pub mod builder;
pub mod colors;
pub mod markup;
pub mod widget;
