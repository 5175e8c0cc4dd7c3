//! Design-tree input: serde model, arena tree and builder DSL.

pub mod dsl;
pub mod model;
pub mod tree;
