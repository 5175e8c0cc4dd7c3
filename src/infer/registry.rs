use std::collections::BTreeMap;

use crate::{foundation::core::Axis, scene::tree::ElementId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Inferred flow direction of a container.
pub enum Direction {
    /// No row or column fits; children stay absolutely positioned.
    #[default]
    None,
    /// Children flow left to right.
    RowLike,
    /// Children flow top to bottom.
    ColumnLike,
}

impl Direction {
    /// Axis children are laid out along, if any.
    pub fn primary_axis(self) -> Option<Axis> {
        match self {
            Self::None => None,
            Self::RowLike => Some(Axis::Horizontal),
            Self::ColumnLike => Some(Axis::Vertical),
        }
    }

    pub fn cross_axis(self) -> Option<Axis> {
        self.primary_axis().map(Axis::cross)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// How background extraction reshaped the tree around an element.
pub enum RelationTag {
    /// Container whose background sibling was promoted to layout parent.
    Parent,
    /// Sibling that now lays out inside the promoted background.
    Child,
    /// The promoted background itself.
    Changed,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Inference state of one container.
pub struct InferenceResult {
    /// Inferred direction.
    pub direction: Direction,
    /// Visible children (minus the background) in flow order.
    pub ordered_children: Vec<ElementId>,
    /// Observed gaps between consecutive ordered children.
    pub spacing_samples: Vec<f64>,
    /// Sibling promoted to visual background, excluded from `ordered_children`.
    pub background: Option<ElementId>,
    /// `true` when the host declared the layout and nothing was inferred.
    pub declared: bool,
}

/// Per-run side table of inference results, keyed by element.
///
/// Built fresh by every [`crate::infer_layout`] call and threaded explicitly through
/// the later passes; nothing survives across conversions.
#[derive(Clone, Debug, Default)]
pub struct InferenceRegistry {
    results: BTreeMap<ElementId, InferenceResult>,
    relations: BTreeMap<ElementId, RelationTag>,
}

impl InferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result for `container`. Each container is written once per run.
    pub(crate) fn insert(&mut self, container: ElementId, result: InferenceResult) {
        let prev = self.results.insert(container, result);
        debug_assert!(prev.is_none(), "container {container:?} inferred twice");
    }

    pub fn result(&self, container: ElementId) -> Option<&InferenceResult> {
        self.results.get(&container)
    }

    pub fn direction(&self, container: ElementId) -> Direction {
        self.results
            .get(&container)
            .map(|r| r.direction)
            .unwrap_or_default()
    }

    pub fn background(&self, container: ElementId) -> Option<ElementId> {
        self.results.get(&container).and_then(|r| r.background)
    }

    /// Relation recorded for `id`, if background extraction touched it.
    ///
    /// An element that is both a displaced child of its parent and a restructured
    /// container reports the child-side tag.
    pub fn relation(&self, id: ElementId) -> Option<RelationTag> {
        self.relations.get(&id).copied()
    }

    pub(crate) fn tag(&mut self, id: ElementId, tag: RelationTag) {
        match (self.relations.get(&id), tag) {
            (Some(RelationTag::Child | RelationTag::Changed), RelationTag::Parent) => {}
            _ => {
                self.relations.insert(id, tag);
            }
        }
    }

    /// `true` when `container` had a background sibling promoted.
    pub fn is_restructured(&self, container: ElementId) -> bool {
        self.background(container).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &InferenceResult)> {
        self.results.iter().map(|(&id, r)| (id, r))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
