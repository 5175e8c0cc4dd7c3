use std::ops::{Index, IndexMut};

use crate::{
    foundation::core::{Edges, Rect, Vec2},
    foundation::error::{FlexError, FlexResult},
    infer::align::{Alignment, Placement},
    infer::registry::Direction,
    infer::size::ResolvedSize,
    scene::model::{
        ElementKind, Geometry, LayoutMetadata, SceneNode, Style, TextProps,
    },
};

/// Index of an element inside its [`SceneTree`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u32);

impl ElementId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Layout attributes derived by the inference passes.
///
/// Every field starts out `None` and is filled in place by [`crate::infer_layout`].
/// Builders must tolerate any field left in its default state.
pub struct Annotations {
    /// Resolved flow direction (containers only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Resolved container padding (containers only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Edges>,
    /// Resolved gap between flowing children (containers only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    /// Cross-axis self alignment inside a flowing parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// Signed center offset for an element displaced by background extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<Vec2>,
    /// How the element is placed inside its parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    /// Per-axis rendered size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ResolvedSize>,
}

#[derive(Clone, Debug)]
/// One design node owned by a [`SceneTree`].
pub struct Element {
    /// Arena index.
    pub id: ElementId,
    /// Identity from the host tool.
    pub source_id: String,
    /// Layer name.
    pub name: String,
    /// Variant tag.
    pub kind: ElementKind,
    /// Absolute box.
    pub geometry: Geometry,
    /// Raw style attributes.
    pub style: Style,
    /// Host auto-layout metadata.
    pub layout: LayoutMetadata,
    /// Text content (Text kind only).
    pub text: Option<TextProps>,
    /// Owning parent; `None` for the root.
    pub parent: Option<ElementId>,
    /// Children in host insertion order.
    pub children: Vec<ElementId>,
    /// Derived layout attributes.
    pub annotations: Annotations,
}

impl Element {
    pub fn rect(&self) -> Rect {
        self.geometry.rect()
    }

    pub fn has_visible_box(&self) -> bool {
        self.geometry.has_visible_box()
    }
}

/// Arena-owned element tree for one converted root.
///
/// Elements are stored in depth-first pre-order, so a parent always has a smaller
/// index than any of its descendants.
#[derive(Clone, Debug)]
pub struct SceneTree {
    elements: Vec<Element>,
}

impl SceneTree {
    /// Validate `node` and flatten its subtree into an arena.
    pub fn from_node(node: &SceneNode) -> FlexResult<Self> {
        node.validate()?;
        Ok(Self {
            elements: flatten(node)?,
        })
    }

    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    /// Elements in depth-first pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Element ids in depth-first pre-order (parents before children).
    pub fn pre_order(&self) -> impl DoubleEndedIterator<Item = ElementId> + '_ {
        self.elements.iter().map(|e| e.id)
    }

    /// Look up an element by its host identity.
    pub fn find(&self, source_id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|e| e.source_id == source_id)
            .map(|e| e.id)
    }

    /// Children of `id` that have a visible box, in insertion order.
    pub fn visible_children(&self, id: ElementId) -> Vec<ElementId> {
        self[id]
            .children
            .iter()
            .copied()
            .filter(|&c| self[c].has_visible_box())
            .collect()
    }

    /// Snapshot of the annotated tree for serialization.
    pub fn to_annotated(&self) -> AnnotatedNode {
        // Reverse pre-order finishes every subtree before its parent; finished
        // siblings wait on `done` until the parent collects them.
        let mut done = Vec::new();
        for e in self.elements.iter().skip(1).rev() {
            let node = annotate(e, &mut done);
            done.push(node);
        }
        annotate(&self[self.root()], &mut done)
    }
}

fn annotate(e: &Element, done: &mut Vec<AnnotatedNode>) -> AnnotatedNode {
    let at = done.len().saturating_sub(e.children.len());
    let mut children = done.split_off(at);
    children.reverse();
    AnnotatedNode {
        id: e.source_id.clone(),
        kind: e.kind,
        geometry: e.geometry,
        annotations: e.annotations.clone(),
        children,
    }
}

impl Index<ElementId> for SceneTree {
    type Output = Element;

    fn index(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }
}

impl IndexMut<ElementId> for SceneTree {
    fn index_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.index()]
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Serializable view of an annotated element and its subtree.
pub struct AnnotatedNode {
    /// Host identity.
    pub id: String,
    /// Variant tag.
    pub kind: ElementKind,
    /// Absolute box.
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Derived layout attributes.
    #[serde(flatten)]
    pub annotations: Annotations,
    /// Annotated children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AnnotatedNode>,
}

/// Flatten `root` into pre-order with an explicit work stack, so depth costs heap, not stack.
fn flatten(root: &SceneNode) -> FlexResult<Vec<Element>> {
    let mut elements: Vec<Element> = Vec::new();
    let mut pending = vec![(root, None)];
    while let Some((node, parent)) = pending.pop() {
        let id = u32::try_from(elements.len())
            .map(ElementId)
            .map_err(|_| FlexError::validation("scene has too many nodes"))?;
        elements.push(Element {
            id,
            source_id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind,
            geometry: node.geometry,
            style: node.style.clone(),
            layout: node.layout,
            text: node.text.clone(),
            parent,
            children: Vec::with_capacity(node.children.len()),
            annotations: Annotations::default(),
        });
        if let Some(p) = parent {
            elements[p.index()].children.push(id);
        }
        // Reversed so the first child is popped, and numbered, first.
        pending.extend(node.children.iter().rev().map(|c| (c, Some(id))));
    }
    Ok(elements)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tree.rs"]
mod tests;
