use folio_core::Aabb;
use glam::Affine3A;

use crate::NodeHandle;
use crate::transform::Transform;

/// A scene node.
///
/// # Hierarchy
///
/// Nodes form a tree through `parent`/`children`. The parent pointer is what
/// picking walks upward to find the interactable model root of a hit mesh.
///
/// # Picking
///
/// `bounds` is the node's local-space pick volume; nodes without bounds are
/// never hit directly but still pass the test on to their children.
/// `interactable` marks the single root of a pickable model subtree.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,
    pub(crate) world_matrix: Affine3A,

    pub visible: bool,
    pub interactable: bool,
    pub bounds: Option<Aabb>,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            world_matrix: Affine3A::IDENTITY,
            visible: true,
            interactable: false,
            bounds: None,
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// World matrix as of the last [`Scene::update_matrix_world`](crate::Scene::update_matrix_world).
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("")
    }
}
