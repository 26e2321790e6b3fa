use folio_core::Aabb;
use folio_scene::{Node, NodeHandle, Scene, Transform};

/// Prefab node: plain data, children referenced by index.
#[derive(Debug, Clone, Default)]
pub struct PrefabNode {
    pub name: String,
    pub transform: Transform,
    /// Indices into `Prefab::nodes`
    pub children_indices: Vec<usize>,
    /// Local pick volume of the node's mesh, if it has one
    pub bounds: Option<Aabb>,
}

impl PrefabNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<usize>) -> Self {
        self.children_indices = children;
        self
    }
}

/// Scene-independent node template produced by a loader.
///
/// Contains no [`NodeHandle`]s; [`Prefab::instantiate`] materializes it into
/// a [`Scene`].
#[derive(Debug, Clone, Default)]
pub struct Prefab {
    pub name: String,
    pub nodes: Vec<PrefabNode>,
    pub root_indices: Vec<usize>,
}

impl Prefab {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends a node and returns its index.
    pub fn push(&mut self, node: PrefabNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Creates the prefab's nodes under a fresh, detached group node named
    /// after the prefab, and returns the group.
    ///
    /// Child indices that are out of range are skipped with a warning.
    pub fn instantiate(&self, scene: &mut Scene) -> NodeHandle {
        let group = scene.add_detached(Node::new(self.name.clone()));

        let mut stack: Vec<(usize, NodeHandle)> =
            self.root_indices.iter().rev().map(|&i| (i, group)).collect();
        let mut depth_guard = self.nodes.len() * 4 + self.root_indices.len();

        while let Some((index, parent)) = stack.pop() {
            if depth_guard == 0 {
                log::warn!("Prefab '{}' has a cyclic node graph; truncated", self.name);
                break;
            }
            depth_guard -= 1;

            let Some(template) = self.nodes.get(index) else {
                log::warn!("Prefab '{}' references missing node {index}", self.name);
                continue;
            };
            let mut node = Node::new(template.name.clone());
            node.transform = template.transform;
            node.bounds = template.bounds;
            let handle = scene.add_to_parent(node, parent);

            stack.extend(template.children_indices.iter().rev().map(|&c| (c, handle)));
        }

        group
    }
}
