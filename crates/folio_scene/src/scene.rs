use glam::Affine3A;
use slotmap::SlotMap;

use crate::NodeHandle;
use crate::node::Node;

/// Maximum depth walked when searching ancestors. Loaded models are shallow;
/// the bound guards against a corrupted parent chain looping forever.
const MAX_ANCESTOR_DEPTH: usize = 256;

/// Scene graph structure.
///
/// Pure data: a node arena keyed by [`NodeHandle`] plus the list of root
/// nodes. The tracking engine's anchor groups are roots; model subtrees are
/// attached underneath them.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
        }
    }

    /// Inserts a node as a scene root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Inserts a node that belongs to no hierarchy yet (neither root nor child).
    ///
    /// Used while building model subtrees before they are attached to an anchor.
    pub fn add_detached(&mut self, node: Node) -> NodeHandle {
        self.nodes.insert(node)
    }

    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        if let Some(c) = self.nodes.get_mut(handle) {
            c.parent = Some(parent);
        }
        handle
    }

    /// Moves `child` (and its subtree) under `parent`.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            return;
        }

        // 1. Detach from old
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        // 2. Attach to new
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    #[inline]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Walks from `start` (inclusive) up the parent chain and returns the
    /// first node satisfying `pred`.
    pub fn find_ancestor(
        &self,
        start: NodeHandle,
        mut pred: impl FnMut(&Node) -> bool,
    ) -> Option<NodeHandle> {
        let mut current = Some(start);
        for _ in 0..MAX_ANCESTOR_DEPTH {
            let handle = current?;
            let node = self.nodes.get(handle)?;
            if pred(node) {
                return Some(handle);
            }
            current = node.parent;
        }
        log::warn!("Ancestor walk exceeded {MAX_ANCESTOR_DEPTH} levels");
        None
    }

    /// The nearest node at or above `start` flagged as an interactable root.
    pub fn interactable_root(&self, start: NodeHandle) -> Option<NodeHandle> {
        self.find_ancestor(start, |n| n.interactable)
    }

    /// Depth-first search for a node called `name` in the subtree at `root`.
    pub fn find_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            if node.name == name {
                return Some(handle);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// All nodes of the subtree at `root`, root first.
    pub fn descendants(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            if let Some(node) = self.nodes.get(handle) {
                out.push(handle);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// World matrix of `handle` computed from the current local transforms of
    /// it and its ancestors, independent of the cached matrices.
    pub fn compute_world_matrix(&self, handle: NodeHandle) -> Affine3A {
        let mut world = Affine3A::IDENTITY;
        let mut current = Some(handle);
        for _ in 0..MAX_ANCESTOR_DEPTH {
            let Some(node) = current.and_then(|h| self.nodes.get(h)) else {
                break;
            };
            world = node.transform.local_matrix() * world;
            current = node.parent;
        }
        world
    }

    /// Recomputes every world matrix from the roots down.
    ///
    /// Iterative to stay safe on deep hierarchies.
    pub fn update_matrix_world(&mut self) {
        let mut stack: Vec<(NodeHandle, Affine3A)> = self
            .root_nodes
            .iter()
            .map(|&h| (h, Affine3A::IDENTITY))
            .collect();
        self.propagate(&mut stack);
    }

    /// Recomputes world matrices of the subtree at `root` only, using its
    /// parent's current world matrix.
    pub fn update_subtree(&mut self, root: NodeHandle) {
        let parent_world = self
            .nodes
            .get(root)
            .and_then(|n| n.parent)
            .and_then(|p| self.nodes.get(p))
            .map_or(Affine3A::IDENTITY, |p| p.world_matrix);
        let mut stack = vec![(root, parent_world)];
        self.propagate(&mut stack);
    }

    fn propagate(&mut self, stack: &mut Vec<(NodeHandle, Affine3A)>) {
        while let Some((handle, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };
            node.world_matrix = parent_world * node.transform.local_matrix();
            let world = node.world_matrix;
            stack.extend(node.children.iter().map(|&c| (c, world)));
        }
    }
}
