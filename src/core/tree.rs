//! Arena-based search tree shared by both engines.
//!
//! Nodes live in a flat `Vec` and reference each other by [`NodeId`]:
//! children are owned indices, the parent link is a non-owning index used
//! only for walking upward. This keeps upward traversal cheap without
//! reference cycles. The MCTS and minimax engines store different
//! statistics per node but share this tree shape through [`TreeNode`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::NodeId;

/// Node behavior the shared arena needs.
pub trait TreeNode {
    /// Move type of the underlying game.
    type Move: Copy + Eq;

    /// Parent index (NONE at the root).
    fn parent(&self) -> NodeId;

    /// Rewrite the parent index (used when the arena is compacted).
    fn set_parent(&mut self, parent: NodeId);

    /// Child indices, in creation order.
    fn children(&self) -> &[NodeId];

    /// Mutable access to the child indices.
    fn children_mut(&mut self) -> &mut SmallVec<[NodeId; 8]>;

    /// The move that produced this node (`None` at a fresh root).
    fn move_value(&self) -> Option<Self::Move>;
}

/// Arena-based search tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "N: Serialize", deserialize = "N: Deserialize<'de>"))]
pub struct SearchTree<N: TreeNode> {
    /// All nodes in the tree.
    nodes: Vec<N>,

    /// The root node ID (always 0 after initialization or rebase).
    root: NodeId,
}

impl<N: TreeNode> SearchTree<N> {
    /// Create a tree holding just `root`.
    pub fn with_root(root: N) -> Self {
        Self {
            nodes: vec![root],
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &N {
        &self.nodes[id.raw() as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut N {
        &mut self.nodes[id.raw() as usize]
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &N {
        self.get(self.root)
    }

    /// Get the root node mutably.
    pub fn root_node_mut(&mut self) -> &mut N {
        self.get_mut(self.root)
    }

    /// Allocate `node` and attach it as the last child of `parent`.
    pub fn attach(&mut self, parent: NodeId, node: N) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        self.get_mut(parent).children_mut().push(id);
        id
    }

    /// Find the child of `parent` produced by `mv`.
    #[must_use]
    pub fn find_child(&self, parent: NodeId, mv: N::Move) -> Option<NodeId> {
        self.get(parent)
            .children()
            .iter()
            .copied()
            .find(|&c| self.get(c).move_value() == Some(mv))
    }

    /// Make `new_root` the root, keeping its subtree intact.
    ///
    /// The arena is compacted: every node outside the surviving subtree
    /// (the old root, all siblings, their descendants) is dropped, which
    /// bounds memory growth across a multi-move game.
    pub fn rebase(&mut self, new_root: NodeId) {
        let old = std::mem::take(&mut self.nodes);
        let mut old: Vec<Option<N>> = old.into_iter().map(Some).collect();
        let mut fresh = Vec::new();

        self.root = move_subtree(&mut old, &mut fresh, new_root, NodeId::NONE);
        self.nodes = fresh;
    }
}

/// Move the subtree rooted at `id` from `old` into `fresh`, remapping ids.
/// Returns the subtree root's new id.
fn move_subtree<N: TreeNode>(
    old: &mut [Option<N>],
    fresh: &mut Vec<N>,
    id: NodeId,
    new_parent: NodeId,
) -> NodeId {
    let mut node = old[id.raw() as usize]
        .take()
        .expect("node reachable twice during rebase");
    node.set_parent(new_parent);

    let new_id = NodeId::new(fresh.len() as u32);
    let children = std::mem::take(node.children_mut());
    fresh.push(node);

    let remapped = children
        .into_iter()
        .map(|child| move_subtree(old, fresh, child, new_id))
        .collect();
    *fresh[new_id.raw() as usize].children_mut() = remapped;

    new_id
}
