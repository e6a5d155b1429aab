//! Search tree nodes, stored in an arena and linked to their parents by index.

use std::{collections::TryReserveError, ops::Index};

/// Stable index of a node within its [`Tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode<S, O> {
    pub state: S,
    /// Edges from the root.
    pub depth: usize,
    /// Accumulated path cost.
    pub g: u64,
    /// Heuristic estimate of the remaining cost.
    pub h: u64,
    /// Frontier priority under the active strategy.
    pub f: u64,
    pub parent: Option<NodeId>,
    /// The operation that produced this node; `None` for the root.
    pub op: Option<O>,
}

impl<S, O> SearchNode<S, O> {
    pub fn root(state: S, h: u64, f: u64) -> Self {
        SearchNode {
            state,
            depth: 0,
            g: 0,
            h,
            f,
            parent: None,
            op: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Owns every node created during one search. Nodes are never removed, so a
/// `NodeId` stays valid for the lifetime of the tree.
#[derive(Clone, Debug)]
pub struct Tree<S, O> {
    nodes: Vec<SearchNode<S, O>>,
}

impl<S, O> Default for Tree<S, O> {
    fn default() -> Self {
        Tree { nodes: Vec::new() }
    }
}

impl<S, O> Tree<S, O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn insert(&mut self, node: SearchNode<S, O>) -> Result<NodeId, TryReserveError> {
        debug_assert!(node.parent.map_or(true, |p| p.0 < self.nodes.len()));
        self.nodes.try_reserve(1)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    /// Walks from `id` up to the root, `id` included.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, S, O> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }

    /// Node ids from the root down to `id`.
    pub fn path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = self.ancestors(id).map(|(id, _)| id).collect();
        path.reverse();
        path
    }
}

impl<S: PartialEq, O> Tree<S, O> {
    /// Whether `state` equals the state of `parent` or of any node above it.
    ///
    /// Only the root-to-parent path is checked: the same state may appear in
    /// unrelated branches.
    pub fn repeats_ancestor(&self, parent: Option<NodeId>, state: &S) -> bool {
        match parent {
            None => false,
            Some(parent) => self.ancestors(parent).any(|(_, node)| node.state == *state),
        }
    }
}

impl<S, O> Index<NodeId> for Tree<S, O> {
    type Output = SearchNode<S, O>;
    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index.0]
    }
}

pub struct Ancestors<'a, S, O> {
    tree: &'a Tree<S, O>,
    next: Option<NodeId>,
}

impl<'a, S, O> Iterator for Ancestors<'a, S, O> {
    type Item = (NodeId, &'a SearchNode<S, O>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = &self.tree[id];
        self.next = node.parent;
        Some((id, node))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn child(tree: &Tree<u32, char>, parent: NodeId, state: u32, op: char) -> SearchNode<u32, char> {
        let p = &tree[parent];
        SearchNode {
            state,
            depth: p.depth + 1,
            g: p.g + 1,
            h: 0,
            f: 0,
            parent: Some(parent),
            op: Some(op),
        }
    }

    #[test]
    fn root_is_never_a_repeat() {
        let mut tree: Tree<u32, char> = Tree::new();
        let root = tree.insert(SearchNode::root(7, 0, 0)).unwrap();
        assert!(!tree.repeats_ancestor(None, &7));
        assert!(tree[root].is_root());
        assert_eq!(tree[root].op, None);
    }

    #[test]
    fn detects_any_ancestor_on_the_path() {
        let mut tree = Tree::new();
        let root = tree.insert(SearchNode::root(1, 0, 0)).unwrap();
        let a = tree.insert(child(&tree, root, 2, 'a')).unwrap();
        let b = tree.insert(child(&tree, a, 3, 'b')).unwrap();

        assert!(tree.repeats_ancestor(Some(b), &1));
        assert!(tree.repeats_ancestor(Some(b), &2));
        assert!(tree.repeats_ancestor(Some(b), &3));
        assert!(!tree.repeats_ancestor(Some(b), &4));
    }

    #[test]
    fn siblings_and_cousins_are_not_ancestors() {
        let mut tree = Tree::new();
        let root = tree.insert(SearchNode::root(0, 0, 0)).unwrap();
        let left = tree.insert(child(&tree, root, 1, 'l')).unwrap();
        let right = tree.insert(child(&tree, root, 2, 'r')).unwrap();
        let left_leaf = tree.insert(child(&tree, left, 5, 'l')).unwrap();

        // 2 lives in a sibling branch, 5 in a cousin branch
        assert!(!tree.repeats_ancestor(Some(left), &2));
        assert!(!tree.repeats_ancestor(Some(right), &5));
        assert!(tree.repeats_ancestor(Some(left_leaf), &1));
    }

    #[test]
    fn path_runs_root_first() {
        let mut tree = Tree::new();
        let root = tree.insert(SearchNode::root(0, 0, 0)).unwrap();
        let a = tree.insert(child(&tree, root, 1, 'a')).unwrap();
        let _other = tree.insert(child(&tree, root, 9, 'x')).unwrap();
        let b = tree.insert(child(&tree, a, 2, 'b')).unwrap();

        assert_eq!(tree.path(b), vec![root, a, b]);
        assert_eq!(tree.path(root), vec![root]);
        assert_eq!(tree[b].depth, 2);
        assert_eq!(tree.len(), 4);
    }
}
