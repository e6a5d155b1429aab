use crate::node::{NodeId, Tree};

/// One move of a solution, in root-to-goal order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolutionStep<S, O> {
    pub op: O,
    /// The state `op` was applied to.
    pub from: S,
    /// Cost of this step alone.
    pub cost: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<S, O> {
    pub steps: Vec<SolutionStep<S, O>>,
    /// Total path cost, the goal node's `g`.
    pub cost: u64,
}

impl<S, O> Solution<S, O> {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn ops(&self) -> impl Iterator<Item = O> + '_
    where
        O: Copy,
    {
        self.steps.iter().map(|step| step.op)
    }
}

/// Walk parent links from `goal` back to the root and return the moves in
/// the order they have to be played.
pub fn extract<S: Clone, O: Copy>(tree: &Tree<S, O>, goal: NodeId) -> Solution<S, O> {
    let mut steps = Vec::with_capacity(tree[goal].depth);
    for (_, node) in tree.ancestors(goal) {
        let (Some(parent), Some(op)) = (node.parent, node.op) else {
            break;
        };
        let parent = &tree[parent];
        steps.push(SolutionStep {
            op,
            from: parent.state.clone(),
            cost: node.g - parent.g,
        });
    }
    steps.reverse();

    debug_assert_eq!(steps.len(), tree[goal].depth);
    Solution {
        steps,
        cost: tree[goal].g,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::node::SearchNode;

    #[test]
    fn extracts_root_to_goal() {
        let mut tree: Tree<i32, &str> = Tree::new();
        let root = tree.insert(SearchNode::root(1, 0, 0)).unwrap();
        let a = tree
            .insert(SearchNode {
                state: 2,
                depth: 1,
                g: 2,
                h: 0,
                f: 0,
                parent: Some(root),
                op: Some("increase"),
            })
            .unwrap();
        let b = tree
            .insert(SearchNode {
                state: 4,
                depth: 2,
                g: 4,
                h: 0,
                f: 0,
                parent: Some(a),
                op: Some("double"),
            })
            .unwrap();

        let solution = extract(&tree, b);
        assert_eq!(solution.len(), tree[b].depth);
        assert_eq!(solution.cost, 4);
        assert_eq!(
            solution.steps,
            vec![
                SolutionStep { op: "increase", from: 1, cost: 2 },
                SolutionStep { op: "double", from: 2, cost: 2 },
            ]
        );
    }

    #[test]
    fn root_goal_has_no_steps() {
        let mut tree: Tree<i32, &str> = Tree::new();
        let root = tree.insert(SearchNode::root(1, 0, 0)).unwrap();
        let solution = extract(&tree, root);
        assert!(solution.is_empty());
        assert_eq!(solution.cost, 0);
    }
}
