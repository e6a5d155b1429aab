//! The state model the engine searches over.

use std::fmt::Debug;

use smallvec::SmallVec;

use crate::strategy::AStarBlend;

/// Neither puzzle produces more than six successors per state, so
/// successor buffers live on the stack.
pub const MAX_INLINE_SUCCESSORS: usize = 6;

pub type SuccessorBuffer<S, O> = SmallVec<[Successor<S, O>; MAX_INLINE_SUCCESSORS]>;

/// One legal move out of a state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Successor<S, O> {
    pub op: O,
    pub state: S,
    /// Cost of applying `op`; not necessarily uniform.
    pub cost: u64,
}

/// A puzzle the engine can solve.
pub trait Problem {
    type State: Clone + Eq + Debug;
    type Op: Copy + Eq + Debug;

    /// How `f` is computed under A*.
    const ASTAR_BLEND: AStarBlend = AStarBlend::Sum;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Estimated remaining cost from `state`.
    fn heuristic(&self, state: &Self::State) -> u64;

    /// Push every legal successor of `state` onto `out`, in the order the
    /// engine should insert them into the frontier.
    fn successors(&self, state: &Self::State, out: &mut SuccessorBuffer<Self::State, Self::Op>);
}
