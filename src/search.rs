//! The search driver: pop, goal-test, check the clock, expand.

use std::time::{Duration, Instant};

use log::{debug, info, trace};
use smallvec::SmallVec;

use crate::{
    error::SearchError,
    frontier::{Frontier, FrontierEntry},
    node::{NodeId, SearchNode, Tree},
    problem::{Problem, SuccessorBuffer},
    solution::{extract, Solution},
    strategy::Strategy,
};

/// Searches give up after a minute of wall-clock time.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub strategy: Strategy,
    pub timeout: Duration,
    /// Largest tree the search may grow; `None` leaves only the allocator.
    pub max_nodes: Option<usize>,
}

impl SearchConfig {
    pub fn new(strategy: Strategy) -> Self {
        SearchConfig {
            strategy,
            timeout: DEFAULT_TIMEOUT,
            max_nodes: None,
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        SearchConfig { timeout, ..self }
    }

    pub fn with_node_limit(self, max_nodes: usize) -> Self {
        SearchConfig {
            max_nodes: Some(max_nodes),
            ..self
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(Strategy::Astar)
    }
}

/// Where the driver is after a call to [`Search::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Solved(NodeId),
    Exhausted,
    TimedOut,
    /// A step failed with a [`SearchError`]; every later step returns it again.
    Fatal,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        self != Status::Running
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<S, O> {
    Solved(Solution<S, O>),
    /// The frontier ran dry without reaching a goal.
    Exhausted,
    TimedOut,
}

impl<S, O> Outcome<S, O> {
    pub fn solution(&self) -> Option<&Solution<S, O>> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            Outcome::Exhausted | Outcome::TimedOut => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped and expanded.
    pub expanded: usize,
    /// Children that passed the loop check and entered the tree.
    pub generated: usize,
    /// Children dropped because they repeated an ancestor.
    pub rejected: usize,
    pub frontier_peak: usize,
    pub elapsed: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport<S, O> {
    pub outcome: Outcome<S, O>,
    pub stats: SearchStats,
}

/// One search run. Owns the tree and the frontier; dropping it frees both.
pub struct Search<'p, P: Problem> {
    problem: &'p P,
    strategy: Strategy,
    tree: Tree<P::State, P::Op>,
    frontier: Frontier,
    started: Instant,
    timeout: Duration,
    max_nodes: Option<usize>,
    stats: SearchStats,
    status: Status,
    error: Option<SearchError>,
}

impl<'p, P: Problem> Search<'p, P> {
    /// Start the clock and seed the frontier with the root.
    pub fn new(problem: &'p P, initial: P::State, config: &SearchConfig) -> Result<Self, SearchError> {
        let started = Instant::now();
        let strategy = config.strategy;

        let h = problem.heuristic(&initial);
        let f = strategy.priority(0, h, P::ASTAR_BLEND);
        let mut tree = Tree::new();
        check_node_limit(&tree, config.max_nodes)?;
        let root = tree.insert(SearchNode::root(initial, h, f))?;

        let mut frontier = Frontier::new();
        frontier.push(FrontierEntry { node: root, f, h }, strategy.discipline())?;
        debug!("search started with {} (root h={}, f={})", strategy, h, f);

        Ok(Search {
            problem,
            strategy,
            tree,
            frontier,
            started,
            timeout: config.timeout,
            max_nodes: config.max_nodes,
            stats: SearchStats::default(),
            status: Status::Running,
            error: None,
        })
    }

    pub fn tree(&self) -> &Tree<P::State, P::Op> {
        &self.tree
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            frontier_peak: self.frontier.peak(),
            elapsed: self.started.elapsed(),
            ..self.stats
        }
    }

    /// Advance the driver by one frontier pop. Calling it again after a
    /// terminal status returns that status, or that error, unchanged.
    pub fn step(&mut self) -> Result<Status, SearchError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.status.is_terminal() {
            return Ok(self.status);
        }

        let Some(entry) = self.frontier.pop_front() else {
            self.status = Status::Exhausted;
            return Ok(self.status);
        };

        let node = &self.tree[entry.node];
        trace!("extracted from frontier: {:?} (depth {}, g={}, f={})", node.state, node.depth, node.g, node.f);
        if self.problem.is_goal(&node.state) {
            self.status = Status::Solved(entry.node);
            return Ok(self.status);
        }

        if self.started.elapsed() >= self.timeout {
            self.status = Status::TimedOut;
            return Ok(self.status);
        }

        if let Err(err) = self.expand(entry.node) {
            debug!("fatal error while expanding {:?}: {}", entry.node, err);
            self.status = Status::Fatal;
            self.error = Some(err.clone());
            return Err(err);
        }
        Ok(self.status)
    }

    /// Generate the children of `id`, drop those that repeat an ancestor, and
    /// push the rest onto the frontier. Returns the number of children kept.
    pub fn expand(&mut self, id: NodeId) -> Result<usize, SearchError> {
        let mut successors: SuccessorBuffer<P::State, P::Op> = SmallVec::new();
        self.problem.successors(&self.tree[id].state, &mut successors);
        self.stats.expanded += 1;

        let (depth, g) = {
            let parent = &self.tree[id];
            (parent.depth + 1, parent.g)
        };

        let mut kept = 0;
        for successor in successors {
            if self.tree.repeats_ancestor(Some(id), &successor.state) {
                trace!("loop: {:?} via {:?} repeats an ancestor", successor.state, successor.op);
                self.stats.rejected += 1;
                continue;
            }

            let g = g.saturating_add(successor.cost);
            let h = self.problem.heuristic(&successor.state);
            let f = self.strategy.priority(g, h, P::ASTAR_BLEND);
            check_node_limit(&self.tree, self.max_nodes)?;
            let child = self.tree.insert(SearchNode {
                state: successor.state,
                depth,
                g,
                h,
                f,
                parent: Some(id),
                op: Some(successor.op),
            })?;
            self.frontier
                .push(FrontierEntry { node: child, f, h }, self.strategy.discipline())?;
            kept += 1;
        }

        self.stats.generated += kept;
        Ok(kept)
    }

    /// Drive the search to a terminal state.
    pub fn run(mut self) -> Result<SearchReport<P::State, P::Op>, SearchError> {
        let status = loop {
            match self.step() {
                Ok(Status::Running) => continue,
                Ok(status) => break status,
                Err(err) => {
                    info!("search aborted after {} expansions: {}", self.stats.expanded, err);
                    return Err(err);
                }
            }
        };

        let stats = self.stats();
        let outcome = match status {
            Status::Solved(goal) => {
                let solution = extract(&self.tree, goal);
                info!(
                    "solved with {} in {} steps (cost {}), {} nodes expanded",
                    self.strategy,
                    solution.len(),
                    solution.cost,
                    stats.expanded
                );
                Outcome::Solved(solution)
            }
            Status::Exhausted => {
                info!("{} exhausted the frontier after {} expansions", self.strategy, stats.expanded);
                Outcome::Exhausted
            }
            Status::TimedOut => {
                info!("{} timed out after {:?}", self.strategy, stats.elapsed);
                Outcome::TimedOut
            }
            Status::Running | Status::Fatal => unreachable!("run() only stops on a terminal status"),
        };

        Ok(SearchReport { outcome, stats })
    }
}

fn check_node_limit<S, O>(tree: &Tree<S, O>, max_nodes: Option<usize>) -> Result<(), SearchError> {
    match max_nodes {
        Some(max) if tree.len() >= max => Err(SearchError::NodeLimit(max)),
        _ => Ok(()),
    }
}

/// Solve `problem` from `initial` with the given configuration.
pub fn solve<P: Problem>(
    problem: &P,
    initial: P::State,
    config: &SearchConfig,
) -> Result<SearchReport<P::State, P::Op>, SearchError> {
    Search::new(problem, initial, config)?.run()
}
