//! Uninformed and heuristic state-space search over two puzzles: the N×N
//! sliding-tile board and a register of integers rewritten by arithmetic
//! operations.
//!
//! The engine ([`search`]) knows nothing about either puzzle. A domain plugs
//! in through the [`Problem`] trait; the driver grows a tree of
//! [`node::SearchNode`]s from the initial state, keeps the leaves in a
//! [`frontier::Frontier`] ordered according to the chosen [`Strategy`], and
//! stops on the first goal it pops.

pub mod board;
pub mod error;
pub mod frontier;
pub mod generator;
pub mod node;
pub mod problem;
pub mod register;
pub mod search;
pub mod solution;
pub mod strategy;
pub mod verify;

pub use board::{Board, Direction, SlidingPuzzle};
pub use error::SearchError;
pub use problem::{Problem, Successor};
pub use register::{Operation, Register};
pub use search::{solve, Outcome, Search, SearchConfig, SearchReport, SearchStats};
pub use solution::Solution;
pub use strategy::Strategy;
