//! The register puzzle: turn one non-negative integer into another using six
//! arithmetic operations whose cost depends on the operand.

use std::{
    fmt::Display,
    io::{self, Write},
    str::FromStr,
};

use crate::{
    problem::{Problem, Successor, SuccessorBuffer},
    solution::Solution,
    strategy::AStarBlend,
};

/// No operation may produce a value above this.
pub const MAX_VALUE: u64 = 1_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Increase,
    Decrease,
    Double,
    Half,
    Square,
    Root,
}

impl Operation {
    /// Order in which children are generated.
    pub const EXPANSION_ORDER: [Operation; 6] = [
        Operation::Root,
        Operation::Square,
        Operation::Half,
        Operation::Double,
        Operation::Decrease,
        Operation::Increase,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Increase => "increase",
            Operation::Decrease => "decrease",
            Operation::Double => "double",
            Operation::Half => "half",
            Operation::Square => "square",
            Operation::Root => "root",
        }
    }

    /// The value `self` turns `x` into, or `None` when the operation does not
    /// apply to `x`.
    pub fn apply(self, x: u64) -> Option<u64> {
        match self {
            Operation::Increase => (x < MAX_VALUE).then(|| x + 1),
            Operation::Decrease => x.checked_sub(1),
            Operation::Double => (x > 0 && x <= MAX_VALUE / 2).then(|| 2 * x),
            Operation::Half => (x > 0).then(|| x / 2),
            Operation::Square => x.checked_mul(x).filter(|&sq| x > 1 && sq <= MAX_VALUE),
            Operation::Root => exact_sqrt(x).filter(|_| x > 1),
        }
    }

    /// What applying `self` to `x` costs. Only meaningful where
    /// [`Operation::apply`] succeeds.
    pub fn cost(self, x: u64) -> u64 {
        match self {
            Operation::Increase | Operation::Decrease => 2,
            Operation::Double => x / 2 + 1,
            Operation::Half => x / 4 + 1,
            Operation::Square => x.saturating_mul(x).saturating_sub(x) / 4 + 1,
            Operation::Root => (x - x.isqrt()) / 4 + 1,
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown operation `{0}`")]
pub struct ParseOperationError(pub String);

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::EXPANSION_ORDER
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| ParseOperationError(s.to_string()))
    }
}

fn exact_sqrt(x: u64) -> Option<u64> {
    let r = x.isqrt();
    (r * r == x).then_some(r)
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error("`{0}` is not an integer")]
    InvalidNumber(String),
    #[error("{0} is negative; only non-negative integers are accepted")]
    Negative(i64),
    #[error("{0} is larger than {MAX_VALUE}", MAX_VALUE = MAX_VALUE)]
    TooLarge(u64),
    #[error("the target must be a positive integer")]
    ZeroTarget,
}

/// Parse a command-line value: a base-10 integer in `0..=MAX_VALUE`.
pub fn parse_value(s: &str) -> Result<u64, RegisterError> {
    let value: i64 = s
        .trim()
        .parse()
        .map_err(|_| RegisterError::InvalidNumber(s.to_string()))?;
    let value = u64::try_from(value).map_err(|_| RegisterError::Negative(value))?;
    if value > MAX_VALUE {
        return Err(RegisterError::TooLarge(value));
    }
    Ok(value)
}

/// Reach `target` from any starting value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Register {
    target: u64,
}

impl Register {
    pub fn new(target: u64) -> Result<Self, RegisterError> {
        if target == 0 {
            return Err(RegisterError::ZeroTarget);
        }
        Ok(Register { target })
    }
}

impl Problem for Register {
    type State = u64;
    type Op = Operation;

    const ASTAR_BLEND: AStarBlend = AStarBlend::HalfHeuristic;

    fn is_goal(&self, state: &u64) -> bool {
        *state == self.target
    }

    fn heuristic(&self, state: &u64) -> u64 {
        state.abs_diff(self.target)
    }

    fn successors(&self, state: &u64, out: &mut SuccessorBuffer<u64, Operation>) {
        for op in Operation::EXPANSION_ORDER {
            if let Some(next) = op.apply(*state) {
                out.push(Successor {
                    op,
                    state: next,
                    cost: op.cost(*state),
                });
            }
        }
    }
}

/// Apply `ops` in order, or `None` as soon as one does not apply.
pub fn replay(initial: u64, ops: impl IntoIterator<Item = Operation>) -> Option<u64> {
    ops.into_iter().try_fold(initial, |x, op| op.apply(x))
}

/// Write `"<steps>, <cost>"` followed by one `"<op> <operand> <cost>"` line
/// per step.
pub fn write_solution<W: Write>(mut out: W, solution: &Solution<u64, Operation>) -> io::Result<()> {
    writeln!(out, "{}, {}", solution.len(), solution.cost)?;
    for step in &solution.steps {
        writeln!(out, "{} {} {}", step.op, step.from, step.cost)?;
    }
    Ok(())
}
