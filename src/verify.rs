//! Check solution files against the puzzle they claim to solve.

use log::debug;

use crate::{
    board::{self, Board, Direction},
    register::Operation,
};

/// Steps are numbered from 1 in every message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("cannot read the number of steps")]
    MissingStepCount,
    #[error("cannot read step #{0}")]
    MissingStep(usize),
    #[error("step #{step}: unknown move `{name}`")]
    UnknownStep { step: usize, name: String },
    #[error("step #{step}: cannot apply {name} to the current state")]
    IllegalMove { step: usize, name: String },
    #[error("step #{step}: operand {found} does not match the current value {expected}")]
    OperandMismatch { step: usize, expected: u64, found: u64 },
    #[error("step #{step}: cost {found} should be {expected}")]
    CostMismatch { step: usize, expected: u64, found: u64 },
    #[error("total cost {found} should be {expected}")]
    TotalMismatch { expected: u64, found: u64 },
    #[error("the moves do not lead to the goal")]
    NotSolved,
}

/// Parse a sliding-tile solution: a step count, then that many direction
/// names separated by whitespace.
pub fn parse_moves(text: &str) -> Result<Vec<Direction>, VerifyError> {
    let mut tokens = text.split_whitespace();
    let count: usize = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or(VerifyError::MissingStepCount)?;

    (1..=count)
        .map(|step| {
            let name = tokens.next().ok_or(VerifyError::MissingStep(step))?;
            name.parse().map_err(|_| VerifyError::UnknownStep {
                step,
                name: name.to_string(),
            })
        })
        .collect()
}

/// Replay a sliding-tile solution from `board` and check that it ends on the
/// solved board.
pub fn verify_tiles(board: &Board, text: &str) -> Result<(), VerifyError> {
    let moves = parse_moves(text)?;
    debug!("replaying {} moves", moves.len());
    let end = board::replay(board, moves).map_err(|(ix, direction)| VerifyError::IllegalMove {
        step: ix + 1,
        name: direction.to_string(),
    })?;
    if !end.is_solved() {
        return Err(VerifyError::NotSolved);
    }
    Ok(())
}

/// Replay a register solution from `initial` and check every operand, every
/// step cost and the total. Returns the total cost.
pub fn verify_register(initial: u64, target: u64, text: &str) -> Result<u64, VerifyError> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let (count, total) = lines
        .next()
        .and_then(|header| {
            let (count, total) = header.split_once(',')?;
            Some((count.trim().parse::<usize>().ok()?, total.trim().parse::<u64>().ok()?))
        })
        .ok_or(VerifyError::MissingStepCount)?;

    let mut value = initial;
    let mut spent = 0u64;
    for step in 1..=count {
        let line = lines.next().ok_or(VerifyError::MissingStep(step))?;
        let mut fields = line.split_whitespace();
        let name = fields.next().ok_or(VerifyError::MissingStep(step))?;
        let op: Operation = name.parse().map_err(|_| VerifyError::UnknownStep {
            step,
            name: name.to_string(),
        })?;
        let mut number = || -> Result<u64, VerifyError> {
            fields
                .next()
                .and_then(|t| t.parse().ok())
                .ok_or(VerifyError::MissingStep(step))
        };
        let (operand, cost) = (number()?, number()?);

        if operand != value {
            return Err(VerifyError::OperandMismatch { step, expected: value, found: operand });
        }
        let next = op.apply(value).ok_or(VerifyError::IllegalMove {
            step,
            name: op.to_string(),
        })?;
        if cost != op.cost(value) {
            return Err(VerifyError::CostMismatch { step, expected: op.cost(value), found: cost });
        }
        spent += cost;
        value = next;
    }

    if spent != total {
        return Err(VerifyError::TotalMismatch { expected: spent, found: total });
    }
    if value != target {
        return Err(VerifyError::NotSolved);
    }
    Ok(spent)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        board::SlidingPuzzle,
        register::{self, Register},
        search::{solve, SearchConfig},
        strategy::Strategy,
    };

    fn board(rows: &[&[u8]]) -> Board {
        Board::new(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn accepts_a_correct_solution() {
        let b = board(&[&[1, 2, 3], &[4, 5, 6], &[0, 7, 8]]);
        assert_eq!(verify_tiles(&b, "2\nright\nright\n"), Ok(()));
        assert_eq!(verify_tiles(&Board::solved(3), "0\n"), Ok(()));
    }

    #[test]
    fn accepts_what_the_solver_writes() {
        let b = board(&[&[4, 1, 3], &[7, 2, 5], &[0, 8, 6]]);
        let report = solve(&SlidingPuzzle::for_board(&b), b.clone(), &SearchConfig::new(Strategy::Astar)).unwrap();
        let mut out = Vec::new();
        board::write_solution(&mut out, report.outcome.solution().unwrap()).unwrap();
        assert_eq!(verify_tiles(&b, &String::from_utf8(out).unwrap()), Ok(()));
    }

    #[test]
    fn reports_each_failure() {
        let b = board(&[&[1, 2, 3], &[4, 5, 6], &[0, 7, 8]]);
        assert_eq!(verify_tiles(&b, ""), Err(VerifyError::MissingStepCount));
        assert_eq!(verify_tiles(&b, "two\nright"), Err(VerifyError::MissingStepCount));
        assert_eq!(verify_tiles(&b, "2\nright\n"), Err(VerifyError::MissingStep(2)));
        assert_eq!(
            verify_tiles(&b, "1\nsideways\n"),
            Err(VerifyError::UnknownStep { step: 1, name: "sideways".into() })
        );
        assert_eq!(
            verify_tiles(&b, "2\nright\ndown\n"),
            Err(VerifyError::IllegalMove { step: 2, name: "down".into() })
        );
        assert_eq!(verify_tiles(&b, "1\nright\n"), Err(VerifyError::NotSolved));
    }

    #[test]
    fn register_solution_from_the_solver() {
        let register = Register::new(18).unwrap();
        let report = solve(&register, 5, &SearchConfig::new(Strategy::Astar)).unwrap();
        let solution = report.outcome.solution().unwrap();
        let mut out = Vec::new();
        register::write_solution(&mut out, solution).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(verify_register(5, 18, &text), Ok(solution.cost));
    }

    #[test]
    fn register_failures() {
        assert_eq!(verify_register(5, 10, "1, 3\ndouble 5 3\n"), Ok(3));
        assert_eq!(verify_register(5, 10, "1 3\ndouble 5 3\n"), Err(VerifyError::MissingStepCount));
        assert_eq!(verify_register(5, 10, "2, 3\ndouble 5 3\n"), Err(VerifyError::MissingStep(2)));
        assert_eq!(
            verify_register(5, 10, "1, 3\ntriple 5 3\n"),
            Err(VerifyError::UnknownStep { step: 1, name: "triple".into() })
        );
        assert_eq!(
            verify_register(5, 10, "1, 3\ndouble 6 3\n"),
            Err(VerifyError::OperandMismatch { step: 1, expected: 5, found: 6 })
        );
        assert_eq!(
            verify_register(5, 10, "1, 2\ndouble 5 2\n"),
            Err(VerifyError::CostMismatch { step: 1, expected: 3, found: 2 })
        );
        assert_eq!(
            verify_register(5, 10, "1, 9\ndouble 5 3\n"),
            Err(VerifyError::TotalMismatch { expected: 3, found: 9 })
        );
        assert_eq!(
            verify_register(5, 2, "1, 2\nroot 5 2\n"),
            Err(VerifyError::IllegalMove { step: 1, name: "root".into() })
        );
        assert_eq!(verify_register(5, 12, "1, 3\ndouble 5 3\n"), Err(VerifyError::NotSolved));
    }
}
