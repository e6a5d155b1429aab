//! N×N sliding-tile boards.
//!
//! Tiles are numbered `1..N²`, `0` is the blank. The solved board has the
//! tiles in row-major order and the blank in the bottom-right corner.
//! Moves are named after the direction the blank travels.

use std::{
    fmt::{Display, Write as _},
    io::{self, Write},
    ops::{Index, IndexMut},
    str::FromStr,
};

use itertools::Itertools;

use crate::{
    problem::{Problem, Successor, SuccessorBuffer},
    solution::Solution,
};

pub const BLANK: u8 = 0;

/// Tiles are stored as `u8`, which caps the edge at 16.
pub const MAX_SIZE: usize = 16;
pub const MIN_SIZE: usize = 2;

#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<u8>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("`{0}` is not a tile number")]
    InvalidNumber(String),
    #[error("{0} values do not form a square board")]
    NotSquare(usize),
    #[error("board edge {0} is outside 2..=16")]
    UnsupportedSize(usize),
    #[error("tile {value} is outside 0..{limit}")]
    OutOfRange { value: usize, limit: usize },
    #[error("tile {0} appears more than once")]
    Duplicate(u8),
}

impl Board {
    /// Build a board from its rows, checking that every number in `0..N²`
    /// appears exactly once.
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Board, BoardError> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(BoardError::NotSquare(rows.iter().map(Vec::len).sum()));
        }
        Board::from_tiles(size, rows.into_iter().flatten().collect())
    }

    fn from_tiles(size: usize, tiles: Vec<u8>) -> Result<Board, BoardError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(BoardError::UnsupportedSize(size));
        }
        if tiles.len() != size * size {
            return Err(BoardError::NotSquare(tiles.len()));
        }

        let limit = size * size;
        let mut seen = vec![false; limit];
        for &tile in &tiles {
            let slot = seen
                .get_mut(tile as usize)
                .ok_or(BoardError::OutOfRange { value: tile as usize, limit })?;
            if *slot {
                return Err(BoardError::Duplicate(tile));
            }
            *slot = true;
        }

        Ok(Board { size, tiles })
    }

    /// The goal board for an edge of `size`.
    pub fn solved(size: usize) -> Board {
        let cells = size * size;
        let tiles = (1..cells).map(|t| t as u8).chain([BLANK]).collect();
        Board { size, tiles }
    }

    /// A board whose rows and values have been validated elsewhere.
    pub(crate) fn from_permutation(size: usize, tiles: Vec<u8>) -> Board {
        debug_assert_eq!(tiles.len(), size * size);
        Board { size, tiles }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.tiles.chunks(self.size)
    }

    pub fn is_solved(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles
            .iter()
            .enumerate()
            .all(|(ix, &t)| if ix == last { t == BLANK } else { t as usize == ix + 1 })
    }

    pub fn blank(&self) -> (usize, usize) {
        let ix = self.tiles.iter().position(|&t| t == BLANK).unwrap_or_default();
        (ix / self.size, ix % self.size)
    }

    /// Move the blank one cell in `direction`, or `None` at the edge.
    pub fn slide(&self, direction: Direction) -> Option<Board> {
        let (i, j) = self.blank();
        let target = match direction {
            Direction::Left if j > 0 => (i, j - 1),
            Direction::Right if j + 1 < self.size => (i, j + 1),
            Direction::Up if i > 0 => (i - 1, j),
            Direction::Down if i + 1 < self.size => (i + 1, j),
            _ => return None,
        };

        let mut result = self.clone();
        result[(i, j)] = self[target];
        result[target] = BLANK;
        Some(result)
    }

    /// Sum over all tiles of the Manhattan distance to their home cell.
    pub fn manhattan(&self) -> u64 {
        let n = self.size;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, &t)| t != BLANK)
            .map(|(ix, &t)| {
                let home = t as usize - 1;
                (ix / n).abs_diff(home / n) + (ix % n).abs_diff(home % n)
            })
            .sum::<usize>() as u64
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = self.rows().map(|row| row.iter().join(" ")).join(" / ");
        write!(f, "[{}]", rows)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for row in self.rows() {
            if !first {
                f.write_char('\n')?;
            } else {
                first = false;
            }

            write!(f, "{}", row.iter().join("\t"))?;
        }

        Ok(())
    }
}

impl Index<(usize, usize)> for Board {
    type Output = u8;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.tiles[index.0 * self.size + index.1]
    }
}

impl IndexMut<(usize, usize)> for Board {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.tiles[index.0 * self.size + index.1]
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Whitespace-separated tile numbers; the edge is inferred from the count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<usize> = s
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<usize>()
                    .map_err(|_| BoardError::InvalidNumber(token.to_string()))
            })
            .collect::<Result<_, _>>()?;

        let size = values.len().isqrt();
        if size * size != values.len() {
            return Err(BoardError::NotSquare(values.len()));
        }
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(BoardError::UnsupportedSize(size));
        }

        let limit = size * size;
        let tiles = values
            .into_iter()
            .map(|value| {
                u8::try_from(value)
                    .ok()
                    .filter(|_| value < limit)
                    .ok_or(BoardError::OutOfRange { value, limit })
            })
            .collect::<Result<_, _>>()?;
        Board::from_tiles(size, tiles)
    }
}

/// Direction the blank moves in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Order in which children are generated.
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown move `{0}`")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

/// The classic (N²-1)-puzzle: reach [`Board::solved`] with unit-cost moves.
#[derive(Clone, Debug)]
pub struct SlidingPuzzle {
    goal: Board,
}

impl SlidingPuzzle {
    pub fn new(size: usize) -> Self {
        SlidingPuzzle {
            goal: Board::solved(size),
        }
    }

    pub fn for_board(board: &Board) -> Self {
        Self::new(board.size())
    }
}

impl Problem for SlidingPuzzle {
    type State = Board;
    type Op = Direction;

    fn is_goal(&self, state: &Board) -> bool {
        *state == self.goal
    }

    fn heuristic(&self, state: &Board) -> u64 {
        state.manhattan()
    }

    fn successors(&self, state: &Board, out: &mut SuccessorBuffer<Board, Direction>) {
        for direction in Direction::ALL {
            if let Some(board) = state.slide(direction) {
                out.push(Successor {
                    op: direction,
                    state: board,
                    cost: 1,
                });
            }
        }
    }
}

/// Play `moves` from `board`, failing on the first move that would push the
/// blank off the edge. Returns the index of that move on failure.
pub fn replay(board: &Board, moves: impl IntoIterator<Item = Direction>) -> Result<Board, (usize, Direction)> {
    moves
        .into_iter()
        .enumerate()
        .try_fold(board.clone(), |b, (ix, d)| b.slide(d).ok_or((ix, d)))
}

/// Write a solution as a step count followed by one move per line.
pub fn write_solution<W: Write>(mut out: W, solution: &Solution<Board, Direction>) -> io::Result<()> {
    writeln!(out, "{}", solution.len())?;
    for op in solution.ops() {
        writeln!(out, "{}", op)?;
    }
    Ok(())
}
