//! Random solvable boards for benchmarking the solver.
//!
//! Solvability is decided on the snake order of the board: walk row 0 left to
//! right, row 1 right to left, and so on. Sliding the blank never changes the
//! parity of the inversions among the tiles in that order, and two boards are
//! mutually reachable exactly when those parities agree.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};
use rand::{seq::SliceRandom, Rng};

use crate::board::{Board, BLANK, MAX_SIZE, MIN_SIZE};

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("instance ids must satisfy 0 < first <= last, got {first}..={last}")]
    InvalidRange { first: u32, last: u32 },
    #[error("board edge {0} is outside 2..=16")]
    UnsupportedSize(usize),
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[auto_enums::auto_enum(Iterator)]
fn row_cells(size: usize, row: usize) -> impl Iterator<Item = usize> {
    match row % 2 {
        0 => 0..size,
        _ => (0..size).rev(),
    }
}

/// Tiles in boustrophedon order, blank left out.
fn snake_tiles(board: &Board) -> impl Iterator<Item = u8> + '_ {
    let size = board.size();
    (0..size)
        .flat_map(move |i| row_cells(size, i).map(move |j| board[(i, j)]))
        .filter(|&t| t != BLANK)
}

fn snake_parity(board: &Board) -> bool {
    let tiles: Vec<u8> = snake_tiles(board).collect();
    let inversions: usize = tiles
        .iter()
        .enumerate()
        .map(|(ix, a)| tiles[ix + 1..].iter().filter(|b| a > b).count())
        .sum();
    inversions % 2 == 1
}

/// Whether the solved board can be reached from `board`.
pub fn is_solvable(board: &Board) -> bool {
    snake_parity(board) == snake_parity(&Board::solved(board.size()))
}

/// Shuffle tiles until the permutation is solvable.
pub fn random_board<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Board, GenerateError> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(GenerateError::UnsupportedSize(size));
    }

    let mut tiles: Vec<u8> = (0..size * size).map(|t| t as u8).collect();
    loop {
        tiles.shuffle(rng);
        let board = Board::from_permutation(size, tiles.clone());
        if is_solvable(&board) {
            return Ok(board);
        }
        debug!("discarding unsolvable {:?}", board);
    }
}

/// `<prefix><id>.txt`
pub fn instance_path(prefix: &str, id: u32) -> PathBuf {
    PathBuf::from(format!("{}{}.txt", prefix, id))
}

fn write_board(path: &Path, board: &Board) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{}", board)?;
    out.flush()
}

/// Write one random board per id in `first..=last`. Returns the paths written.
pub fn write_instances<R: Rng + ?Sized>(
    prefix: &str,
    first: u32,
    last: u32,
    size: usize,
    rng: &mut R,
) -> Result<Vec<PathBuf>, GenerateError> {
    if first == 0 || first > last {
        return Err(GenerateError::InvalidRange { first, last });
    }

    let mut written = Vec::new();
    for id in first..=last {
        let board = random_board(size, rng)?;
        let path = instance_path(prefix, id);
        write_board(&path, &board).map_err(|source| GenerateError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("wrote {}", path.display());
        written.push(path);
    }

    info!("generated {} {}x{} boards", written.len(), size, size);
    Ok(written)
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;
    use crate::{
        board::{Direction, SlidingPuzzle},
        search::{solve, SearchConfig},
        strategy::Strategy,
    };

    fn board(rows: &[&[u8]]) -> Board {
        Board::new(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn snake_order() {
        let tiles: Vec<u8> = snake_tiles(&Board::solved(3)).collect();
        assert_eq!(tiles, vec![1, 2, 3, 6, 5, 4, 7, 8]);
    }

    #[test]
    fn solved_is_solvable() {
        for size in MIN_SIZE..=5 {
            assert!(is_solvable(&Board::solved(size)), "{}", size);
        }
    }

    #[test]
    fn slides_keep_solvability() {
        let mut b = Board::solved(4);
        for d in [Direction::Up, Direction::Left, Direction::Up, Direction::Left, Direction::Down] {
            b = b.slide(d).unwrap();
            assert!(is_solvable(&b), "{:?}", b);
        }
    }

    #[test]
    fn swapping_two_tiles_breaks_solvability() {
        assert!(!is_solvable(&board(&[&[2, 1, 3], &[4, 5, 6], &[7, 8, 0]])));
        assert!(!is_solvable(&board(&[&[2, 1], &[3, 0]])));
        assert!(!is_solvable(&board(&[
            &[1, 2, 3, 4],
            &[5, 6, 7, 8],
            &[9, 10, 11, 12],
            &[13, 15, 14, 0],
        ])));
    }

    #[test]
    fn parity_agrees_with_search_on_two_by_two() {
        // 4! permutations; exactly half can reach the goal
        let mut solvable = 0;
        for perm in (0u8..4).permutations(4) {
            let b = Board::from_permutation(2, perm);
            let report = solve(&SlidingPuzzle::new(2), b.clone(), &SearchConfig::new(Strategy::Breadth)).unwrap();
            assert_eq!(report.outcome.solution().is_some(), is_solvable(&b), "{:?}", b);
            solvable += usize::from(is_solvable(&b));
        }
        assert_eq!(solvable, 12);
    }

    #[test]
    fn random_boards_are_valid_and_solvable() {
        let mut rng = SmallRng::seed_from_u64(7);
        for size in [2, 3, 4, 6] {
            let b = random_board(size, &mut rng).unwrap();
            let mut tiles = b.tiles().to_vec();
            tiles.sort_unstable();
            assert_eq!(tiles, (0..(size * size) as u8).collect::<Vec<_>>());
            assert!(is_solvable(&b));
        }
        assert!(matches!(random_board(1, &mut rng), Err(GenerateError::UnsupportedSize(1))));
    }

    #[test]
    fn rejects_bad_ranges() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(matches!(
            write_instances("unused", 0, 3, 3, &mut rng),
            Err(GenerateError::InvalidRange { first: 0, last: 3 })
        ));
        assert!(matches!(
            write_instances("unused", 4, 3, 3, &mut rng),
            Err(GenerateError::InvalidRange { first: 4, last: 3 })
        ));
    }

    #[test]
    fn writes_parsable_instances() {
        let dir = std::env::temp_dir().join(format!("puzzle-search-gen-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let prefix = dir.join("inst").to_string_lossy().into_owned();

        let mut rng = SmallRng::seed_from_u64(42);
        let paths = write_instances(&prefix, 1, 3, 3, &mut rng).unwrap();
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[1], instance_path(&prefix, 2));

        for path in &paths {
            let text = std::fs::read_to_string(path).unwrap();
            assert_eq!(text.lines().count(), 3);
            assert!(text.lines().all(|l| l.split('\t').count() == 3));
            let b: Board = text.parse().unwrap();
            assert!(is_solvable(&b));
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
