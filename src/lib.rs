//! # grid_astar
//!
//! Shortest paths on a grid of cells marked as empty, wall, start or goal, computed with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm). Movement is 4-connected (no
//! diagonals) and every step costs the same, so the straight-line distance to the goal is an
//! admissible heuristic and the first path found is a shortest one.
//!
//! The [Grid] is owned by the caller; a [PathFinder] only reads it during a search, and
//! [PathFinder::find_and_mark] writes the resulting path back as an overlay.
//!
//! ```
//! use grid_astar::{Grid, PathFinder, path_cost};
//!
//! let mut grid: Grid = "S.#.\n..#G\n....".parse().unwrap();
//! let path = PathFinder::new().find_and_mark(&mut grid).unwrap();
//! assert_eq!(path_cost(&path), 6);
//! print!("{}", grid);
//! ```
pub mod astar;
pub mod components;
pub mod coordinate;
pub mod grid;
pub mod solver;

pub use crate::coordinate::Coordinate;
pub use crate::grid::{CellEdit, CellState, Grid, ParseGridError};
pub use crate::solver::{Heuristic, PathFinder, SearchError};

/// Coordinates from start to goal, both included, each orthogonally adjacent to the next.
pub type Path = Vec<Coordinate>;

/// Number of steps taken along a path.
pub fn path_cost(path: &[Coordinate]) -> usize {
    path.len().saturating_sub(1)
}

/// Checks that `path` leads from `start` to `goal` in orthogonal steps over walkable cells of
/// `grid` without visiting any cell twice.
pub fn is_valid_path(
    grid: &Grid,
    path: &[Coordinate],
    start: Coordinate,
    goal: Coordinate,
) -> bool {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return false;
    };
    let mut seen = fxhash::FxHashSet::default();
    *first == start
        && *last == goal
        && path.iter().all(|&c| grid.is_walkable(c) && seen.insert(c))
        && path.windows(2).all(|w| w[0].is_adjacent(&w[1]))
}
