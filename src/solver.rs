use crate::astar::{astar_with_stats, SearchStats};
use crate::components::Components;
use crate::coordinate::Coordinate;
use crate::grid::{CellState, Grid};
use crate::Path;
use core::fmt;
use log::{debug, info, warn};
use smallvec::SmallVec;

/// Estimate of the remaining number of steps to the goal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// Straight-line distance. Admissible for 4-connected movement.
    #[default]
    Euclidean,
    /// Exact distance on an empty grid; tighter than [Heuristic::Euclidean].
    Manhattan,
    /// No estimate at all, which turns the search into Dijkstra's algorithm.
    Zero,
}

impl Heuristic {
    pub fn estimate(self, from: &Coordinate, goal: &Coordinate) -> f64 {
        match self {
            Heuristic::Euclidean => from.euclidean_distance(goal),
            Heuristic::Manhattan => from.manhattan_distance(goal) as f64,
            Heuristic::Zero => 0.0,
        }
    }
}

/// Why a search produced no path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// The grid holds no [CellState::Start] cell.
    NoStart,
    /// The grid holds no [CellState::Goal] cell.
    NoGoal,
    /// The grid holds this many start cells.
    MultipleStarts(usize),
    /// The grid holds this many goal cells.
    MultipleGoals(usize),
    /// The start or goal lies outside the grid.
    OutOfBounds(Coordinate),
    /// The start or goal lies on a wall.
    Blocked(Coordinate),
    /// Every cell reachable from the start was expanded without meeting the goal.
    Unreachable,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchError::NoStart => write!(f, "no start cell is set"),
            SearchError::NoGoal => write!(f, "no goal cell is set"),
            SearchError::MultipleStarts(n) => write!(f, "{} start cells are set, expected one", n),
            SearchError::MultipleGoals(n) => write!(f, "{} goal cells are set, expected one", n),
            SearchError::OutOfBounds(c) => write!(f, "{} lies outside the grid", c),
            SearchError::Blocked(c) => write!(f, "{} is a wall", c),
            SearchError::Unreachable => write!(f, "the goal cannot be reached from the start"),
        }
    }
}

impl std::error::Error for SearchError {}

/// A* search over a [Grid] with orthogonal unit-cost moves. Holds only configuration, so one
/// finder can serve any number of grids; every call is an independent search.
#[derive(Clone, Debug)]
pub struct PathFinder {
    pub heuristic: Heuristic,
    /// Multiplies the heuristic. Values above 1.0 expand fewer nodes but the returned path is
    /// no longer guaranteed to be shortest.
    pub heuristic_factor: f64,
    /// Checks start and goal for a shared connected component before searching, which avoids
    /// flooding the whole reachable region when the goal is walled off.
    pub check_components: bool,
}

impl Default for PathFinder {
    fn default() -> PathFinder {
        PathFinder {
            heuristic: Heuristic::Euclidean,
            heuristic_factor: 1.0,
            check_components: false,
        }
    }
}

impl PathFinder {
    pub fn new() -> PathFinder {
        PathFinder::default()
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> PathFinder {
        self.heuristic = heuristic;
        self
    }

    pub fn with_heuristic_factor(mut self, factor: f64) -> PathFinder {
        self.heuristic_factor = factor;
        self
    }

    pub fn with_component_check(mut self, enabled: bool) -> PathFinder {
        self.check_components = enabled;
        self
    }

    fn estimate(&self, from: &Coordinate, goal: &Coordinate) -> f64 {
        self.heuristic.estimate(from, goal) * self.heuristic_factor
    }

    /// Computes a shortest path from `start` to `goal`, both included. A search where start
    /// and goal coincide yields the single-cell path.
    pub fn search(
        &self,
        grid: &Grid,
        start: Coordinate,
        goal: Coordinate,
    ) -> Result<Path, SearchError> {
        self.search_with_stats(grid, start, goal).0
    }

    /// [search](Self::search) that also reports how many cells were expanded.
    pub fn search_with_stats(
        &self,
        grid: &Grid,
        start: Coordinate,
        goal: Coordinate,
    ) -> (Result<Path, SearchError>, SearchStats) {
        for c in [start, goal] {
            match grid.get(c) {
                None => return (Err(SearchError::OutOfBounds(c)), SearchStats::default()),
                Some(CellState::Wall) => {
                    return (Err(SearchError::Blocked(c)), SearchStats::default())
                }
                Some(_) => {}
            }
        }
        if self.check_components && !Components::generate(grid).connected(start, goal) {
            info!("{} is not reachable from {}", goal, start);
            return (Err(SearchError::Unreachable), SearchStats::default());
        }
        info!("Searching for a path from {} to {}", start, goal);
        let (result, stats) = astar_with_stats(
            &start,
            |node| {
                grid.walkable_neighbours(*node)
                    .into_iter()
                    .map(|n| (n, 1u32))
                    .collect::<SmallVec<[_; 4]>>()
            },
            |node| self.estimate(node, &goal),
            |node| *node == goal,
        );
        debug!(
            "Expanded {} of {} discovered cells",
            stats.expanded, stats.discovered
        );
        match result {
            Some((path, cost)) => {
                info!("Found a path of {} steps", cost);
                (Ok(path), stats)
            }
            None => {
                if self.check_components {
                    warn!(
                        "Reachable goal {} could not be pathed to, are the components correct?",
                        goal
                    );
                } else {
                    info!("{} is not reachable from {}", goal, start);
                }
                (Err(SearchError::Unreachable), stats)
            }
        }
    }

    /// Locates the unique start and goal markers of `grid` and searches between them. No search
    /// is attempted unless exactly one of each is present.
    pub fn search_grid(&self, grid: &Grid) -> Result<Path, SearchError> {
        let start = unique(
            grid,
            CellState::Start,
            SearchError::NoStart,
            SearchError::MultipleStarts,
        )?;
        let goal = unique(
            grid,
            CellState::Goal,
            SearchError::NoGoal,
            SearchError::MultipleGoals,
        )?;
        self.search(grid, start, goal)
    }

    /// Clears any previous path overlay, searches between the grid's markers and overlays the
    /// result. On failure the grid is left without an overlay.
    pub fn find_and_mark(&self, grid: &mut Grid) -> Result<Path, SearchError> {
        grid.clear_path();
        let path = self.search_grid(grid)?;
        grid.mark_path(&path);
        Ok(path)
    }
}

fn unique(
    grid: &Grid,
    state: CellState,
    missing: SearchError,
    multiple: fn(usize) -> SearchError,
) -> Result<Coordinate, SearchError> {
    match grid.count(state) {
        0 => Err(missing),
        1 => grid.find(state).ok_or(missing),
        n => Err(multiple(n)),
    }
}
