use crate::coordinate::Coordinate;
use core::fmt;
use grid_util::grid::Grid as _;
use grid_util::grid::SimpleGrid;
use grid_util::point::Point;
use smallvec::SmallVec;
use std::str::FromStr;

/// The marker held by a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Start,
    Goal,
    Wall,
    Path,
}

impl CellState {
    /// The character used for this state in the text format.
    pub const fn glyph(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Start => 'S',
            CellState::Goal => 'G',
            CellState::Wall => '#',
            CellState::Path => '*',
        }
    }

    pub const fn from_glyph(c: char) -> Option<CellState> {
        match c {
            '.' => Some(CellState::Empty),
            'S' => Some(CellState::Start),
            'G' => Some(CellState::Goal),
            '#' => Some(CellState::Wall),
            '*' => Some(CellState::Path),
            _ => None,
        }
    }
}

/// An edit requested by whoever drives the grid (typically user input).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellEdit {
    Start,
    Goal,
    Wall,
    Erase,
}

/// Fixed-size field of [CellState]s stored in a [SimpleGrid] with `x = col` and `y = row`.
/// Start and goal markers are ordinary cell states; nothing prevents several of them from
/// existing at once, which is detected when a search is requested.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: SimpleGrid<CellState>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Grid {
        Grid {
            rows,
            cols,
            cells: SimpleGrid::new(cols, rows, CellState::Empty),
        }
    }

    pub fn square(n: usize) -> Grid {
        Grid::new(n, n)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// The state of a cell.
    ///
    /// # Panics
    /// If `coord` lies outside the grid. Use [get](Self::get) for a checked lookup.
    pub fn cell_state(&self, coord: Coordinate) -> CellState {
        match self.get(coord) {
            Some(state) => state,
            None => panic!(
                "{} is outside the {}x{} grid",
                coord, self.rows, self.cols
            ),
        }
    }

    pub fn get(&self, coord: Coordinate) -> Option<CellState> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.cells.get_point(coord.into()).copied()
    }

    fn get_mut(&mut self, coord: Coordinate) -> Option<&mut CellState> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.cells.get_point_mut(coord.into())
    }

    /// Sets a cell, returning the previous state or [None] if `coord` is out of bounds.
    pub fn set(&mut self, coord: Coordinate, state: CellState) -> Option<CellState> {
        self.get_mut(coord).map(|cell| std::mem::replace(cell, state))
    }

    /// Iterates over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, CellState)> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| Coordinate::new(row, col)))
            .filter_map(|c| self.get(c).map(|state| (c, state)))
    }

    /// The first cell holding `state` in row-major order.
    pub fn find(&self, state: CellState) -> Option<Coordinate> {
        self.iter().find(|&(_, s)| s == state).map(|(c, _)| c)
    }

    pub fn find_all(&self, state: CellState) -> Vec<Coordinate> {
        self.iter()
            .filter(|&(_, s)| s == state)
            .map(|(c, _)| c)
            .collect()
    }

    pub fn count(&self, state: CellState) -> usize {
        self.iter().filter(|&(_, s)| s == state).count()
    }

    /// In bounds and not a wall.
    pub fn is_walkable(&self, coord: Coordinate) -> bool {
        matches!(self.get(coord), Some(s) if s != CellState::Wall)
    }

    /// In-bounds members of the
    /// [von Neumann neighbourhood](https://en.wikipedia.org/wiki/Von_Neumann_neighborhood)
    /// of `coord`.
    pub fn neighbours(&self, coord: Coordinate) -> SmallVec<[Coordinate; 4]> {
        Point::from(coord)
            .neumann_neighborhood_smallvec()
            .into_iter()
            .filter_map(Coordinate::from_point)
            .filter(|&n| self.in_bounds(n))
            .collect()
    }

    /// Orthogonal neighbours of `coord` that can be stepped onto.
    pub fn walkable_neighbours(&self, coord: Coordinate) -> SmallVec<[Coordinate; 4]> {
        self.neighbours(coord)
            .into_iter()
            .filter(|&n| self.is_walkable(n))
            .collect()
    }

    /// Overlays a path. Start and goal markers are kept so that the grid stays searchable, and
    /// walls are never overwritten.
    pub fn mark_path(&mut self, path: &[Coordinate]) {
        for &coord in path {
            if let Some(cell) = self.get_mut(coord) {
                if *cell == CellState::Empty {
                    *cell = CellState::Path;
                }
            }
        }
    }

    /// Removes a previous path overlay.
    pub fn clear_path(&mut self) {
        for c in self.find_all(CellState::Path) {
            self.set(c, CellState::Empty);
        }
    }

    /// Resets every cell to [CellState::Empty].
    pub fn clear(&mut self) {
        self.cells = SimpleGrid::new(self.cols, self.rows, CellState::Empty);
    }

    /// Applies an edit under the marker rules: a start may not overwrite the goal, the goal may
    /// not overwrite a start, and walls may overwrite neither. Returns whether the cell changed.
    pub fn apply(&mut self, edit: CellEdit, coord: Coordinate) -> bool {
        let Some(current) = self.get(coord) else {
            return false;
        };
        let next = match (edit, current) {
            (CellEdit::Start, CellState::Goal) => return false,
            (CellEdit::Goal, CellState::Start) => return false,
            (CellEdit::Wall, CellState::Start | CellState::Goal) => return false,
            (CellEdit::Start, _) => CellState::Start,
            (CellEdit::Goal, _) => CellState::Goal,
            (CellEdit::Wall, _) => CellState::Wall,
            (CellEdit::Erase, _) => CellState::Empty,
        };
        self.set(coord, next);
        next != current
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|col| self.cell_state(Coordinate::new(row, col)).glyph())
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.iter().eq(other.iter())
    }
}

impl Eq for Grid {}

/// Failure to read a grid from its text format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseGridError {
    Empty,
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    UnknownGlyph {
        row: usize,
        col: usize,
        glyph: char,
    },
}

impl fmt::Display for ParseGridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseGridError::Empty => write!(f, "grid text contains no cells"),
            ParseGridError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
            ParseGridError::UnknownGlyph { row, col, glyph } => {
                write!(f, "unknown cell '{}' at ({}, {})", glyph, row, col)
            }
        }
    }
}

impl std::error::Error for ParseGridError {}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Reads one row per non-blank line, using the glyphs of [CellState::glyph]. Surrounding
    /// whitespace on each line is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if cols == 0 {
            return Err(ParseGridError::Empty);
        }
        let mut grid = Grid::new(lines.len(), cols);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(ParseGridError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let state = CellState::from_glyph(glyph)
                    .ok_or(ParseGridError::UnknownGlyph { row, col, glyph })?;
                grid.set(Coordinate::new(row, col), state);
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.count(CellState::Empty), 12);
        assert_eq!(grid.find(CellState::Start), None);
    }

    #[test]
    fn find_is_row_major() {
        let mut grid = Grid::square(4);
        grid.set(Coordinate::new(2, 0), CellState::Wall);
        grid.set(Coordinate::new(1, 3), CellState::Wall);
        assert_eq!(grid.find(CellState::Wall), Some(Coordinate::new(1, 3)));
        assert_eq!(
            grid.find_all(CellState::Wall),
            vec![Coordinate::new(1, 3), Coordinate::new(2, 0)]
        );
    }

    #[test]
    #[should_panic]
    fn cell_state_out_of_bounds_panics() {
        Grid::square(2).cell_state(Coordinate::new(2, 0));
    }

    #[test]
    fn checked_access() {
        let mut grid = Grid::square(2);
        assert_eq!(grid.get(Coordinate::new(0, 2)), None);
        // column overflow must not wrap onto the next row
        assert_eq!(Grid::square(5).get(Coordinate::new(0, 5)), None);
        assert_eq!(grid.set(Coordinate::new(5, 5), CellState::Wall), None);
        assert_eq!(
            grid.set(Coordinate::new(1, 1), CellState::Wall),
            Some(CellState::Empty)
        );
        assert!(!grid.is_walkable(Coordinate::new(1, 1)));
        assert!(!grid.is_walkable(Coordinate::new(2, 1)));
    }

    fn sorted(mut v: SmallVec<[Coordinate; 4]>) -> Vec<Coordinate> {
        v.sort();
        v.into_vec()
    }

    #[test]
    fn corner_has_two_neighbours() {
        let grid = Grid::square(5);
        assert_eq!(
            sorted(grid.neighbours(Coordinate::new(0, 0))),
            vec![Coordinate::new(0, 1), Coordinate::new(1, 0)]
        );
        assert_eq!(
            sorted(grid.neighbours(Coordinate::new(4, 4))),
            vec![Coordinate::new(3, 4), Coordinate::new(4, 3)]
        );
    }

    #[test]
    fn interior_has_four_neighbours() {
        let grid = Grid::square(5);
        assert_eq!(
            sorted(grid.neighbours(Coordinate::new(2, 2))),
            vec![
                Coordinate::new(1, 2),
                Coordinate::new(2, 1),
                Coordinate::new(2, 3),
                Coordinate::new(3, 2),
            ]
        );
    }

    #[test]
    fn single_cell_grid_has_no_neighbours() {
        assert!(Grid::square(1).neighbours(Coordinate::new(0, 0)).is_empty());
    }

    #[test]
    fn walls_are_not_neighbours() {
        let grid: Grid = "...\n.#.\n...".parse().unwrap();
        assert_eq!(
            sorted(grid.walkable_neighbours(Coordinate::new(0, 1))),
            vec![Coordinate::new(0, 0), Coordinate::new(0, 2)]
        );
    }

    #[test]
    fn equality_compares_cells() {
        let a: Grid = "S.\n.G".parse().unwrap();
        let mut b = Grid::square(2);
        b.set(Coordinate::new(0, 0), CellState::Start);
        b.set(Coordinate::new(1, 1), CellState::Goal);
        assert_eq!(a, b);
        b.set(Coordinate::new(0, 1), CellState::Wall);
        assert_ne!(a, b);
        assert_ne!(Grid::new(2, 3), Grid::new(3, 2));
    }

    #[test]
    fn edit_rules() {
        let mut grid = Grid::square(3);
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(2, 2);
        assert!(grid.apply(CellEdit::Start, a));
        assert!(!grid.apply(CellEdit::Start, a));
        assert!(grid.apply(CellEdit::Goal, b));
        assert!(!grid.apply(CellEdit::Goal, a));
        assert!(!grid.apply(CellEdit::Start, b));
        assert!(!grid.apply(CellEdit::Wall, a));
        assert!(!grid.apply(CellEdit::Wall, b));
        assert!(grid.apply(CellEdit::Wall, Coordinate::new(1, 1)));
        assert!(!grid.apply(CellEdit::Wall, Coordinate::new(3, 0)));
        assert!(grid.apply(CellEdit::Erase, a));
        assert!(grid.apply(CellEdit::Goal, a));
        assert_eq!(grid.count(CellState::Goal), 2);
    }

    #[test]
    fn path_overlay_keeps_markers() {
        let mut grid: Grid = "S..\n..G".parse().unwrap();
        let path = [
            Coordinate::new(0, 0),
            Coordinate::new(0, 1),
            Coordinate::new(0, 2),
            Coordinate::new(1, 2),
        ];
        grid.mark_path(&path);
        assert_eq!(grid.to_string(), "S**\n..G\n");
        grid.clear_path();
        assert_eq!(grid.to_string(), "S..\n..G\n");
        grid.clear();
        assert_eq!(grid.count(CellState::Empty), 6);
    }

    /// A path that crosses cells walled off since it was computed leaves the walls in place.
    #[test]
    fn path_overlay_keeps_walls() {
        let mut grid: Grid = "S#.\n..G".parse().unwrap();
        let stale_path = [
            Coordinate::new(0, 0),
            Coordinate::new(0, 1),
            Coordinate::new(0, 2),
            Coordinate::new(1, 2),
        ];
        grid.mark_path(&stale_path);
        assert_eq!(grid.to_string(), "S#*\n..G\n");
        assert_eq!(grid.count(CellState::Wall), 1);
    }

    #[test]
    fn text_round_trip() {
        let text = "S.#\n.*.\n#.G\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.cell_state(Coordinate::new(1, 1)), CellState::Path);
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Grid>(), Err(ParseGridError::Empty));
        assert_eq!(
            "...\n..".parse::<Grid>(),
            Err(ParseGridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "..x".parse::<Grid>(),
            Err(ParseGridError::UnknownGlyph {
                row: 0,
                col: 2,
                glyph: 'x'
            })
        );
    }
}
