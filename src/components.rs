use crate::coordinate::Coordinate;
use crate::grid::{CellState, Grid};
use grid_util::grid::Grid as _;
use grid_util::grid::SimpleGrid;
use log::debug;
use petgraph::unionfind::UnionFind;

/// [Connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) of the
/// walkable cells of a [Grid] under 4-connected movement. Computed from a snapshot; edits to
/// the grid afterwards are not reflected.
#[derive(Clone, Debug)]
pub struct Components {
    rows: usize,
    cols: usize,
    /// Union-find element of every cell, numbered in row-major order.
    ids: SimpleGrid<usize>,
    sets: UnionFind<usize>,
}

impl Components {
    /// Links every walkable cell to its walkable neighbours.
    pub fn generate(grid: &Grid) -> Components {
        let mut ids = SimpleGrid::new(grid.cols(), grid.rows(), 0);
        for (id, (coord, _)) in grid.iter().enumerate() {
            if let Some(cell) = ids.get_point_mut(coord.into()) {
                *cell = id;
            }
        }
        let mut components = Components {
            rows: grid.rows(),
            cols: grid.cols(),
            ids,
            sets: UnionFind::new(grid.len()),
        };
        for (coord, state) in grid.iter() {
            if state == CellState::Wall {
                continue;
            }
            for n in grid.walkable_neighbours(coord) {
                if let (Some(a), Some(b)) = (components.id(coord), components.id(n)) {
                    components.sets.union(a, b);
                }
            }
        }
        debug!(
            "Generated components for a {}x{} grid",
            grid.rows(),
            grid.cols()
        );
        components
    }

    fn id(&self, coord: Coordinate) -> Option<usize> {
        if coord.row >= self.rows || coord.col >= self.cols {
            return None;
        }
        self.ids.get_point(coord.into()).copied()
    }

    /// Representative id of the component `coord` belongs to. Walls form singleton components.
    pub fn component(&self, coord: Coordinate) -> Option<usize> {
        self.id(coord).map(|id| self.sets.find(id))
    }

    /// Checks if both coordinates are in bounds and on the same component.
    pub fn connected(&self, a: Coordinate, b: Coordinate) -> bool {
        match (self.id(a), self.id(b)) {
            (Some(a), Some(b)) => self.sets.equiv(a, b),
            _ => false,
        }
    }
}
