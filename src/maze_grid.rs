use crate::bfs::bfs;
use crate::coordinate::Coordinate;
use crate::error::{BlockReason, Endpoint, MazeError};
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use itertools::Itertools;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [MazeGrid] holds the passability of every cell, `true` meaning open and `false` a wall,
/// stored row-major with `x` as the row. Next to the raw flags it maintains the connected
/// components of open cells in a [UnionFind] structure. Cells are only ever opened, so the
/// components are merged incrementally and never have to be rebuilt.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
    components: UnionFind<usize>,
}

/// Largest number of cells a [MazeGrid] may hold.
pub const MAX_CELLS: usize = 1 << 26;

impl MazeGrid {
    /// Creates a grid of `rows` by `cols` walls. At most [MAX_CELLS] cells are allowed.
    pub fn new(rows: i32, cols: i32) -> Result<MazeGrid, MazeError> {
        if rows <= 0 || cols <= 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        let too_large = MazeError::GridTooLarge { rows, cols };
        let len = (rows as usize)
            .checked_mul(cols as usize)
            .filter(|&len| len <= MAX_CELLS)
            .ok_or(too_large.clone())?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large)?;
        cells.resize(len, false);
        Ok(MazeGrid {
            rows: rows as usize,
            cols: cols as usize,
            cells,
            components: UnionFind::new(len),
        })
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn in_bounds(&self, c: Coordinate) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.rows && (c.y as usize) < self.cols
    }
    fn get_ix(&self, c: Coordinate) -> usize {
        debug_assert!(self.in_bounds(c), "{} is outside the grid", c);
        c.x as usize * self.cols + c.y as usize
    }
    /// Requires `c` to be in bounds.
    pub fn is_open(&self, c: Coordinate) -> bool {
        self.cells[self.get_ix(c)]
    }
    pub fn can_move_to(&self, c: Coordinate) -> bool {
        self.in_bounds(c) && self.is_open(c)
    }
    /// Opens a cell and joins it with the components of its open neighbours. Requires `c` to be
    /// in bounds.
    pub fn set_open(&mut self, c: Coordinate) {
        let ix = self.get_ix(c);
        self.cells[ix] = true;
        for n in self.neighborhood_points(&c) {
            let n_ix = self.get_ix(n);
            self.components.union(ix, n_ix);
        }
    }
    /// All coordinates of the grid in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        itertools::iproduct!(0..self.rows as i32, 0..self.cols as i32)
            .map(|(x, y)| Coordinate::new(x, y))
    }
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&open| open).count()
    }
    /// The open cardinal neighbours of `point`.
    pub fn neighborhood_points(&self, point: &Coordinate) -> SmallVec<[Coordinate; N_SMALLVEC_SIZE]> {
        point
            .neumann_neighborhood()
            .into_iter()
            .filter(|&p| self.can_move_to(p))
            .collect()
    }

    /// Retrieves the component id a given [Coordinate] belongs to.
    pub fn get_component(&self, point: &Coordinate) -> usize {
        self.components.find(self.get_ix(*point))
    }
    /// Checks if start and goal are open cells on the same component.
    pub fn reachable(&self, start: &Coordinate, goal: &Coordinate) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not open cells on the same component.
    pub fn unreachable(&self, start: &Coordinate, goal: &Coordinate) -> bool {
        if self.can_move_to(*start) && self.can_move_to(*goal) {
            !self
                .components
                .equiv(self.get_ix(*start), self.get_ix(*goal))
        } else {
            true
        }
    }
    /// Number of connected components formed by the open cells.
    pub fn component_count(&self) -> usize {
        self.coordinates()
            .filter(|&c| self.is_open(c))
            .map(|c| self.get_component(&c))
            .unique()
            .count()
    }

    /// Computes a shortest 4-connected path of open cells from `start` to `end` using breadth-first
    /// search. Both endpoints are checked before any traversal, the start first.
    pub fn get_path(&self, start: Coordinate, end: Coordinate) -> Result<Vec<Coordinate>, MazeError> {
        self.search(start, end, |node| self.neighborhood_points(node))
    }
    fn search<FN, IN>(
        &self,
        start: Coordinate,
        end: Coordinate,
        successors: FN,
    ) -> Result<Vec<Coordinate>, MazeError>
    where
        FN: FnMut(&Coordinate) -> IN,
        IN: IntoIterator<Item = Coordinate>,
    {
        self.check_endpoint(Endpoint::Start, start)?;
        self.check_endpoint(Endpoint::End, end)?;
        debug!("Searching path from {} to {}", start, end);
        let path = bfs(&start, successors, |node| *node == end)
            .ok_or(MazeError::NoPathFound { start, end })?;
        info!("Found path of {} steps from {} to {}", path.len() - 1, start, end);
        Ok(path)
    }
    fn check_endpoint(&self, endpoint: Endpoint, coordinate: Coordinate) -> Result<(), MazeError> {
        let reason = if !self.in_bounds(coordinate) {
            BlockReason::OutOfBounds
        } else if !self.is_open(coordinate) {
            BlockReason::Wall
        } else {
            return Ok(());
        };
        Err(MazeError::EndpointBlocked {
            endpoint,
            coordinate,
            reason,
        })
    }
}

/// Checks that `path` runs from `start` to `end` over open cells in unit cardinal steps.
pub fn path_is_valid(grid: &MazeGrid, path: &[Coordinate], start: Coordinate, end: Coordinate) -> bool {
    path.first() == Some(&start)
        && path.last() == Some(&end)
        && path.iter().all(|&c| grid.can_move_to(c))
        && path
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.is_cardinal_step(b))
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.cells.iter().chunks(self.cols) {
            let line: String = row.map(|&open| if open { '.' } else { '#' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
