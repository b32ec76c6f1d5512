use crate::coordinate::Coordinate;
use crate::error::MazeError;
use crate::maze_grid::MazeGrid;
use crate::N_SMALLVEC_SIZE;
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use std::time::{SystemTime, UNIX_EPOCH};

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// How the set of unresolved cells is seeded and what makes a draw from it productive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Every cell of the grid starts unresolved. A drawn cell opens a random wall cell two steps
    /// away together with the wall between them, and that cell becomes resolved. A drawn cell
    /// is never resolved itself, so the last unresolved cell can never go; generation stops
    /// once no unresolved cell has a wall two steps away. The open cells may then form several
    /// components and some rows or columns may stay closed.
    Unrestricted,
    /// Only cells sharing the root's row and column parity start unresolved. A drawn cell
    /// attaches itself to a random open cell two steps away by opening itself and the wall
    /// between them. Yields a spanning tree over the root's parity lattice.
    ///
    /// Rejecting drawn cells without an open neighbour makes every productive draw uniform over
    /// the unresolved cells bordering the tree, so the mazes are distributed like those of
    /// randomized Prim's algorithm on the lattice rather than like [Strategy::Unrestricted].
    #[default]
    ParityLattice,
}

/// Statistics of a single generation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub root: Coordinate,
    pub draws: usize,
    pub productive_draws: usize,
    /// Cells still unresolved when generation stopped. Always empty for
    /// [Strategy::ParityLattice].
    pub unresolved: Vec<Coordinate>,
}

/// Randomized growing-tree maze generator. The next cell to grow from is drawn uniformly from all
/// unresolved cells, not only from those bordering the open region.
#[derive(Clone, Debug)]
pub struct MazeGenerator<R: Rng> {
    rng: R,
    strategy: Strategy,
}

impl MazeGenerator<StdRng> {
    pub fn seeded(seed: u64) -> MazeGenerator<StdRng> {
        MazeGenerator::new(StdRng::seed_from_u64(seed))
    }
    /// Seeds from the current time; the seed is logged so a run can be reproduced.
    pub fn from_time() -> MazeGenerator<StdRng> {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        info!("Seeding maze generator with {}", seed);
        MazeGenerator::seeded(seed)
    }
}

impl<R: Rng> MazeGenerator<R> {
    pub fn new(rng: R) -> MazeGenerator<R> {
        MazeGenerator {
            rng,
            strategy: Strategy::default(),
        }
    }
    pub fn with_strategy(mut self, strategy: Strategy) -> MazeGenerator<R> {
        self.strategy = strategy;
        self
    }
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Creates a `rows` by `cols` grid and carves a maze into it.
    pub fn generate(&mut self, rows: i32, cols: i32) -> Result<MazeGrid, MazeError> {
        self.generate_with_report(rows, cols).map(|(grid, _)| grid)
    }

    /// Like [generate](Self::generate), also returning the statistics of the run.
    pub fn generate_with_report(
        &mut self,
        rows: i32,
        cols: i32,
    ) -> Result<(MazeGrid, GenerationReport), MazeError> {
        let mut grid = MazeGrid::new(rows, cols)?;
        let report = self.generate_into(&mut grid);
        info!(
            "Generated {}x{} maze rooted at {}: {} open cells, {} components, {} draws",
            rows,
            cols,
            report.root,
            grid.open_count(),
            grid.component_count(),
            report.draws
        );
        Ok((grid, report))
    }

    /// Carves a maze into a wall-filled grid.
    pub fn generate_into(&mut self, grid: &mut MazeGrid) -> GenerationReport {
        debug_assert_eq!(grid.open_count(), 0, "generation expects a wall-filled grid");
        let all: Vec<Coordinate> = grid.coordinates().collect();
        let root = all[self.rng.gen_range(0..all.len())];
        grid.set_open(root);
        let mut unresolved: FxIndexSet<Coordinate> = match self.strategy {
            Strategy::Unrestricted => all.into_iter().collect(),
            Strategy::ParityLattice => all
                .into_iter()
                .filter(|c| c.parity() == root.parity())
                .collect(),
        };
        unresolved.swap_remove(&root);
        debug!(
            "Growing {:?} maze from {} with {} unresolved cells",
            self.strategy,
            root,
            unresolved.len()
        );
        let mut report = GenerationReport {
            root,
            ..GenerationReport::default()
        };
        match self.strategy {
            Strategy::Unrestricted => self.grow_unrestricted(grid, &mut unresolved, &mut report),
            Strategy::ParityLattice => self.grow_lattice(grid, &mut unresolved, &mut report),
        }
        report.unresolved = unresolved.into_iter().collect();
        report
    }

    fn draw(&mut self, unresolved: &FxIndexSet<Coordinate>) -> Coordinate {
        unresolved[self.rng.gen_range(0..unresolved.len())]
    }

    fn grow_unrestricted(
        &mut self,
        grid: &mut MazeGrid,
        unresolved: &mut FxIndexSet<Coordinate>,
        report: &mut GenerationReport,
    ) {
        let mut idle_draws = 0;
        while !unresolved.is_empty() {
            let cell = self.draw(unresolved);
            report.draws += 1;
            let candidates = wall_lattice_neighbours(grid, &cell);
            if let Some(&nb) = candidates.choose(&mut self.rng) {
                grid.set_open(cell.midpoint(&nb));
                grid.set_open(nb);
                unresolved.swap_remove(&nb);
                report.productive_draws += 1;
                idle_draws = 0;
                continue;
            }
            idle_draws += 1;
            // Draws cannot become productive again once every unresolved cell is boxed in.
            if idle_draws >= unresolved.len() {
                if unresolved
                    .iter()
                    .all(|c| wall_lattice_neighbours(grid, c).is_empty())
                {
                    warn!(
                        "Maze generation stalled with {} unresolved cells",
                        unresolved.len()
                    );
                    return;
                }
                idle_draws = 0;
            }
        }
    }

    fn grow_lattice(
        &mut self,
        grid: &mut MazeGrid,
        unresolved: &mut FxIndexSet<Coordinate>,
        report: &mut GenerationReport,
    ) {
        while !unresolved.is_empty() {
            let cell = self.draw(unresolved);
            report.draws += 1;
            let anchors: SmallVec<[Coordinate; N_SMALLVEC_SIZE]> = cell
                .lattice_neighborhood()
                .into_iter()
                .filter(|&nb| grid.can_move_to(nb))
                .collect();
            if let Some(&anchor) = anchors.choose(&mut self.rng) {
                grid.set_open(cell.midpoint(&anchor));
                grid.set_open(cell);
                unresolved.swap_remove(&cell);
                report.productive_draws += 1;
            }
        }
    }
}

/// In-bounds wall cells two steps away from `cell`.
fn wall_lattice_neighbours(
    grid: &MazeGrid,
    cell: &Coordinate,
) -> SmallVec<[Coordinate; N_SMALLVEC_SIZE]> {
    cell.lattice_neighborhood()
        .into_iter()
        .filter(|&nb| grid.in_bounds(nb) && !grid.is_open(nb))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cell() {
        for strategy in [Strategy::Unrestricted, Strategy::ParityLattice] {
            let mut generator = MazeGenerator::seeded(0).with_strategy(strategy);
            let mut grid = MazeGrid::new(1, 1).unwrap();
            let report = generator.generate_into(&mut grid);
            assert_eq!(report.root, Coordinate::new(0, 0));
            assert_eq!(report.draws, 0);
            assert!(report.unresolved.is_empty());
            assert!(grid.is_open(Coordinate::new(0, 0)));
        }
    }

    #[test]
    fn invalid_dimensions_propagate() {
        let mut generator = MazeGenerator::seeded(0);
        assert_eq!(
            generator.generate(0, 4).unwrap_err(),
            MazeError::InvalidDimensions { rows: 0, cols: 4 }
        );
    }

    #[test]
    fn lattice_is_spanning_tree() {
        for seed in 0..50 {
            let mut generator = MazeGenerator::seeded(seed);
            let mut grid = MazeGrid::new(7, 9).unwrap();
            let report = generator.generate_into(&mut grid);
            let lattice = grid
                .coordinates()
                .filter(|c| c.parity() == report.root.parity())
                .count();
            assert!(report.unresolved.is_empty());
            assert_eq!(report.productive_draws, lattice - 1);
            assert_eq!(grid.open_count(), 2 * lattice - 1);
            assert_eq!(grid.component_count(), 1);
        }
    }

    #[test]
    fn same_seed_same_maze() {
        for strategy in [Strategy::Unrestricted, Strategy::ParityLattice] {
            let a = MazeGenerator::seeded(7)
                .with_strategy(strategy)
                .generate(6, 5)
                .unwrap();
            let b = MazeGenerator::seeded(7)
                .with_strategy(strategy)
                .generate(6, 5)
                .unwrap();
            assert_eq!(a.to_string(), b.to_string());
        }
    }

    /// The unresolved set can never be emptied on grids with more than one cell, so generation
    /// ends in the stalled state.
    #[test]
    fn unrestricted_stalls() {
        for seed in 0..50 {
            let mut generator = MazeGenerator::seeded(seed).with_strategy(Strategy::Unrestricted);
            let mut grid = MazeGrid::new(5, 6).unwrap();
            let report = generator.generate_into(&mut grid);
            assert!(!report.unresolved.is_empty());
            for c in &report.unresolved {
                assert!(wall_lattice_neighbours(&grid, c).is_empty());
            }
        }
    }

    #[test]
    fn report_lists_unresolved_cells() {
        for strategy in [Strategy::Unrestricted, Strategy::ParityLattice] {
            let (grid, report) = MazeGenerator::seeded(3)
                .with_strategy(strategy)
                .generate_with_report(4, 6)
                .unwrap();
            assert!(grid.is_open(report.root));
            assert_eq!(
                report.unresolved.is_empty(),
                strategy == Strategy::ParityLattice
            );
            let mut replay = MazeGrid::new(4, 6).unwrap();
            let replayed = MazeGenerator::seeded(3)
                .with_strategy(strategy)
                .generate_into(&mut replay);
            assert_eq!(replayed, report);
        }
    }

    /// A 1x3 grid rooted at an end has no productive draw at all.
    #[test]
    fn unrestricted_stalls_without_progress() {
        let mut grid = MazeGrid::new(1, 3).unwrap();
        let mut seed = 0;
        let report = loop {
            let mut candidate = grid.clone();
            let report = MazeGenerator::seeded(seed)
                .with_strategy(Strategy::Unrestricted)
                .generate_into(&mut candidate);
            if report.root == Coordinate::new(0, 0) {
                grid = candidate;
                break report;
            }
            seed += 1;
        };
        assert_eq!(report.productive_draws, 0);
        assert_eq!(report.unresolved.len(), 2);
        assert_eq!(grid.to_string(), ".##\n");
    }
}
