//! # grid_maze
//!
//! Generates random mazes on a rectangular grid and finds shortest paths through them.
//!
//! Mazes are grown with a randomized growing-tree construction on a half-resolution lattice:
//! cells two steps apart are joined by opening the wall cell between them. The next cell to grow
//! from is drawn uniformly from all unresolved cells rather than from the cells bordering the
//! open region. See [Strategy](generator::Strategy) for the two available variants.
//!
//! Paths are computed with [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search)
//! over the four cardinal moves, so a returned path always has the fewest possible steps.
//!
//! ```
//! use grid_maze::{Coordinate, MazeGenerator};
//!
//! let mut generator = MazeGenerator::seeded(42);
//! let maze = generator.generate(5, 5).unwrap();
//! let open: Vec<Coordinate> = maze.coordinates().filter(|&c| maze.is_open(c)).collect();
//! let path = maze.get_path(open[0], open[open.len() - 1]).unwrap();
//! assert_eq!(path[0], open[0]);
//! ```
pub mod bfs;
pub mod coordinate;
pub mod error;
pub mod generator;
pub mod io;
pub mod maze_grid;

pub use coordinate::Coordinate;
pub use error::{BlockReason, Endpoint, InputError, MazeError};
pub use generator::{GenerationReport, MazeGenerator, Strategy};
pub use maze_grid::{path_is_valid, MazeGrid, MAX_CELLS};

const N_SMALLVEC_SIZE: usize = 4;
