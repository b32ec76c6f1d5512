use anyhow::Context;
use grid_maze::io::{read_query, write_path};
use grid_maze::{path_is_valid, MazeGenerator};
use log::debug;
use std::io::{self, BufWriter};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let query = read_query(io::stdin().lock()).context("failed to read query")?;
    let maze = MazeGenerator::from_time()
        .generate(query.rows, query.cols)
        .context("failed to generate maze")?;
    debug!("Maze:\n{}", maze);

    let path = maze
        .get_path(query.start, query.end)
        .context("failed to find path")?;
    debug_assert!(path_is_valid(&maze, &path, query.start, query.end));

    write_path(BufWriter::new(io::stdout().lock()), &path).context("failed to write path")?;
    Ok(())
}
