//! Line-oriented text input and output for the command line driver.
use crate::coordinate::Coordinate;
use crate::error::InputError;
use std::io::{self, BufRead, Write};

/// Grid dimensions and the two endpoints to connect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Query {
    pub rows: i32,
    pub cols: i32,
    pub start: Coordinate,
    pub end: Coordinate,
}

fn parse_line<const N: usize>(line: &str, name: &'static str) -> Result<[i32; N], InputError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != N {
        return Err(InputError::FieldCount {
            line: name,
            expected: N,
            found: fields.len(),
        });
    }
    let mut values = [0; N];
    for (value, field) in values.iter_mut().zip(fields) {
        *value = field.parse().map_err(|source| InputError::ParseInt {
            value: field.to_owned(),
            source,
        })?;
    }
    Ok(values)
}

/// Reads `n m` from the first line and `startX startY endX endY` from the second.
pub fn read_query<B: BufRead>(input: B) -> Result<Query, InputError> {
    let mut lines = input.lines();
    let mut next_line = |name: &'static str| -> Result<String, InputError> {
        lines.next().ok_or(InputError::MissingLine(name))?.map_err(InputError::from)
    };
    let [rows, cols] = parse_line::<2>(&next_line("grid dimensions")?, "dimensions")?;
    let [sx, sy, ex, ey] = parse_line::<4>(&next_line("start and end coordinates")?, "coordinates")?;
    Ok(Query {
        rows,
        cols,
        start: Coordinate::new(sx, sy),
        end: Coordinate::new(ex, ey),
    })
}

/// Writes one `x y` line per coordinate followed by a `.` line.
pub fn write_path<W: Write>(mut out: W, path: &[Coordinate]) -> io::Result<()> {
    for p in path {
        writeln!(out, "{} {}", p.x, p.y)?;
    }
    writeln!(out, ".")?;
    out.flush()
}
