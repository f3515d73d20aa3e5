use crate::{
    grid::{GridSnapshot, LifeGrid, SnapshotError},
    pos::Pos2,
};
use regex::Regex;
use std::sync::OnceLock;

/// Largest pattern the RLE decoder will allocate a grid for
const MAX_CELLS: usize = 1 << 30;

/// A text format a [`LifeGrid`] can be written to and read back from
pub trait Codec {
    type Error;

    fn encode(&self, grid: &LifeGrid) -> Result<String, Self::Error>;
    fn decode(&self, value: &str) -> Result<LifeGrid, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("missing `x = .., y = ..` header line")]
    MissingHeader,
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("{width}x{height} pattern is too large")]
    Oversized { width: usize, height: usize },
    #[error("run length `{0}` is not a valid number")]
    InvalidRun(String),
    #[error("a run of {run} from coordinate {coord} overflows")]
    RunOverflow { coord: i32, run: i32 },
    #[error("cell ({x}, {y}) lies outside the {width}x{height} pattern")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
}

struct RunEncoder {
    sequence: String,
    line_len: usize,
    max_line_len: usize,
}
impl RunEncoder {
    fn new(max_line_len: usize) -> Self {
        Self {
            sequence: String::new(),
            line_len: 0,
            max_line_len,
        }
    }

    fn push_run(&mut self, run: i32, c: char) {
        let append = match run {
            0 => return,
            1 => c.to_string(),
            n => format!("{}{}", n, c),
        };
        if self.line_len + append.len() > self.max_line_len {
            self.sequence.push('\n');
            self.line_len = 0;
        }
        self.line_len += append.len();
        self.sequence.push_str(&append);
    }

    fn end(mut self) -> String {
        self.sequence.push('!');
        self.sequence
    }
}

/// Run-length encoded patterns, as exchanged between Life tools
///
/// The header carries the grid size so that a decoded pattern lands back on a
/// torus of the same shape. [`RunLengthEncoded::with_min_size`] grows the
/// decoded grid for patterns meant to be dropped into a larger universe.
#[derive(Debug, Clone)]
pub struct RunLengthEncoded {
    name: Option<String>,
    min_size: (usize, usize),
}
impl RunLengthEncoded {
    pub fn set_name<T: AsRef<str>>(mut self, name: T) -> Self {
        self.name = Some(name.as_ref().to_owned());
        self
    }

    pub fn with_min_size(mut self, width: usize, height: usize) -> Self {
        self.min_size = (width, height);
        self
    }

    fn encode_header(&self, grid: &LifeGrid) -> String {
        let mut header = String::new();
        if let Some(name) = &self.name {
            header.push_str(&format!("#N {}\n", name));
        }
        header.push_str(&format!(
            "x = {}, y = {}, rule = B3/S23",
            grid.width(),
            grid.height()
        ));
        header
    }

    fn encode_cells(&self, grid: &LifeGrid) -> String {
        // runs are relative to the grid's own top-left corner
        let mut last = Pos2::new(-1, 0);
        let mut alive_run = 0;
        let mut seq = RunEncoder::new(70);
        for pos in grid.alive_cells() {
            // if we're one ahead of the last, then only increment the run
            if last.y == pos.y && (last.x + 1) == pos.x {
                alive_run += 1;
                last = pos;
                continue;
            }

            let lines_run = pos.y - last.y;
            let dead_run = match lines_run {
                0 => pos.x - last.x - 1,
                _ => pos.x,
            };
            // NOTE: order matters!
            seq.push_run(alive_run, 'o');
            seq.push_run(lines_run, '$');
            seq.push_run(dead_run, 'b');

            alive_run = 1;
            last = pos;
        }

        seq.push_run(alive_run, 'o');
        seq.end()
    }

    fn parse_header(line: &str) -> Option<(usize, usize)> {
        static HEADER: OnceLock<Regex> = OnceLock::new();
        let re = HEADER.get_or_init(|| {
            Regex::new(r"^\s*x\s*=\s*(\d+)\s*,\s*y\s*=\s*(\d+)").expect("valid header regex")
        });
        let caps = re.captures(line)?;
        Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
    }
}
impl Default for RunLengthEncoded {
    fn default() -> Self {
        Self {
            name: None,
            min_size: (0, 0),
        }
    }
}

impl Codec for RunLengthEncoded {
    type Error = DecodeError;

    fn encode(&self, grid: &LifeGrid) -> Result<String, Self::Error> {
        Ok(format!(
            "{}\n{}\n",
            self.encode_header(grid),
            self.encode_cells(grid)
        ))
    }

    fn decode(&self, value: &str) -> Result<LifeGrid, Self::Error> {
        static RUNS: OnceLock<Regex> = OnceLock::new();
        let re = RUNS.get_or_init(|| Regex::new(r"(\d*)([bo$!])").expect("valid run regex"));

        let mut grid = None;
        let mut cursor = Pos2::zero();
        'lines_loop: for mut line in value.lines() {
            if let Some(i) = line.find('#') {
                line = &line[..i];
            }
            if grid.is_none() {
                if let Some(size) = Self::parse_header(line) {
                    grid = Some(self.blank_grid(size)?);
                }
                continue;
            }
            let Some(grid) = grid.as_mut() else {
                continue;
            };

            for (_, [run_str, state]) in re.captures_iter(line).map(|x| x.extract()) {
                let run = match run_str {
                    "" => 1,
                    s => s
                        .parse::<i32>()
                        .map_err(|_| DecodeError::InvalidRun(s.to_owned()))?,
                };
                match state {
                    "!" => break 'lines_loop,
                    "o" => {
                        for _ in 0..run {
                            // cells are checked as they land, so a long run stops at the edge
                            if grid.get(cursor.x, cursor.y).is_none() {
                                return Err(DecodeError::OutOfBounds {
                                    x: cursor.x,
                                    y: cursor.y,
                                    width: grid.width(),
                                    height: grid.height(),
                                });
                            }
                            grid.set(cursor.x, cursor.y, true);
                            cursor.x = advance(cursor.x, 1)?;
                        }
                    }
                    "b" => cursor.x = advance(cursor.x, run)?,
                    "$" => {
                        cursor.x = 0;
                        cursor.y = advance(cursor.y, run)?;
                    }
                    _ => unreachable!(),
                }
            }
        }

        grid.ok_or(DecodeError::MissingHeader)
    }
}

impl RunLengthEncoded {
    /// The blank grid a pattern decodes into: the header size grown to `min_size`
    fn blank_grid(&self, (width, height): (usize, usize)) -> Result<LifeGrid, DecodeError> {
        let width = width.max(self.min_size.0);
        let height = height.max(self.min_size.1);
        if width == 0 || height == 0 {
            return Err(DecodeError::EmptyGrid { width, height });
        }
        // coordinates are i32, and one bool per cell has to fit in memory
        let max_side = i32::MAX as usize;
        let cells = width.checked_mul(height);
        if width > max_side || height > max_side || cells.is_none_or(|n| n > MAX_CELLS) {
            return Err(DecodeError::Oversized { width, height });
        }
        Ok(LifeGrid::blank(width, height))
    }
}

fn advance(coord: i32, run: i32) -> Result<i32, DecodeError> {
    coord
        .checked_add(run)
        .ok_or(DecodeError::RunOverflow { coord, run })
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotCodecError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Pretty-printed JSON of a [`GridSnapshot`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSnapshot;

impl Codec for JsonSnapshot {
    type Error = SnapshotCodecError;

    fn encode(&self, grid: &LifeGrid) -> Result<String, Self::Error> {
        Ok(serde_json::to_string_pretty(&grid.snapshot())?)
    }

    fn decode(&self, value: &str) -> Result<LifeGrid, Self::Error> {
        let snapshot: GridSnapshot = serde_json::from_str(value)?;
        Ok(LifeGrid::try_from(snapshot)?)
    }
}
