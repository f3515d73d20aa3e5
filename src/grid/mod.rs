mod rule;
mod snapshot;

pub use self::snapshot::{GridSnapshot, SnapshotError};
use crate::{
    Pos2,
    glider::{self, Configuration, Orientation},
};
use rayon::prelude::*;

/// One generation of a finite toroidal Game of Life universe
///
/// Cells are stored row-major, `index = y * width + x`. Stepping with
/// [`LifeGrid::next_generation`] never touches the receiver and returns a new
/// grid, while [`LifeGrid::set`] and [`LifeGrid::stamp_glider`] edit in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeGrid {
    width: usize,
    height: usize,
    generation: u64,
    cells: Vec<bool>,
}

impl LifeGrid {
    /// A grid with every cell dead
    pub fn blank(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            generation: 0,
            cells: vec![false; width * height],
        }
    }

    /// A grid where each cell is independently alive with probability 0.5
    pub fn fresh(width: usize, height: usize) -> Self {
        Self::fresh_with(width, height, &mut rand::rng())
    }

    pub fn fresh_with<R: rand::Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        let mut grid = Self::blank(width, height);
        grid.cells.iter_mut().for_each(|cell| *cell = rng.random_bool(0.5));
        grid
    }

    /// A blank grid with the given positions set alive, wrapped onto the torus
    pub fn from_alive<I>(width: usize, height: usize, alive: I) -> Self
    where
        I: IntoIterator<Item = Pos2>,
    {
        let mut grid = Self::blank(width, height);
        for pos in alive {
            grid.set_wrapping(pos, true);
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// The state of the cell at `(x, y)`, or [`None`] if it lies outside the grid
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<bool> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Writes the cell at `(x, y)` and returns the written state
    ///
    /// # Panics
    /// If `(x, y)` lies outside the grid. Callers are expected to check bounds
    /// with [`LifeGrid::get`] or to go through [`LifeGrid::stamp_glider`], which
    /// wraps.
    pub fn set(&mut self, x: i32, y: i32, alive: bool) -> bool {
        let Some(i) = self.index(x, y) else {
            panic!(
                "cell ({x}, {y}) is outside the {}x{} grid",
                self.width, self.height
            );
        };
        self.cells[i] = alive;
        alive
    }

    fn set_wrapping(&mut self, pos: Pos2, alive: bool) -> bool {
        let pos = pos.wrap(self.width, self.height);
        self.set(pos.x, pos.y, alive)
    }

    /// 9-bit mask of the cell at `(x, y)` and its Moore neighborhood, see [`rule`]
    ///
    /// Neighbors wrap toroidally. A neighbor that wraps back onto the center
    /// itself (on grids 1 cell wide or high) is treated as dead.
    fn neighborhood(&self, x: i32, y: i32) -> u16 {
        let center = Pos2::new(x, y).wrap(self.width, self.height);
        let mut mask: u16 = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let bit = ((dy + 1) * 3 + (dx + 1)) as u16;
                let pos = Pos2::new(center.x + dx, center.y + dy).wrap(self.width, self.height);
                let is_center = (dx, dy) == (0, 0);
                if pos == center && !is_center {
                    continue;
                }
                let i = pos.y as usize * self.width + pos.x as usize;
                if self.cells[i] {
                    mask |= 1u16 << bit;
                }
            }
        }
        mask
    }

    /// Number of live cells among the 8 neighbors of `(x, y)`, in `0..=8`
    pub fn living_neighbor_count(&self, x: i32, y: i32) -> u8 {
        (self.neighborhood(x, y) & !rule::CENTER).count_ones() as u8
    }

    /// Whether the cell at `(x, y)` is alive in the next generation
    #[inline]
    pub fn will_live(&self, x: i32, y: i32) -> bool {
        rule::rule_table()[self.neighborhood(x, y) as usize]
    }

    /// Computes the following generation from this one
    pub fn next_generation(&self) -> Self {
        let cells = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x as i32, y as i32)))
            .map(|(x, y)| self.will_live(x, y))
            .collect();
        self.successor(cells)
    }

    /// Same as [`LifeGrid::next_generation`], with rows split across the rayon pool
    pub fn next_generation_parallel(&self) -> Self {
        let mut cells = vec![false; self.cells.len()];
        cells
            .par_chunks_mut(self.width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = self.will_live(x as i32, y as i32);
                }
            });
        self.successor(cells)
    }

    fn successor(&self, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), self.cells.len(), "successor changed size");
        Self {
            width: self.width,
            height: self.height,
            generation: self.generation + 1,
            cells,
        }
    }

    /// Sets the 5 cells of a glider alive inside the 3x3 box starting at `origin`
    ///
    /// Without a `configuration` one of the two mirror phases is picked at random.
    /// Cells past an edge wrap onto the opposite side.
    pub fn stamp_glider(
        &mut self,
        origin: Pos2,
        orientation: Orientation,
        configuration: Option<Configuration>,
    ) {
        self.stamp_glider_with(origin, orientation, configuration, &mut rand::rng());
    }

    pub fn stamp_glider_with<R: rand::Rng + ?Sized>(
        &mut self,
        origin: Pos2,
        orientation: Orientation,
        configuration: Option<Configuration>,
        rng: &mut R,
    ) {
        let configuration = configuration.unwrap_or_else(|| Configuration::random(rng));
        for cell in glider::glider_cells(origin, orientation, configuration) {
            self.set_wrapping(cell, true);
        }
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Live cells in row-major order
    pub fn alive_cells(&self) -> impl Iterator<Item = Pos2> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(i, _)| Pos2::new((i % width) as i32, (i / width) as i32))
    }
}
