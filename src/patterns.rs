//! Ready-made starting universes.

use crate::{
    LifeGrid, Pos2,
    glider::{Configuration, Orientation},
};
use rand::{Rng, seq::IndexedRandom};

/// Side of the square tile each glider of a fleet occupies
const FLEET_TILE: i32 = 5;
const FLEET_SIZE: usize = 45;

/// Gosper glider gun, relative to its left block's top-left cell
#[rustfmt::skip]
const GOSPER_GUN: [(i32, i32); 36] = [
    (0, 0), (1, 0), (0, 1), (1, 1),
    (10, 0), (10, 1), (10, 2), (11, -1), (12, -2), (13, -2), (11, 3), (12, 4), (13, 4),
    (14, 1), (15, -1), (15, 3), (16, 0), (16, 1), (16, 2), (17, 1),
    (20, 0), (21, 0), (20, -1), (21, -1), (20, -2), (21, -2), (22, -3), (22, 1),
    (24, -3), (24, -4), (24, 1), (24, 2),
    (34, -1), (34, -2), (35, -1), (35, -2),
];

/// 2x2 still life with its top-left cell at `origin`
pub fn block(width: usize, height: usize, origin: Pos2) -> LifeGrid {
    let cells = [(0, 0), (1, 0), (0, 1), (1, 1)];
    LifeGrid::from_alive(width, height, cells.map(|c| origin + Pos2::from(c)))
}

/// Horizontal period-2 oscillator with its left cell at `origin`
pub fn blinker(width: usize, height: usize, origin: Pos2) -> LifeGrid {
    let cells = [(0, 0), (1, 0), (2, 0)];
    LifeGrid::from_alive(width, height, cells.map(|c| origin + Pos2::from(c)))
}

/// A single glider with an explicit orientation and configuration
pub fn lone_glider(
    width: usize,
    height: usize,
    origin: Pos2,
    orientation: Orientation,
    configuration: Option<Configuration>,
) -> LifeGrid {
    let mut grid = LifeGrid::blank(width, height);
    grid.stamp_glider(origin, orientation, configuration);
    grid
}

/// Gosper glider gun anchored near the top-left corner
///
/// Needs at least 40x14 cells to fire without hitting itself straight away;
/// smaller grids still get the pattern, wrapped.
pub fn glider_gun(width: usize, height: usize) -> LifeGrid {
    let anchor = Pos2::new(4, 9);
    if width < 40 || height < 14 {
        log::warn!("{width}x{height} grid is too small for a glider gun, it will wrap");
    }
    LifeGrid::from_alive(
        width,
        height,
        GOSPER_GUN.map(|c| anchor + Pos2::from(c)),
    )
}

/// Gliders in formation, one per 5x5 tile, all flying the same way
///
/// Tiles are filled left to right, top to bottom until [`FLEET_SIZE`] gliders
/// are placed or the grid runs out of whole tiles. A row moves on as soon as
/// the next tile would reach the last column.
pub fn glider_fleet<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> LifeGrid {
    let mut grid = LifeGrid::blank(width, height);
    let orientation = *Orientation::ALL.choose(rng).unwrap_or(&Orientation::North);
    let configuration = Configuration::random(rng);

    let fits = |tile: Pos2| {
        tile.x + FLEET_TILE <= width as i32 && tile.y + FLEET_TILE <= height as i32
    };
    let mut tile = Pos2::zero();
    let mut placed = 0;
    while placed < FLEET_SIZE && fits(tile) {
        if !tile_is_empty(&grid, tile) {
            break;
        }
        grid.stamp_glider(tile + Pos2::one(), orientation, Some(configuration));
        placed += 1;

        // the last column of a row is left free as a gap before the wrap
        tile.x += FLEET_TILE;
        if tile.x + FLEET_TILE >= width as i32 - 1 {
            tile = Pos2::new(0, tile.y + FLEET_TILE);
        }
    }

    if placed == 0 {
        log::warn!("{width}x{height} grid has no room for a {FLEET_TILE}x{FLEET_TILE} fleet tile");
    }
    log::debug!("fleet of {placed} gliders heading {orientation}");
    grid
}

fn tile_is_empty(grid: &LifeGrid, tile: Pos2) -> bool {
    (0..FLEET_TILE).all(|dy| {
        (0..FLEET_TILE).all(|dx| grid.get(tile.x + dx, tile.y + dy) != Some(true))
    })
}

/// Picks a value in `start..end`, or `start` when the range is empty
fn pick_in<R: Rng + ?Sized>(rng: &mut R, start: i32, end: i32) -> i32 {
    if start < end {
        rng.random_range(start..end)
    } else {
        start
    }
}

/// Two randomly oriented gliders in two distinct quadrants
///
/// Each glider sits at least 3 cells inside its quadrant. Sometimes they
/// collide, sometimes they don't.
pub fn duelling_gliders<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> LifeGrid {
    let (w, h) = (width as i32, height as i32);
    let (left, right) = ((3, w / 2 - 3), (w / 2 + 3, w - 3));
    let (top, bottom) = ((3, h / 2 - 3), (h / 2 + 3, h - 3));
    let quadrants = [(left, top), (right, top), (left, bottom), (right, bottom)];

    let mut grid = LifeGrid::blank(width, height);
    for quadrant in rand::seq::index::sample(rng, quadrants.len(), 2) {
        let ((x0, x1), (y0, y1)) = quadrants[quadrant];
        let origin = Pos2::new(pick_in(rng, x0, x1), pick_in(rng, y0, y1));
        let orientation = *Orientation::ALL.choose(rng).unwrap_or(&Orientation::North);
        log::debug!("duelling glider at ({}, {}) heading {orientation}", origin.x, origin.y);
        grid.stamp_glider_with(origin, orientation, None, rng);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn block_and_blinker_cell_counts() {
        assert_eq!(block(6, 6, Pos2::one()).alive_count(), 4);
        assert_eq!(blinker(6, 6, Pos2::one()).alive_count(), 3);
    }

    #[test]
    fn lone_glider_has_five_cells() {
        let grid = lone_glider(8, 8, Pos2::one(), Orientation::South, None);

        assert_eq!(grid.alive_count(), 5);
    }

    #[test]
    fn glider_gun_fires() {
        let gun = glider_gun(64, 32);
        assert_eq!(gun.alive_count(), GOSPER_GUN.len());

        // after one period the gun is back in shape with a glider on its way
        let fired = (0..30).fold(gun.clone(), |g, _| g.next_generation());
        assert!(gun.alive_cells().all(|p| fired.get(p.x, p.y) == Some(true)));
        assert_eq!(fired.alive_count(), GOSPER_GUN.len() + 5);
    }

    #[test]
    fn fleet_is_capped_at_forty_five_gliders() {
        let fleet = glider_fleet(200, 200, &mut StdRng::seed_from_u64(1));

        assert_eq!(fleet.alive_count(), FLEET_SIZE * 5);
    }

    #[test]
    fn fleet_stops_when_tiles_run_out() {
        // 3 tiles across, 2 down
        let fleet = glider_fleet(17, 12, &mut StdRng::seed_from_u64(2));

        assert_eq!(fleet.alive_count(), 6 * 5);
    }

    #[test]
    fn fleet_gliders_do_not_overlap_their_tiles() {
        // 27 wide leaves room for 5 tiles before the last column
        let fleet = glider_fleet(27, 25, &mut StdRng::seed_from_u64(3));

        // each 5x5 tile holds exactly one glider, its border stays empty
        for ty in 0..5 {
            for tx in 0..5 {
                let tile = Pos2::new(tx * 5, ty * 5);
                let count = fleet
                    .alive_cells()
                    .filter(|p| (tile.x..tile.x + 5).contains(&p.x))
                    .filter(|p| (tile.y..tile.y + 5).contains(&p.y))
                    .count();
                assert_eq!(count, 5);
                assert_eq!(fleet.get(tile.x, tile.y), Some(false));
            }
        }
    }

    #[test]
    fn fleet_row_wraps_before_the_last_column() {
        // tiles at x = 0, 5, 10; a tile at 15 would reach column 19
        let fleet = glider_fleet(20, 5, &mut StdRng::seed_from_u64(6));

        assert_eq!(fleet.alive_count(), 3 * 5);
        assert!(fleet.alive_cells().all(|p| p.x < 15));
    }

    #[test]
    fn fleet_on_a_tiny_grid_is_blank() {
        let fleet = glider_fleet(4, 4, &mut StdRng::seed_from_u64(4));

        assert_eq!(fleet.alive_count(), 0);
    }

    #[test]
    fn duel_places_two_gliders_in_distinct_quadrants() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let grid = duelling_gliders(60, 40, &mut rng);
            assert_eq!(grid.alive_count(), 10);

            let quadrants: std::collections::HashSet<_> = grid
                .alive_cells()
                .map(|p| (p.x >= 30, p.y >= 20))
                .collect();
            assert_eq!(quadrants.len(), 2);
        }
    }
}
