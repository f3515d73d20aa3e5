use std::sync::OnceLock;

/// The number of permutations for a 3x3 neighborhood of cells
const PERMUTATIONS: usize = 1 << 9;
type RuleTable = [bool; PERMUTATIONS];

/// Bit of the neighborhood mask holding the center cell
pub(super) const CENTER: u16 = 0b000_010_000;

/// Returns a Singleton lookup table for the B3/S23 ruleset
///
/// Equivalent to calling [`generate_rule_table`] once and storing the result
pub(super) fn rule_table() -> &'static RuleTable {
    static CELL: OnceLock<RuleTable> = OnceLock::new();
    CELL.get_or_init(generate_rule_table)
}

/// Birth on exactly 3 neighbors, survival on 2 or 3
#[inline]
pub(super) fn next_state(alive: bool, neighbors: u32) -> bool {
    matches!((alive, neighbors), (true, 2) | (_, 3))
}

/// Creates a lookup table for the B3/S23 ruleset
///
/// The table is indexed by a 9-bit mask of a cell and its Moore neighborhood,
/// bit `(dy + 1) * 3 + (dx + 1)` holding the cell at offset `(dx, dy)`.
/// The center cell is the middle-most bit, [`CENTER`].
fn generate_rule_table() -> RuleTable {
    let mut table = [false; PERMUTATIONS];
    for (mask, entry) in table.iter_mut().enumerate() {
        let mask = mask as u16;
        *entry = next_state(mask & CENTER != 0, (mask & !CENTER).count_ones());
    }
    table
}
