use crate::{
    rng::RandomNumberGenerator,
    schedule::{ScheduleGrid, SlotRole},
};

/// Swap mutation that moves class blocks as units.
///
/// Every cell is visited once; with probability `mutation_rate` a second
/// random cell is drawn and the blocks starting at both cells are exchanged.
/// The input grid is never modified.
///
/// A swap is skipped when either cell is the continuation of a class, when
/// the swapped windows would run past the end of a row or cut through a
/// class at their right edge, or when both windows overlap in one row.
pub fn mutate(
    grid: &ScheduleGrid,
    mutation_rate: f64,
    rng: &mut RandomNumberGenerator,
) -> ScheduleGrid {
    let mut mutated = grid.clone();
    if grid.is_empty() {
        return mutated;
    }

    let num_students = grid.num_students();
    let num_slots = grid.num_slots();

    for student in 0..num_students {
        for slot in 0..num_slots {
            if !rng.gen_chance(mutation_rate) {
                continue;
            }
            let target = (rng.gen_index(num_students), rng.gen_index(num_slots));
            swap_blocks(&mut mutated, (student, slot), target);
        }
    }

    mutated
}

/// Exchanges the blocks starting at `source` and `target`.
///
/// Both windows are as wide as the wider of the two blocks, so a two-slot
/// class swapped with a one-slot cell takes its neighbour along. Returns
/// `false` if the swap was skipped.
pub(crate) fn swap_blocks(
    grid: &mut ScheduleGrid,
    source: (usize, usize),
    target: (usize, usize),
) -> bool {
    let source_width = grid.block_width(source.0, source.1);
    let target_width = grid.block_width(target.0, target.1);
    if source_width == 0 || target_width == 0 {
        return false;
    }

    let width = source_width.max(target_width);
    let num_slots = grid.num_slots();
    if source.1 + width > num_slots || target.1 + width > num_slots {
        return false;
    }
    if source.0 == target.0 && source.1.abs_diff(target.1) < width {
        return false;
    }
    if !closes_block(grid, source, width) || !closes_block(grid, target, width) {
        return false;
    }

    for offset in 0..width {
        grid.swap_cells(
            (source.0, source.1 + offset),
            (target.0, target.1 + offset),
        );
    }

    grid.refresh_roles(source.0);
    if target.0 != source.0 {
        grid.refresh_roles(target.0);
    }
    true
}

/// True if the window of `width` slots starting at `start` ends on a
/// block boundary.
fn closes_block(grid: &ScheduleGrid, start: (usize, usize), width: usize) -> bool {
    grid.role(start.0, start.1 + width) != SlotRole::Continuation
}
