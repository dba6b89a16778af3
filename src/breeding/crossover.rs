use crate::{
    rng::RandomNumberGenerator,
    schedule::{Cell, ClassTag, ScheduleGrid, SlotRole},
};

/// Single-point crossover that never splits a class block.
///
/// A crossover point `c` in `[0, num_slots)` is drawn once and shared by every
/// student row. Slots before `c` come from `parent_a`, the rest from
/// `parent_b`, except that a class started in the child always keeps its
/// remaining slots, whichever parent they would otherwise come from.
///
/// Parents of different shape, or an empty parent, yield a copy of
/// `parent_a`.
pub fn crossover(
    parent_a: &ScheduleGrid,
    parent_b: &ScheduleGrid,
    rng: &mut RandomNumberGenerator,
) -> ScheduleGrid {
    if !compatible(parent_a, parent_b) {
        return parent_a.clone();
    }

    let point = rng.gen_index(parent_a.num_slots());
    crossover_at(parent_a, parent_b, point)
}

/// Crossover with an explicit point. `0` reproduces `parent_b` and any
/// point at or past `num_slots` reproduces `parent_a`.
pub fn crossover_at(parent_a: &ScheduleGrid, parent_b: &ScheduleGrid, point: usize) -> ScheduleGrid {
    if !compatible(parent_a, parent_b) {
        return parent_a.clone();
    }

    let rows = (0..parent_a.num_students())
        .map(|student| cross_row(parent_a, parent_b, student, point))
        .collect();

    ScheduleGrid::from_rows_unchecked(rows)
}

fn compatible(parent_a: &ScheduleGrid, parent_b: &ScheduleGrid) -> bool {
    !parent_a.is_empty() && !parent_b.is_empty() && parent_a.same_shape(parent_b)
}

fn cross_row<'g>(
    parent_a: &'g ScheduleGrid,
    parent_b: &'g ScheduleGrid,
    student: usize,
    point: usize,
) -> Vec<Cell> {
    let num_slots = parent_a.num_slots();
    let mut row = Vec::with_capacity(num_slots);
    let mut carried: Option<&'g ClassTag> = None;
    let mut remaining = 0;

    for slot in 0..num_slots {
        if remaining > 0 {
            row.push(carried.cloned());
            remaining -= 1;
            continue;
        }

        let parent = if slot < point { parent_a } else { parent_b };

        // A continuation whose start was not copied, or a class that would
        // run past the last slot, leaves the cell empty.
        let cell = match parent.role(student, slot) {
            SlotRole::Start => parent
                .cell(student, slot)
                .filter(|tag| slot + tag.duration <= num_slots),
            SlotRole::Empty | SlotRole::Continuation => None,
        };

        if let Some(tag) = cell {
            carried = Some(tag);
            remaining = tag.duration.saturating_sub(1);
        }
        row.push(cell.cloned());
    }

    row
}
