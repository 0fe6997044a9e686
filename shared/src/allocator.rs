//! Weekly block allocation
//!
//! Spreads a week's watering assignments across its eligible days using
//! leveled per-day targets. Each pass over the blocks rotates both the block
//! order and the day-search order so repeats land on different days, and a
//! block is kept off a day it already occupies whenever the targets allow.
//!
//! The day-search order is decided by rotation only, never by how much
//! capacity a day has left.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::BlockId;

/// Blocks assigned to one day
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayAssignment {
    pub date: NaiveDate,
    /// Per-day target the allocator leveled towards
    pub target: u32,
    pub blocks: Vec<BlockId>,
}

/// Result of allocating one week
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct WeekAllocation {
    /// One entry per eligible day, in day order
    pub days: Vec<DayAssignment>,
}

impl WeekAllocation {
    pub fn assigned(&self) -> usize {
        self.days.iter().map(|day| day.blocks.len()).sum()
    }

    pub fn blocks_on(&self, date: NaiveDate) -> &[BlockId] {
        self.days
            .iter()
            .find(|day| day.date == date)
            .map_or(&[], |day| day.blocks.as_slice())
    }
}

/// `items` rotated left by `k` positions (`k` taken modulo the length)
pub fn rotate_left<T: Clone>(items: &[T], k: usize) -> Vec<T> {
    if items.is_empty() {
        return Vec::new();
    }
    let k = k % items.len();
    items[k..].iter().chain(&items[..k]).cloned().collect()
}

/// Even split of `assignable` over `day_count` days, capped per day.
///
/// The first `assignable % day_count` days get one extra.
pub fn even_targets(day_count: usize, assignable: u32, max_per_day: u32) -> Vec<u32> {
    if day_count == 0 {
        return Vec::new();
    }
    let days = day_count as u32;
    let base = assignable / days;
    let remainder = (assignable % days) as usize;
    (0..day_count)
        .map(|i| {
            let target = base + u32::from(i < remainder);
            target.min(max_per_day)
        })
        .collect()
}

/// Working set for one week. Lives only for a single `allocate` call.
struct WeekLedger {
    remaining: Vec<u32>,
    lists: Vec<Vec<BlockId>>,
}

impl WeekLedger {
    fn holds(&self, day: usize, block: BlockId) -> bool {
        self.lists[day].contains(&block)
    }

    fn place(&mut self, day: usize, block: BlockId) {
        self.lists[day].push(block);
        self.remaining[day] -= 1;
    }

    /// Find a day to place `block` on, scanning from `cursor` for at most one
    /// lap. Advances `cursor` past every rejected day.
    fn seek(
        &self,
        order: &[usize],
        cursor: &mut usize,
        block: BlockId,
        allow_duplicate: bool,
    ) -> Option<usize> {
        for _ in 0..order.len() {
            let day = order[*cursor % order.len()];
            if self.remaining[day] > 0 && (allow_duplicate || !self.holds(day, block)) {
                return Some(day);
            }
            *cursor += 1;
        }
        None
    }

    /// Make room for `block` without duplicating it.
    ///
    /// Every day with capacity left already holds `block`. Look for a full
    /// day `x` without `block` holding some block `c` that a day `y` with
    /// capacity left does not hold; put `block` in `c`'s slot on `x` and
    /// return `(y, c)` for the caller to place.
    fn swap_in(&mut self, order: &[usize], block: BlockId) -> Option<(usize, BlockId)> {
        for &x in order {
            if self.holds(x, block) {
                continue;
            }
            for slot in 0..self.lists[x].len() {
                let moved = self.lists[x][slot];
                let target = order
                    .iter()
                    .copied()
                    .find(|&y| self.remaining[y] > 0 && !self.holds(y, moved));
                if let Some(y) = target {
                    self.lists[x][slot] = block;
                    return Some((y, moved));
                }
            }
        }
        None
    }
}

/// Allocate one week's assignments across `days`.
///
/// Runs `events_per_week` passes over `block_ids`, stopping once
/// `assignable` assignments are placed. No day receives more than its
/// leveled target, so no day exceeds `max_blocks_per_day`.
pub fn allocate(
    block_ids: &[BlockId],
    days: &[NaiveDate],
    events_per_week: u32,
    max_blocks_per_day: u32,
    assignable: u32,
) -> WeekAllocation {
    let day_count = days.len();
    if day_count == 0 {
        return WeekAllocation::default();
    }

    let targets = even_targets(day_count, assignable, max_blocks_per_day);
    let mut ledger = WeekLedger {
        remaining: targets.clone(),
        lists: vec![Vec::new(); day_count],
    };
    let day_indices: Vec<usize> = (0..day_count).collect();
    let mut assigned: u32 = 0;

    for pass in 0..events_per_week as usize {
        let blocks = rotate_left(block_ids, pass);
        let order = rotate_left(&day_indices, pass % day_count);
        let mut cursor = 0usize;

        for &block in &blocks {
            if assigned >= assignable {
                break;
            }

            let placement = ledger
                .seek(&order, &mut cursor, block, false)
                .map(|day| (day, block))
                .or_else(|| ledger.swap_in(&order, block))
                .or_else(|| {
                    ledger
                        .seek(&order, &mut cursor, block, true)
                        .map(|day| (day, block))
                });

            // capacity exhausted for this pass
            let Some((day, placed)) = placement else { break };

            ledger.place(day, placed);
            assigned += 1;
            cursor += 1;
        }
    }

    let days = days
        .iter()
        .zip(targets)
        .zip(ledger.lists)
        .map(|((&date, target), blocks)| DayAssignment {
            date,
            target,
            blocks,
        })
        .collect();

    WeekAllocation { days }
}
