//! Whole-table checks over all 256 neighbor masks.
//!
//! Injectivity is a property of the resolver table as a whole, so it is
//! checked here rather than inside [`resolve`].

use std::collections::BTreeMap;

use crate::neighbors::{resolve, NeighborMask, SlotResult, SLOT_COUNT};

/// Two masks that resolved to the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotConflict {
    pub slot: u8,
    /// Mask that held the slot before
    pub first: NeighborMask,
    /// Mask that took the slot over
    pub second: NeighborMask,
}

#[derive(Clone, Debug, Default)]
pub struct TableReport {
    /// Final owner of each slot. On conflict the later mask wins, matching
    /// what ends up in the atlas.
    pub assignments: BTreeMap<u8, NeighborMask>,
    pub conflicts: Vec<SlotConflict>,
    /// Masks no rule classified
    pub fallout: Vec<NeighborMask>,
    pub invalid: usize,
}

impl TableReport {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty() && self.fallout.is_empty()
    }

    /// Slots in 0..SLOT_COUNT that no mask produced.
    pub fn missing_slots(&self) -> Vec<u8> {
        (0..SLOT_COUNT as u8)
            .filter(|slot| !self.assignments.contains_key(slot))
            .collect()
    }

    /// One line per table problem: fallout, conflicts, then empty slots.
    pub fn warnings(&self) -> Vec<String> {
        let fallout = self
            .fallout
            .iter()
            .map(|mask| format!("Fallout for mask {}", mask));
        let conflicts = self.conflicts.iter().map(|conflict| {
            format!(
                "Conflict for slot {} ({} and {})",
                conflict.slot, conflict.second, conflict.first
            )
        });
        let missing = self
            .missing_slots()
            .into_iter()
            .map(|slot| format!("No mask resolves to slot {}", slot));

        fallout.chain(conflicts).chain(missing).collect()
    }

    /// Emit the table problems through the log.
    pub fn log_problems(&self) {
        for warning in self.warnings() {
            log::warn!("{}", warning);
        }
        log::debug!(
            "Resolver table: {} slots, {} invalid masks, {} conflicts, {} fallout",
            self.assignments.len(),
            self.invalid,
            self.conflicts.len(),
            self.fallout.len()
        );
    }
}

/// Run `resolver` over every mask in ascending order.
pub fn verify_with<F>(resolver: F) -> TableReport
where
    F: Fn(NeighborMask) -> SlotResult,
{
    let mut report = TableReport::default();

    for mask in NeighborMask::all() {
        match resolver(mask) {
            SlotResult::Invalid => report.invalid += 1,
            SlotResult::Unclassified => report.fallout.push(mask),
            SlotResult::Slot(slot) => {
                if let Some(first) = report.assignments.insert(slot, mask) {
                    report.conflicts.push(SlotConflict {
                        slot,
                        first,
                        second: mask,
                    });
                }
            }
        }
    }

    report
}

/// Verify the built-in resolver table.
pub fn verify_table() -> TableReport {
    verify_with(resolve)
}
