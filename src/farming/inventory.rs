//! Seed counts per hotkey slot.

use crate::shared::*;

impl SeedInventory {
    /// Spread `target` seeds over the three slots as evenly as possible,
    /// earlier slots taking the remainder.
    pub fn from_target(target: u32) -> Self {
        let q = target / 3;
        let r = target % 3;
        Self {
            counts: [q + u32::from(r > 0), q + u32::from(r > 1), q],
        }
    }

    pub fn count(&self, kind: SeedKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn has(&self, kind: SeedKind) -> bool {
        self.count(kind) > 0
    }

    /// Spend one seed. Returns false when the slot is already empty.
    pub fn take(&mut self, kind: SeedKind) -> bool {
        let slot = &mut self.counts[kind.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}
