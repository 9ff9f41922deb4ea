//! Neighbor occupancy masks and the mask -> atlas slot classification.

use std::fmt;

use serde::Serialize;

/// Number of atlas slots the resolver can produce (0..=45).
pub const SLOT_COUNT: usize = 46;

/// Which of the 8 surrounding cells occlude.
///
/// Bits 0..3 are the edges (n, e, s, w), bits 4..7 the corners
/// (nw, ne, se, sw).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NeighborMask(pub u8);

impl NeighborMask {
    pub const NORTH: u8 = 1 << 0;
    pub const EAST: u8 = 1 << 1;
    pub const SOUTH: u8 = 1 << 2;
    pub const WEST: u8 = 1 << 3;
    pub const NORTH_WEST: u8 = 1 << 4;
    pub const NORTH_EAST: u8 = 1 << 5;
    pub const SOUTH_EAST: u8 = 1 << 6;
    pub const SOUTH_WEST: u8 = 1 << 7;

    pub const EDGES: u8 = 0x0F;
    pub const CORNERS: u8 = 0xF0;

    const NAMES: [&'static str; 8] = ["n", "e", "s", "w", "nw", "ne", "se", "sw"];

    /// Every possible mask, in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=u8::MAX).map(Self)
    }

    #[inline]
    pub fn contains(self, bits: u8) -> bool {
        self.0 & bits == bits
    }

    pub fn north(self) -> bool {
        self.contains(Self::NORTH)
    }

    pub fn east(self) -> bool {
        self.contains(Self::EAST)
    }

    pub fn south(self) -> bool {
        self.contains(Self::SOUTH)
    }

    pub fn west(self) -> bool {
        self.contains(Self::WEST)
    }

    pub fn north_west(self) -> bool {
        self.contains(Self::NORTH_WEST)
    }

    pub fn north_east(self) -> bool {
        self.contains(Self::NORTH_EAST)
    }

    pub fn south_east(self) -> bool {
        self.contains(Self::SOUTH_EAST)
    }

    pub fn south_west(self) -> bool {
        self.contains(Self::SOUTH_WEST)
    }

    pub fn has_edges(self) -> bool {
        self.0 & Self::EDGES != 0
    }

    pub fn has_corners(self) -> bool {
        self.0 & Self::CORNERS != 0
    }

    /// Short names of the set flags, e.g. `["n", "se"]`.
    pub fn flag_names(self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .enumerate()
            .filter(|(i, _)| self.0 & (1 << i) != 0)
            .map(|(_, name)| *name)
            .collect()
    }
}

impl fmt::Display for NeighborMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "{:3} (none)", self.0);
        }
        write!(f, "{:3} ({})", self.0, self.flag_names().join("|"))
    }
}

/// Outcome of classifying a mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotResult {
    /// A corner next to one of its own edges, or no neighbors at all.
    /// Nothing to draw; skipped silently.
    Invalid,
    /// No rule matched. Means the table has a hole, not a runtime failure.
    Unclassified,
    Slot(u8),
}

impl SlotResult {
    pub fn slot(self) -> Option<u8> {
        match self {
            SlotResult::Slot(slot) => Some(slot),
            _ => None,
        }
    }
}

#[inline]
fn bit(flag: bool, value: u8) -> u8 {
    if flag { value } else { 0 }
}

/// Map a neighbor mask to its atlas slot. First matching rule wins.
///
/// | slots  | shape                                          |
/// |--------|------------------------------------------------|
/// | 0..14  | edges only                                     |
/// | 15..29 | corners only                                   |
/// | 30..33 | two adjacent corners and the opposite edge     |
/// | 34..45 | one corner with one or both of its far edges   |
pub fn resolve(mask: NeighborMask) -> SlotResult {
    let (n, e, s, w) = (mask.north(), mask.east(), mask.south(), mask.west());
    let (nw, ne, se, sw) = (
        mask.north_west(),
        mask.north_east(),
        mask.south_east(),
        mask.south_west(),
    );

    // A corner is swallowed by either edge it touches
    if (nw && (n || w)) || (se && (s || e)) || (sw && (s || w)) || (ne && (n || e)) {
        return SlotResult::Invalid;
    }

    if !mask.has_corners() {
        let code = bit(n, 1) | bit(e, 2) | bit(s, 4) | bit(w, 8);
        return match code {
            0 => SlotResult::Invalid,
            code => SlotResult::Slot(code - 1),
        };
    }

    if !mask.has_edges() {
        return SlotResult::Slot(14 + (bit(nw, 1) | bit(ne, 2) | bit(se, 4) | bit(sw, 8)));
    }

    if nw && ne && s {
        return SlotResult::Slot(30);
    }
    if ne && se && w {
        return SlotResult::Slot(31);
    }
    if sw && se && n {
        return SlotResult::Slot(32);
    }
    if sw && nw && e {
        return SlotResult::Slot(33);
    }

    if nw && (s || e) {
        return SlotResult::Slot(33 + (bit(s, 1) | bit(e, 2)));
    }
    if ne && (s || w) {
        return SlotResult::Slot(36 + (bit(s, 1) | bit(w, 2)));
    }
    if se && (n || w) {
        return SlotResult::Slot(39 + (bit(n, 1) | bit(w, 2)));
    }
    if sw && (n || e) {
        return SlotResult::Slot(42 + (bit(n, 1) | bit(e, 2)));
    }

    SlotResult::Unclassified
}
