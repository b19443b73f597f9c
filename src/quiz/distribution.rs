//! Answer values spread across the blocks

use serde::{Deserialize, Serialize};

/// Values shown on each block and which block holds the answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    /// One value per block, in block order
    pub slot_values: Vec<u32>,
    /// Index of the block showing the result
    pub correct_index: usize,
}

impl Distribution {
    pub fn slot_count(&self) -> usize {
        self.slot_values.len()
    }

    pub fn correct_value(&self) -> Option<u32> {
        self.slot_values.get(self.correct_index).copied()
    }

    /// True only for the answer block; out-of-range slots are never correct
    pub fn is_correct(&self, slot: usize) -> bool {
        slot < self.slot_values.len() && slot == self.correct_index
    }

    /// Pairwise distinctness of all slot values.
    ///
    /// Tiny result ranges can repeat values; callers that must show
    /// distinct blocks check this.
    pub fn is_distinct(&self) -> bool {
        self.slot_values
            .iter()
            .enumerate()
            .all(|(i, v)| !self.slot_values[i + 1..].contains(v))
    }
}
