//! Orchard layout models

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::round_half_even;

/// Identifier of a block, in `1..=total_blocks`
pub type BlockId = u32;

/// Physical layout of an orchard divided into uniform blocks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrchardLayout {
    /// Planted area (ha in the default configuration)
    pub area: Decimal,
    /// Blocks per unit of area
    pub blocks_per_unit_area: u32,
    /// Trees in each block
    pub trees_per_block: u32,
}

impl OrchardLayout {
    /// Number of blocks, `round(area × blocks_per_unit_area)`.
    ///
    /// Rounds half to even. The result is signed: zero or negative means
    /// there is nothing to schedule. `None` when the product does not fit.
    pub fn total_blocks(&self) -> Option<i64> {
        calculate_total_blocks(self.area, self.blocks_per_unit_area)
    }

    /// Estimated tree count for a number of blocks
    pub fn trees_for(&self, block_count: usize) -> u64 {
        block_count as u64 * u64::from(self.trees_per_block)
    }
}

/// `round(area × blocks_per_unit_area)`, half to even.
///
/// `None` when the product overflows `Decimal` or the rounded count does
/// not fit an `i64`.
pub fn calculate_total_blocks(area: Decimal, blocks_per_unit_area: u32) -> Option<i64> {
    let raw = area.checked_mul(Decimal::from(blocks_per_unit_area))?;
    round_half_even(raw, 0).to_i64()
}

/// Block ids `1..=total_blocks`
pub fn block_ids(total_blocks: u32) -> Vec<BlockId> {
    (1..=total_blocks).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn layout(area: &str, per_unit: u32) -> OrchardLayout {
        OrchardLayout {
            area: Decimal::from_str(area).unwrap(),
            blocks_per_unit_area: per_unit,
            trees_per_block: 117,
        }
    }

    #[test]
    fn test_total_blocks_default_orchard() {
        assert_eq!(layout("1.0", 17).total_blocks(), Some(17));
        assert_eq!(layout("2.5", 17).total_blocks(), Some(42)); // 42.5 -> 42
        assert_eq!(layout("1.5", 17).total_blocks(), Some(26)); // 25.5 -> 26
    }

    #[test]
    fn test_total_blocks_overflow_is_none() {
        let huge = OrchardLayout {
            area: Decimal::MAX,
            blocks_per_unit_area: 17,
            trees_per_block: 117,
        };
        assert_eq!(huge.total_blocks(), None);
        assert_eq!(layout("1000000000", 17).total_blocks(), Some(17_000_000_000));
    }

    #[test]
    fn test_total_blocks_zero_and_negative_area() {
        assert_eq!(layout("0", 17).total_blocks(), Some(0));
        assert_eq!(layout("0.02", 17).total_blocks(), Some(0));
        assert_eq!(layout("-1", 17).total_blocks(), Some(-17));
    }

    #[test]
    fn test_trees_for() {
        assert_eq!(layout("1", 17).trees_for(3), 351);
        assert_eq!(layout("1", 17).trees_for(0), 0);
    }

    #[test]
    fn test_block_ids() {
        assert_eq!(block_ids(4), vec![1, 2, 3, 4]);
        assert!(block_ids(0).is_empty());
    }
}
