//! Rule fixtures with known behaviour.
//!
//! - [`identity_code`]: every cell keeps its value.
//! - [`all_ones_code`] / [`all_zeros_code`]: every updating cell becomes 1 / 0.
//! - [`parity_rule`]: next value is the parity of the live count.
//! - [`centre_weight_rule`]: only the lone-centre pattern survives.

use moore_core::rule::CENTRE_WEIGHT;
use moore_core::{RuleTable, RULE_SIZE};

/// Code of the rule whose entry `i` is the centre bit of `i`.
pub fn identity_code() -> String {
    RuleTable::identity().code()
}

/// 512 ones.
pub fn all_ones_code() -> String {
    "1".repeat(RULE_SIZE)
}

/// 512 zeros.
pub fn all_zeros_code() -> String {
    "0".repeat(RULE_SIZE)
}

/// Live count parity: entry `i` is 1 when `i` has an odd number of set bits.
pub fn parity_rule() -> RuleTable {
    RuleTable::from_fn(|i| i.count_ones() % 2 == 1)
}

/// A cell lives only when it is alive and all eight neighbours are dead.
pub fn centre_weight_rule() -> RuleTable {
    RuleTable::from_fn(|i| i == CENTRE_WEIGHT)
}
