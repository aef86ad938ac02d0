//! The 512-entry neighbourhood → next-state lookup table.
//!
//! A Moore neighbourhood (a cell plus its eight neighbours) is encoded
//! as a 9-bit index by scanning the 3×3 block in [`SCAN_ORDER`] and
//! giving the k-th position weight `2^k`. The centre cell is the fifth
//! position and contributes weight 16.
//!
//! Rule codes are 512-character strings over `{'0','1'}`; character `i`
//! is the next state for neighbourhood index `i`.

use std::fmt;
use std::str::FromStr;

use crate::error::{RuleCodeError, RuleError};

/// Number of entries in a rule table (`2^9`).
pub const RULE_SIZE: usize = 512;

/// Columns in the rule inspector tiling.
pub const TILE_COLS: usize = 32;

/// Rows in the rule inspector tiling.
pub const TILE_ROWS: usize = RULE_SIZE / TILE_COLS;

/// `(dx, dy)` offsets in neighbourhood scan order: `dx` outer, `dy` inner.
///
/// Position `k` in this array contributes `2^k` to the neighbourhood index.
pub const SCAN_ORDER: [(i32, i32); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Weight of the centre cell in a neighbourhood index.
pub const CENTRE_WEIGHT: usize = 16;

/// A complete binary transition table over all 512 Moore neighbourhoods.
///
/// Tables are values: [`toggle`](RuleTable::toggle) returns a new table
/// and leaves `self` untouched.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RuleTable {
    bits: [bool; RULE_SIZE],
}

impl RuleTable {
    /// Parse a 512-character `'0'`/`'1'` code.
    ///
    /// Loading the same code twice yields equal tables.
    ///
    /// # Errors
    ///
    /// [`RuleCodeError::WrongLength`] if the code is not exactly 512
    /// characters, otherwise [`RuleCodeError::InvalidChar`] for the first
    /// character outside the binary alphabet.
    pub fn load(code: &str) -> Result<Self, RuleCodeError> {
        let len = code.chars().count();
        if len != RULE_SIZE {
            return Err(RuleCodeError::WrongLength { len });
        }
        let mut bits = [false; RULE_SIZE];
        for (index, ch) in code.chars().enumerate() {
            bits[index] = match ch {
                '0' => false,
                '1' => true,
                found => return Err(RuleCodeError::InvalidChar { index, found }),
            };
        }
        Ok(Self { bits })
    }

    /// Build a table by evaluating `f` at every neighbourhood index.
    pub fn from_fn(mut f: impl FnMut(usize) -> bool) -> Self {
        let mut bits = [false; RULE_SIZE];
        for (i, b) in bits.iter_mut().enumerate() {
            *b = f(i);
        }
        Self { bits }
    }

    /// A table whose every entry is `bit`.
    pub fn constant(bit: bool) -> Self {
        Self {
            bits: [bit; RULE_SIZE],
        }
    }

    /// The table that maps every neighbourhood to its centre cell.
    pub fn identity() -> Self {
        Self::from_fn(|i| i & CENTRE_WEIGHT != 0)
    }

    /// Return a copy with the entry at `index` flipped.
    ///
    /// `t.toggle(i)?.toggle(i)? == t` for every table and valid index.
    pub fn toggle(&self, index: usize) -> Result<Self, RuleError> {
        if index >= RULE_SIZE {
            return Err(RuleError::IndexOutOfRange { index });
        }
        let mut next = self.clone();
        next.bits[index] = !next.bits[index];
        Ok(next)
    }

    /// Next state for a neighbourhood index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 512`. Indices built by scanning a 3×3 block are
    /// always in range; use [`get`](RuleTable::get) for untrusted input.
    #[inline]
    pub fn lookup(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// Checked variant of [`lookup`](RuleTable::lookup).
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// The table rendered back to its 512-character code.
    pub fn code(&self) -> String {
        self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    /// Iterate entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Number of neighbourhoods mapped to 1.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    // ── Inspector geometry ──────────────────────────────────────

    /// Entry shown at inspector tile `(col, row)`, or `None` off the tiling.
    pub fn tile_index(col: usize, row: usize) -> Option<usize> {
        (col < TILE_COLS && row < TILE_ROWS).then_some(row * TILE_COLS + col)
    }

    /// Inspector tile `(col, row)` for an entry.
    pub fn tile_position(index: usize) -> Option<(usize, usize)> {
        (index < RULE_SIZE).then_some((index % TILE_COLS, index / TILE_COLS))
    }

    /// Decode a neighbourhood index into its 3×3 pattern.
    ///
    /// `pattern[dx + 1][dy + 1]` is the state of the cell at offset
    /// `(dx, dy)`. Only the low 9 bits of `index` are used.
    pub fn neighbourhood_pattern(index: usize) -> [[bool; 3]; 3] {
        let mut pattern = [[false; 3]; 3];
        for (k, (dx, dy)) in SCAN_ORDER.iter().enumerate() {
            pattern[(dx + 1) as usize][(dy + 1) as usize] = (index >> k) & 1 == 1;
        }
        pattern
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleTable")
            .field("ones", &self.count_ones())
            .field("code", &self.code())
            .finish()
    }
}

impl FromStr for RuleTable {
    type Err = RuleCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::load(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn zeros() -> String {
        "0".repeat(RULE_SIZE)
    }

    #[test]
    fn load_all_zeros() {
        let t = RuleTable::load(&zeros()).unwrap();
        assert_eq!(t.count_ones(), 0);
        assert_eq!(t, RuleTable::constant(false));
    }

    #[test]
    fn load_rejects_short_code() {
        let err = RuleTable::load("0101").unwrap_err();
        assert_eq!(err, RuleCodeError::WrongLength { len: 4 });
    }

    #[test]
    fn load_rejects_long_code() {
        let code = "1".repeat(RULE_SIZE + 1);
        let err = RuleTable::load(&code).unwrap_err();
        assert_eq!(err, RuleCodeError::WrongLength { len: 513 });
    }

    #[test]
    fn load_rejects_non_binary_char() {
        let mut code = zeros();
        code.replace_range(100..101, "2");
        let err = RuleTable::load(&code).unwrap_err();
        assert_eq!(
            err,
            RuleCodeError::InvalidChar {
                index: 100,
                found: '2'
            }
        );
    }

    #[test]
    fn load_counts_chars_not_bytes() {
        // 511 ASCII digits plus one two-byte char: 512 chars, 513 bytes.
        let code = format!("{}é", "0".repeat(RULE_SIZE - 1));
        let err = RuleTable::load(&code).unwrap_err();
        assert_eq!(
            err,
            RuleCodeError::InvalidChar {
                index: 511,
                found: 'é'
            }
        );
    }

    #[test]
    fn lookup_matches_code_position() {
        let mut code = zeros();
        code.replace_range(290..291, "1");
        let t = RuleTable::load(&code).unwrap();
        assert!(t.lookup(290));
        assert!(!t.lookup(289));
        assert_eq!(t.get(512), None);
    }

    #[test]
    fn identity_reads_centre_bit() {
        let t = RuleTable::identity();
        assert!(t.lookup(CENTRE_WEIGHT));
        assert!(!t.lookup(RULE_SIZE - 1 - CENTRE_WEIGHT));
        assert_eq!(t.count_ones(), RULE_SIZE / 2);
    }

    #[test]
    fn toggle_rejects_out_of_range() {
        let t = RuleTable::constant(false);
        assert_eq!(
            t.toggle(RULE_SIZE),
            Err(RuleError::IndexOutOfRange { index: RULE_SIZE })
        );
    }

    #[test]
    fn toggle_leaves_source_untouched() {
        let t = RuleTable::constant(false);
        let u = t.toggle(3).unwrap();
        assert!(!t.lookup(3));
        assert!(u.lookup(3));
        assert_eq!(u.count_ones(), 1);
    }

    #[test]
    fn scan_order_centre_has_weight_16() {
        let k = SCAN_ORDER.iter().position(|&o| o == (0, 0)).unwrap();
        assert_eq!(1usize << k, CENTRE_WEIGHT);
    }

    #[test]
    fn tile_geometry() {
        assert_eq!(TILE_ROWS, 16);
        assert_eq!(RuleTable::tile_index(0, 0), Some(0));
        assert_eq!(RuleTable::tile_index(31, 15), Some(511));
        assert_eq!(RuleTable::tile_index(32, 0), None);
        assert_eq!(RuleTable::tile_index(0, 16), None);
        assert_eq!(RuleTable::tile_position(33), Some((1, 1)));
        assert_eq!(RuleTable::tile_position(512), None);
    }

    #[test]
    fn neighbourhood_pattern_decodes_corners() {
        let p = RuleTable::neighbourhood_pattern(1);
        assert!(p[0][0]);
        assert_eq!(p.iter().flatten().filter(|&&b| b).count(), 1);

        let p = RuleTable::neighbourhood_pattern(CENTRE_WEIGHT);
        assert!(p[1][1]);

        let p = RuleTable::neighbourhood_pattern(256);
        assert!(p[2][2]);
    }

    fn arb_code() -> impl Strategy<Value = String> {
        proptest::collection::vec(any::<bool>(), RULE_SIZE)
            .prop_map(|bits| bits.into_iter().map(|b| if b { '1' } else { '0' }).collect())
    }

    proptest! {
        #[test]
        fn toggle_twice_is_identity(code in arb_code(), index in 0usize..RULE_SIZE) {
            let t = RuleTable::load(&code).unwrap();
            let back = t.toggle(index).unwrap().toggle(index).unwrap();
            prop_assert_eq!(back.code(), code);
        }

        #[test]
        fn toggle_changes_exactly_one_entry(code in arb_code(), index in 0usize..RULE_SIZE) {
            let t = RuleTable::load(&code).unwrap();
            let u = t.toggle(index).unwrap();
            let diffs = t.iter().zip(u.iter()).filter(|(a, b)| a != b).count();
            prop_assert_eq!(diffs, 1);
            prop_assert_ne!(t.lookup(index), u.lookup(index));
        }

        #[test]
        fn code_round_trips(code in arb_code()) {
            let t: RuleTable = code.parse().unwrap();
            prop_assert_eq!(t.to_string(), code);
        }

        #[test]
        fn pattern_reencodes_to_index(index in 0usize..RULE_SIZE) {
            let p = RuleTable::neighbourhood_pattern(index);
            let mut back = 0;
            for (k, (dx, dy)) in SCAN_ORDER.iter().enumerate() {
                if p[(dx + 1) as usize][(dy + 1) as usize] {
                    back |= 1 << k;
                }
            }
            prop_assert_eq!(back, index);
        }
    }
}
