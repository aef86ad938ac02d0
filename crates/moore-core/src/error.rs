//! Error types for rule parsing, editing, and library lookups.

use std::error::Error;
use std::fmt;

/// Why a rule code string was rejected by [`RuleTable::load`](crate::RuleTable::load).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleCodeError {
    /// The code does not contain exactly 512 characters.
    WrongLength {
        /// Number of characters actually supplied.
        len: usize,
    },
    /// The code contains a character other than `'0'` or `'1'`.
    InvalidChar {
        /// Character position of the first offending character.
        index: usize,
        /// The offending character.
        found: char,
    },
}

impl fmt::Display for RuleCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { len } => {
                write!(f, "rule code must be 512 characters, got {len}")
            }
            Self::InvalidChar { index, found } => {
                write!(f, "rule code has {found:?} at position {index}, expected '0' or '1'")
            }
        }
    }
}

impl Error for RuleCodeError {}

/// Errors from rule tables and the rule library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    /// A rule code failed validation. Nothing was mutated.
    InvalidRuleCode(RuleCodeError),
    /// A neighbourhood index outside `[0, 512)`.
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
    },
    /// No rule with this name exists in the library.
    UnknownRule {
        /// The name that was looked up.
        name: String,
    },
    /// A rule name was empty after trimming.
    EmptyRuleName,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRuleCode(e) => write!(f, "invalid rule code: {e}"),
            Self::IndexOutOfRange { index } => {
                write!(f, "rule index {index} out of range [0, 512)")
            }
            Self::UnknownRule { name } => write!(f, "unknown rule '{name}'"),
            Self::EmptyRuleName => write!(f, "rule name must not be empty"),
        }
    }
}

impl Error for RuleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRuleCode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RuleCodeError> for RuleError {
    fn from(e: RuleCodeError) -> Self {
        Self::InvalidRuleCode(e)
    }
}
