//! Named rule collection.
//!
//! The library is an insertion-ordered map from rule name to
//! [`RuleRecord`]. It is deserializable so an external loader can fill it
//! from a structured resource; codes arriving that way are validated only
//! when they are turned into a [`RuleTable`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::rule::RuleTable;

/// One named rule code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// Display name.
    pub name: String,
    /// 512-character binary code.
    pub code: String,
}

impl RuleRecord {
    /// Parse this record's code.
    pub fn table(&self) -> Result<RuleTable, RuleError> {
        Ok(RuleTable::load(&self.code)?)
    }
}

/// Rule records keyed by name, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleLibrary {
    rules: IndexMap<String, RuleRecord>,
}

impl RuleLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a rule.
    ///
    /// Whitespace anywhere in `code` is stripped before validation, so
    /// codes pasted across several lines are accepted. The library is
    /// unchanged on error.
    pub fn insert(&mut self, name: &str, code: &str) -> Result<&RuleRecord, RuleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RuleError::EmptyRuleName);
        }
        let code: String = code.chars().filter(|c| !c.is_whitespace()).collect();
        RuleTable::load(&code)?;

        let record = RuleRecord {
            name: name.to_string(),
            code,
        };
        let index = self.rules.insert_full(name.to_string(), record).0;
        Ok(&self.rules[index])
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&RuleRecord> {
        self.rules.get(name)
    }

    /// Parse the named rule.
    pub fn table(&self, name: &str) -> Result<RuleTable, RuleError> {
        self.get(name)
            .ok_or_else(|| RuleError::UnknownRule {
                name: name.to_string(),
            })?
            .table()
    }

    /// Rule names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the library holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
