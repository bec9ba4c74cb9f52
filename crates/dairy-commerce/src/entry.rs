//! Entry types for return-order line items.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a return line item.
///
/// Determines which catalog endpoint supplies the product options and how
/// line items are grouped for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Cash handed back (coins and notes).
    Cash,
    /// Empty crates returned.
    Crate,
    /// Goods missing from the delivery.
    Missing,
    /// Goods returned.
    #[default]
    Return,
}

impl EntryType {
    /// All entry types in display precedence.
    pub const ALL: [EntryType; 4] = [
        EntryType::Cash,
        EntryType::Crate,
        EntryType::Missing,
        EntryType::Return,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Cash => "cash",
            EntryType::Crate => "crate",
            EntryType::Missing => "missing",
            EntryType::Return => "return",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EntryType::Cash => "Cash",
            EntryType::Crate => "Crate",
            EntryType::Missing => "Missing",
            EntryType::Return => "Return",
        }
    }

    /// Display precedence (1-indexed): cash, crate, missing, return.
    pub fn precedence(&self) -> u8 {
        match self {
            EntryType::Cash => 1,
            EntryType::Crate => 2,
            EntryType::Missing => 3,
            EntryType::Return => 4,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(EntryType::Cash),
            "crate" => Ok(EntryType::Crate),
            "missing" => Ok(EntryType::Missing),
            "return" => Ok(EntryType::Return),
            other => Err(CommerceError::UnknownEntryType(other.to_string())),
        }
    }
}
