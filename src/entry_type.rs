//! Whether money is coming in or going out.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// The kind of a category and of the transactions filed under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    /// All entry types, in the order they are shown in forms.
    pub const ALL: [EntryType; 2] = [EntryType::Income, EntryType::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "Income",
            EntryType::Expense => "Expense",
        }
    }
}

impl Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(EntryType::Income),
            "Expense" => Ok(EntryType::Expense),
            other => Err(format!("\"{other}\" is not a valid type")),
        }
    }
}
