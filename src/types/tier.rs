//! Storage tier identity

use std::fmt;

use serde::{Deserialize, Serialize};

/// One backend capable of storing and retrieving the reading log.
///
/// Ordering here mirrors the fallback chain: `Fast` is preferred, `Archive`
/// is the durable backup, `Volatile` is the in-process last resort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Fast,
    Archive,
    Volatile,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Fast => "fast",
            Tier::Archive => "archive",
            Tier::Volatile => "volatile",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Fast).unwrap(), "\"fast\"");
        assert_eq!(
            serde_json::to_string(&Tier::Volatile).unwrap(),
            "\"volatile\""
        );
    }
}
