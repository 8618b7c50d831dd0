//! Defines the `Identifier` used to key nodes and to reference them from edges.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An opaque node key, either an integer or a string.
///
/// Edges reference nodes only through identifiers. Two identifiers are equal when
/// their textual forms are equal, so `Int(7)` and `Str("7")` name the same node.
/// This matters because JSON object keys are always strings while edge endpoints
/// may be written as numbers. Each occurrence keeps its own representation when
/// dumped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Int(i64),
    Str(String),
}

impl Identifier {
    /// The textual form used for comparison and hashing.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Identifier::Int(i) => Cow::Owned(i.to_string()),
            Identifier::Str(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Identifier::Int(a), Identifier::Int(b)) => a == b,
            (Identifier::Str(a), Identifier::Str(b)) => a == b,
            _ => self.as_key() == other.as_key(),
        }
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key().hash(state);
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_key().cmp(&other.as_key())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Int(i) => write!(f, "{}", i),
            Identifier::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Identifier::Int(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::Str(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of(id: &Identifier) -> u64 {
        let mut h = DefaultHasher::new();
        id.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_int_and_string_forms_are_the_same_key() {
        let a = Identifier::Int(42);
        let b = Identifier::from("42");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let set: HashSet<Identifier> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_leading_zero_is_a_different_key() {
        assert_ne!(Identifier::Int(7), Identifier::from("07"));
    }

    #[test]
    fn test_untagged_serde_keeps_representation() {
        let int: Identifier = serde_json::from_str("3").unwrap();
        let text: Identifier = serde_json::from_str("\"bike\"").unwrap();
        assert!(matches!(int, Identifier::Int(3)));
        assert!(matches!(text, Identifier::Str(ref s) if s == "bike"));
        assert_eq!(serde_json::to_string(&int).unwrap(), "3");
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"bike\"");
    }
}
