//! Fields that are a pure function of a record's ordinal
//!
//! The ordinal is the zero-based position of the Placemark in document
//! order. These mappings are fixed: the same ordinal yields the same values
//! on every run regardless of the random source.

use super::tables::{FAMILY_NAMES_LATIN, FATHER_NAMES_LATIN, FIRST_NAMES_LATIN, PROPERTY_TYPES};

/// A property classification in both label scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Arabic label
    pub local: &'static str,
    /// Turkish label
    pub secondary: &'static str,
}

/// `(ordinal * factor) mod len`, without overflowing for large ordinals
fn scaled_index(ordinal: usize, factor: usize, len: usize) -> usize {
    (ordinal % len) * factor % len
}

/// Latin owner name: first name by `N mod len`, father name by
/// `(N*7) mod len`, family name by `(N*3) mod len`
pub fn latin_owner_name(ordinal: usize) -> String {
    let first = FIRST_NAMES_LATIN[scaled_index(ordinal, 1, FIRST_NAMES_LATIN.len())];
    let father = FATHER_NAMES_LATIN[scaled_index(ordinal, 7, FATHER_NAMES_LATIN.len())];
    let family = FAMILY_NAMES_LATIN[scaled_index(ordinal, 3, FAMILY_NAMES_LATIN.len())];
    format!("{} bin {} {}", first, father, family)
}

pub fn classification(ordinal: usize) -> Classification {
    let (local, secondary) = PROPERTY_TYPES[ordinal % PROPERTY_TYPES.len()];
    Classification { local, secondary }
}

/// Everything derived from the ordinal alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdinalFields {
    pub owner_latin: String,
    pub classification: Classification,
}

impl OrdinalFields {
    pub fn for_ordinal(ordinal: usize) -> Self {
        Self {
            owner_latin: latin_owner_name(ordinal),
            classification: classification(ordinal),
        }
    }
}
