//! Alternate-key resolution (layout variant → base key).

use super::VirtualKey;
use heapless::LinearMap;

/// Maximum number of alternate → base entries a layout may publish.
pub const ALTERNATE_TABLE_CAPACITY: usize = 64;

/// Immutable alternate → base key table, loaded once from the input
/// channel's active layout.
#[derive(Clone, Debug, Default)]
pub struct AlternateKeyTable {
    entries: LinearMap<VirtualKey, VirtualKey, ALTERNATE_TABLE_CAPACITY>,
}

impl AlternateKeyTable {
    /// Table with no entries: every key resolves to itself.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the table from `(alternate, base)` pairs.
    ///
    /// Later duplicates replace earlier ones. Pairs beyond the table
    /// capacity are dropped with a warning.
    pub fn from_pairs(pairs: &[(VirtualKey, VirtualKey)]) -> Self {
        let mut entries = LinearMap::new();
        for &(alternate, base) in pairs {
            if entries.insert(alternate, base).is_err() {
                warn!("Alternate-key table full, dropping {}", alternate);
            }
        }
        Self { entries }
    }

    /// Substitute the base key for an alternate key; other keys pass
    /// through unchanged.
    pub fn resolve(&self, key: VirtualKey) -> VirtualKey {
        self.entries.get(&key).copied().unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VirtualKey::*;

    #[test]
    fn resolves_listed_alternates() {
        let table = AlternateKeyTable::from_pairs(&[(Exclaim, Digit1), (CapitalQ, LetterQ)]);
        assert_eq!(table.resolve(Exclaim), Digit1);
        assert_eq!(table.resolve(CapitalQ), LetterQ);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn unknown_keys_pass_through() {
        let table = AlternateKeyTable::from_pairs(&[(Exclaim, Digit1)]);
        assert_eq!(table.resolve(LetterA), LetterA);
        assert_eq!(AlternateKeyTable::empty().resolve(Exclaim), Exclaim);
    }

    #[test]
    fn later_duplicate_wins() {
        let table = AlternateKeyTable::from_pairs(&[(At, Digit2), (At, Quote)]);
        assert_eq!(table.resolve(At), Quote);
        assert_eq!(table.len(), 1);
    }
}
