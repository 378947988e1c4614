//! Hash collections used across glyphrun.
//!
//! Glyph tables, kerning pairs and the processed-text cache are all keyed
//! lookups on the hot path, so they use AHash instead of SipHash.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_char_keys() {
        let mut map = HashMap::new();
        map.insert('a', 10.0f32);
        map.insert('b', 12.0f32);
        assert_eq!(map.get(&'a'), Some(&10.0));
        assert_eq!(map.get(&'z'), None);
    }

    #[test]
    fn test_hashset_pairs() {
        let mut set = HashSet::new();
        set.insert(('A', 'V'));
        assert!(set.contains(&('A', 'V')));
        assert!(!set.contains(&('V', 'A')));
    }
}
