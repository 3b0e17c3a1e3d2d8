//! Property-based invariant tests for hyphenation.
//!
//! These tests verify structural invariants that must hold for any word and
//! any margins:
//!
//! 1. Every position lies within the margins.
//! 2. `iterate` yields heads of strictly decreasing length.
//! 3. `inserted` splits back into the original word.
//! 4. Repeated queries agree, and the cache hands back the same allocation.
//! 5. Overlapping patterns combine by maximum, independent of file order.
//! 6. `wrap` heads fit the requested width.
//! 7. No panics on arbitrary string inputs.

use std::sync::Arc;

use ftui_hyphen::{HyphenCache, HyphenConfig, Hyphenator, PatternTable, load_table};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const PATTERNS: &str = "\
UTF-8
% synthetic patterns over a-f
a1b
b2c
1c
d3
e1f
.a2
f1a
2ab
c5d
4dd
.be3
1f.
";

fn table() -> Arc<PatternTable> {
    Arc::new(load_table(PATTERNS.as_bytes()).unwrap())
}

fn hyphenator(left: usize, right: usize) -> Hyphenator {
    Hyphenator::with_config(table(), HyphenConfig::default().with_margins(left, right))
        .with_cache(Arc::new(HyphenCache::new()))
}

fn word() -> impl Strategy<Value = String> {
    "[a-f]{0,16}"
}

fn margin() -> impl Strategy<Value = usize> {
    0usize..5
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Positions respect the margins
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn positions_within_margins(word in word(), left in margin(), right in margin()) {
        let h = hyphenator(left, right);
        let len = word.chars().count();
        for p in h.offsets(&word) {
            prop_assert!(
                left <= p && p + right <= len,
                "offset {} outside [{}, {} - {}] for {:?}",
                p, left, len, right, word
            );
        }
    }

    #[test]
    fn positions_ascending(word in word()) {
        let offsets = hyphenator(1, 1).offsets(&word);
        for window in offsets.windows(2) {
            prop_assert!(window[0] < window[1], "not ascending: {:?}", offsets);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Longest head first
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn iterate_heads_strictly_decrease(word in word(), left in margin(), right in margin()) {
        let h = hyphenator(left, right);
        let heads: Vec<usize> = h.iterate(&word).map(|(head, _)| head.chars().count()).collect();
        for window in heads.windows(2) {
            prop_assert!(window[0] > window[1], "heads not decreasing: {:?}", heads);
        }
        prop_assert_eq!(heads.len(), h.positions(&word).len());
    }

    #[test]
    fn iterate_pairs_concatenate_to_word(word in word()) {
        for (head, tail) in hyphenator(2, 2).iterate(&word) {
            prop_assert_eq!(format!("{head}{tail}"), word.clone());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Round trip through `inserted`
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn inserted_round_trips(word in word(), left in margin(), right in margin()) {
        let h = hyphenator(left, right);
        let inserted = h.inserted(&word, "-");
        prop_assert_eq!(inserted.replace('-', ""), word.clone());

        let mut offset = 0;
        let mut cuts = Vec::new();
        let pieces: Vec<&str> = inserted.split('-').collect();
        for piece in &pieces[..pieces.len() - 1] {
            offset += piece.chars().count();
            cuts.push(offset);
        }
        prop_assert_eq!(cuts, h.offsets(&word));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Idempotence and caching
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeated_queries_agree(word in word()) {
        let h = hyphenator(2, 2);
        prop_assert_eq!(h.positions(&word), h.positions(&word));
        prop_assert_eq!(h.inserted(&word, "-"), h.inserted(&word, "-"));
    }

    #[test]
    fn cache_returns_stored_sequence(word in word()) {
        let cache = HyphenCache::new();
        let t = table();
        let first = cache.positions(&t, &word);
        let second = cache.positions(&t, &word.to_uppercase());
        prop_assert!(Arc::ptr_eq(&first, &second));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Overlay takes the maximum
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn overlay_max_regardless_of_order(a in 0u32..10, b in 0u32..10) {
        prop_assume!(a > 0 || b > 0);
        let forward = load_table(format!("UTF-8\nx{a}y\n{b}y\n").as_bytes()).unwrap();
        let backward = load_table(format!("UTF-8\n{b}y\nx{a}y\n").as_bytes()).unwrap();
        let config = HyphenConfig::default().with_margins(1, 1).with_cache(false);

        let expected = if a.max(b) % 2 == 1 { vec![2] } else { vec![] };
        for table in [forward, backward] {
            let h = Hyphenator::with_config(Arc::new(table), config);
            prop_assert_eq!(h.offsets("zxyz"), expected.clone(), "a={} b={}", a, b);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Wrap fits the width
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn wrap_head_fits(word in word(), width in 0usize..20) {
        let h = hyphenator(2, 2);
        match h.wrap(&word, width, "-") {
            Some((head, tail)) => {
                prop_assert!(head.chars().count() <= width);
                prop_assert!(head.ends_with('-'));
                prop_assert_eq!(format!("{}{}", &head[..head.len() - 1], tail), word.clone());
            }
            None => {
                let fits = h
                    .iterate(&word)
                    .any(|(head, _)| head.chars().count() < width);
                prop_assert!(!fits, "a split fits width {} for {:?}", width, word);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. No panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_words_do_not_panic(word in ".{0,40}", width in 0usize..40) {
        let h = hyphenator(2, 2);
        let _ = h.positions(&word);
        let _ = h.iterate(&word).count();
        let _ = h.wrap(&word, width, "-");
        let _ = h.inserted(&word, "\u{ad}");
    }

    #[test]
    fn arbitrary_dictionaries_do_not_panic(body in proptest::collection::vec(any::<u8>(), 0..200)) {
        let mut dic = b"UTF-8\n".to_vec();
        dic.extend_from_slice(&body);
        if let Ok(table) = load_table(dic.as_slice()) {
            let h = Hyphenator::with_config(Arc::new(table), HyphenConfig::default().with_cache(false));
            let _ = h.inserted("hyphenation", "-");
        }
    }
}
