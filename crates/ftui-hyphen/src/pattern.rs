//! Weighted patterns and the per-dictionary pattern table.
//!
//! A pattern such as `"hy3p"` stores the letters `"hyp"` as its key and the
//! inter-letter weights as a value. Odd weights allow a break at that gap,
//! even weights forbid one. Zero weights at either end are trimmed at parse
//! time; the number of leading zeros removed is kept as `start_offset` so the
//! weights still line up with the letters when overlaid onto a word.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Spelling change applied when breaking at a nonstandard position.
///
/// `change` has the form `"left=right"`: `left` ends the head, `right` starts
/// the tail. `index` is counted from the break point and may be negative;
/// `cut` original characters are removed from that point on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonstandardChange {
    pub change: Arc<str>,
    pub index: isize,
    pub cut: usize,
}

impl NonstandardChange {
    #[must_use]
    pub fn new(change: impl Into<Arc<str>>, index: isize, cut: usize) -> Self {
        Self {
            change: change.into(),
            index,
            cut,
        }
    }

    /// Split `change` into the text ending the head and the text starting the
    /// tail. A change without `=` contributes everything to the head.
    #[must_use]
    pub fn halves(&self) -> (&str, &str) {
        self.change.split_once('=').unwrap_or((&*self.change, ""))
    }
}

/// A single inter-letter weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakWeight {
    Plain(u32),
    /// Odd weight carrying a nonstandard spelling change.
    Nonstandard(u32, NonstandardChange),
}

impl BreakWeight {
    #[must_use]
    pub const fn value(&self) -> u32 {
        match self {
            Self::Plain(v) | Self::Nonstandard(v, _) => *v,
        }
    }

    /// Odd weights allow hyphenation.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        self.value() % 2 == 1
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.value() == 0
    }

    #[must_use]
    pub fn change(&self) -> Option<&NonstandardChange> {
        match self {
            Self::Plain(_) => None,
            Self::Nonstandard(_, change) => Some(change),
        }
    }
}

impl Default for BreakWeight {
    fn default() -> Self {
        Self::Plain(0)
    }
}

/// Trimmed weights of one pattern. Most patterns have a handful of weights.
pub type Weights = SmallVec<[BreakWeight; 6]>;

// ---------------------------------------------------------------------------
// Entries and table
// ---------------------------------------------------------------------------

/// Stored value of one pattern: weights with leading/trailing zeros removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub start_offset: usize,
    pub weights: Weights,
}

impl PatternEntry {
    /// Trim zero weights from both ends, or `None` when every weight is zero.
    #[must_use]
    pub fn from_weights(weights: &[BreakWeight]) -> Option<Self> {
        let start = weights.iter().position(|w| !w.is_zero())?;
        let end = weights.iter().rposition(|w| !w.is_zero())? + 1;
        Some(Self {
            start_offset: start,
            weights: weights[start..end].iter().cloned().collect(),
        })
    }
}

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

fn next_table_id() -> u64 {
    NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Immutable mapping from pattern letters to weights for one dictionary.
///
/// Each table receives a process-unique [`id`](Self::id) at construction,
/// which identifies the dictionary in the word-position cache.
#[derive(Debug)]
pub struct PatternTable {
    id: u64,
    encoding: &'static str,
    patterns: FxHashMap<String, PatternEntry>,
    max_key_length: usize,
}

impl PatternTable {
    /// Build a table from already-parsed entries. Returns `None` when empty.
    #[must_use]
    pub fn from_entries(
        encoding: &'static str,
        patterns: FxHashMap<String, PatternEntry>,
    ) -> Option<Self> {
        let max_key_length = patterns.keys().map(|k| k.chars().count()).max()?;
        Some(Self {
            id: next_table_id(),
            encoding,
            patterns,
            max_key_length,
        })
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Canonical name of the encoding declared on the first line.
    #[must_use]
    pub const fn encoding(&self) -> &'static str {
        self.encoding
    }

    /// Longest key, in characters.
    #[must_use]
    pub const fn max_key_length(&self) -> usize {
        self.max_key_length
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PatternEntry> {
        self.patterns.get(key)
    }
}
