//! Liang's sliding-window overlay.
//!
//! ```text
//! word "lettergrepen" → ".lettergrepen."
//! for each start i, for each end j ≤ i + max_key_length:
//!     pattern = table[wrapped[i..j]]  →  weights overlaid at i + start_offset
//!     accumulator[k] = max(accumulator[k], weight)
//! odd accumulator[m]  →  break before word[m - 1]
//! ```

use crate::pattern::{BreakWeight, NonstandardChange, PatternTable};

/// Boundary marker wrapped around every word before matching.
pub const BOUNDARY: char = '.';

/// An admissible break: `offset` characters of the word go before it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BreakPosition {
    pub offset: usize,
    /// Spelling change to apply when breaking here, if nonstandard.
    pub change: Option<NonstandardChange>,
}

impl BreakPosition {
    #[must_use]
    pub const fn plain(offset: usize) -> Self {
        Self {
            offset,
            change: None,
        }
    }

    #[must_use]
    pub const fn is_nonstandard(&self) -> bool {
        self.change.is_some()
    }
}

/// Compute every odd-weighted position in `word`, ascending.
///
/// `word` is lowercased first; offsets count characters of the lowercased
/// word. No margins are applied here.
#[must_use]
pub fn find_positions(table: &PatternTable, word: &str) -> Vec<BreakPosition> {
    let mut wrapped: Vec<char> = Vec::with_capacity(word.len() + 2);
    wrapped.push(BOUNDARY);
    wrapped.extend(word.to_lowercase().chars());
    wrapped.push(BOUNDARY);

    let mut accumulator = vec![BreakWeight::Plain(0); wrapped.len() + 1];
    let mut key = String::with_capacity(table.max_key_length() * 4);

    for i in 0..wrapped.len() - 1 {
        key.clear();
        let end = (i + table.max_key_length()).min(wrapped.len());
        for &ch in &wrapped[i..end] {
            key.push(ch);
            let Some(entry) = table.get(&key) else {
                continue;
            };
            let base = i + entry.start_offset;
            for (k, weight) in entry.weights.iter().enumerate() {
                let Some(slot) = accumulator.get_mut(base + k) else {
                    break;
                };
                // Ties go to the newer weight, which decides whose change survives.
                if weight.value() >= slot.value() {
                    *slot = weight.clone();
                }
            }
        }
    }

    accumulator
        .into_iter()
        .enumerate()
        .skip(1)
        .filter(|(_, weight)| weight.is_break())
        .map(|(m, weight)| BreakPosition {
            offset: m - 1,
            change: weight.change().cloned(),
        })
        .collect()
}
