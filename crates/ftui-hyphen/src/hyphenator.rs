//! Margin filtering and the four query operations.
//!
//! Offsets and widths count characters (Unicode scalar values), not bytes.

use std::iter::{FusedIterator, Rev};
use std::path::Path;
use std::sync::Arc;
use std::vec;

use crate::cache::HyphenCache;
use crate::config::HyphenConfig;
use crate::error::Result;
use crate::finder::BreakPosition;
use crate::pattern::{NonstandardChange, PatternTable};
use crate::registry::DictionaryRegistry;

/// Hyphenates words with one [`PatternTable`] and fixed margins.
#[derive(Debug, Clone)]
pub struct Hyphenator {
    table: Arc<PatternTable>,
    cache: Arc<HyphenCache>,
    left: usize,
    right: usize,
}

impl Hyphenator {
    /// Default margins, global cache.
    #[must_use]
    pub fn new(table: Arc<PatternTable>) -> Self {
        Self::with_config(table, HyphenConfig::default())
    }

    #[must_use]
    pub fn with_config(table: Arc<PatternTable>, config: HyphenConfig) -> Self {
        let cache = if config.cache {
            HyphenCache::global()
        } else {
            Arc::new(HyphenCache::disabled())
        };
        Self {
            table,
            cache,
            left: config.left,
            right: config.right,
        }
    }

    /// Use `cache` for word positions instead of the configured one.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<HyphenCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Load the dictionary at `path` through the global table cache.
    ///
    /// With `config.cache` off the file is parsed again and the fresh table
    /// replaces the cached one.
    ///
    /// # Errors
    ///
    /// Parse and I/O errors of the dictionary file.
    pub fn from_path(path: &Path, config: HyphenConfig) -> Result<Self> {
        let table = HyphenCache::global().table(path, !config.cache)?;
        Ok(Self::with_config(table, config))
    }

    /// Resolve `language` through `registry` and load its dictionary.
    ///
    /// # Errors
    ///
    /// [`crate::HyphenError::NotFound`] when no fallback of `language` is
    /// registered, otherwise as [`Self::from_path`].
    pub fn for_language(
        registry: &DictionaryRegistry,
        language: &str,
        config: HyphenConfig,
    ) -> Result<Self> {
        let path = registry.resolve_dictionary_path(language)?;
        tracing::debug!(
            message = "hyphen.language.resolved",
            language,
            path = %path.display(),
        );
        Self::from_path(&path, config)
    }

    #[must_use]
    pub const fn left(&self) -> usize {
        self.left
    }

    #[must_use]
    pub const fn right(&self) -> usize {
        self.right
    }

    #[must_use]
    pub fn table(&self) -> &Arc<PatternTable> {
        &self.table
    }

    /// Break positions with `left <= offset <= len(word) - right`, ascending.
    #[must_use]
    pub fn positions(&self, word: &str) -> Vec<BreakPosition> {
        let Some(last) = word.chars().count().checked_sub(self.right) else {
            return Vec::new();
        };
        self.cache
            .positions(&self.table, word)
            .iter()
            .filter(|p| (self.left..=last).contains(&p.offset))
            .cloned()
            .collect()
    }

    /// Plain offsets of [`Self::positions`].
    #[must_use]
    pub fn offsets(&self, word: &str) -> Vec<usize> {
        self.positions(word).iter().map(|p| p.offset).collect()
    }

    /// Every `(head, tail)` split of `word`, longest head first.
    ///
    /// Calling `iterate` again starts over.
    #[must_use]
    pub fn iterate(&self, word: &str) -> Splits {
        Splits {
            chars: word.chars().collect(),
            upper: is_all_upper(word),
            remaining: self.positions(word).into_iter().rev(),
        }
    }

    /// Longest split whose head, hyphen included, fits in `width` characters.
    ///
    /// The returned head ends with `hyphen`. `None` when the word has no break
    /// that fits.
    #[must_use]
    pub fn wrap(&self, word: &str, width: usize, hyphen: &str) -> Option<(String, String)> {
        let width = width.checked_sub(hyphen.chars().count())?;
        self.iterate(word)
            .find(|(head, _)| head.chars().count() <= width)
            .map(|(mut head, tail)| {
                head.push_str(hyphen);
                (head, tail)
            })
    }

    /// `word` with `hyphen` at every break, nonstandard changes applied.
    #[must_use]
    pub fn inserted(&self, word: &str, hyphen: &str) -> String {
        let upper = is_all_upper(word);
        let mut pieces: Vec<String> = word.chars().map(String::from).collect();

        // Right to left, so pending offsets stay valid.
        for position in self.positions(word).iter().rev() {
            match &position.change {
                Some(change) => {
                    let (start, end) = change_span(change, position.offset, pieces.len());
                    let replacement = case_adjusted(&change.change, upper).replace('=', hyphen);
                    pieces.splice(start..end, replacement.chars().map(String::from));
                }
                None => {
                    let at = position.offset.min(pieces.len());
                    pieces.insert(at, hyphen.to_string());
                }
            }
        }

        pieces.concat()
    }
}

/// Iterator returned by [`Hyphenator::iterate`].
#[derive(Debug, Clone)]
pub struct Splits {
    chars: Vec<char>,
    upper: bool,
    remaining: Rev<vec::IntoIter<BreakPosition>>,
}

impl Iterator for Splits {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.remaining.next()?;
        Some(split_word(&self.chars, &position, self.upper))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining.size_hint()
    }
}

impl ExactSizeIterator for Splits {}

impl FusedIterator for Splits {}

fn split_word(chars: &[char], position: &BreakPosition, upper: bool) -> (String, String) {
    let Some(change) = &position.change else {
        let at = position.offset.min(chars.len());
        return (chars[..at].iter().collect(), chars[at..].iter().collect());
    };

    let (start, end) = change_span(change, position.offset, chars.len());
    let text = case_adjusted(&change.change, upper);
    let (c1, c2) = text.split_once('=').unwrap_or((text.as_str(), ""));

    let mut head: String = chars[..start].iter().collect();
    head.push_str(c1);
    let mut tail = String::from(c2);
    tail.extend(&chars[end..]);
    (head, tail)
}

/// Character range `[index + offset, index + offset + cut)` replaced by a
/// nonstandard change, clamped to the word.
fn change_span(change: &NonstandardChange, offset: usize, len: usize) -> (usize, usize) {
    let start = (offset as isize)
        .saturating_add(change.index)
        .clamp(0, len as isize) as usize;
    let end = start.saturating_add(change.cut).min(len);
    (start, end)
}

fn case_adjusted(change: &str, upper: bool) -> String {
    if upper {
        change.to_uppercase()
    } else {
        change.to_string()
    }
}

/// At least one uppercase character, and no lowercase or titlecase ones.
fn is_all_upper(word: &str) -> bool {
    word.chars().any(char::is_uppercase)
        && !word.chars().any(|c| c.is_lowercase() || is_titlecase(c))
}

/// Unicode category Lt (`ǅ`, Greek capitals with prosgegrammeni).
const fn is_titlecase(c: char) -> bool {
    matches!(
        c,
        '\u{1C5}'
            | '\u{1C8}'
            | '\u{1CB}'
            | '\u{1F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}
