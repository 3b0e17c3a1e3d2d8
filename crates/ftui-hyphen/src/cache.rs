//! Shared caches for parsed tables and per-word break positions.
//!
//! # Lifecycle
//!
//! A [`HyphenCache`] is created once (usually the process-wide
//! [`HyphenCache::global`]) and handed to every [`crate::Hyphenator`] that
//! should share results. Entries are never evicted; [`HyphenCache::clear`]
//! resets both maps. [`HyphenCache::disabled`] memoizes nothing.
//!
//! # Thread safety
//!
//! Both maps sit behind `RwLock`s. Lookups and inserts are not one atomic
//! step, so two threads missing on the same key both compute it and the last
//! insert wins. Cached values are immutable and keyed by stable identities, so
//! this only costs redundant work.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::finder::{BreakPosition, find_positions};
use crate::parser::load_path;
use crate::pattern::PatternTable;

type WordKey = (u64, String);

/// Memoizes [`PatternTable`]s by file path and positions by (table, word).
#[derive(Debug, Default)]
pub struct HyphenCache {
    disabled: bool,
    tables: RwLock<FxHashMap<PathBuf, Arc<PatternTable>>>,
    positions: RwLock<FxHashMap<WordKey, Arc<[BreakPosition]>>>,
}

impl HyphenCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that stores nothing: every call recomputes.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// The process-wide cache.
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<HyphenCache>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Return the table for `path`, parsing it on first use.
    ///
    /// With `reload`, the file is parsed again and replaces any cached table.
    ///
    /// # Errors
    ///
    /// Propagates parse and I/O errors from [`load_path`].
    pub fn table(&self, path: &Path, reload: bool) -> Result<Arc<PatternTable>> {
        if !reload && !self.disabled {
            let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(table) = tables.get(path) {
                tracing::trace!(message = "hyphen.cache.table_hit", path = %path.display());
                return Ok(Arc::clone(table));
            }
        }

        let table = Arc::new(load_path(path)?);
        if !self.disabled {
            self.tables
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(path.to_path_buf(), Arc::clone(&table));
        }
        Ok(table)
    }

    /// Break positions of `word` in `table`, before margin filtering.
    pub fn positions(&self, table: &PatternTable, word: &str) -> Arc<[BreakPosition]> {
        if self.disabled {
            return find_positions(table, word).into();
        }

        let key = (table.id(), word.to_lowercase());
        {
            let positions = self
                .positions
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(found) = positions.get(&key) {
                tracing::trace!(message = "hyphen.cache.word_hit", word = %key.1);
                return Arc::clone(found);
            }
        }

        tracing::trace!(message = "hyphen.cache.word_miss", word = %key.1);
        let computed: Arc<[BreakPosition]> = find_positions(table, &key.1).into();
        self.positions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::clone(&computed));
        computed
    }

    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.positions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drop every cached table and word.
    pub fn clear(&self) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.positions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
