use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the directory holding `hyph_*.dic` files.
pub const DICTIONARIES_ENV: &str = "FTUI_HYPHEN_DICTIONARIES";

/// Minimum characters kept before the first break.
pub const DEFAULT_LEFT: usize = 2;
/// Minimum characters kept after the last break.
pub const DEFAULT_RIGHT: usize = 2;

/// Margins and caching policy for a [`crate::Hyphenator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HyphenConfig {
    pub left: usize,
    pub right: usize,
    /// Share parsed tables and word positions through [`crate::HyphenCache::global`].
    /// When off, the dictionary is re-read (replacing the shared table) and
    /// word positions are not memoized.
    pub cache: bool,
}

impl Default for HyphenConfig {
    fn default() -> Self {
        Self {
            left: DEFAULT_LEFT,
            right: DEFAULT_RIGHT,
            cache: true,
        }
    }
}

impl HyphenConfig {
    #[must_use]
    pub fn with_margins(mut self, left: usize, right: usize) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }
}

/// Dictionary directory from [`DICTIONARIES_ENV`], if set and non-empty.
#[must_use]
pub fn dictionaries_dir_from_env() -> Option<PathBuf> {
    dictionaries_dir_from(std::env::var_os(DICTIONARIES_ENV))
}

/// Interpret a raw [`DICTIONARIES_ENV`] value; empty counts as unset.
#[must_use]
pub fn dictionaries_dir_from(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|value| !value.is_empty()).map(PathBuf::from)
}
