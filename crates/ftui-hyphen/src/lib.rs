#![forbid(unsafe_code)]

//! Pattern-based hyphenation (Liang's algorithm) over hunspell `hyph_*.dic`
//! dictionaries, including nonstandard breaks that change spelling
//! (German `backen` → `bak-ken`).
//!
//! # Pipeline
//!
//! ```text
//! dictionary bytes → parser::load_table → PatternTable (immutable, shared)
//! word → finder::find_positions (memoized in HyphenCache)
//!      → Hyphenator margin filter → positions / iterate / wrap / inserted
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ftui_hyphen::{Hyphenator, load_table};
//!
//! let table = load_table("UTF-8\nt1t\n1g\n1p\n".as_bytes()).unwrap();
//! let hyphenator = Hyphenator::new(Arc::new(table));
//! assert_eq!(hyphenator.offsets("lettergrepen"), vec![3, 6, 9]);
//! assert_eq!(hyphenator.inserted("lettergrepen", "-"), "let-ter-gre-pen");
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod finder;
pub mod hyphenator;
pub mod parser;
pub mod pattern;
pub mod registry;

pub use cache::HyphenCache;
pub use config::{DICTIONARIES_ENV, HyphenConfig};
pub use error::{HyphenError, Result};
pub use finder::{BreakPosition, find_positions};
pub use hyphenator::{Hyphenator, Splits};
pub use parser::{load_path, load_table};
pub use pattern::{BreakWeight, NonstandardChange, PatternEntry, PatternTable};
pub use registry::DictionaryRegistry;
