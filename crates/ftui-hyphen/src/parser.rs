//! Dictionary parser for hunspell/libhyphen `hyph_*.dic` files.
//!
//! ```text
//! line 1      charset name (ASCII), e.g. "UTF-8", "ISO8859-1"
//! line 2..    pattern lines: "hy3p", ".ex5am", "c1k/k=k,1,2"
//!             blank lines, "%" / "#" comments and *HYPHENMIN directives are skipped
//!             "^^hh" escapes stand for the character with code point 0xhh
//! ```

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use encoding_rs::Encoding;
use rustc_hash::FxHashMap;

use crate::error::{HyphenError, Result};
use crate::pattern::{BreakWeight, NonstandardChange, PatternEntry, PatternTable};

/// Margin-hint directives. They carry no pattern weights.
const DIRECTIVES: &[&str] = &[
    "LEFTHYPHENMIN",
    "RIGHTHYPHENMIN",
    "COMPOUNDLEFTHYPHENMIN",
    "COMPOUNDRIGHTHYPHENMIN",
];

/// Vendor charset name used by some Cyrillic dictionaries.
const LEGACY_CP1251: &str = "microsoft-cp1251";

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Parse a whole dictionary stream into a [`PatternTable`].
///
/// # Errors
///
/// [`HyphenError::Format`] when the charset line is missing or unknown, a line
/// does not decode, a nonstandard alternative is malformed, or no pattern
/// carries a non-zero weight. I/O failures surface as [`HyphenError::Io`].
pub fn load_table<R: Read>(reader: R) -> Result<PatternTable> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Err(HyphenError::format_at(1, "missing charset line"));
    }
    let encoding = resolve_encoding(buf.trim_ascii())?;

    let mut patterns: FxHashMap<String, PatternEntry> = FxHashMap::default();
    let mut line_no = 1;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let decoded = encoding
            .decode_without_bom_handling_and_without_replacement(&buf)
            .ok_or_else(|| {
                HyphenError::format_at(line_no, format!("line is not valid {}", encoding.name()))
            })?;
        let line = decoded.trim();
        if is_skipped(line) {
            continue;
        }

        let line = unescape_hex(line);
        let (pattern, rule) = split_alternative(&line, line_no)?;
        let (key, weights) = tokenize(pattern, &rule);
        if let Some(entry) = PatternEntry::from_weights(&weights) {
            patterns.insert(key, entry);
        }
    }

    let table = PatternTable::from_entries(encoding.name(), patterns)
        .ok_or_else(|| HyphenError::format("dictionary contains no patterns"))?;
    tracing::debug!(
        message = "hyphen.table.parsed",
        encoding = table.encoding(),
        patterns = table.len(),
        max_key_length = table.max_key_length(),
    );
    Ok(table)
}

/// Open and parse the dictionary file at `path`.
///
/// # Errors
///
/// See [`load_table`]; open/read failures carry the path.
pub fn load_path(path: &Path) -> Result<PatternTable> {
    let file = File::open(path).map_err(|e| HyphenError::io_at(path, e))?;
    let table = load_table(file).map_err(|e| match e {
        HyphenError::Io { path: None, source } => HyphenError::io_at(path, source),
        other => other,
    })?;
    tracing::debug!(
        message = "hyphen.table.loaded",
        path = %path.display(),
        table_id = table.id(),
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Line handling
// ---------------------------------------------------------------------------

fn resolve_encoding(raw: &[u8]) -> Result<&'static Encoding> {
    if raw.is_empty() {
        return Err(HyphenError::format_at(1, "missing charset line"));
    }
    let name = std::str::from_utf8(raw)
        .ok()
        .filter(|name| name.is_ascii())
        .ok_or_else(|| HyphenError::format_at(1, "charset line is not ASCII"))?;
    let label = if name.eq_ignore_ascii_case(LEGACY_CP1251) {
        "cp1251"
    } else {
        name
    };
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| HyphenError::format_at(1, format!("unknown charset: {name}")))
}

fn is_skipped(line: &str) -> bool {
    line.is_empty()
        || line.starts_with(['%', '#'])
        || DIRECTIVES.iter().any(|d| line.starts_with(*d))
}

/// Replace every `^^hh` (lowercase hex) with the character U+00hh.
fn unescape_hex(line: &str) -> Cow<'_, str> {
    if !line.contains("^^") {
        return Cow::Borrowed(line);
    }
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());
    let mut i = 0;
    while i < chars.len() {
        if i + 3 < chars.len() && chars[i] == '^' && chars[i + 1] == '^' {
            if let (Some(hi), Some(lo)) = (lower_hex(chars[i + 2]), lower_hex(chars[i + 3])) {
                out.push(char::from((hi * 16 + lo) as u8));
                i += 4;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    Cow::Owned(out)
}

fn lower_hex(c: char) -> Option<u32> {
    match c {
        '0'..='9' | 'a'..='f' => c.to_digit(16),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// How digits of one pattern line become weights. Chosen once per line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum WeightRule {
    Plain,
    /// Odd weights carry the line's `change,index,cut` alternative. `index`
    /// is relative to the start of the pattern letters.
    Nonstandard {
        change: Arc<str>,
        index: isize,
        cut: usize,
    },
}

impl WeightRule {
    /// Weight for the digit read at tokenizer step `step` (0-based).
    ///
    /// The alternative index moves one place left per step, so the stored
    /// index is relative to the gap that weight sits on.
    fn weight(&self, value: u32, step: usize) -> BreakWeight {
        match self {
            Self::Nonstandard { change, index, cut } if value % 2 == 1 => {
                let index = index.saturating_sub(step as isize + 1);
                let change = NonstandardChange::new(Arc::clone(change), index, *cut);
                BreakWeight::Nonstandard(value, change)
            }
            _ => BreakWeight::Plain(value),
        }
    }
}

/// Split `pattern/change,index,cut` when the line has both `/` and `=`.
fn split_alternative(line: &str, line_no: usize) -> Result<(&str, WeightRule)> {
    let Some((pattern, alternative)) = line.split_once('/').filter(|_| line.contains('=')) else {
        return Ok((line, WeightRule::Plain));
    };

    let mut fields = alternative.split(',');
    let (Some(change), Some(index), Some(cut)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(HyphenError::format_at(
            line_no,
            format!("nonstandard alternative needs change,index,cut: {alternative}"),
        ));
    };
    let mut index: isize = index.trim().parse().map_err(|_| {
        HyphenError::format_at(line_no, format!("invalid alternative index: {index}"))
    })?;
    let cut: usize = cut
        .trim()
        .parse()
        .map_err(|_| HyphenError::format_at(line_no, format!("invalid alternative cut: {cut}")))?;
    if pattern.starts_with('.') {
        index += 1;
    }

    Ok((
        pattern,
        WeightRule::Nonstandard {
            change: Arc::from(change),
            index,
            cut,
        },
    ))
}

/// Scan `pattern` left to right into `(digit?, letter?)` steps.
///
/// Returns the letters-only key and one weight per step. An absent digit is
/// weight 0. The scan always ends with one empty step, so a pattern of `n`
/// letters without consecutive digits yields `n + 1` weights.
fn tokenize(pattern: &str, rule: &WeightRule) -> (String, Vec<BreakWeight>) {
    let mut key = String::with_capacity(pattern.len());
    let mut weights = Vec::with_capacity(pattern.len() + 1);
    let mut chars = pattern.chars().peekable();

    for step in 0.. {
        let digit = chars.next_if(char::is_ascii_digit);
        let letter = chars.next_if(|c| !c.is_ascii_digit());
        let value = digit.and_then(|d| d.to_digit(10)).unwrap_or(0);
        weights.push(rule.weight(value, step));
        match letter {
            Some(letter) => key.push(letter),
            None if digit.is_none() => break,
            None => {}
        }
    }

    (key, weights)
}
