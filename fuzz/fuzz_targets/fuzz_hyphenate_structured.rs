#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use ftui_hyphen::{HyphenConfig, Hyphenator, load_table};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum FuzzLine {
    /// Letters with interleaved weights.
    Pattern(Vec<(Option<u8>, char)>),
    /// Nonstandard alternative appended to a pattern.
    Nonstandard {
        pattern: Vec<(Option<u8>, char)>,
        change: String,
        index: i8,
        cut: u8,
    },
    Comment(String),
}

fn pattern_text(steps: &[(Option<u8>, char)]) -> String {
    let mut out = String::new();
    for (digit, letter) in steps {
        if let Some(d) = digit {
            out.push(char::from(b'0' + d % 10));
        }
        if !letter.is_ascii_digit() && *letter != '\n' && *letter != '\r' {
            out.push(*letter);
        }
    }
    out
}

impl FuzzLine {
    fn to_line(&self) -> String {
        match self {
            FuzzLine::Pattern(steps) => pattern_text(steps),
            FuzzLine::Nonstandard {
                pattern,
                change,
                index,
                cut,
            } => {
                let change: String = change
                    .chars()
                    .filter(|c| !matches!(c, ',' | '\n' | '\r'))
                    .collect();
                format!("{}/{change}=,{index},{cut}", pattern_text(pattern))
            }
            FuzzLine::Comment(text) => format!("% {}", text.replace(['\n', '\r'], " ")),
        }
    }
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    lines: Vec<FuzzLine>,
    words: Vec<String>,
    left: u8,
    right: u8,
    width: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut dic = String::from("UTF-8\n");
    for line in input.lines.iter().take(256) {
        dic.push_str(&line.to_line());
        dic.push('\n');
    }
    let Ok(table) = load_table(dic.as_bytes()) else {
        return;
    };
    let config = HyphenConfig::default()
        .with_margins(usize::from(input.left % 8), usize::from(input.right % 8))
        .with_cache(false);
    let h = Hyphenator::with_config(Arc::new(table), config);

    for word in input.words.iter().take(16) {
        let positions = h.positions(word);
        let len = word.chars().count();
        for p in &positions {
            assert!(h.left() <= p.offset && p.offset + h.right() <= len);
        }
        assert_eq!(h.iterate(word).count(), positions.len());
        let _ = h.wrap(word, usize::from(input.width), "-");
        let _ = h.inserted(word, "\u{ad}");
    }
});
