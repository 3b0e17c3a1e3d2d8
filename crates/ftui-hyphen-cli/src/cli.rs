use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ftui_hyphen::{DictionaryRegistry, HyphenConfig, Hyphenator};
use serde::Serialize;

use crate::error::{CliError, Result};

#[derive(Debug, Parser)]
#[command(
    name = "ftui-hyphen",
    about = "Hyphenate words with hunspell hyph_*.dic pattern dictionaries",
    version
)]
pub struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit JSON instead of plain text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the break offsets of each word.
    Positions(WordArgs),

    /// Print each word with hyphens inserted.
    Insert(InsertArgs),

    /// Print every head/tail split, longest head first.
    Iterate(WordArgs),

    /// Split a word so the head fits a width.
    Wrap(WrapArgs),

    /// List languages with an installed dictionary.
    Languages(DirArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DirArgs {
    /// Directory holding hyph_*.dic files [default: $FTUI_HYPHEN_DICTIONARIES].
    #[arg(long)]
    pub dictionaries: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct DictionaryArgs {
    /// Dictionary file; takes precedence over --lang.
    #[arg(short = 'd', long = "dict")]
    pub dict: Option<PathBuf>,

    /// Language tag, e.g. "de_DE" or "nl-NL"; falls back to shorter tags.
    #[arg(short, long)]
    pub lang: Option<String>,

    #[command(flatten)]
    pub dir: DirArgs,

    /// Minimum characters before the first break.
    #[arg(long, default_value_t = 2)]
    pub left: usize,

    /// Minimum characters after the last break.
    #[arg(long, default_value_t = 2)]
    pub right: usize,

    /// Re-read the dictionary and memoize nothing.
    #[arg(long = "no-cache")]
    pub no_cache: bool,
}

#[derive(Debug, Clone, Args)]
pub struct WordArgs {
    #[command(flatten)]
    pub dictionary: DictionaryArgs,

    #[arg(required = true)]
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct InsertArgs {
    #[command(flatten)]
    pub target: WordArgs,

    #[arg(long, default_value = "-")]
    pub hyphen: String,
}

#[derive(Debug, Clone, Args)]
pub struct WrapArgs {
    #[command(flatten)]
    pub dictionary: DictionaryArgs,

    pub word: String,

    /// Maximum head width in characters, hyphen included.
    #[arg(short, long)]
    pub width: usize,

    #[arg(long, default_value = "-")]
    pub hyphen: String,
}

impl DirArgs {
    fn registry(&self) -> Result<DictionaryRegistry> {
        let registry = match &self.dictionaries {
            Some(dir) => DictionaryRegistry::scan(dir)?,
            None => DictionaryRegistry::from_env()?,
        };
        Ok(registry)
    }
}

impl DictionaryArgs {
    fn config(&self) -> HyphenConfig {
        HyphenConfig::default()
            .with_margins(self.left, self.right)
            .with_cache(!self.no_cache)
    }

    fn hyphenator(&self) -> Result<Hyphenator> {
        if let Some(path) = &self.dict {
            return Ok(Hyphenator::from_path(path, self.config())?);
        }
        let lang = self
            .lang
            .as_deref()
            .ok_or_else(|| CliError::invalid("pass --dict <FILE> or --lang <TAG>"))?;
        Ok(Hyphenator::for_language(
            &self.dir.registry()?,
            lang,
            self.config(),
        )?)
    }
}

// ── Output records ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PositionsRecord<'a> {
    word: &'a str,
    positions: Vec<usize>,
}

#[derive(Debug, Serialize)]
struct InsertRecord<'a> {
    word: &'a str,
    hyphenated: String,
}

#[derive(Debug, Serialize)]
struct IterateRecord<'a> {
    word: &'a str,
    splits: Vec<(String, String)>,
}

#[derive(Debug, Serialize)]
struct WrapRecord<'a> {
    word: &'a str,
    width: usize,
    head: Option<String>,
    tail: Option<String>,
}

#[derive(Debug, Serialize)]
struct LanguageRecord<'a> {
    name: &'a str,
    path: String,
}

// ── Dispatch ────────────────────────────────────────────────────────────

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    crate::logging::init(cli.verbose);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(cli, &mut out)
}

/// Execute `cli`, writing results to `out`.
pub fn run_with(cli: Cli, out: &mut impl Write) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::Positions(args) => {
            let h = args.dictionary.hyphenator()?;
            let records: Vec<_> = args
                .words
                .iter()
                .map(|word| PositionsRecord {
                    word: word.as_str(),
                    positions: h.offsets(word),
                })
                .collect();
            if json {
                return write_json(out, &records);
            }
            for record in records {
                let offsets: Vec<String> =
                    record.positions.iter().map(ToString::to_string).collect();
                writeln!(out, "{}\t{}", record.word, offsets.join(" "))?;
            }
        }
        Commands::Insert(args) => {
            let h = args.target.dictionary.hyphenator()?;
            let records: Vec<_> = args
                .target
                .words
                .iter()
                .map(|word| InsertRecord {
                    word: word.as_str(),
                    hyphenated: h.inserted(word, &args.hyphen),
                })
                .collect();
            if json {
                return write_json(out, &records);
            }
            for record in records {
                writeln!(out, "{}", record.hyphenated)?;
            }
        }
        Commands::Iterate(args) => {
            let h = args.dictionary.hyphenator()?;
            let records: Vec<_> = args
                .words
                .iter()
                .map(|word| IterateRecord {
                    word: word.as_str(),
                    splits: h.iterate(word).collect(),
                })
                .collect();
            if json {
                return write_json(out, &records);
            }
            for record in records {
                for (head, tail) in record.splits {
                    writeln!(out, "{head} {tail}")?;
                }
            }
        }
        Commands::Wrap(args) => {
            let h = args.dictionary.hyphenator()?;
            let split = h.wrap(&args.word, args.width, &args.hyphen);
            if json {
                let (head, tail) = split.unzip();
                return write_json(
                    out,
                    &WrapRecord {
                        word: &args.word,
                        width: args.width,
                        head,
                        tail,
                    },
                );
            }
            match split {
                Some((head, tail)) => writeln!(out, "{head}\n{tail}")?,
                None => writeln!(out, "{}", args.word)?,
            }
        }
        Commands::Languages(args) => {
            let registry = args.registry()?;
            let mut records = Vec::with_capacity(registry.len());
            for name in registry.languages() {
                let path = registry.resolve_dictionary_path(name)?;
                records.push(LanguageRecord {
                    name,
                    path: path.display().to_string(),
                });
            }
            if json {
                return write_json(out, &records);
            }
            for record in records {
                writeln!(out, "{}\t{}", record.name, record.path)?;
            }
        }
    }
    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn dictionary_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hyph_nl_NL.dic"), "UTF-8\nt1t\n1g\n1p\n").unwrap();
        fs::write(dir.path().join("hyph_de_DE.dic"), "UTF-8\nc1k/k=k,1,2\n").unwrap();
        dir
    }

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args).map_err(|e| CliError::invalid(e.to_string()))?;
        let mut out = Vec::new();
        run_with(cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn insert_with_dict_file() {
        let dir = dictionary_dir();
        let dict = dir.path().join("hyph_nl_NL.dic");
        let out = run_args(&[
            "ftui-hyphen",
            "insert",
            "--dict",
            dict.to_str().unwrap(),
            "lettergrepen",
        ])
        .unwrap();
        assert_eq!(out, "let-ter-gre-pen\n");
    }

    #[test]
    fn positions_via_language_fallback() {
        let dir = dictionary_dir();
        let out = run_args(&[
            "ftui-hyphen",
            "positions",
            "--lang",
            "nl-BE",
            "--dictionaries",
            dir.path().to_str().unwrap(),
            "lettergrepen",
        ])
        .unwrap();
        assert_eq!(out, "lettergrepen\t3 6 9\n");
    }

    #[test]
    fn wrap_json() {
        let dir = dictionary_dir();
        let dict = dir.path().join("hyph_de_DE.dic");
        let out = run_args(&[
            "ftui-hyphen",
            "--json",
            "wrap",
            "--dict",
            dict.to_str().unwrap(),
            "--width",
            "4",
            "backen",
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["head"], "bak-");
        assert_eq!(value["tail"], "ken");
    }

    #[test]
    fn iterate_plain_text() {
        let dir = dictionary_dir();
        let dict = dir.path().join("hyph_nl_NL.dic");
        let out = run_args(&[
            "ftui-hyphen",
            "iterate",
            "--dict",
            dict.to_str().unwrap(),
            "lettergrepen",
        ])
        .unwrap();
        assert_eq!(out, "lettergre pen\nletter grepen\nlet tergrepen\n");
    }

    #[test]
    fn languages_listing() {
        let dir = dictionary_dir();
        let out = run_args(&[
            "ftui-hyphen",
            "languages",
            "--dictionaries",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        let names: Vec<&str> = out.lines().map(|l| l.split('\t').next().unwrap()).collect();
        assert_eq!(names, vec!["de", "de_DE", "nl", "nl_NL"]);
    }

    #[test]
    fn unknown_language_is_not_found() {
        let dir = dictionary_dir();
        let err = run_args(&[
            "ftui-hyphen",
            "insert",
            "--lang",
            "fr_FR",
            "--dictionaries",
            dir.path().to_str().unwrap(),
            "bonjour",
        ])
        .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_dictionary_source_is_invalid() {
        let err = run_args(&["ftui-hyphen", "insert", "--dict-less", "x"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let cli = Cli::try_parse_from(["ftui-hyphen", "insert", "word"]).unwrap();
        let err = run_with(cli, &mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn margins_parse() {
        let cli = Cli::try_parse_from([
            "ftui-hyphen",
            "positions",
            "--left",
            "1",
            "--right",
            "3",
            "--no-cache",
            "w",
        ])
        .unwrap();
        let Commands::Positions(args) = cli.command else {
            panic!("expected positions");
        };
        let config = args.dictionary.config();
        assert_eq!((config.left, config.right, config.cache), (1, 3, false));
    }
}
