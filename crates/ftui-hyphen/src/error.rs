use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HyphenError>;

#[derive(Debug, Error)]
pub enum HyphenError {
    /// Malformed or empty dictionary. No partial table is ever returned.
    #[error("dictionary format error{}: {message}", line_suffix(.line))]
    Format {
        line: Option<usize>,
        message: String,
    },

    #[error("no hyphenation dictionary found for language: {language}")]
    NotFound { language: String },

    /// Neither an explicit directory nor [`crate::DICTIONARIES_ENV`] was given.
    #[error("no dictionary directory configured: set {variable}")]
    MissingDirectory { variable: &'static str },

    #[error("I/O error{}: {source}", path_suffix(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },
}

impl HyphenError {
    #[must_use]
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            line: None,
            message: message.into(),
        }
    }

    /// Format error attributed to a 1-based line of the dictionary file.
    #[must_use]
    pub fn format_at(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line: Some(line),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(language: impl Into<String>) -> Self {
        Self::NotFound {
            language: language.into(),
        }
    }

    #[must_use]
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for HyphenError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|n| format!(" at line {n}")).unwrap_or_default()
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_display_with_line() {
        let err = HyphenError::format_at(3, "bad alternative");
        assert_eq!(
            err.to_string(),
            "dictionary format error at line 3: bad alternative"
        );
        assert!(err.is_format());
    }

    #[test]
    fn format_display_without_line() {
        let err = HyphenError::format("no patterns");
        assert_eq!(err.to_string(), "dictionary format error: no patterns");
    }

    #[test]
    fn not_found_display() {
        let err = HyphenError::not_found("xx_YY");
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "no hyphenation dictionary found for language: xx_YY"
        );
    }

    #[test]
    fn missing_directory_names_variable() {
        let err = HyphenError::MissingDirectory {
            variable: crate::DICTIONARIES_ENV,
        };
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "no dictionary directory configured: set FTUI_HYPHEN_DICTIONARIES"
        );
    }

    #[test]
    fn io_display_includes_path() {
        let err = HyphenError::io_at(
            "/nope/hyph_xx.dic",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "I/O error (/nope/hyph_xx.dic): missing");
    }
}
