//! Layout parameters from query strings.
//!
//! Parses strings like `divisions=3&paper=a4&orientation=landscape` into
//! [`Settings`], which resolve to a validated [`PageSpec`](crate::PageSpec).
//! The CLI takes its layout argument in this form; anything that stores or
//! forwards a layout as text can too.
//!
//! # Example
//!
//! ```
//! use posterize::params;
//! use posterize::{PageOrientation, Paper, SplitAxis};
//!
//! let result = params::parse("d=3&paper=a4&o=landscape&split=h");
//! assert!(result.warnings.is_empty());
//!
//! let spec = result.settings.page_spec().expect("valid spec");
//! assert_eq!(spec.divisions, 3);
//! assert_eq!(spec.paper, Paper::A4);
//! assert_eq!(spec.orientation, PageOrientation::Landscape);
//! assert_eq!(spec.split_axis, SplitAxis::Horizontal);
//! ```
//!
//! Omitted keys fall back to the defaults: 4 divisions, portrait Letter
//! pages, vertical split, 1000 px long side.

mod parse;
pub mod settings;

pub use settings::Settings;

/// Result of parsing a layout query string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed settings; unset keys are `None`.
    pub settings: Settings,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

impl ParseResult {
    /// Warnings that mean a value the caller asked for was dropped.
    pub fn invalid_values(&self) -> impl Iterator<Item = &ParseWarning> {
        self.warnings
            .iter()
            .filter(|w| matches!(w, ParseWarning::ValueInvalid { .. }))
    }
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key is not a layout parameter.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey { key, value } => {
                write!(f, "duplicate key `{key}`, using `{value}`")
            }
            Self::KeyNotRecognized { key, value } => {
                write!(f, "unrecognized key `{key}={value}`")
            }
            Self::ValueInvalid { key, value, reason } => {
                write!(f, "invalid value `{value}` for `{key}`: {reason}")
            }
        }
    }
}

/// Parse a layout query string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let (settings, warnings) = parse::parse_query(query);
    ParseResult { settings, warnings }
}
