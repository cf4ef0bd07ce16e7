//! Query string tokenizer and value parsers.
//!
//! Minimal percent-decoding and key-value extraction without external dependencies.

use super::ParseWarning;
use super::settings::Settings;
use crate::export::{BlankPages, Resampling};
use crate::orientation::{PageOrientation, Paper, SplitAxis};

/// Parse a layout query string into Settings + warnings.
pub(crate) fn parse_query(query: &str) -> (Settings, Vec<ParseWarning>) {
    let mut settings = Settings::new();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);

        dispatch_key(&key, &value, &mut settings, &mut warnings);
    }

    (settings, warnings)
}

fn dispatch_key(key: &str, value: &str, s: &mut Settings, warnings: &mut Vec<ParseWarning>) {
    let mut field = Field { key, value, warnings };
    match key {
        "divisions" | "d" | "pages" | "height" => field.set(
            &mut s.divisions,
            parse_u32(value),
            "divisions",
            "expected a whole number of pages",
        ),
        "orientation" | "o" => field.set(
            &mut s.orientation,
            parse_orientation(value),
            "orientation",
            "expected portrait|landscape",
        ),
        "portrait" => field.set(
            &mut s.orientation,
            parse_bool(value).map(PageOrientation::from_portrait),
            "portrait",
            "expected true|false|1|0|yes|no|on|off",
        ),
        "landscape" => field.set(
            &mut s.orientation,
            parse_bool(value).map(|b| PageOrientation::from_portrait(!b)),
            "landscape",
            "expected true|false|1|0|yes|no|on|off",
        ),
        "paper" => field.set(
            &mut s.paper,
            parse_paper(value),
            "paper",
            "expected letter|legal|a4, WxH, or a short/long ratio",
        ),
        "split" | "axis" => field.set(
            &mut s.split_axis,
            parse_axis(value),
            "split",
            "expected vertical|horizontal",
        ),
        "longside" | "long_side" => field.set(
            &mut s.long_side,
            parse_u32(value).filter(|&v| v > 0),
            "longside",
            "expected a positive pixel count",
        ),
        "blank" => field.set(
            &mut s.blank_pages,
            parse_blank(value),
            "blank",
            "expected keep|prune",
        ),
        "filter" => field.set(
            &mut s.resampling,
            value.parse::<Resampling>().ok(),
            "filter",
            "expected nearest|triangle|catmull-rom|lanczos3",
        ),
        _ => field.warnings.push(ParseWarning::KeyNotRecognized {
            key: String::from(key),
            value: String::from(value),
        }),
    }
}

/// The key/value pair being applied, and where its warnings go.
struct Field<'a> {
    key: &'a str,
    value: &'a str,
    warnings: &'a mut Vec<ParseWarning>,
}

impl Field<'_> {
    /// Set `slot`, warning on duplicate; warn instead when `parsed` is `None`.
    fn set<T>(
        &mut self,
        slot: &mut Option<T>,
        parsed: Option<T>,
        canonical: &'static str,
        reason: &'static str,
    ) {
        match parsed {
            Some(v) => {
                if slot.is_some() {
                    self.warnings.push(ParseWarning::DuplicateKey {
                        key: String::from(self.key),
                        value: String::from(self.value),
                    });
                }
                *slot = Some(v);
            }
            None => self.warnings.push(ParseWarning::ValueInvalid {
                key: canonical,
                value: String::from(self.value),
                reason,
            }),
        }
    }
}

// ---- Value parsers ----

fn parse_u32(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_orientation(s: &str) -> Option<PageOrientation> {
    match s.trim().to_ascii_lowercase().as_str() {
        "portrait" | "p" => Some(PageOrientation::Portrait),
        "landscape" | "l" => Some(PageOrientation::Landscape),
        _ => None,
    }
}

fn parse_axis(s: &str) -> Option<SplitAxis> {
    match s.trim().to_ascii_lowercase().as_str() {
        "vertical" | "v" | "height" => Some(SplitAxis::Vertical),
        "horizontal" | "h" | "width" => Some(SplitAxis::Horizontal),
        _ => None,
    }
}

fn parse_blank(s: &str) -> Option<BlankPages> {
    match s.trim().to_ascii_lowercase().as_str() {
        "keep" => Some(BlankPages::Keep),
        "prune" | "skip" => Some(BlankPages::Prune),
        _ => None,
    }
}

/// Named sizes, `WxH` in any unit (orientation-free), or a bare ratio.
///
/// A bare ratio is passed through unchecked; range errors surface from
/// validation so the message names the ratio, not the syntax.
fn parse_paper(s: &str) -> Option<Paper> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "letter" | "us-letter" => Some(Paper::Letter),
        "legal" | "us-legal" => Some(Paper::Legal),
        "a4" | "a3" | "a5" => Some(Paper::A4),
        other => match other.split_once('x') {
            Some((w, h)) => {
                let w: f64 = w.trim().parse().ok()?;
                let h: f64 = h.trim().parse().ok()?;
                if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
                    return None;
                }
                Some(Paper::Custom(w.min(h) / w.max(h)))
            }
            None => other.parse::<f64>().ok().map(Paper::Custom),
        },
    }
}

// ---- Query string tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
///
/// Malformed escapes pass through literally; invalid UTF-8 is replaced.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
