//! Parsed layout settings: the query-string view of a [`PageSpec`].

use crate::error::LayoutError;
use crate::export::{BlankPages, ExportOptions, Resampling};
use crate::orientation::{PageOrientation, Paper, SplitAxis};
use crate::plan::PageSpec;

/// Layout settings as parsed. `None` means the key was absent.
///
/// Produced by [`crate::params::parse()`], consumed by
/// [`page_spec()`](Self::page_spec) and [`export_options()`](Self::export_options).
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct Settings {
    /// Pages along the split axis (`divisions`, `d`, `pages`, `height`).
    pub divisions: Option<u32>,
    /// `orientation`/`o`, or the `portrait`/`landscape` toggles.
    pub orientation: Option<PageOrientation>,
    /// `paper`.
    pub paper: Option<Paper>,
    /// `split`/`axis`.
    pub split_axis: Option<SplitAxis>,
    /// `longside`/`long_side`.
    pub long_side: Option<u32>,
    /// `blank`.
    pub blank_pages: Option<BlankPages>,
    /// `filter`.
    pub resampling: Option<Resampling>,
}

impl Settings {
    /// Create empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve to a page spec, filling defaults, and validate it.
    pub fn page_spec(&self) -> Result<PageSpec, LayoutError> {
        let defaults = PageSpec::default();
        let spec = PageSpec {
            long_side: self.long_side.unwrap_or(defaults.long_side),
            paper: self.paper.unwrap_or(defaults.paper),
            orientation: self.orientation.unwrap_or(defaults.orientation),
            split_axis: self.split_axis.unwrap_or(defaults.split_axis),
            divisions: self.divisions.unwrap_or(defaults.divisions),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Export knobs, defaults filled.
    pub fn export_options(&self) -> ExportOptions {
        let defaults = ExportOptions::default();
        ExportOptions {
            resampling: self.resampling.unwrap_or(defaults.resampling),
            blank_pages: self.blank_pages.unwrap_or(defaults.blank_pages),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_give_defaults() {
        let spec = Settings::new().page_spec().unwrap();
        assert_eq!(spec, PageSpec::default());
        assert_eq!(spec.divisions, 4);
        assert_eq!(spec.long_side, 1000);
        assert_eq!(Settings::new().export_options(), ExportOptions::default());
    }

    #[test]
    fn zero_divisions_fail_validation() {
        let settings = Settings {
            divisions: Some(0),
            ..Settings::default()
        };
        assert_eq!(settings.page_spec(), Err(LayoutError::ZeroDivisions));
    }

    #[test]
    fn custom_paper_checked() {
        let settings = Settings {
            paper: Some(Paper::Custom(2.0)),
            ..Settings::default()
        };
        assert_eq!(settings.page_spec(), Err(LayoutError::InvalidPaperRatio));
    }
}
