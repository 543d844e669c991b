//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! We look for the file given with `--config`, then a waymark.toml in the working directory, and
//! fall back to defaults. The threshold and offset constants of the table of contents live here
//! rather than in code.

use crate::error::{Error, Result};
use crate::extract::ExtractOptions;
use crate::toc::TocOptions;
use crate::tracker::ActiveThreshold;
use facet::Facet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "waymark.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from waymark.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 100)]
    /// Maximum line width when laying out the document.
    pub wrap_width: usize,
    #[facet(default = 32)]
    /// Width of the outline pane in columns.
    pub toc_width: u16,
    #[facet(default = vec![
        "md".to_string(),
        "markdown".to_string(),
        "html".to_string(),
        "htm".to_string(),
        "json".to_string(),
    ])]
    /// File suffixes accepted on the command line.
    pub file_extensions: Vec<String>,
    #[facet(default = 2.0)]
    /// Rows kept clear above a heading when jumping to it.
    pub scroll_offset: f64,
    #[facet(default = 0.333)]
    /// Fraction of the viewport a heading must scroll past to become active.
    pub active_threshold: f64,
    #[facet(default = vec!["留言板".to_string()])]
    /// Heading phrases excluded from the outline.
    pub denylist: Vec<String>,
    #[facet(default = vec!["comments".to_string()])]
    /// Class names or ids of containers whose headings are excluded.
    pub excluded_markers: Vec<String>,
    #[facet(default = 500)]
    /// Delay after loading before the first outline is built.
    pub settle_delay_ms: u64,
    #[facet(default = 300)]
    /// Quiet period after a content change before rebuilding.
    pub debounce_ms: u64,
    #[facet(default = String::new())]
    /// File receiving log output while the reader is open; empty disables logging.
    pub log_file: String,
}

impl Config {
    /// Load configuration from `path`, or from waymark.toml if present.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file cannot be read, if either file fails to
    /// parse, or if a value is out of range.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let contents = match path {
            Some(path) => fs::read_to_string(path)?,
            None => fs::read_to_string(CONFIG_FILE).unwrap_or_default(),
        };
        let config = Self::from_toml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration text, filling in defaults for missing keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this configuration.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Checks that values are usable.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        if !(self.active_threshold > 0.0 && self.active_threshold <= 1.0) {
            return Err(Error::Config(format!(
                "active_threshold must be in (0, 1], got {}",
                self.active_threshold
            )));
        }
        if self.wrap_width == 0 {
            return Err(Error::Config("wrap_width must be positive".to_string()));
        }
        if self.scroll_offset < 0.0 {
            return Err(Error::Config(format!(
                "scroll_offset must not be negative, got {}",
                self.scroll_offset
            )));
        }
        Ok(())
    }

    #[must_use]
    /// Table-of-contents settings derived from this configuration.
    pub fn toc_options(&self) -> TocOptions {
        TocOptions {
            extract: ExtractOptions {
                denylist: self.denylist.clone(),
                excluded_markers: self.excluded_markers.clone(),
            },
            threshold: ActiveThreshold {
                ratio: self.active_threshold,
            },
            scroll_offset: self.scroll_offset,
        }
    }

    #[must_use]
    /// Settle delay as a duration.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    /// Debounce window as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
