//! waymark: a scroll-tracking table of contents for long-form articles.
//!
//! Content is parsed into a [`document::ContentTree`], headings are pulled out by
//! [`extract::extract_headings`], arranged into an [`hierarchy::Outline`], and followed as the
//! reader scrolls by [`toc::TocState`].
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod document;
pub mod error;
pub mod expansion;
pub mod extract;
pub mod formats;
pub mod heading;
pub mod hierarchy;
pub mod logging;
pub mod media;
pub mod schedule;
pub mod toc;
pub mod tracker;
pub mod ui;
pub mod watch;
