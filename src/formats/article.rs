//! Article payloads exported from a headless CMS.
//!
//! A payload is JSON carrying a title, a body in markdown or HTML, and optional cover image,
//! tags, and categories. Both flat objects and `data`/`attributes` envelopes are accepted, and
//! the media and taxonomy fields go through [`crate::media`] so the rest of the crate only ever
//! sees decoded values.

use crate::document::ContentTree;
use crate::error::Result;
use crate::formats::html::HtmlFormat;
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use crate::media::{decode_media_url, decode_names, MediaUrl};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize)]
struct RawArticle {
    #[serde(default)]
    title: String,
    #[serde(default, alias = "body", alias = "markdown")]
    content: String,
    #[serde(default, alias = "image", alias = "coverImage")]
    cover: Value,
    #[serde(default)]
    tags: Value,
    #[serde(default)]
    categories: Value,
}

#[derive(Deserialize)]
struct Attributes {
    attributes: RawArticle,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    Attributes { data: Attributes },
    Data { data: RawArticle },
    Flat(RawArticle),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Decoded article ready for rendering.
pub struct Article {
    /// Article title.
    pub title: String,
    /// Body source, markdown or HTML.
    pub body: String,
    /// Cover image.
    pub cover: MediaUrl,
    /// Tag names.
    pub tags: Vec<String>,
    /// Category names.
    pub categories: Vec<String>,
}

impl Article {
    /// Decodes an article payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid JSON or is not an object.
    pub fn from_json(source: &str) -> Result<Self> {
        let raw = match serde_json::from_str::<Envelope>(source)? {
            Envelope::Attributes { data } => data.attributes,
            Envelope::Data { data } | Envelope::Flat(data) => data,
        };
        Ok(Self {
            title: raw.title.trim().to_string(),
            body: raw.content,
            cover: decode_media_url(&raw.cover),
            tags: decode_names(&raw.tags),
            categories: decode_names(&raw.categories),
        })
    }

    #[must_use]
    /// True when the body looks like HTML rather than markdown.
    pub fn body_is_html(&self) -> bool {
        self.body.trim_start().starts_with('<')
    }

    /// Renders the article into a content tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the markdown body fails to parse.
    pub fn to_content(&self) -> Result<ContentTree> {
        let mut content = ContentTree::new();
        let root = content.root();

        let header = content.append_element(root, "header");
        if !self.title.is_empty() {
            let h1 = content.append_element(header, "h1");
            content.append_text(h1, &self.title);
        }
        if let Some(url) = self.cover.as_str() {
            let p = content.append_element(header, "p");
            content.append_text(p, &format!("Cover: {url}"));
        }
        for (label, names) in [("Tags", &self.tags), ("Categories", &self.categories)] {
            if !names.is_empty() {
                let p = content.append_element(header, "p");
                content.append_text(p, &format!("{label}: {}", names.join(", ")));
            }
        }

        let body = if self.body_is_html() {
            HtmlFormat.parse_fragment(&self.body)
        } else {
            MarkdownFormat.parse(&self.body)?
        };
        let section = content.append_element(root, "section");
        content.graft(section, &body);
        Ok(content)
    }
}

/// CMS article payload reader.
pub struct ArticleFormat;

impl Format for ArticleFormat {
    fn name(&self) -> &'static str {
        "article"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn parse(&self, source: &str) -> Result<ContentTree> {
        Article::from_json(source)?.to_content()
    }
}

#[cfg(test)]
#[path = "../tests/article.rs"]
mod tests;
