//! Drop payload parsing.
//!
//! A drop carries either local files or text flavors. Text flavors resolve to
//! at most one remote URL, tried in order: HTML `<img src>`, URI list, then
//! plain text starting with `http`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

static IMG_SRC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<img\b[^>]*?\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
        .expect("invalid regex pattern")
});

/// Everything a drop event delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropSource {
    pub files: Vec<PathBuf>,
    pub html: Option<String>,
    pub uri_list: Option<String>,
    pub plain_text: Option<String>,
}

/// What a drop resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Files(Vec<PathBuf>),
    Url(String),
    Nothing,
}

impl DropSource {
    pub fn files(files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..Self::default()
        }
    }

    pub fn uri_list(uri_list: impl Into<String>) -> Self {
        Self {
            uri_list: Some(uri_list.into()),
            ..Self::default()
        }
    }

    pub fn plain_text(text: impl Into<String>) -> Self {
        Self {
            plain_text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Resolve by priority. Files win outright; otherwise the first text
    /// flavor that yields a URL.
    pub fn target(&self) -> DropTarget {
        if !self.files.is_empty() {
            return DropTarget::Files(self.files.clone());
        }

        self.html
            .as_deref()
            .and_then(first_img_src)
            .or_else(|| self.uri_list.as_deref().and_then(first_uri))
            .or_else(|| self.plain_text.as_deref().and_then(http_text))
            .map(DropTarget::Url)
            .unwrap_or(DropTarget::Nothing)
    }
}

/// `src` of the first `<img>` in an HTML fragment.
pub fn first_img_src(html: &str) -> Option<String> {
    let caps = IMG_SRC_RE.captures(html)?;
    let src = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?.as_str().trim();
    if src.is_empty() {
        return None;
    }
    Some(src.replace("&amp;", "&"))
}

/// First non-empty, non-comment line of a `text/uri-list` payload.
pub fn first_uri(uri_list: &str) -> Option<String> {
    uri_list
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}

/// First line of plain text, if the text starts with `http`.
pub fn http_text(text: &str) -> Option<String> {
    if !text.starts_with("http") {
        return None;
    }
    text.lines().next().map(|line| line.trim().to_string()).filter(|line| !line.is_empty())
}
