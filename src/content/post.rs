//! Post model

use serde::{Deserialize, Serialize};

use super::{ContentError, FrontMatter};

/// A blog post, as read from one markdown file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// File name without extension; the lookup key and URL segment
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date exactly as written in the front-matter
    pub date: String,

    /// Short summary shown on listing cards
    pub excerpt: String,

    /// Optional category label
    pub category: Option<String>,

    /// Post tags, in declaration order
    pub tags: Vec<String>,

    /// Raw markdown body, front-matter removed
    pub content: String,
}

impl Post {
    /// Build a post from already-parsed front-matter and its body.
    ///
    /// Leading blank lines and trailing whitespace of the body are dropped.
    pub fn from_parts(slug: impl Into<String>, fm: FrontMatter, body: &str) -> Self {
        Self {
            slug: slug.into(),
            title: fm.title,
            date: fm.date,
            excerpt: fm.excerpt,
            category: fm.category,
            tags: fm.tags,
            content: body.trim_start_matches(['\n', '\r']).trim_end().to_string(),
        }
    }

    /// Parse a full source file
    pub fn parse(slug: impl Into<String>, source: &str) -> Result<Self, ContentError> {
        let (fm, body) = FrontMatter::parse(source)?;
        Ok(Self::from_parts(slug, fm, body))
    }

    /// The post listed right before this one (newer, in date-descending order)
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        pos.checked_sub(1).and_then(|i| posts.get(i))
    }

    /// The post listed right after this one (older, in date-descending order)
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        posts.get(pos + 1)
    }
}
