//! Content loader - lists blog posts and looks them up by slug

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

use super::{ContentError, ContentSource, FsSource, Post};
use crate::Folio;

/// Extensions recognized as markdown, in lookup order
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

lazy_static! {
    /// Slugs name a single file: no separators, no leading dot, no control characters
    static ref INVALID_SLUG: Regex = Regex::new(r"^\.|[/\\\x00-\x1f]").unwrap();
}

/// Loads blog posts from a content source.
///
/// Nothing is cached: every call goes back to the source.
pub struct BlogLoader<S> {
    source: S,
}

impl BlogLoader<FsSource> {
    /// Loader over a content directory on disk
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(FsSource::new(dir))
    }

    /// Loader over the site's configured content directory
    pub fn for_site(folio: &Folio) -> Self {
        Self::from_dir(&folio.content_dir)
    }
}

impl<S: ContentSource> BlogLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// All posts, newest first.
    ///
    /// "Newest" is decided by comparing the raw date strings, so dates only sort
    /// chronologically when they share a zero-padded format such as `2024-01-31`.
    /// Posts with equal dates keep the order of the source listing. Files that
    /// cannot be read or parsed are left out.
    pub fn list_posts(&self) -> Vec<Post> {
        let names = match self.source.entries() {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("Failed to list content: {}", e);
                return Vec::new();
            }
        };

        let mut posts: Vec<Post> = names
            .iter()
            .filter_map(|name| {
                let slug = slug_from_file_name(name)?;
                match self.load(name, slug) {
                    Ok(post) => Some(post),
                    Err(e) => {
                        tracing::warn!("Skipping post {:?}: {}", name, e);
                        None
                    }
                }
            })
            .collect();

        warn_shared_slugs(&posts);

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!("Loaded {} posts", posts.len());
        posts
    }

    /// Look up one post by slug, reading its file directly.
    ///
    /// Returns `None` for any failure: unknown slug, unreadable file or malformed
    /// front-matter alike.
    pub fn get_post(&self, slug: &str) -> Option<Post> {
        match self.try_get_post(slug) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::debug!("Post {:?} not available: {}", slug, e);
                None
            }
        }
    }

    fn try_get_post(&self, slug: &str) -> Result<Post, ContentError> {
        if !is_valid_slug(slug) {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }

        for ext in MARKDOWN_EXTENSIONS {
            let name = format!("{}.{}", slug, ext);
            match self.load(&name, slug) {
                Err(ContentError::NotFound(_)) => continue,
                result => return result,
            }
        }

        Err(ContentError::NotFound(slug.to_string()))
    }

    fn load(&self, name: &str, slug: &str) -> Result<Post, ContentError> {
        let source = self.source.read(name)?;
        Post::parse(slug, &source)
    }
}

fn warn_shared_slugs(posts: &[Post]) {
    let mut seen = HashSet::new();
    for post in posts {
        if !seen.insert(post.slug.as_str()) {
            tracing::warn!(
                "Several files share the slug {:?}; its page shows the .md one",
                post.slug
            );
        }
    }
}

/// Whether a slug can name a post file in the content directory
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !INVALID_SLUG.is_match(slug)
}

/// Check if a file name has a markdown extension
pub fn is_markdown_file(name: &str) -> bool {
    slug_from_file_name(name).is_some()
}

/// The slug for a markdown file name, or `None` if it is not markdown or its
/// stem could not be looked up again (hidden files such as `.draft.md`)
pub fn slug_from_file_name(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    if !is_valid_slug(stem) || !MARKDOWN_EXTENSIONS.contains(&ext) {
        return None;
    }
    Some(stem)
}
