//! Errors raised while reading blog content

use thiserror::Error;

/// Why a post could not be produced.
///
/// The loader never hands these to its callers (a failed lookup is just `None`),
/// but keeps them around long enough to log the reason.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed front-matter: {0}")]
    FrontMatter(String),

    #[error("no such entry: {0}")]
    NotFound(String),

    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),
}

impl ContentError {
    pub(crate) fn io(name: impl Into<String>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return ContentError::NotFound(name.into());
        }
        ContentError::Io {
            name: name.into(),
            source,
        }
    }
}
