//! Content module - blog posts, front-matter and markdown rendering

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod source;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use loader::BlogLoader;
pub use markdown::MarkdownRenderer;
pub use post::Post;
pub use source::{ContentSource, FsSource, MemorySource};
