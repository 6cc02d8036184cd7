//! Show a single post

use anyhow::Result;

use crate::content::Post;
use crate::Folio;

/// Print one post looked up by slug
pub fn run(folio: &Folio, slug: &str, json: bool) -> Result<()> {
    match folio.loader().get_post(slug) {
        Some(post) if json => println!("{}", serde_json::to_string_pretty(&post)?),
        Some(post) => print!("{}", format_post(&post)),
        None => println!("Post not found: {}", slug),
    }
    Ok(())
}

/// Metadata header followed by the markdown body
pub fn format_post(post: &Post) -> String {
    let mut out = format!("Title:    {}\nDate:     {}\n", post.title, post.date);
    if let Some(category) = &post.category {
        out.push_str(&format!("Category: {}\n", category));
    }
    if !post.tags.is_empty() {
        out.push_str(&format!("Tags:     {}\n", post.tags.join(", ")));
    }
    if !post.excerpt.is_empty() {
        out.push_str(&format!("Excerpt:  {}\n", post.excerpt));
    }
    out.push('\n');
    out.push_str(&post.content);
    out.push('\n');
    out
}
