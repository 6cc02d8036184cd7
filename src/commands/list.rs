//! List site content

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;

use crate::content::Post;
use crate::Folio;

#[derive(Debug, Serialize)]
struct PostSummary<'a> {
    slug: &'a str,
    date: &'a str,
    title: &'a str,
}

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, json: bool) -> Result<()> {
    let posts = folio.loader().list_posts();

    match content_type {
        "post" | "posts" => {
            if json {
                let summaries: Vec<_> = posts
                    .iter()
                    .map(|p| PostSummary {
                        slug: &p.slug,
                        date: &p.date,
                        title: &p.title,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&summaries)?);
                return Ok(());
            }
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!("  {} - {} [{}]", post.date, post.title, post.slug);
            }
        }
        "tag" | "tags" => {
            let tags = count_tags(&posts);
            print_counts("Tags", &tags, json)?;
        }
        "category" | "categories" => {
            let categories = count_categories(&posts);
            print_counts("Categories", &categories, json)?;
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}

fn print_counts(heading: &str, counts: &IndexMap<String, usize>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(counts)?);
        return Ok(());
    }
    println!("{} ({}):", heading, counts.len());
    for (name, count) in counts {
        println!("  {} ({})", name, count);
    }
    Ok(())
}

/// Tag usage counts, most used first; ties keep first-seen order
pub fn count_tags(posts: &[Post]) -> IndexMap<String, usize> {
    tally(posts.iter().flat_map(|p| p.tags.iter()))
}

/// Category usage counts, most used first; posts without one are not counted
pub fn count_categories(posts: &[Post]) -> IndexMap<String, usize> {
    tally(posts.iter().filter_map(|p| p.category.as_ref()))
}

fn tally<'a>(names: impl Iterator<Item = &'a String>) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for name in names {
        *counts.entry(name.clone()).or_insert(0) += 1;
    }
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts
}
