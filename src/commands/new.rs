//! Create a new blog post

use anyhow::{bail, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::loader::{is_markdown_file, is_valid_slug};
use crate::Folio;

/// Front-matter scaffold for new posts
const POST_SCAFFOLD: &str = r#"---
title: {{ title }}
date: {{ date }}
excerpt: ''
category:
tags: []
---

"#;

/// Create a post file in the content directory and return its path.
///
/// The file name comes from `new_post_name` with `:title` replaced by the slug,
/// which is `slug` when given and the slugified title otherwise.
pub fn create_post(folio: &Folio, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let slug = match slug {
        Some(s) => s.trim().to_string(),
        None => slug::slugify(title),
    };
    if !is_valid_slug(&slug) {
        bail!("Invalid slug {:?} for post {:?}", slug, title);
    }

    let filename = folio
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string());

    if !is_markdown_file(&filename) {
        tracing::warn!(
            "{:?} is not a markdown file name, it will not be listed",
            filename
        );
    }

    fs::create_dir_all(&folio.content_dir)?;
    let file_path = folio.content_dir.join(&filename);
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let content = POST_SCAFFOLD
        .replace("{{ title }}", &yaml_string(title))
        .replace("{{ date }}", &now.format("%Y-%m-%d").to_string());

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a title so YAML reads it back as the same string
fn yaml_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn folio(dir: &tempfile::TempDir) -> Folio {
        Folio::new(dir.path()).unwrap()
    }

    #[test]
    fn test_create_post_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let folio = folio(&dir);

        let path = create_post(&folio, "Hello: World's End", None).unwrap();
        assert_eq!(path, folio.content_dir.join("hello-world-s-end.md"));

        let post = folio.loader().get_post("hello-world-s-end").unwrap();
        assert_eq!(post.title, "Hello: World's End");
        assert_eq!(post.date, chrono::Local::now().format("%Y-%m-%d").to_string());
        assert_eq!(post.category, None);
        assert!(post.tags.is_empty());
        assert_eq!(post.content, "");
    }

    #[test]
    fn test_create_post_with_slug() {
        let dir = tempfile::tempdir().unwrap();
        let folio = folio(&dir);

        let path = create_post(&folio, "你好", Some("ni-hao")).unwrap();
        assert_eq!(path.file_name().unwrap(), "ni-hao.md");
        assert!(create_post(&folio, "x", Some("../escape")).is_err());
    }

    #[test]
    fn test_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let folio = folio(&dir);

        create_post(&folio, "Same", None).unwrap();
        assert!(create_post(&folio, "Same", None).is_err());
    }

    #[test]
    fn test_new_post_name_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.new_post_name = ":year-:title.md".to_string();
        let folio = Folio::with_config(dir.path().to_path_buf(), config, None);

        let path = create_post(&folio, "Notes", None).unwrap();
        let expected = format!("{}-notes.md", chrono::Local::now().format("%Y"));
        assert_eq!(path.file_name().unwrap().to_string_lossy(), expected);
    }
}
