//! Initialize a new portfolio site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::config::CONFIG_FILES;

const CONFIG_TEMPLATE: &str = r#"# Site
title: My Portfolio
description: Personal site and blog
language: en

# URL
url: http://example.com
root: /

# Directory
content_dir: content/blog
public_dir: public
static_dir: static
blog_dir: blog

# Writing
new_post_name: ':title.md'
highlight:
  theme: base16-ocean.dark
  line_number: false

# Home page
portfolio:
  name: Your Name
  title: Software Engineer
  bio: I build reliable systems and write about what I learn along the way.
  avatar: ''
  about: >-
    A short introduction: what you work on, what you care about and what you
    are looking for next.
  stats:
    experience: 3 years
    projects: 10
  skills:
    Languages: [Rust, TypeScript, SQL]
    Backend: [PostgreSQL, Redis, Kafka]
    Tooling: [Docker, Kubernetes, Git]
  experiences:
    - company: Example Corp
      position: Backend Engineer
      period: 2022 - present
      responsibilities:
        - Designed and operated the order processing service
      achievements:
        - Cut p99 latency by half
  projects:
    - name: Sample Project
      description: What it does and why it exists.
      tech: [Rust, Axum]
      highlights:
        - One thing worth pointing out
      github: https://github.com/you/sample
  social:
    github: https://github.com/you
    email: you@example.com
  resume_pdf_url: ''
"#;

const SAMPLE_POST: &str = r#"---
title: Hello World
date: {{ date }}
excerpt: The first post on this site.
category: Notes
tags: [hello]
---

Welcome! This post lives in `content/blog/hello-world.md`.

## Quick Start

### Create a new post

```bash
$ folio new "My New Post"
```

### Run server

```bash
$ folio server
```

### Generate static files

```bash
$ folio generate
```
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if let Some(existing) = CONFIG_FILES
        .iter()
        .map(|name| target_dir.join(name))
        .find(|path| path.exists())
    {
        bail!("A site already exists here: {:?}", existing);
    }

    let content_dir = target_dir.join("content/blog");
    fs::create_dir_all(&content_dir)?;
    fs::create_dir_all(target_dir.join("static"))?;

    fs::write(target_dir.join("_config.yml"), CONFIG_TEMPLATE)?;

    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    fs::write(
        content_dir.join("hello-world.md"),
        SAMPLE_POST.replace("{{ date }}", &date),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Folio;

    #[test]
    fn test_init_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "My Portfolio");
        assert_eq!(folio.config.portfolio.name, "Your Name");
        assert_eq!(
            folio.config.portfolio.skills.keys().collect::<Vec<_>>(),
            vec!["Languages", "Backend", "Tooling"]
        );
        assert!(folio.static_dir.is_dir());

        let posts = folio.loader().list_posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello-world");
        assert_eq!(posts[0].category.as_deref(), Some("Notes"));
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
